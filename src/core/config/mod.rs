//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! dmviz has two configuration scopes:
//! - **Global**: User-level settings
//! - **Project**: A `.dmviz.toml` next to the dumps being inspected
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. An explicit path (`--config`)
//! 2. `$DMVIZ_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/dmviz/config.toml`
//! 4. `~/.dmviz/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use dmviz::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(None, Some(Path::new("."))).unwrap();
//! let config = result.config;
//!
//! println!("Root token: {}", config.root_token());
//! println!("Wide layout from {} columns", config.wide_threshold());
//! ```

pub mod schema;

pub use schema::{FileConfig, LayoutConfig, WalkConfig};

use crate::layout::OverflowPolicy;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default namespace token of TR-181 dumps.
pub const DEFAULT_ROOT_TOKEN: &str = "Device";

/// Dump file used when none is given.
pub const DEFAULT_DUMP: &str = "DM.txt";

/// Terminal width at which views switch to the wide layout.
pub const DEFAULT_WIDE_THRESHOLD: usize = 90;

/// Terminal width below which a warning is printed.
pub const DEFAULT_RECOMMENDED_WIDTH: usize = 80;

/// Default cap on interface stack depth.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Project-level config file name.
pub const PROJECT_FILE: &str = ".dmviz.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Files that contributed, global first.
    pub sources: Vec<PathBuf>,
}

/// Merged configuration from all sources.
///
/// Accessors apply defaults, so callers never see a missing value.
#[derive(Debug, Clone, Default)]
pub struct Config {
    file: FileConfig,
}

impl Config {
    /// Build a config from an already merged file config.
    pub fn from_file(file: FileConfig) -> Result<Self, ConfigError> {
        file.validate()?;
        Ok(Config { file })
    }

    /// Load configuration from default locations.
    ///
    /// `explicit` takes the place of the global search when given and must
    /// exist. If `project_dir` is provided, `.dmviz.toml` there is layered on
    /// top.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// holds invalid values. Missing files are not an error.
    pub fn load(
        explicit: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut sources = Vec::new();

        let global = match explicit {
            Some(path) => Some((Self::read_file(path)?, path.to_path_buf())),
            None => Self::load_global()?,
        };
        let mut file = match global {
            Some((config, path)) => {
                config.validate()?;
                sources.push(path);
                config
            }
            None => FileConfig::default(),
        };

        if let Some(dir) = project_dir {
            let path = dir.join(PROJECT_FILE);
            if path.exists() {
                let project = Self::read_file(&path)?;
                project.validate()?;
                file = file.merged_with(&project);
                sources.push(path);
            }
        }

        Ok(ConfigLoadResult {
            config: Config::from_file(file)?,
            sources,
        })
    }

    /// Load global configuration from standard locations.
    fn load_global() -> Result<Option<(FileConfig, PathBuf)>, ConfigError> {
        // 1. Check $DMVIZ_CONFIG
        if let Ok(path) = std::env::var("DMVIZ_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_file(&path)?;
                return Ok(Some((config, path)));
            }
        }

        // 2. Check $XDG_CONFIG_HOME/dmviz/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("dmviz/config.toml");
            if path.exists() {
                let config = Self::read_file(&path)?;
                return Ok(Some((config, path)));
            }
        }

        // 3. Check ~/.dmviz/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".dmviz/config.toml");
            if path.exists() {
                let config = Self::read_file(&path)?;
                return Ok(Some((config, path)));
            }
        }

        Ok(None)
    }

    /// Read and parse one config file.
    fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Namespace token dump paths are rooted at.
    ///
    /// Defaults to "Device".
    pub fn root_token(&self) -> &str {
        self.file
            .root_token
            .as_deref()
            .unwrap_or(DEFAULT_ROOT_TOKEN)
    }

    /// Dump read when no path is given.
    ///
    /// Defaults to "DM.txt" in the working directory.
    pub fn default_dump(&self) -> PathBuf {
        PathBuf::from(self.file.default_dump.as_deref().unwrap_or(DEFAULT_DUMP))
    }

    /// Width at which views switch from compact to wide layout.
    pub fn wide_threshold(&self) -> usize {
        self.layout()
            .and_then(|l| l.wide_threshold)
            .unwrap_or(DEFAULT_WIDE_THRESHOLD)
    }

    /// Width below which a warning is printed.
    pub fn recommended_width(&self) -> usize {
        self.layout()
            .and_then(|l| l.recommended_width)
            .unwrap_or(DEFAULT_RECOMMENDED_WIDTH)
    }

    /// What tables do with cells wider than their planned column.
    ///
    /// Defaults to showing everything.
    pub fn overflow(&self) -> OverflowPolicy {
        match self.layout().and_then(|l| l.overflow.as_deref()) {
            Some("truncate") => OverflowPolicy::Truncate,
            _ => OverflowPolicy::ShowAll,
        }
    }

    /// Deepest interface stack level that is expanded.
    pub fn max_depth(&self) -> usize {
        self.file
            .walk
            .as_ref()
            .and_then(|w| w.max_depth)
            .unwrap_or(DEFAULT_MAX_DEPTH)
    }

    fn layout(&self) -> Option<&LayoutConfig> {
        self.file.layout.as_ref()
    }
}
