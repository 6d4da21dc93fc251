//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Locations
//!
//! The global file is found at (in order of precedence):
//! 1. `--config <file>`
//! 2. `$DMVIZ_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/dmviz/config.toml`
//! 4. `~/.dmviz/config.toml`
//!
//! A project file `.dmviz.toml` in the working directory overrides it.
//!
//! # Validation
//!
//! Values are validated after parsing so that a bad root token or a zero
//! threshold is reported before any dump is read.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// One configuration file.
///
/// Both the global file and the project file use this schema; every field
/// is optional so that the project file can override a single value.
///
/// # Example
///
/// ```toml
/// root_token = "Device"
/// default_dump = "DM.txt"
///
/// [layout]
/// wide_threshold = 90
/// recommended_width = 80
/// overflow = "show-all"
///
/// [walk]
/// max_depth = 32
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Namespace token every dump path starts with
    pub root_token: Option<String>,

    /// Dump used when no path is given
    pub default_dump: Option<String>,

    /// Layout settings
    pub layout: Option<LayoutConfig>,

    /// Reference walk settings
    pub walk: Option<WalkConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(token) = &self.root_token {
            validate_root_token(token)?;
        }

        if let Some(dump) = &self.default_dump {
            if dump.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "default_dump cannot be empty".to_string(),
                ));
            }
        }

        if let Some(layout) = &self.layout {
            layout.validate()?;
        }

        if let Some(walk) = &self.walk {
            walk.validate()?;
        }

        Ok(())
    }

    /// Overlay `other` on top of `self`, field by field.
    pub fn merged_with(&self, other: &FileConfig) -> FileConfig {
        FileConfig {
            root_token: other.root_token.clone().or_else(|| self.root_token.clone()),
            default_dump: other
                .default_dump
                .clone()
                .or_else(|| self.default_dump.clone()),
            layout: match (&self.layout, &other.layout) {
                (Some(base), Some(top)) => Some(base.merged_with(top)),
                (base, top) => top.clone().or_else(|| base.clone()),
            },
            walk: other.walk.clone().or_else(|| self.walk.clone()),
        }
    }
}

/// A root token must be a single path component.
fn validate_root_token(token: &str) -> Result<(), ConfigError> {
    if token.is_empty() {
        return Err(ConfigError::InvalidValue(
            "root_token cannot be empty".to_string(),
        ));
    }
    if token
        .chars()
        .any(|c| c == '.' || c == '=' || c.is_whitespace())
    {
        return Err(ConfigError::InvalidValue(format!(
            "invalid root_token '{}': must not contain '.', '=' or whitespace",
            token
        )));
    }
    Ok(())
}

/// Layout settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Terminal width at which views switch from compact to wide
    pub wide_threshold: Option<usize>,

    /// Width below which a warning is printed
    pub recommended_width: Option<usize>,

    /// "show-all" or "truncate"
    pub overflow: Option<String>,
}

impl LayoutConfig {
    /// Valid overflow policies.
    pub const VALID_OVERFLOW: &'static [&'static str] = &["show-all", "truncate"];

    /// Validate the layout configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wide_threshold == Some(0) {
            return Err(ConfigError::InvalidValue(
                "layout.wide_threshold must be greater than 0".to_string(),
            ));
        }
        if self.recommended_width == Some(0) {
            return Err(ConfigError::InvalidValue(
                "layout.recommended_width must be greater than 0".to_string(),
            ));
        }
        if let Some(overflow) = &self.overflow {
            if !Self::VALID_OVERFLOW.contains(&overflow.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid overflow policy '{}', must be one of: {}",
                    overflow,
                    Self::VALID_OVERFLOW.join(", ")
                )));
            }
        }
        Ok(())
    }

    fn merged_with(&self, other: &LayoutConfig) -> LayoutConfig {
        LayoutConfig {
            wide_threshold: other.wide_threshold.or(self.wide_threshold),
            recommended_width: other.recommended_width.or(self.recommended_width),
            overflow: other.overflow.clone().or_else(|| self.overflow.clone()),
        }
    }
}

/// Reference walk settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WalkConfig {
    /// Deepest level of an interface stack that is expanded
    pub max_depth: Option<usize>,
}

impl WalkConfig {
    /// Validate the walk configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == Some(0) {
            return Err(ConfigError::InvalidValue(
                "walk.max_depth must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FileConfig::default();
        assert!(config.root_token.is_none());
        assert!(config.layout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn roundtrip() {
        let config = FileConfig {
            root_token: Some("Device".to_string()),
            default_dump: Some("dumps/DM.txt".to_string()),
            layout: Some(LayoutConfig {
                wide_threshold: Some(100),
                recommended_width: Some(80),
                overflow: Some("truncate".to_string()),
            }),
            walk: Some(WalkConfig {
                max_depth: Some(8),
            }),
        };

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: FileConfig = toml::from_str(&toml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn reject_unknown_fields() {
        let toml = r#"
            root_token = "Device"
            colour = true
        "#;

        let result: Result<FileConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn root_token_with_dot_rejected() {
        let config = FileConfig {
            root_token: Some("Device.X".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_root_token_rejected() {
        let config = FileConfig {
            root_token: Some(String::new()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_threshold_rejected() {
        let config = FileConfig {
            layout: Some(LayoutConfig {
                wide_threshold: Some(0),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_overflow_rejected() {
        let layout = LayoutConfig {
            overflow: Some("wrap".to_string()),
            ..Default::default()
        };
        assert!(layout.validate().is_err());
    }

    #[test]
    fn zero_max_depth_rejected() {
        let walk = WalkConfig { max_depth: Some(0) };
        assert!(walk.validate().is_err());
    }

    #[test]
    fn merge_prefers_overlay_per_field() {
        let global = FileConfig {
            root_token: Some("Device".to_string()),
            layout: Some(LayoutConfig {
                wide_threshold: Some(100),
                overflow: Some("truncate".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let project = FileConfig {
            layout: Some(LayoutConfig {
                wide_threshold: Some(120),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = global.merged_with(&project);
        assert_eq!(merged.root_token.as_deref(), Some("Device"));
        let layout = merged.layout.unwrap();
        assert_eq!(layout.wide_threshold, Some(120));
        assert_eq!(layout.overflow.as_deref(), Some("truncate"));
    }
}
