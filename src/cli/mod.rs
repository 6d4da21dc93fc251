//! cli
//!
//! Command-line interface layer for dmviz.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and detect the terminal width
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Views render to strings and never touch the
//! terminal; handlers here decide where the text goes and turn failures into
//! exit codes. The launcher re-runs this binary with the `view` subcommand,
//! so every view runs the same way whether it was picked interactively or
//! named on the command line.

pub mod args;
pub mod commands;
pub mod launcher;

pub use args::{Cli, Shell};

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;

use crate::core::config::Config;
use crate::ui::output::{self, Verbosity};
use crate::ui::prompts;

/// Settings shared by all commands, taken from the global flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Terminal width override.
    pub width: Option<usize>,
    /// Explicit config file.
    pub config_path: Option<PathBuf>,
    /// Enable debug output.
    pub debug: bool,
    /// Minimal output.
    pub quiet: bool,
    /// Prompts allowed.
    pub interactive: bool,
}

impl Context {
    /// Verbosity for the output helpers.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// Load configuration: the explicit file or the global search, with the
    /// project file in the working directory on top.
    pub fn load_config(&self) -> Result<Config> {
        let cwd = std::env::current_dir().ok();
        let loaded = Config::load(self.config_path.as_deref(), cwd.as_deref())?;

        let verbosity = self.verbosity();
        if loaded.sources.is_empty() {
            output::debug("config: built-in defaults", verbosity);
        }
        for source in &loaded.sources {
            output::debug(format!("config: {}", source.display()), verbosity);
        }
        Ok(loaded.config)
    }

    /// Global flags to hand on to a child process of this binary.
    pub fn forwarded_flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        if let Some(width) = self.width {
            flags.push("--width".to_string());
            flags.push(width.to_string());
        }
        if let Some(path) = &self.config_path {
            flags.push("--config".to_string());
            flags.push(path.display().to_string());
        }
        if self.debug {
            flags.push("--debug".to_string());
        }
        if self.quiet {
            flags.push("--quiet".to_string());
        }
        flags
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse_args();

    let ctx = Context {
        width: cli.width.map(usize::from),
        config_path: cli.config.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        interactive: !cli.quiet && prompts::is_interactive(),
    };

    match cli.command {
        Some(command) => commands::dispatch(command, &ctx),
        None => commands::launch(&ctx, cli.view.as_deref(), cli.dump.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::Command;

    #[test]
    fn forwarded_flags_round_trip_through_parser() {
        let ctx = Context {
            width: Some(100),
            config_path: Some(PathBuf::from("/tmp/dmviz.toml")),
            debug: true,
            quiet: false,
            interactive: false,
        };
        let mut argv = vec!["dmviz".to_string()];
        argv.extend(ctx.forwarded_flags());
        argv.push("list".to_string());

        let cli = <Cli as clap::Parser>::try_parse_from(argv).unwrap();
        assert_eq!(cli.width, Some(100));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/dmviz.toml")));
        assert!(cli.debug);
        assert!(!cli.quiet);
        assert!(cli.view.is_none());
        assert!(matches!(cli.command, Some(Command::List)));
    }

    #[test]
    fn forwarded_flags_reach_view_subcommand() {
        let ctx = Context {
            width: Some(60),
            quiet: true,
            ..Context::default()
        };
        let mut argv = vec!["dmviz".to_string()];
        argv.extend(ctx.forwarded_flags());
        argv.extend(["view", "show_firewall_rules", "DM.txt"].map(String::from));

        let cli = <Cli as clap::Parser>::try_parse_from(argv).unwrap();
        assert_eq!(cli.width, Some(60));
        assert!(cli.quiet);
        match cli.command {
            Some(Command::View { view, dump }) => {
                assert_eq!(view, "show_firewall_rules");
                assert_eq!(dump, Some(PathBuf::from("DM.txt")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn no_flags_by_default() {
        assert!(Context::default().forwarded_flags().is_empty());
    }
}
