//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--width <COLS>`: Override the detected terminal width
//! - `--config <FILE>`: Use this config file instead of the global search
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//!
//! Without a subcommand, `dmviz [VIEW] [DUMP]` runs the launcher.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dmviz - Terminal diagrams for TR-181 data-model dumps
#[derive(Parser, Debug)]
#[command(name = "dmviz")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    # Pick a view and a dump interactively
    dmviz

    # Run a view by unique prefix against a dump
    dmviz show_fire DM.txt

    # Pick a view interactively for a given dump
    dmviz router-dump.txt

    # Run a view in-process at a fixed width
    dmviz --width 120 view show_logical_stack DM.txt")]
pub struct Cli {
    /// Override the detected terminal width
    #[arg(long, global = true, value_name = "COLS", value_parser = clap::value_parser!(u16).range(1..))]
    pub width: Option<u16>,

    /// Config file to use instead of the global search
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies no prompts
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// View name or unique prefix; a dump path is also accepted here
    #[arg(value_name = "VIEW")]
    pub view: Option<String>,

    /// Data-model dump to read
    #[arg(value_name = "DUMP")]
    pub dump: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render one view in this process
    #[command(
        name = "view",
        long_about = "Render one view of a data-model dump in this process.\n\n\
            The view is named exactly or by a unique prefix. Without a dump path \
            the configured default (DM.txt) is read.",
        after_help = "\
EXAMPLES:
    dmviz view show_firewall_rules DM.txt
    dmviz view show_wan --width 80"
    )]
    View {
        /// View name or unique prefix
        view: String,

        /// Data-model dump to read
        dump: Option<PathBuf>,
    },

    /// List available views
    #[command(name = "list")]
    List,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
INSTALLATION:
    # Bash
    dmviz completion bash > ~/.local/share/bash-completion/completions/dmviz

    # Zsh
    dmviz completion zsh > ~/.zfunc/_dmviz

    # Fish
    dmviz completion fish > ~/.config/fish/completions/dmviz.fish

    # PowerShell
    dmviz completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
