//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration when it needs it
//! 2. Does its work through the library layers
//! 3. Writes output and returns the process exit code
//!
//! Handlers return `anyhow::Result<ExitCode>`; `main` reports errors and
//! exits with status 1.

mod completion;
mod launch;
mod list;
mod view;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use launch::launch;
pub use list::list;
pub use view::view;

use std::process::ExitCode;

use anyhow::Result;

use super::args::Command;
use super::Context;

/// Dispatch a subcommand to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<ExitCode> {
    match command {
        Command::View { view: name, dump } => view::view(ctx, &name, dump.as_deref()),
        Command::List => list::list(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}
