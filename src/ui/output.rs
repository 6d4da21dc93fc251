//! ui::output
//!
//! Diagnostic output on the terminal.
//!
//! # Design
//!
//! Rendered diagrams go straight to stdout. Everything else (progress lines,
//! warnings, debug traces, errors) goes through these helpers so that
//! `--quiet` and `--debug` behave the same in every command. Warnings and
//! debug lines go to stderr and never mix with a diagram piped elsewhere.

use std::fmt::Display;
use std::io::{self, Write};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Diagrams and errors only
    Quiet,
    /// Standard output
    #[default]
    Normal,
    /// Standard output plus `[debug]` traces
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags. `--quiet` wins over `--debug`.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Write rendered text to stdout as is.
///
/// A closed pipe (`dmviz ... | head`) is not an error.
pub fn emit(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    match stdout.write_all(text.as_bytes()).and_then(|()| stdout.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// Format a list of items, one per line.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_debug() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn format_list_prefixes_each_line() {
        assert_eq!(format_list(&["a", "b"], "  "), "  a\n  b");
        assert_eq!(format_list::<&str>(&[], "  "), "");
    }
}
