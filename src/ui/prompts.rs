//! ui::prompts
//!
//! Interactive line prompts.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! callers must fall back to a default or fail with a usage error. Line
//! editing goes through rustyline; the path prompt completes file names on
//! Tab.

use std::io::IsTerminal;

use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{DefaultEditor, Editor, Helper};
use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("terminal error: {0}")]
    Terminal(String),
}

impl From<ReadlineError> for PromptError {
    fn from(err: ReadlineError) -> Self {
        match err {
            ReadlineError::Interrupted | ReadlineError::Eof => PromptError::Cancelled,
            other => PromptError::Terminal(other.to_string()),
        }
    }
}

/// True when stdin and stdout are both attached to a terminal.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Prompt for one line of text, trimmed.
pub fn input(message: &str, interactive: bool) -> Result<String, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }
    let mut editor = DefaultEditor::new()?;
    let line = editor.readline(message)?;
    Ok(line.trim().to_string())
}

/// Tab completion of file system paths.
struct PathHelper {
    completer: FilenameCompleter,
}

impl Completer for PathHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Hinter for PathHelper {
    type Hint = String;
}

impl Highlighter for PathHelper {}

impl Validator for PathHelper {}

impl Helper for PathHelper {}

/// Prompt for a file path with Tab completion, trimmed.
///
/// Empty input returns an empty string; the caller applies its default.
pub fn path(message: &str, interactive: bool) -> Result<String, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }
    let mut editor: Editor<PathHelper, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(PathHelper {
        completer: FilenameCompleter::new(),
    }));
    let line = editor.readline(message)?;
    Ok(line.trim().to_string())
}
