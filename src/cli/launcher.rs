//! cli::launcher
//!
//! View resolution and argument interpretation for the launcher.
//!
//! # Resolution
//!
//! A view argument resolves in two steps:
//!
//! 1. Exact name, also accepting `-` in place of `_`.
//! 2. Case-insensitive prefix of the full name or of the name without its
//!    `show_` prefix. Only a unique match resolves.
//!
//! Nothing here touches the terminal; the launch command does the prompting.

use std::path::PathBuf;

use thiserror::Error;

use crate::ui::output::format_list;
use crate::ui::prompts::PromptError;
use crate::views::VIEW_PREFIX;

/// Errors from the launcher.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("unknown view '{0}'")]
    UnknownView(String),

    #[error("'{input}' matches several views: {}", .matches.join(", "))]
    AmbiguousView { input: String, matches: Vec<String> },

    #[error("unexpected argument '{0}' after the dump path")]
    UnexpectedArgument(String),

    #[error("no view given and not running interactively")]
    NoViewSelected,

    #[error("failed to start view process: {0}")]
    Spawn(#[source] std::io::Error),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

impl LaunchError {
    /// Usage errors exit with status 2 and print the view list.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            LaunchError::UnknownView(_)
                | LaunchError::AmbiguousView { .. }
                | LaunchError::UnexpectedArgument(_)
                | LaunchError::NoViewSelected
        )
    }
}

/// Outcome of resolving a view argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Exactly one view.
    Found(&'a str),
    /// Several views share the prefix.
    Ambiguous(Vec<&'a str>),
    /// No view matches.
    NotFound,
}

/// Resolve `input` against the view names.
pub fn resolve<'a>(names: &[&'a str], input: &str) -> Resolution<'a> {
    let input = input.trim();
    if input.is_empty() {
        return Resolution::NotFound;
    }

    let normalized = input.replace('-', "_");
    if let Some(name) = names
        .iter()
        .copied()
        .find(|name| *name == input || *name == normalized)
    {
        return Resolution::Found(name);
    }

    let lowered = normalized.to_lowercase();
    let matches: Vec<&'a str> = names
        .iter()
        .copied()
        .filter(|name| {
            let name = name.to_lowercase();
            let topic = name.strip_prefix(VIEW_PREFIX).unwrap_or(&name);
            name.starts_with(&lowered) || topic.starts_with(&lowered)
        })
        .collect();

    match matches.len() {
        0 => Resolution::NotFound,
        1 => Resolution::Found(matches[0]),
        _ => Resolution::Ambiguous(matches),
    }
}

/// What the command line asked the launcher to do.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Request {
    /// Resolved view, `None` to ask interactively.
    pub view: Option<String>,
    /// Dump path, `None` to ask interactively or use the default.
    pub dump: Option<PathBuf>,
}

/// Interpret the launcher's positional arguments.
///
/// When the first argument is not a view but names an existing file (as
/// judged by `is_file`) or ends in `.txt`, it is taken as the dump and the
/// view is left open.
pub fn interpret(
    names: &[&str],
    first: Option<&str>,
    second: Option<&str>,
    is_file: impl Fn(&str) -> bool,
) -> Result<Request, LaunchError> {
    let Some(first) = first else {
        return Ok(Request::default());
    };

    match resolve(names, first) {
        Resolution::Found(name) => Ok(Request {
            view: Some(name.to_string()),
            dump: second.map(PathBuf::from),
        }),
        _ if is_file(first) || first.ends_with(".txt") => match second {
            Some(extra) => Err(LaunchError::UnexpectedArgument(extra.to_string())),
            None => Ok(Request {
                view: None,
                dump: Some(PathBuf::from(first)),
            }),
        },
        Resolution::Ambiguous(matches) => Err(LaunchError::AmbiguousView {
            input: first.to_string(),
            matches: matches.into_iter().map(str::to_string).collect(),
        }),
        Resolution::NotFound => Err(LaunchError::UnknownView(first.to_string())),
    }
}

/// Outcome of one answer at the interactive view prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<'a> {
    /// A view was picked.
    Chosen(&'a str),
    /// The answer is a prefix of several views; show them and ask again.
    Choices(Vec<&'a str>),
    /// Nothing matched; ask again.
    Invalid,
}

/// Interpret an answer at the view prompt: a 1-based index or a name.
pub fn parse_selection<'a>(names: &[&'a str], answer: &str) -> Selection<'a> {
    let answer = answer.trim();
    if let Ok(index) = answer.parse::<usize>() {
        return match index.checked_sub(1).and_then(|i| names.get(i).copied()) {
            Some(name) => Selection::Chosen(name),
            None => Selection::Invalid,
        };
    }
    match resolve(names, answer) {
        Resolution::Found(name) => Selection::Chosen(name),
        Resolution::Ambiguous(matches) => Selection::Choices(matches),
        Resolution::NotFound => Selection::Invalid,
    }
}

/// Numbered view list, one `  <n>. <name>` line per view.
pub fn numbered(names: &[&str]) -> String {
    let entries: Vec<String> = names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {}", i + 1, name))
        .collect();
    format_list(&entries, "  ")
}
