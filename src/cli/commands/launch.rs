//! launch command - Pick a view and run it as a child process

use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use anyhow::Result;

use crate::cli::launcher::{interpret, numbered, parse_selection, LaunchError, Selection};
use crate::cli::Context;
use crate::core::config::Config;
use crate::ui::output::{self, Verbosity};
use crate::ui::prompts;
use crate::views;

const USAGE: &str = "\
Usage: dmviz [VIEW] [DUMP]
       dmviz [DUMP]";

/// Exit status for launcher usage errors.
const USAGE_EXIT: u8 = 2;

/// Resolve the view and dump from the arguments, prompting for whatever is
/// missing, then run `dmviz view <name> <dump>` and exit with its status.
pub fn launch(ctx: &Context, first: Option<&str>, second: Option<&str>) -> Result<ExitCode> {
    let verbosity = ctx.verbosity();
    let config = ctx.load_config()?;
    let names: Vec<&str> = views::discover().iter().map(|v| v.name()).collect();

    match select(ctx, &config, &names, first, second) {
        Ok((view, dump)) => run_child(ctx, &view, &dump, verbosity),
        Err(err) if err.is_usage() => {
            output::error(&err);
            eprintln!("{}", USAGE);
            eprintln!();
            eprintln!("Available views:");
            eprintln!("{}", numbered(&names));
            Ok(ExitCode::from(USAGE_EXIT))
        }
        Err(err) => Err(err.into()),
    }
}

fn select(
    ctx: &Context,
    config: &Config,
    names: &[&str],
    first: Option<&str>,
    second: Option<&str>,
) -> Result<(String, PathBuf), LaunchError> {
    let request = interpret(names, first, second, |arg| Path::new(arg).is_file())?;

    let view = match request.view {
        Some(view) => view,
        None if ctx.interactive => choose_view(names)?,
        None => return Err(LaunchError::NoViewSelected),
    };

    let dump = match request.dump {
        Some(dump) => dump,
        None if ctx.interactive => choose_dump(&config.default_dump())?,
        None => config.default_dump(),
    };

    Ok((view, dump))
}

/// Numbered selection; re-prompts until a single view is picked.
fn choose_view(names: &[&str]) -> Result<String, LaunchError> {
    println!("Available views:");
    println!("{}", numbered(names));

    let message = format!("Select view [1-{} or name]: ", names.len());
    loop {
        let answer = prompts::input(&message, true)?;
        match parse_selection(names, &answer) {
            Selection::Chosen(name) => return Ok(name.to_string()),
            Selection::Choices(matches) => {
                println!("Matches:");
                println!("{}", numbered(&matches));
            }
            Selection::Invalid => println!("Invalid selection. Try again."),
        }
    }
}

/// Dump path prompt with Tab completion. The default is offered only when
/// it exists.
fn choose_dump(default: &Path) -> Result<PathBuf, LaunchError> {
    let default = default.is_file().then_some(default);
    let message = match default {
        Some(path) => format!("DM file [{}]: ", path.display()),
        None => "DM file path: ".to_string(),
    };

    loop {
        let answer = prompts::path(&message, true)?;
        if answer.is_empty() {
            if let Some(path) = default {
                return Ok(path.to_path_buf());
            }
        } else if Path::new(&answer).is_file() {
            return Ok(PathBuf::from(answer));
        }
        println!("File not found. Try again.");
    }
}

fn run_child(ctx: &Context, view: &str, dump: &Path, verbosity: Verbosity) -> Result<ExitCode> {
    let exe = std::env::current_exe().map_err(LaunchError::Spawn)?;

    let mut command = Command::new(exe);
    command.args(ctx.forwarded_flags()).arg("view").arg(view).arg(dump);
    output::debug(format!("running {:?}", command), verbosity);
    output::print(format!("Running {} ...", view), verbosity);

    let status = command.status().map_err(LaunchError::Spawn)?;
    // A child killed by a signal has no code.
    let code = status.code().unwrap_or(1);
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}
