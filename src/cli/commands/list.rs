//! list command - Show available views

use std::process::ExitCode;

use anyhow::Result;

use crate::cli::Context;
use crate::layout::pad;
use crate::ui::output::{self, Verbosity};
use crate::views;

/// List views with their descriptions; names only in quiet mode.
pub fn list(ctx: &Context) -> Result<ExitCode> {
    let views = views::discover();
    let verbosity = ctx.verbosity();

    if verbosity == Verbosity::Quiet {
        let names: Vec<&str> = views.iter().map(|v| v.name()).collect();
        output::emit(&format!("{}\n", names.join("\n")))?;
        return Ok(ExitCode::SUCCESS);
    }

    let name_width = views.iter().map(|v| v.name().len()).max().unwrap_or(0);
    let mut text = String::new();
    for view in &views {
        text.push_str(&format!(
            "{}  {}\n",
            pad(view.name(), name_width),
            view.description()
        ));
    }
    output::emit(&text)?;
    Ok(ExitCode::SUCCESS)
}
