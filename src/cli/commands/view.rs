//! view command - Render one view in this process

use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Result};

use crate::cli::launcher::{resolve, Resolution};
use crate::cli::Context;
use crate::core::store::Store;
use crate::layout::{narrow_width_warning, terminal_width};
use crate::ui::output;
use crate::views::{self, RenderContext};

/// Render the named view of a dump to stdout.
///
/// The view may be given by exact name or unique prefix. Without `dump`
/// the configured default is read.
pub fn view(ctx: &Context, name: &str, dump: Option<&Path>) -> Result<ExitCode> {
    let verbosity = ctx.verbosity();
    let config = ctx.load_config()?;

    let names: Vec<&str> = views::discover().iter().map(|v| v.name()).collect();
    let selected = match resolve(&names, name) {
        Resolution::Found(found) => views::find(found),
        Resolution::Ambiguous(matches) => {
            bail!("'{}' matches several views: {}", name, matches.join(", "))
        }
        Resolution::NotFound => None,
    };
    let Some(selected) = selected else {
        bail!("unknown view '{}' (run `dmviz list` to see available views)", name);
    };

    let width = terminal_width(ctx.width);
    if let Some(warning) = narrow_width_warning(width, config.recommended_width()) {
        output::warn(warning, verbosity);
    }
    let render_ctx = RenderContext::from_config(&config, width);
    output::debug(
        format!("width: {} cols, layout: {:?}", width, render_ctx.mode()),
        verbosity,
    );

    let default_dump = config.default_dump();
    let path = dump.unwrap_or(&default_dump);
    output::print(format!("Parsing: {}", path.display()), verbosity);
    output::print("", verbosity);

    let store = Store::load(path, config.root_token())?;
    output::debug(
        format!("{} entries under '{}'", store.len(), store.root_token()),
        verbosity,
    );

    output::emit(&selected.render(&store, &render_ctx))?;
    Ok(ExitCode::SUCCESS)
}
