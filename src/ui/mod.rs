//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware diagnostics and diagram output
//! - [`prompts`] - Interactive line prompts with path completion
//!
//! # Design
//!
//! All terminal interaction outside the rendered diagrams goes through this
//! module, so quiet, debug and non-interactive runs behave consistently.

pub mod output;
pub mod prompts;
