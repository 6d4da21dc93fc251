//! dmviz - Terminal diagrams for TR-181 data-model dumps
//!
//! dmviz reads a flat dump of a router's data model (one
//! `Device.<dotted.path>=<value>` line per leaf) and draws parts of it as
//! boxes, trees and tables sized to the terminal.
//!
//! # Architecture
//!
//! The codebase is layered; each layer only uses the ones listed before it:
//!
//! - [`core`] - Configuration, the parsed dump, and the reference walker
//! - [`layout`] - Width-aware boxes and tables
//! - [`views`] - The diagrams themselves
//! - [`ui`] - Diagnostics and prompts
//! - [`cli`] - Argument parsing, dispatch, and the launcher
//!
//! # Invariants
//!
//! 1. The dump is read once and never modified
//! 2. Missing or malformed data renders as a placeholder, never as a failure
//! 3. Every rendered line of a box has the same display width

pub mod cli;
pub mod core;
pub mod layout;
pub mod ui;
pub mod views;
