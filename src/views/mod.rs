//! views
//!
//! Diagrams of individual parts of the data model.
//!
//! # Views
//!
//! - [`firewall`] - Firewall chains and rules
//! - [`logical_stack`] - Logical interfaces and their interface stacks
//! - [`wan_manager`] - WAN manager modes and their interfaces
//!
//! # Design
//!
//! A view decides which paths to query and how to label them; the store,
//! the walker and the layout engine do the rest. Views render to a `String`
//! so they can be tested without a terminal. Missing data never fails a
//! view: it shows up as a placeholder, and an empty result set prints an
//! informational line.
//!
//! Views are found by name. Every registered view is named `show_<topic>`.

pub mod common;
pub mod firewall;
pub mod logical_stack;
pub mod wan_manager;

use crate::core::config::Config;
use crate::core::store::Store;
use crate::core::walker::WalkOptions;
use crate::layout::{LayoutMode, OverflowPolicy};

/// Name prefix shared by all views.
pub const VIEW_PREFIX: &str = "show_";

/// Everything a view needs to know about the output surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// Terminal width in columns.
    pub width: usize,
    /// Width at which the wide layout starts.
    pub wide_threshold: usize,
    /// Cell overflow handling for tables.
    pub overflow: OverflowPolicy,
    /// Limits for interface stack walks.
    pub walk: WalkOptions,
}

impl RenderContext {
    /// Context with default settings for a given width.
    pub fn new(width: usize) -> Self {
        Self::from_config(&Config::default(), width)
    }

    /// Context from loaded configuration.
    pub fn from_config(config: &Config, width: usize) -> Self {
        Self {
            width,
            wide_threshold: config.wide_threshold(),
            overflow: config.overflow(),
            walk: WalkOptions {
                max_depth: Some(config.max_depth()),
            },
        }
    }

    /// Layout mode for this width.
    pub fn mode(&self) -> LayoutMode {
        LayoutMode::for_width(self.width, self.wide_threshold)
    }
}

/// A diagram of one part of the data model.
pub trait View {
    /// Name the view is selected by (`show_<topic>`).
    fn name(&self) -> &'static str;

    /// One-line description for listings.
    fn description(&self) -> &'static str;

    /// Render the diagram.
    fn render(&self, store: &Store, ctx: &RenderContext) -> String;
}

static FIREWALL: firewall::FirewallView = firewall::FirewallView;
static LOGICAL_STACK: logical_stack::LogicalStackView = logical_stack::LogicalStackView;
static WAN_MANAGER: wan_manager::WanManagerView = wan_manager::WanManagerView;

/// All views following the naming convention, sorted by name.
pub fn discover() -> Vec<&'static dyn View> {
    let all: [&'static dyn View; 3] = [&FIREWALL, &LOGICAL_STACK, &WAN_MANAGER];
    let mut views: Vec<&'static dyn View> = all
        .into_iter()
        .filter(|view| view.name().starts_with(VIEW_PREFIX))
        .collect();
    views.sort_by_key(|view| view.name());
    views
}

/// Look up a view by its exact name.
pub fn find(name: &str) -> Option<&'static dyn View> {
    discover().into_iter().find(|view| view.name() == name)
}

/// Join rendered lines into output text.
pub(crate) fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
