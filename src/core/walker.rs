//! core::walker
//!
//! Reconstructs interface stacks from `LowerLayers` references.
//!
//! # Model
//!
//! The dump has no parent/child fields. Hierarchy comes only from reference
//! attributes whose value is a comma-separated list of object paths, each
//! naming the next layer down. Walking those references from a top object
//! yields the stack, top first.
//!
//! # Cycles
//!
//! Dumps are expected to be acyclic, but nothing enforces it. The walk keeps
//! the ancestor chain of the node being visited: a node that names one of its
//! own ancestors is reported once with [`WalkStep::cycle`] set and is not
//! expanded. A stack shared by two parents is still walked under each of
//! them. [`WalkOptions::max_depth`] bounds expansion depth on top of that.

use super::store::{trim_object_path, Store};

/// Reference attribute that links an object to the layer below it.
pub const LOWER_LAYERS: &str = "LowerLayers";

/// Display name of an object: `Name`, falling back to `Alias`.
///
/// Blank values count as missing. Returns an empty string when neither
/// attribute is set or the object does not exist.
pub fn resolve_name(store: &Store, object_path: &str) -> String {
    first_non_blank(store, object_path, &["Name", "Alias"])
}

/// Reference label of an object: `Alias`, falling back to `Name`.
pub fn resolve_alias(store: &Store, object_path: &str) -> String {
    first_non_blank(store, object_path, &["Alias", "Name"])
}

fn first_non_blank(store: &Store, object_path: &str, attributes: &[&str]) -> String {
    attributes
        .iter()
        .filter_map(|attr| store.get_attr(object_path, attr))
        .find(|value| !value.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_default()
}

/// Parse a comma-separated reference list.
///
/// Elements are trimmed of whitespace and trailing separators; empty elements
/// are dropped; order is preserved.
pub fn split_references(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(trim_object_path)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

/// Objects directly below `object_path`, in reference order.
pub fn lower_layers(store: &Store, object_path: &str) -> Vec<String> {
    store
        .get_attr(object_path, LOWER_LAYERS)
        .map(split_references)
        .unwrap_or_default()
}

/// Options for [`walk_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Deepest depth that is still expanded. `None` means unbounded.
    pub max_depth: Option<usize>,
}

/// One visited node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkStep {
    /// Object path, trailing separator removed.
    pub path: String,
    /// Distance from the walk root along the followed references.
    pub depth: usize,
    /// The node is one of its own ancestors; its lower layers were skipped.
    pub cycle: bool,
    /// The depth cap stopped expansion of a node that has lower layers.
    pub depth_capped: bool,
}

/// Lazy depth-first pre-order walk. Created by [`walk`] and [`walk_with`].
#[derive(Debug)]
pub struct Walk<'a> {
    store: &'a Store,
    options: WalkOptions,
    /// Pending nodes; the next one to visit is on top.
    pending: Vec<(String, usize)>,
    /// Ancestors of the node being visited, root first.
    trail: Vec<String>,
}

/// Walk the stack below `root_path` without a depth cap.
///
/// # Example
///
/// ```
/// use dmviz::core::store::Store;
/// use dmviz::core::walker::walk;
///
/// let store = Store::parse(
///     "Device.IP.Interface.1.LowerLayers=Device.Ethernet.Link.1.\n\
///      Device.Ethernet.Link.1.LowerLayers=Device.Ethernet.Interface.1.\n",
///     "Device",
/// );
/// let steps: Vec<_> = walk(&store, "Device.IP.Interface.1")
///     .map(|step| (step.path, step.depth))
///     .collect();
/// assert_eq!(
///     steps,
///     vec![
///         ("Device.IP.Interface.1".to_string(), 0),
///         ("Device.Ethernet.Link.1".to_string(), 1),
///         ("Device.Ethernet.Interface.1".to_string(), 2),
///     ]
/// );
/// ```
pub fn walk<'a>(store: &'a Store, root_path: &str) -> Walk<'a> {
    walk_with(store, root_path, WalkOptions::default())
}

/// Walk the stack below `root_path` with explicit options.
pub fn walk_with<'a>(store: &'a Store, root_path: &str, options: WalkOptions) -> Walk<'a> {
    Walk {
        store,
        options,
        pending: vec![(trim_object_path(root_path).to_string(), 0)],
        trail: Vec::new(),
    }
}

impl Iterator for Walk<'_> {
    type Item = WalkStep;

    fn next(&mut self) -> Option<WalkStep> {
        let (path, depth) = self.pending.pop()?;

        // Everything deeper than this node's parent is no longer an ancestor.
        self.trail.truncate(depth);
        let cycle = self.trail.iter().any(|ancestor| *ancestor == path);

        let mut step = WalkStep {
            path,
            depth,
            cycle,
            depth_capped: false,
        };
        if cycle {
            return Some(step);
        }

        let lowers = lower_layers(self.store, &step.path);
        let capped = self.options.max_depth.is_some_and(|max| depth >= max);
        if capped {
            step.depth_capped = !lowers.is_empty();
            return Some(step);
        }

        self.trail.push(step.path.clone());
        self.pending
            .extend(lowers.into_iter().rev().map(|lower| (lower, depth + 1)));
        Some(step)
    }
}
