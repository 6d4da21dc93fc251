//! views::common
//!
//! Labels and markers shared by the views.

use crate::core::store::Store;
use crate::core::walker::resolve_alias;
use crate::layout::hline;

/// Placeholder for a missing reference.
pub const MISSING: &str = "-";

/// Placeholder for an unknown value.
pub const UNKNOWN: &str = "?";

/// Green or red status dot.
pub fn status_dot(up: bool) -> &'static str {
    if up {
        "🟢"
    } else {
        "🔴"
    }
}

/// Attribute value, or `default` when missing.
pub fn attr_or<'a>(store: &'a Store, object: &str, attribute: &str, default: &'a str) -> &'a str {
    store.get_attr(object, attribute).unwrap_or(default)
}

/// Attribute value, or `default` when missing or empty.
pub fn non_empty_or<'a>(
    store: &'a Store,
    object: &str,
    attribute: &str,
    default: &'a str,
) -> &'a str {
    match store.get_attr(object, attribute) {
        Some(value) if !value.is_empty() => value,
        _ => default,
    }
}

/// Short display form of a reference, `-` when empty.
pub fn short_ref(store: &Store, reference: &str) -> String {
    let short = store.shorten(reference);
    if short.is_empty() {
        MISSING.to_string()
    } else {
        short
    }
}

/// `Short.Path (alias)` for a reference, or just the short path when the
/// target has no alias or name.
pub fn ref_label(store: &Store, reference: &str) -> String {
    let short = short_ref(store, reference);
    if short == MISSING {
        return short;
    }
    let alias = resolve_alias(store, reference);
    if alias.is_empty() {
        short
    } else {
        format!("{} ({})", short, alias)
    }
}

/// A section banner: double rule, indented title, double rule.
pub fn section_banner(title: &str, width: usize) -> Vec<String> {
    vec![
        hline('═', width, "", ""),
        format!("  {}", title),
        hline('═', width, "", ""),
    ]
}
