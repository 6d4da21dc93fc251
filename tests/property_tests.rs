//! Property-based tests for the store, the walker and the layout engine.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;

use dmviz::core::store::Store;
use dmviz::core::walker::{split_references, walk};
use dmviz::layout::boxes::{box_line, box_width};
use dmviz::layout::{display_width, fit, pad};

/// Strategy for one path component.
fn component() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,8}"
}

/// Strategy for values without whitespace, quotes or `=`.
fn value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9./:_-]{0,20}"
}

/// Strategy for display text mixing ASCII, CJK and emoji.
fn display_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            prop::char::range('a', 'z'),
            Just('中'),
            Just('🟢'),
            Just('✅'),
            Just('│'),
            Just(' '),
        ],
        0..30,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    /// A parsed value is the written value with surrounding quotes removed.
    #[test]
    fn parse_keeps_value(object in component(), attr in component(), v in value(), quoted in any::<bool>()) {
        let written = if quoted { format!("\"{}\"", v) } else { v.clone() };
        let dump = format!("Device.{}.{}={}\n", object, attr, written);
        let store = Store::parse(&dump, "Device");
        let path = format!("Device.{}.{}", object, attr);
        prop_assert_eq!(store.get(&path), Some(v.as_str()));
    }

    /// Single and double separator forms answer the same attribute lookup.
    #[test]
    fn attribute_separator_forms_agree(object in component(), attr in component(), v in value(), double in any::<bool>()) {
        let separator = if double { ".." } else { "." };
        let dump = format!("Device.{}.1{}{}={}\n", object, separator, attr, v);
        let store = Store::parse(&dump, "Device");
        let object_path = format!("Device.{}.1", object);
        prop_assert_eq!(store.get_attr(&object_path, &attr), Some(v.as_str()));
        prop_assert_eq!(store.get_attr(&format!("{}.", object_path), &attr), Some(v.as_str()));
    }

    /// Lines outside the root token never reach the store.
    #[test]
    fn foreign_lines_ignored(object in component(), v in value()) {
        let dump = format!("Other.{}.X={}\nDevice\nDeviceX.{}=1\n", object, v, object);
        prop_assert!(Store::parse(&dump, "Device").is_empty());
    }

    /// Display width is additive over concatenation.
    #[test]
    fn display_width_additive(a in display_text(), b in display_text()) {
        prop_assert_eq!(display_width(&format!("{}{}", a, b)), display_width(&a) + display_width(&b));
    }

    /// Fitting always yields the exact target width.
    #[test]
    fn fit_is_exact(text in display_text(), width in 0usize..40) {
        prop_assert_eq!(display_width(&fit(&text, width)), width);
    }

    /// Padding never shrinks and reaches at least the target.
    #[test]
    fn pad_reaches_width(text in display_text(), width in 0usize..40) {
        let padded = pad(&text, width);
        prop_assert!(padded.starts_with(&text));
        prop_assert_eq!(display_width(&padded), display_width(&text).max(width));
    }

    /// Every line of a box has the box width.
    #[test]
    fn box_lines_equal_width(lines in prop::collection::vec(display_text(), 0..6), min in 4usize..60) {
        let width = box_width(min, &lines, None);
        prop_assert!(width >= min);
        for line in &lines {
            prop_assert_eq!(display_width(&box_line(line, width)), width);
        }
    }

    /// Reference lists split into trimmed, non-empty paths in order.
    #[test]
    fn references_trimmed(parts in prop::collection::vec(component(), 0..5)) {
        let value = parts
            .iter()
            .map(|p| format!(" Device.{}. ", p))
            .collect::<Vec<_>>()
            .join(",");
        let expected: Vec<String> = parts.iter().map(|p| format!("Device.{}", p)).collect();
        prop_assert_eq!(split_references(&value), expected);
    }

    /// Walking a chain visits each node once, top first, one level deeper
    /// at each step.
    #[test]
    fn chain_walk_is_preorder(len in 1usize..8) {
        let mut dump = String::new();
        for i in 1..len {
            dump.push_str(&format!("Device.Node.{}.LowerLayers=Device.Node.{}.\n", i, i + 1));
        }
        let store = Store::parse(&dump, "Device");
        let steps: Vec<_> = walk(&store, "Device.Node.1").collect();
        prop_assert_eq!(steps.len(), len);
        for (i, step) in steps.iter().enumerate() {
            prop_assert_eq!(&step.path, &format!("Device.Node.{}", i + 1));
            prop_assert_eq!(step.depth, i);
            prop_assert!(!step.cycle);
        }
    }

    /// A walk terminates on any reference graph, including cyclic ones.
    #[test]
    fn walk_terminates(edges in prop::collection::vec((1u8..6, 1u8..6), 0..15)) {
        let mut dump = String::new();
        for (from, to) in &edges {
            dump.push_str(&format!("Device.N.{}.LowerLayers=Device.N.{}\n", from, to));
        }
        let store = Store::parse(&dump, "Device");
        let visited = walk(&store, "Device.N.1").take(10_000).count();
        prop_assert!(visited < 10_000);
    }
}
