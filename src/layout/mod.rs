//! layout
//!
//! Terminal text layout.
//!
//! # Modules
//!
//! - [`width`] - Unicode display width, padding and fitting
//! - [`boxes`] - Bordered boxes sized to their content
//! - [`table`] - Column descriptors and width planning for wide tables
//!
//! # Design
//!
//! Everything here is a pure function of its inputs and never fails. Bad
//! input degrades to the smallest sensible output: an empty line list gives
//! an empty box, a column that cannot fit keeps its minimum width.

pub mod boxes;
pub mod table;
pub mod width;

pub use boxes::{box_line, box_width, hline, BoxStyle, Card};
pub use table::{Column, ColumnKind, Table};
pub use width::{display_width, fit, pad};

/// Width assumed when the terminal size cannot be detected.
pub const FALLBACK_WIDTH: usize = 80;

/// How a view lays out its objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Single column, one labelled line per value.
    Compact,
    /// Multi-column tables.
    Wide,
}

impl LayoutMode {
    /// Compact below `threshold` columns, wide at or above it.
    pub fn for_width(width: usize, threshold: usize) -> Self {
        if width < threshold {
            LayoutMode::Compact
        } else {
            LayoutMode::Wide
        }
    }
}

/// What a table does with a cell wider than its planned column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Widen the column; data is never cut, lines may exceed the terminal.
    #[default]
    ShowAll,
    /// Keep the planned width and cut the cell.
    Truncate,
}

/// Detect the terminal width.
///
/// Order: explicit override, `$COLUMNS`, the size reported by the terminal,
/// then [`FALLBACK_WIDTH`].
pub fn terminal_width(explicit: Option<usize>) -> usize {
    if let Some(width) = explicit.filter(|&w| w > 0) {
        return width;
    }
    if let Some(width) = std::env::var("COLUMNS")
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&w| w > 0)
    {
        return width;
    }
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => usize::from(cols),
        _ => FALLBACK_WIDTH,
    }
}

/// Warning text for a terminal narrower than `recommended`.
pub fn narrow_width_warning(width: usize, recommended: usize) -> Option<String> {
    (width < recommended).then(|| {
        format!(
            "terminal width is {} cols; recommended >= {} cols",
            width, recommended
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_switches_at_threshold() {
        assert_eq!(LayoutMode::for_width(60, 90), LayoutMode::Compact);
        assert_eq!(LayoutMode::for_width(89, 90), LayoutMode::Compact);
        assert_eq!(LayoutMode::for_width(90, 90), LayoutMode::Wide);
        assert_eq!(LayoutMode::for_width(120, 90), LayoutMode::Wide);
    }

    #[test]
    fn explicit_width_wins() {
        assert_eq!(terminal_width(Some(132)), 132);
    }

    #[test]
    fn narrow_warning() {
        assert!(narrow_width_warning(79, 80).is_some());
        assert!(narrow_width_warning(80, 80).is_none());
        let text = narrow_width_warning(60, 80).unwrap();
        assert!(text.contains("60 cols"));
    }
}
