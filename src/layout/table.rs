//! layout::table
//!
//! Declarative column tables for the wide layout.
//!
//! # Width planning
//!
//! Columns are described once by a [`Column`] and the widths are planned
//! from the space available:
//!
//! 1. [`ColumnKind::Fixed`] columns reserve their minimum width. They hold
//!    bounded values such as counters, short enums and protocol names.
//! 2. The rest is split evenly across [`ColumnKind::Flexible`] columns, each
//!    clamped to its `[min, max]`. A column never shrinks below its minimum,
//!    so a table can end up wider than the space it was given.
//! 3. The [`ColumnKind::Extra`] column is the lowest priority. It only appears
//!    when at least one row has something to put in it.
//!
//! The [`OverflowPolicy`] then decides what happens to a cell wider than its
//! planned column.

use super::width::{display_width, fit};
use super::OverflowPolicy;

/// How a column competes for width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Reserved at its minimum width.
    Fixed,
    /// Shares the remaining width.
    Flexible,
    /// Included only when some row uses it.
    Extra,
}

/// A column descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Stable identifier, used to look up planned widths.
    pub key: &'static str,
    /// Header text.
    pub header: &'static str,
    /// Narrowest width the column is planned at.
    pub min: usize,
    /// Widest width the column is planned at.
    pub max: usize,
    /// Width priority.
    pub kind: ColumnKind,
}

impl Column {
    /// A fixed-width column.
    pub const fn fixed(key: &'static str, header: &'static str, width: usize) -> Self {
        Self {
            key,
            header,
            min: width,
            max: width,
            kind: ColumnKind::Fixed,
        }
    }

    /// A column sharing the remaining width within `[min, max]`.
    pub const fn flexible(key: &'static str, header: &'static str, min: usize, max: usize) -> Self {
        Self {
            key,
            header,
            min,
            max,
            kind: ColumnKind::Flexible,
        }
    }

    /// The optional trailing column.
    pub const fn extra(key: &'static str, header: &'static str, min: usize) -> Self {
        Self {
            key,
            header,
            min,
            max: usize::MAX,
            kind: ColumnKind::Extra,
        }
    }
}

/// Planned width of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPlan {
    /// Key of the planned column.
    pub key: &'static str,
    /// Width in columns; `None` when the column is left out.
    pub width: Option<usize>,
}

/// Rows of cells under a fixed set of columns.
///
/// # Example
///
/// ```
/// use dmviz::layout::table::{Column, Table};
/// use dmviz::layout::OverflowPolicy;
///
/// let mut table = Table::new(vec![
///     Column::fixed("id", "ID", 4),
///     Column::flexible("name", "Name", 6, 12),
///     Column::extra("note", "Note", 0),
/// ]);
/// table.push_row(vec!["1".into(), "lan".into(), String::new()]);
///
/// let lines = table.render(30, OverflowPolicy::ShowAll);
/// assert_eq!(lines[0], "ID   Name        ");
/// assert_eq!(lines[1], "──── ────────────");
/// assert_eq!(lines[2], "1    lan         ");
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with no rows.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. Cells are in column order; missing cells are empty.
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widest(&self, index: usize) -> usize {
        let header = display_width(self.columns[index].header);
        self.rows
            .iter()
            .map(|row| display_width(&row[index]))
            .fold(header, usize::max)
    }

    fn extra_used(&self, index: usize) -> bool {
        self.rows.iter().any(|row| !row[index].trim().is_empty())
    }

    /// Plan column widths for `available` columns of space.
    pub fn plan(&self, available: usize, policy: OverflowPolicy) -> Vec<ColumnPlan> {
        let included: Vec<bool> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| col.kind != ColumnKind::Extra || self.extra_used(i))
            .collect();

        let primary: Vec<usize> = (0..self.columns.len())
            .filter(|&i| self.columns[i].kind != ColumnKind::Extra)
            .collect();
        let gaps = primary.len().saturating_sub(1);
        let fixed: usize = primary
            .iter()
            .filter(|&&i| self.columns[i].kind == ColumnKind::Fixed)
            .map(|&i| self.columns[i].min)
            .sum();
        let flexible = primary
            .iter()
            .filter(|&&i| self.columns[i].kind == ColumnKind::Flexible)
            .count();
        let remaining = available.saturating_sub(fixed + gaps);
        let share = if flexible > 0 { remaining / flexible } else { 0 };

        let mut widths: Vec<Option<usize>> = self
            .columns
            .iter()
            .zip(&included)
            .map(|(col, &used)| {
                if !used {
                    return None;
                }
                Some(match col.kind {
                    ColumnKind::Fixed => col.min,
                    ColumnKind::Flexible => share.min(col.max).max(col.min),
                    ColumnKind::Extra => col.min,
                })
            })
            .collect();

        // The extra column takes whatever is left on the line.
        let used_by_primary: usize = primary.iter().filter_map(|&i| widths[i]).sum::<usize>() + gaps;
        for (i, col) in self.columns.iter().enumerate() {
            if col.kind == ColumnKind::Extra {
                if let Some(width) = widths[i].as_mut() {
                    *width = available
                        .saturating_sub(used_by_primary + 1)
                        .max(col.min);
                }
            }
        }

        if policy == OverflowPolicy::ShowAll {
            for (i, width) in widths.iter_mut().enumerate() {
                if let Some(width) = width.as_mut() {
                    let widest = self.widest(i);
                    *width = if self.columns[i].kind == ColumnKind::Extra {
                        widest
                    } else {
                        (*width).max(widest)
                    };
                }
            }
        }

        self.columns
            .iter()
            .zip(widths)
            .map(|(col, width)| ColumnPlan {
                key: col.key,
                width,
            })
            .collect()
    }

    /// Render header, separator and rows.
    ///
    /// Columns are joined by one space; every cell is padded or cut to its
    /// planned width, so all lines have the same display width.
    pub fn render(&self, available: usize, policy: OverflowPolicy) -> Vec<String> {
        let plan = self.plan(available, policy);
        let line = |cells: Vec<&str>| -> String {
            plan.iter()
                .zip(cells)
                .filter_map(|(col, cell)| col.width.map(|w| fit(cell, w)))
                .collect::<Vec<_>>()
                .join(" ")
        };

        let mut out = Vec::with_capacity(self.rows.len() + 2);
        out.push(line(self.columns.iter().map(|c| c.header).collect()));
        out.push(
            plan.iter()
                .filter_map(|col| col.width.map(|w| "─".repeat(w)))
                .collect::<Vec<_>>()
                .join(" "),
        );
        for row in &self.rows {
            out.push(line(row.iter().map(String::as_str).collect()));
        }
        out
    }
}

/// Look up the planned width of `key`.
pub fn planned_width(plan: &[ColumnPlan], key: &str) -> Option<usize> {
    plan.iter().find(|col| col.key == key).and_then(|col| col.width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_columns() -> Vec<Column> {
        vec![
            Column::fixed("order", "#", 4),
            Column::flexible("alias", "Alias", 8, 16),
            Column::fixed("proto", "Proto", 7),
            Column::flexible("src_ip", "SrcIP", 4, 16),
            Column::extra("extra", "Extra", 0),
        ]
    }

    #[test]
    fn flexible_columns_share_remaining_width() {
        let table = Table::new(rule_columns());
        // 100 - (4 + 7) - 3 gaps = 86, split in two, clamped to 16
        let plan = table.plan(100, OverflowPolicy::Truncate);
        assert_eq!(planned_width(&plan, "alias"), Some(16));
        assert_eq!(planned_width(&plan, "src_ip"), Some(16));
        assert_eq!(planned_width(&plan, "order"), Some(4));
    }

    #[test]
    fn flexible_columns_never_below_minimum() {
        let table = Table::new(rule_columns());
        let plan = table.plan(10, OverflowPolicy::Truncate);
        assert_eq!(planned_width(&plan, "alias"), Some(8));
        assert_eq!(planned_width(&plan, "src_ip"), Some(4));
    }

    #[test]
    fn even_split_below_maximum() {
        let table = Table::new(rule_columns());
        // 40 - 11 - 3 = 26, 13 each
        let plan = table.plan(40, OverflowPolicy::Truncate);
        assert_eq!(planned_width(&plan, "alias"), Some(13));
        assert_eq!(planned_width(&plan, "src_ip"), Some(13));
    }

    #[test]
    fn extra_column_omitted_when_unused() {
        let mut table = Table::new(rule_columns());
        table.push_row(vec!["1".into(), "r1".into(), "TCP".into(), "*".into()]);

        let plan = table.plan(100, OverflowPolicy::ShowAll);
        assert_eq!(planned_width(&plan, "extra"), None);

        let lines = table.render(100, OverflowPolicy::ShowAll);
        assert!(!lines[0].contains("Extra"));
    }

    #[test]
    fn extra_column_included_when_any_row_needs_it() {
        let mut table = Table::new(rule_columns());
        table.push_row(vec!["1".into(), "r1".into(), "TCP".into(), "*".into()]);
        table.push_row(vec![
            "2".into(),
            "r2".into(),
            "UDP".into(),
            "*".into(),
            "state:ESTABLISHED".into(),
        ]);

        let lines = table.render(100, OverflowPolicy::ShowAll);
        assert!(lines[0].ends_with("Extra            "));
        assert!(lines[3].ends_with("state:ESTABLISHED"));
    }

    #[test]
    fn show_all_widens_instead_of_cutting() {
        let mut table = Table::new(vec![
            Column::fixed("id", "ID", 2),
            Column::flexible("name", "Name", 4, 6),
        ]);
        table.push_row(vec!["1".into(), "a-very-long-name".into()]);

        let lines = table.render(10, OverflowPolicy::ShowAll);
        assert_eq!(lines[2], "1  a-very-long-name");
        let widths: Vec<_> = lines.iter().map(|l| display_width(l)).collect();
        assert!(widths.iter().all(|&w| w == widths[0]));
    }

    #[test]
    fn truncate_keeps_planned_widths() {
        let mut table = Table::new(vec![
            Column::fixed("id", "ID", 2),
            Column::flexible("name", "Name", 4, 6),
        ]);
        table.push_row(vec!["1".into(), "a-very-long-name".into()]);

        let lines = table.render(10, OverflowPolicy::Truncate);
        assert_eq!(lines[2], "1  a-very");
    }

    #[test]
    fn emoji_cells_align() {
        let mut table = Table::new(vec![
            Column::fixed("en", "En", 4),
            Column::fixed("name", "Name", 6),
        ]);
        table.push_row(vec!["🟢".into(), "wan".into()]);
        table.push_row(vec!["-".into(), "lan".into()]);

        let lines = table.render(20, OverflowPolicy::ShowAll);
        assert_eq!(lines[2], "🟢   wan   ");
        assert_eq!(lines[3], "-    lan   ");
        assert_eq!(display_width(&lines[2]), display_width(&lines[3]));
    }

    #[test]
    fn empty_table_has_header_and_separator() {
        let table = Table::new(vec![Column::fixed("id", "ID", 3)]);
        let lines = table.render(0, OverflowPolicy::ShowAll);
        assert_eq!(lines, vec!["ID ".to_string(), "───".to_string()]);
        assert!(table.is_empty());
    }
}
