//! layout::boxes
//!
//! Bordered boxes sized to their content.
//!
//! A box is at least as wide as the caller asks for (usually the terminal
//! width) and grows when a line would not fit. Content rows are indented by
//! [`LEFT_PADDING`] columns.

use super::width::{center, display_width, fit};

/// Columns between the left border and the start of a content row.
pub const LEFT_PADDING: usize = 2;

/// Border glyph set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxStyle {
    /// Double lines, used for overviews and banners.
    Heavy,
    /// Single lines, used for per-object cards.
    Light,
}

struct Glyphs {
    fill: char,
    side: &'static str,
    top: (&'static str, &'static str),
    divider: (&'static str, &'static str),
    bottom: (&'static str, &'static str),
}

impl BoxStyle {
    fn glyphs(self) -> Glyphs {
        match self {
            BoxStyle::Heavy => Glyphs {
                fill: '═',
                side: "║",
                top: ("╔", "╗"),
                divider: ("╠", "╣"),
                bottom: ("╚", "╝"),
            },
            BoxStyle::Light => Glyphs {
                fill: '─',
                side: "│",
                top: ("┌", "┐"),
                divider: ("├", "┤"),
                bottom: ("└", "┘"),
            },
        }
    }
}

/// Total box width for `lines` and an optional `title`, borders included.
///
/// The result is at least `min_width` (and never less than the two border
/// columns) and large enough for the widest line plus [`LEFT_PADDING`] and
/// for the title.
pub fn box_width<S: AsRef<str>>(min_width: usize, lines: &[S], title: Option<&str>) -> usize {
    let widest_line = lines
        .iter()
        .map(|line| display_width(line.as_ref()) + LEFT_PADDING)
        .max()
        .unwrap_or(0);
    let widest_title = title.map(display_width).unwrap_or(0);

    let inner = min_width
        .saturating_sub(2)
        .max(widest_line)
        .max(widest_title);
    inner + 2
}

/// A horizontal border `width` columns wide.
///
/// # Example
///
/// ```
/// use dmviz::layout::boxes::hline;
///
/// assert_eq!(hline('─', 6, "┌", "┐"), "┌────┐");
/// assert_eq!(hline('═', 3, "", ""), "═══");
/// ```
pub fn hline(fill: char, width: usize, left_cap: &str, right_cap: &str) -> String {
    let inner = width.saturating_sub(display_width(left_cap) + display_width(right_cap));
    let mut line = String::with_capacity(width * fill.len_utf8());
    line.push_str(left_cap);
    line.extend(std::iter::repeat(fill).take(inner));
    line.push_str(right_cap);
    line
}

/// One content row of a light box, `width` columns wide.
pub fn box_line(text: &str, width: usize) -> String {
    box_row(text, width, "│")
}

fn box_row(text: &str, width: usize, side: &str) -> String {
    let inner = width.saturating_sub(2);
    let content = format!("{}{}", " ".repeat(LEFT_PADDING), text);
    format!("{side}{}{side}", fit(&content, inner), side = side)
}

/// A box with an optional centered title and sections split by dividers.
///
/// # Example
///
/// ```
/// use dmviz::layout::boxes::{BoxStyle, Card};
///
/// let lines = Card::new(BoxStyle::Light)
///     .section(vec!["Chain 1: Base".to_string()])
///     .section(vec!["(no rules)".to_string()])
///     .render(20);
/// assert_eq!(lines[0], "┌──────────────────┐");
/// assert_eq!(lines[2], "├──────────────────┤");
/// assert_eq!(lines.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Card {
    style: BoxStyle,
    title: Option<String>,
    sections: Vec<Vec<String>>,
    styled_rows: bool,
}

impl Card {
    /// Start an empty card.
    pub fn new(style: BoxStyle) -> Self {
        Self {
            style,
            title: None,
            sections: Vec::new(),
            styled_rows: false,
        }
    }

    /// Set a title, rendered centered above the first section.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Draw content rows with the card's own side glyph, as banners do.
    pub fn banner(mut self) -> Self {
        self.styled_rows = true;
        self
    }

    /// Append a section.
    pub fn section(mut self, lines: Vec<String>) -> Self {
        self.sections.push(lines);
        self
    }

    /// Total width this card renders at for a given minimum.
    pub fn width(&self, min_width: usize) -> usize {
        let all: Vec<&str> = self
            .sections
            .iter()
            .flatten()
            .map(String::as_str)
            .collect();
        box_width(min_width, &all, self.title.as_deref())
    }

    /// Render to lines, each exactly [`Card::width`] columns wide.
    ///
    /// Rows inside heavy cards use light side borders, except the title row,
    /// unless the card is a [`Card::banner`].
    pub fn render(&self, min_width: usize) -> Vec<String> {
        let width = self.width(min_width);
        let glyphs = self.style.glyphs();
        let mut out = vec![hline(glyphs.fill, width, glyphs.top.0, glyphs.top.1)];

        let mut first = true;
        if let Some(title) = &self.title {
            out.push(format!(
                "{side}{}{side}",
                center(title, width - 2),
                side = glyphs.side
            ));
            first = false;
        }

        for section in &self.sections {
            if !first {
                out.push(hline(glyphs.fill, width, glyphs.divider.0, glyphs.divider.1));
            }
            first = false;
            let side = if self.styled_rows { glyphs.side } else { "│" };
            out.extend(section.iter().map(|line| box_row(line, width, side)));
        }

        out.push(hline(glyphs.fill, width, glyphs.bottom.0, glyphs.bottom.1));
        out
    }
}
