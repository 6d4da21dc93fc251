//! layout::width
//!
//! Display width of terminal text.
//!
//! Every code point contributes 0 (combining and other zero-width marks),
//! 2 (East Asian wide or full-width, which includes the status emoji the
//! views print), or 1. Widths are summed per code point, so the width of a
//! concatenation is the sum of the widths of its parts.

use unicode_width::UnicodeWidthChar;

/// Columns occupied by one code point.
pub fn char_width(ch: char) -> usize {
    // Control characters have no defined width; they occupy one cell in the
    // dumps we print.
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Columns occupied by `text`.
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Right-pad `text` with spaces to `width` columns.
///
/// Text already at or beyond `width` is returned unchanged.
pub fn pad(text: &str, width: usize) -> String {
    let current = display_width(text);
    let mut out = String::with_capacity(text.len() + width.saturating_sub(current));
    out.push_str(text);
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(current)));
    out
}

/// Cut or pad `text` to exactly `width` columns.
///
/// Truncation happens between code points and keeps zero-width marks with
/// the character they follow. A wide character that would straddle the last
/// column is dropped and replaced by padding.
///
/// # Example
///
/// ```
/// use dmviz::layout::width::{display_width, fit};
///
/// assert_eq!(fit("✅ accept", 6), "✅ acc");
/// assert_eq!(display_width(&fit("✅ accept", 12)), 12);
/// ```
pub fn fit(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return pad(text, width);
    }

    let mut clipped = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = char_width(ch);
        if w == 0 {
            clipped.push(ch);
            continue;
        }
        if used + w > width {
            break;
        }
        clipped.push(ch);
        used += w;
    }
    pad(&clipped, width)
}

/// Center `text` in `width` columns; the odd space goes to the right.
pub fn center(text: &str, width: usize) -> String {
    let current = display_width(text);
    if current >= width {
        return text.to_string();
    }
    let left = (width - current) / 2;
    pad(&format!("{}{}", " ".repeat(left), text), width)
}
