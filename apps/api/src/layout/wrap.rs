//! Greedy line breaking for page body copy.
//!
//! Both the web and print variants call [`wrap_text`] with their own font
//! size and printable width, so wrapping is a pure function over its inputs
//! rather than a one-shot stream.

use crate::layout::font_metrics::FontMetricTable;

/// Wraps `text` into lines whose measured width stays at or under
/// `max_width_pt`.
///
/// Words (maximal runs of non-whitespace) are atomic: a single word wider
/// than `max_width_pt` is placed alone on its own line rather than split
/// mid-word. Whitespace runs collapse to a single space. Empty or
/// whitespace-only input yields no lines; there is never a trailing empty
/// line.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    font_size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    let mut words = text.split_whitespace();
    let first = match words.next() {
        Some(w) => w,
        None => return Vec::new(),
    };

    let space_w = metrics.space_pt(font_size_pt);
    let mut lines: Vec<String> = Vec::new();
    let mut current = first.to_string();
    let mut current_w = metrics.measure_pt(first, font_size_pt);

    for word in words {
        let word_w = metrics.measure_pt(word, font_size_pt);
        if current_w + space_w + word_w <= max_width_pt {
            current.push(' ');
            current.push_str(word);
            current_w += space_w + word_w;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
            current_w = word_w;
        }
    }
    lines.push(current);
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
