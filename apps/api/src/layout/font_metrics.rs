//! Static font-metric tables for the two storybook font families.
//!
//! Character widths are in em units (relative to font size). Static tables
//! are an intentional approximation: real glyph metrics differ by ±1–2% of
//! line width, which the generous body margins absorb. The tables cover
//! ASCII 0x20..=0x7E (95 printable characters); index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

/// The two font families used across every book format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// Body text — a wide literacy sans designed for beginning readers.
    Andika,
    /// Cover and display text — a rounded, chunky display face.
    Baloo,
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font family.
///
/// All widths are in em units at 1em. `widths[i]` = width of ASCII character
/// `(i + 32)`, covering 0x20 (space) through 0x7E (~). Non-ASCII characters
/// fall back to `average_char_width`.
pub struct FontMetricTable {
    pub font: FontFamily,
    widths: [f32; 95],
    /// Fallback width for codepoints outside 0x20..=0x7E.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Measures the rendered width of a string in points at the given size.
    pub fn measure_pt(&self, s: &str, font_size_pt: f32) -> f32 {
        self.measure_str(s) * font_size_pt
    }

    /// Width of a single inter-word space in points at the given size.
    pub fn space_pt(&self, font_size_pt: f32) -> f32 {
        self.space_width * font_size_pt
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Andika — wide literacy sans used for all body copy.
static ANDIKA_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Andika,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.30, 0.32, 0.42, 0.60, 0.60, 0.92, 0.71, 0.24, 0.36, 0.36, 0.42, 0.62, 0.30, 0.36, 0.30, 0.34,
        // 0     1     2     3     4     5     6     7     8     9
        0.60, 0.60, 0.60, 0.60, 0.60, 0.60, 0.60, 0.60, 0.60, 0.60,
        // :     ;     <     =     >     ?     @
        0.30, 0.30, 0.62, 0.62, 0.62, 0.54, 1.05,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.70, 0.64, 0.66, 0.70, 0.60, 0.56, 0.72, 0.72, 0.32, 0.44, 0.66, 0.56, 0.86,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.72, 0.76, 0.62, 0.76, 0.66, 0.56, 0.62, 0.72, 0.68, 0.94, 0.66, 0.64, 0.60,
        // [     \     ]     ^     _     `
        0.32, 0.34, 0.32, 0.50, 0.60, 0.38,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.58, 0.60, 0.52, 0.60, 0.58, 0.36, 0.60, 0.60, 0.28, 0.28, 0.56, 0.28, 0.90,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.60, 0.60, 0.60, 0.60, 0.40, 0.48, 0.42, 0.60, 0.54, 0.80, 0.54, 0.54, 0.48,
        // {     |     }     ~
        0.36, 0.30, 0.36, 0.62,
    ],
    average_char_width: 0.57,
    space_width: 0.30,
};

/// Baloo — rounded display face used for the cover title and page numbers.
static BALOO_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Baloo,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.27, 0.30, 0.40, 0.58, 0.58, 0.88, 0.68, 0.22, 0.34, 0.34, 0.40, 0.60, 0.28, 0.34, 0.28, 0.32,
        // 0     1     2     3     4     5     6     7     8     9
        0.58, 0.58, 0.58, 0.58, 0.58, 0.58, 0.58, 0.58, 0.58, 0.58,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.60, 0.60, 0.60, 0.52, 1.00,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.68, 0.62, 0.63, 0.68, 0.58, 0.54, 0.69, 0.69, 0.30, 0.42, 0.63, 0.54, 0.82,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.69, 0.73, 0.60, 0.73, 0.63, 0.54, 0.60, 0.69, 0.65, 0.90, 0.63, 0.61, 0.58,
        // [     \     ]     ^     _     `
        0.30, 0.32, 0.30, 0.48, 0.58, 0.36,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.58, 0.50, 0.58, 0.56, 0.34, 0.58, 0.58, 0.26, 0.26, 0.54, 0.26, 0.86,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.58, 0.58, 0.58, 0.58, 0.38, 0.46, 0.40, 0.58, 0.52, 0.76, 0.52, 0.52, 0.46,
        // {     |     }     ~
        0.34, 0.28, 0.34, 0.60,
    ],
    average_char_width: 0.55,
    space_width: 0.27,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(font: FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Andika => &ANDIKA_TABLE,
        FontFamily::Baloo => &BALOO_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(FontFamily::Andika);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_single_space() {
        let metrics = get_metrics(FontFamily::Andika);
        let width = metrics.measure_str(" ");
        assert!(
            (width - 0.30).abs() < 1e-4,
            "space width should be 0.30, got {width}"
        );
    }

    #[test]
    fn test_measure_str_sums_character_widths() {
        let metrics = get_metrics(FontFamily::Andika);
        // "bed" = b(0.60) + e(0.58) + d(0.60) = 1.78
        let width = metrics.measure_str("bed");
        assert!(
            (width - 1.78).abs() < 1e-3,
            "bed width should be ~1.78, got {width}"
        );
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(FontFamily::Andika);
        let width = metrics.measure_str("é");
        assert!(
            (width - metrics.average_char_width).abs() < 1e-4,
            "non-ASCII should use average_char_width"
        );
    }

    #[test]
    fn test_measure_pt_scales_with_font_size() {
        let metrics = get_metrics(FontFamily::Andika);
        let at_one = metrics.measure_pt("fox", 1.0);
        let at_twelve = metrics.measure_pt("fox", 12.0);
        assert!((at_twelve - at_one * 12.0).abs() < 1e-3);
    }

    #[test]
    fn test_both_families_accessible() {
        assert_eq!(get_metrics(FontFamily::Andika).font, FontFamily::Andika);
        assert_eq!(get_metrics(FontFamily::Baloo).font, FontFamily::Baloo);
    }

    #[test]
    fn test_body_face_wider_than_display_face() {
        // Andika is deliberately wide for early-reader legibility.
        let text = "The fox jumped over the log";
        let andika = get_metrics(FontFamily::Andika).measure_str(text);
        let baloo = get_metrics(FontFamily::Baloo).measure_str(text);
        assert!(andika > baloo);
    }
}
