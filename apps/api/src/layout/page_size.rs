//! Page-size presets for the three supported physical book formats.
//!
//! Each preset maps to two rectangles in millimetres: the trim (`content`)
//! size and the trim size plus a 3mm bleed on every edge. The print vendor
//! cuts along the trim line, so print PDFs are produced at the bleed size
//! while the web preview uses the content size.

use serde::{Deserialize, Serialize};

/// Bleed margin added to each edge of the trim rectangle, in millimetres.
pub const BLEED_MM: f32 = 3.0;

/// Conversion factor from millimetres to PDF points.
pub const MM_TO_PT: f32 = 2.834645669;

// ────────────────────────────────────────────────────────────────────────────
// Preset enum
// ────────────────────────────────────────────────────────────────────────────

/// The three book formats offered by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSizePreset {
    /// 148 × 210 mm portrait (A5).
    SmallPortrait,
    /// 210 × 297 mm portrait (A4).
    LargePortrait,
    /// 210 × 210 mm square.
    Square,
}

/// A physical page rectangle in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageRectMm {
    pub width_mm: f32,
    pub height_mm: f32,
}

/// A physical page rectangle in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageRectPt {
    pub width_pt: f32,
    pub height_pt: f32,
}

impl PageSizePreset {
    /// Fallback preset used when an untyped boundary supplies an
    /// unrecognized value.
    pub const DEFAULT: PageSizePreset = PageSizePreset::SmallPortrait;

    /// Trim rectangle — the final cut page size.
    pub fn content(self) -> PageRectMm {
        match self {
            PageSizePreset::SmallPortrait => PageRectMm {
                width_mm: 148.0,
                height_mm: 210.0,
            },
            PageSizePreset::LargePortrait => PageRectMm {
                width_mm: 210.0,
                height_mm: 297.0,
            },
            PageSizePreset::Square => PageRectMm {
                width_mm: 210.0,
                height_mm: 210.0,
            },
        }
    }

    /// Trim rectangle plus the bleed margin on every edge.
    pub fn with_bleed(self) -> PageRectMm {
        let content = self.content();
        PageRectMm {
            width_mm: content.width_mm + 2.0 * BLEED_MM,
            height_mm: content.height_mm + 2.0 * BLEED_MM,
        }
    }

    /// Parses a preset name arriving from an untyped boundary (DB column,
    /// request body). Unrecognized names resolve to [`PageSizePreset::DEFAULT`]
    /// rather than failing — the UI constrains the enumeration, so anything
    /// else is a stale client.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "small_portrait" => PageSizePreset::SmallPortrait,
            "large_portrait" => PageSizePreset::LargePortrait,
            "square" => PageSizePreset::Square,
            _ => PageSizePreset::DEFAULT,
        }
    }

    /// Stable string form, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            PageSizePreset::SmallPortrait => "small_portrait",
            PageSizePreset::LargePortrait => "large_portrait",
            PageSizePreset::Square => "square",
        }
    }
}

/// Resolves a preset to its physical rectangle in points.
///
/// Selects the bleed or content rectangle per `include_bleed` and converts
/// millimetres to points. Pure lookup; cannot fail.
pub fn resolve_page_rect(preset: PageSizePreset, include_bleed: bool) -> PageRectPt {
    let rect = if include_bleed {
        preset.with_bleed()
    } else {
        preset.content()
    };
    PageRectPt {
        width_pt: rect.width_mm * MM_TO_PT,
        height_pt: rect.height_mm * MM_TO_PT,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PRESETS: [PageSizePreset; 3] = [
        PageSizePreset::SmallPortrait,
        PageSizePreset::LargePortrait,
        PageSizePreset::Square,
    ];

    #[test]
    fn test_bleed_adds_twice_the_margin_on_both_axes() {
        for preset in ALL_PRESETS {
            let content = preset.content();
            let bleed = preset.with_bleed();
            assert!(
                (bleed.width_mm - content.width_mm - 2.0 * BLEED_MM).abs() < 1e-4,
                "{preset:?} width"
            );
            assert!(
                (bleed.height_mm - content.height_mm - 2.0 * BLEED_MM).abs() < 1e-4,
                "{preset:?} height"
            );
        }
    }

    #[test]
    fn test_preset_table_matches_vendor_dimensions() {
        let small = PageSizePreset::SmallPortrait;
        assert_eq!(small.content().width_mm, 148.0);
        assert_eq!(small.content().height_mm, 210.0);
        assert_eq!(small.with_bleed().width_mm, 154.0);
        assert_eq!(small.with_bleed().height_mm, 216.0);

        let large = PageSizePreset::LargePortrait;
        assert_eq!(large.content().width_mm, 210.0);
        assert_eq!(large.content().height_mm, 297.0);
        assert_eq!(large.with_bleed().width_mm, 216.0);
        assert_eq!(large.with_bleed().height_mm, 303.0);

        let square = PageSizePreset::Square;
        assert_eq!(square.content().width_mm, 210.0);
        assert_eq!(square.content().height_mm, 210.0);
        assert_eq!(square.with_bleed().width_mm, 216.0);
        assert_eq!(square.with_bleed().height_mm, 216.0);
    }

    #[test]
    fn test_resolve_page_rect_converts_to_points() {
        let rect = resolve_page_rect(PageSizePreset::SmallPortrait, false);
        assert!((rect.width_pt - 148.0 * MM_TO_PT).abs() < 1e-3);
        assert!((rect.height_pt - 210.0 * MM_TO_PT).abs() < 1e-3);
    }

    #[test]
    fn test_resolve_page_rect_bleed_is_larger() {
        for preset in ALL_PRESETS {
            let content = resolve_page_rect(preset, false);
            let bleed = resolve_page_rect(preset, true);
            assert!(bleed.width_pt > content.width_pt);
            assert!(bleed.height_pt > content.height_pt);
        }
    }

    #[test]
    fn test_parse_or_default_known_names() {
        assert_eq!(
            PageSizePreset::parse_or_default("large_portrait"),
            PageSizePreset::LargePortrait
        );
        assert_eq!(
            PageSizePreset::parse_or_default("square"),
            PageSizePreset::Square
        );
    }

    #[test]
    fn test_parse_or_default_unknown_falls_back() {
        assert_eq!(
            PageSizePreset::parse_or_default("letter"),
            PageSizePreset::SmallPortrait
        );
        assert_eq!(
            PageSizePreset::parse_or_default(""),
            PageSizePreset::SmallPortrait
        );
    }

    #[test]
    fn test_as_str_round_trips_through_parse() {
        for preset in ALL_PRESETS {
            assert_eq!(PageSizePreset::parse_or_default(preset.as_str()), preset);
        }
    }

    #[test]
    fn test_serde_uses_snake_case_names() {
        let json = serde_json::to_string(&PageSizePreset::SmallPortrait).unwrap();
        assert_eq!(json, "\"small_portrait\"");
        let back: PageSizePreset = serde_json::from_str("\"square\"").unwrap();
        assert_eq!(back, PageSizePreset::Square);
    }
}
