//! Document assembly — turns page drafts into a renderable paginated
//! artifact (one cover plus one artifact per page).
//!
//! The artifact carries placement instructions only: absolute positions in
//! points (top-left origin, y growing downward) for body copy, and
//! fractional positions for cover elements so the same cover recipe scales
//! across all three page presets. The PDF renderer in `export::render`
//! consumes these without re-measuring anything.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::{get_metrics, FontFamily};
use crate::layout::page_size::{resolve_page_rect, PageRectPt, PageSizePreset, MM_TO_PT};
use crate::layout::wrap::wrap_text;
use crate::models::book::{CoverMeta, PageDraft};

// ────────────────────────────────────────────────────────────────────────────
// Variant constants
// ────────────────────────────────────────────────────────────────────────────

/// Body type sizes. Print is set larger for legibility after trimming.
const WEB_BODY_PT: f32 = 12.0;
const PRINT_BODY_PT: f32 = 14.0;

/// Side margins. The print margin is wider so copy stays clear of the trim
/// line even after a worst-case cut.
const WEB_MARGIN_MM: f32 = 15.0;
const PRINT_MARGIN_MM: f32 = 20.0;

/// Body copy starts at this fraction of the page height; the upper portion
/// is the illustration area.
const BODY_TOP_FRACTION: f32 = 0.55;

/// Line advance as a multiple of the body font size.
const LINE_ADVANCE_FACTOR: f32 = 1.6;

const COVER_TITLE_PT: f32 = 32.0;
const COVER_SUBTITLE_PT: f32 = 18.0;
const COVER_DEDICATION_PT: f32 = 12.0;
const PAGE_NUMBER_PT: f32 = 10.0;

// ────────────────────────────────────────────────────────────────────────────
// Artifact types
// ────────────────────────────────────────────────────────────────────────────

/// A position expressed as fractions of the page rectangle (0.0–1.0 on each
/// axis, measured from the top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractionalPos {
    pub x: f32,
    pub y: f32,
}

/// A cover element placed at a fractional position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverText {
    pub text: String,
    pub pos: FractionalPos,
    pub font_size_pt: f32,
}

/// The cover page description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverArtifact {
    pub title: CoverText,
    pub subtitle: Option<CoverText>,
    pub dedication: Option<CoverText>,
}

/// A single placed line of text, in points from the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLine {
    pub text: String,
    pub x_pt: f32,
    pub y_pt: f32,
    pub font_size_pt: f32,
}

/// Reserved illustration region in the upper portion of a print page.
/// `image_url` is the raster to place there, if one exists; otherwise the
/// renderer outlines the region as a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRegion {
    pub x_pt: f32,
    pub y_pt: f32,
    pub width_pt: f32,
    pub height_pt: f32,
    pub image_url: Option<String>,
}

/// One rendered interior page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageArtifact {
    pub page_number: u32,
    pub number_label: PlacedLine,
    pub body_lines: Vec<PlacedLine>,
    pub image_region: Option<ImageRegion>,
}

/// The complete paginated document: cover first, then interior pages in
/// ascending page order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentArtifact {
    pub preset: PageSizePreset,
    pub include_bleed: bool,
    pub rect: PageRectPt,
    pub cover: CoverArtifact,
    pub pages: Vec<PageArtifact>,
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

/// Renders the cover description from the story preferences.
///
/// Every element is placed fractionally so the recipe holds across presets:
/// title at 10% from the left and 80% from the top, subtitle and dedication
/// stacked beneath it.
pub fn render_cover(meta: &CoverMeta) -> CoverArtifact {
    let title = CoverText {
        text: meta.title(),
        pos: FractionalPos { x: 0.10, y: 0.80 },
        font_size_pt: COVER_TITLE_PT,
    };

    let subtitle = (!meta.child_names.is_empty()).then(|| CoverText {
        text: meta.story_type.clone(),
        pos: FractionalPos { x: 0.10, y: 0.87 },
        font_size_pt: COVER_SUBTITLE_PT,
    });

    let dedication = meta.dedication.as_ref().map(|d| CoverText {
        text: d.clone(),
        pos: FractionalPos { x: 0.10, y: 0.94 },
        font_size_pt: COVER_DEDICATION_PT,
    });

    CoverArtifact {
        title,
        subtitle,
        dedication,
    }
}

/// Renders one interior page at the given rectangle.
///
/// Body lines are wrapped at the variant's size and stacked downward from
/// the body top offset. The print variant additionally reserves the
/// illustration region above the body.
pub fn render_page(page: &PageDraft, rect: PageRectPt, include_bleed: bool) -> PageArtifact {
    let (body_pt, margin_pt) = if include_bleed {
        (PRINT_BODY_PT, PRINT_MARGIN_MM * MM_TO_PT)
    } else {
        (WEB_BODY_PT, WEB_MARGIN_MM * MM_TO_PT)
    };

    let body_metrics = get_metrics(FontFamily::Andika);
    let max_width = rect.width_pt - 2.0 * margin_pt;
    let top = rect.height_pt * BODY_TOP_FRACTION;
    let advance = body_pt * LINE_ADVANCE_FACTOR;

    let body_lines = wrap_text(&page.text, body_metrics, body_pt, max_width)
        .into_iter()
        .enumerate()
        .map(|(i, text)| PlacedLine {
            text,
            x_pt: margin_pt,
            y_pt: top + i as f32 * advance,
            font_size_pt: body_pt,
        })
        .collect();

    let display_metrics = get_metrics(FontFamily::Baloo);
    let number_text = page.page_number.to_string();
    let number_label = PlacedLine {
        x_pt: rect.width_pt - margin_pt - display_metrics.measure_pt(&number_text, PAGE_NUMBER_PT),
        y_pt: rect.height_pt - 0.6 * margin_pt,
        text: number_text,
        font_size_pt: PAGE_NUMBER_PT,
    };

    let image_region = include_bleed.then(|| ImageRegion {
        x_pt: margin_pt,
        y_pt: margin_pt,
        width_pt: rect.width_pt - 2.0 * margin_pt,
        height_pt: rect.height_pt * BODY_TOP_FRACTION - margin_pt - advance,
        image_url: page.image_url.clone(),
    });

    PageArtifact {
        page_number: page.page_number,
        number_label,
        body_lines,
        image_region,
    }
}

/// Builds the complete paginated document.
///
/// Upstream producers return pages in completion order after concurrent
/// generation, so the pages are sorted by ascending `page_number` before
/// rendering. Zero input pages still yields a valid cover-only artifact.
pub fn build_document(
    pages: &[PageDraft],
    preset: PageSizePreset,
    include_bleed: bool,
    meta: &CoverMeta,
) -> DocumentArtifact {
    let rect = resolve_page_rect(preset, include_bleed);

    let mut ordered: Vec<&PageDraft> = pages.iter().collect();
    ordered.sort_by_key(|p| p.page_number);

    DocumentArtifact {
        preset,
        include_bleed,
        rect,
        cover: render_cover(meta),
        pages: ordered
            .iter()
            .map(|p| render_page(p, rect, include_bleed))
            .collect(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> CoverMeta {
        CoverMeta {
            child_names: vec!["Mia".to_string()],
            story_type: "Jungle Quest".to_string(),
            dedication: Some("For Grandma".to_string()),
        }
    }

    fn page(n: u32, text: &str) -> PageDraft {
        PageDraft {
            page_number: n,
            text: text.to_string(),
            image_url: None,
            image_locked: false,
        }
    }

    #[test]
    fn test_cover_places_title_fractionally() {
        let cover = render_cover(&meta());
        assert_eq!(cover.title.text, "Mia's Jungle Quest");
        assert!((cover.title.pos.x - 0.10).abs() < 1e-6);
        assert!((cover.title.pos.y - 0.80).abs() < 1e-6);
        assert_eq!(cover.subtitle.unwrap().text, "Jungle Quest");
        assert_eq!(cover.dedication.unwrap().text, "For Grandma");
    }

    #[test]
    fn test_cover_without_names_uses_fallback_title() {
        let m = CoverMeta {
            child_names: vec![],
            story_type: "Jungle Quest".to_string(),
            dedication: None,
        };
        let cover = render_cover(&m);
        assert_eq!(cover.title.text, "A Storybook Adventure");
        assert!(cover.subtitle.is_none());
        assert!(cover.dedication.is_none());
    }

    #[test]
    fn test_build_document_sorts_out_of_order_pages() {
        let pages = vec![page(3, "third"), page(1, "first"), page(2, "second")];
        let doc = build_document(&pages, PageSizePreset::SmallPortrait, false, &meta());
        let order: Vec<u32> = doc.pages.iter().map(|p| p.page_number).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_zero_pages_yields_cover_only_artifact() {
        let doc = build_document(&[], PageSizePreset::Square, true, &meta());
        assert!(doc.pages.is_empty());
        assert_eq!(doc.cover.title.text, "Mia's Jungle Quest");
        assert!(doc.rect.width_pt > 0.0);
    }

    #[test]
    fn test_build_document_is_idempotent() {
        let pages = vec![page(2, "two words here"), page(1, "one page of text")];
        let first = build_document(&pages, PageSizePreset::LargePortrait, true, &meta());
        let second = build_document(&pages, PageSizePreset::LargePortrait, true, &meta());
        assert_eq!(first, second);
    }

    #[test]
    fn test_print_variant_reserves_image_region() {
        let p = page(1, "a short page");
        let doc = build_document(
            &[p.clone()],
            PageSizePreset::SmallPortrait,
            true,
            &meta(),
        );
        let region = doc.pages[0].image_region.as_ref().expect("print region");
        assert!(region.width_pt > 0.0 && region.height_pt > 0.0);
        assert!(region.image_url.is_none());

        let web = build_document(&[p], PageSizePreset::SmallPortrait, false, &meta());
        assert!(web.pages[0].image_region.is_none());
    }

    #[test]
    fn test_image_url_carried_into_region() {
        let mut p = page(1, "text");
        p.image_url = Some("https://img.example/p1.png".to_string());
        let doc = build_document(&[p], PageSizePreset::SmallPortrait, true, &meta());
        assert_eq!(
            doc.pages[0].image_region.as_ref().unwrap().image_url.as_deref(),
            Some("https://img.example/p1.png")
        );
    }

    #[test]
    fn test_print_body_type_is_larger_than_web() {
        let p = page(1, "some body copy for the page");
        let web = build_document(&[p.clone()], PageSizePreset::SmallPortrait, false, &meta());
        let print = build_document(&[p], PageSizePreset::SmallPortrait, true, &meta());
        assert!(
            print.pages[0].body_lines[0].font_size_pt > web.pages[0].body_lines[0].font_size_pt
        );
    }

    #[test]
    fn test_body_lines_advance_downward() {
        let long = "word ".repeat(60);
        let doc = build_document(
            &[page(1, &long)],
            PageSizePreset::SmallPortrait,
            false,
            &meta(),
        );
        let lines = &doc.pages[0].body_lines;
        assert!(lines.len() > 1);
        for pair in lines.windows(2) {
            assert!(pair[1].y_pt > pair[0].y_pt);
            assert_eq!(pair[0].x_pt, pair[1].x_pt);
        }
    }

    #[test]
    fn test_page_number_sits_near_bottom_right() {
        let doc = build_document(
            &[page(7, "text")],
            PageSizePreset::SmallPortrait,
            false,
            &meta(),
        );
        let label = &doc.pages[0].number_label;
        assert_eq!(label.text, "7");
        assert!(label.x_pt > doc.rect.width_pt / 2.0);
        assert!(label.y_pt > doc.rect.height_pt * 0.9);
    }

    #[test]
    fn test_empty_page_text_renders_no_body_lines() {
        let doc = build_document(
            &[page(1, "")],
            PageSizePreset::SmallPortrait,
            false,
            &meta(),
        );
        assert!(doc.pages[0].body_lines.is_empty());
    }
}
