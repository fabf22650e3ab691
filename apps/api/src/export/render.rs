//! PDF emission — turns a [`DocumentArtifact`] into finished PDF bytes.
//!
//! The artifact already carries every placement decision in points from the
//! top-left corner; this module only converts coordinates into printpdf's
//! bottom-left millimetre space and draws. Nothing here measures text.
//!
//! Embedded custom fonts are a follow-up; until then the builtin Helvetica
//! faces stand in for the book faces at identical sizes, which keeps the
//! placements valid because the artifact was measured against our own
//! width tables.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};

use crate::errors::AppError;
use crate::layout::document::{CoverText, DocumentArtifact, ImageRegion, PlacedLine};
use crate::layout::page_size::PageRectPt;
use crate::layout::MM_TO_PT;

const PLACEHOLDER_OUTLINE_PT: f32 = 0.75;
const LAYER_NAME: &str = "content";

/// Renders the document to PDF bytes: cover page first, then one PDF page
/// per interior page in artifact order.
pub fn render_pdf(doc: &DocumentArtifact, title: &str) -> Result<Vec<u8>, AppError> {
    let rect = doc.rect;
    let (pdf, cover_page, cover_layer) = PdfDocument::new(
        title,
        Mm(rect.width_pt / MM_TO_PT),
        Mm(rect.height_pt / MM_TO_PT),
        LAYER_NAME,
    );

    let body_font = pdf
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("builtin font load failed: {e}")))?;
    let display_font = pdf
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("builtin font load failed: {e}")))?;

    let layer = pdf.get_page(cover_page).get_layer(cover_layer);
    draw_cover_text(&layer, &doc.cover.title, rect, &display_font);
    if let Some(subtitle) = &doc.cover.subtitle {
        draw_cover_text(&layer, subtitle, rect, &display_font);
    }
    if let Some(dedication) = &doc.cover.dedication {
        draw_cover_text(&layer, dedication, rect, &body_font);
    }

    for page in &doc.pages {
        let (page_idx, layer_idx) = pdf.add_page(
            Mm(rect.width_pt / MM_TO_PT),
            Mm(rect.height_pt / MM_TO_PT),
            LAYER_NAME,
        );
        let layer = pdf.get_page(page_idx).get_layer(layer_idx);

        if let Some(region) = &page.image_region {
            draw_image_region(&layer, region, rect);
        }
        for line in &page.body_lines {
            draw_placed_line(&layer, line, rect, &body_font);
        }
        draw_placed_line(&layer, &page.number_label, rect, &display_font);
    }

    pdf.save_to_bytes()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF serialization failed: {e}")))
}

/// Top-left-origin point coordinates to printpdf's bottom-left-origin mm.
fn to_mm(x_pt: f32, y_pt: f32, rect: PageRectPt) -> (Mm, Mm) {
    (Mm(x_pt / MM_TO_PT), Mm((rect.height_pt - y_pt) / MM_TO_PT))
}

fn draw_placed_line(
    layer: &PdfLayerReference,
    line: &PlacedLine,
    rect: PageRectPt,
    font: &IndirectFontRef,
) {
    let (x, y) = to_mm(line.x_pt, line.y_pt, rect);
    layer.use_text(&line.text, line.font_size_pt, x, y, font);
}

fn draw_cover_text(
    layer: &PdfLayerReference,
    text: &CoverText,
    rect: PageRectPt,
    font: &IndirectFontRef,
) {
    let (x, y) = to_mm(
        text.pos.x * rect.width_pt,
        text.pos.y * rect.height_pt,
        rect,
    );
    layer.use_text(&text.text, text.font_size_pt, x, y, font);
}

/// Outlines the reserved illustration region. Raster placement follows once
/// exported images are mirrored into S3; for now the outline keeps the
/// print proof honest about where art will sit.
fn draw_image_region(layer: &PdfLayerReference, region: &ImageRegion, rect: PageRectPt) {
    let (left, top) = to_mm(region.x_pt, region.y_pt, rect);
    let (right, bottom) = to_mm(
        region.x_pt + region.width_pt,
        region.y_pt + region.height_pt,
        rect,
    );

    let outline = Line {
        points: vec![
            (Point::new(left, top), false),
            (Point::new(right, top), false),
            (Point::new(right, bottom), false),
            (Point::new(left, bottom), false),
        ],
        is_closed: true,
    };

    layer.set_outline_color(Color::Rgb(Rgb::new(0.65, 0.65, 0.65, None)));
    layer.set_outline_thickness(PLACEHOLDER_OUTLINE_PT);
    layer.add_line(outline);
}
