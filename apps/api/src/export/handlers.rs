//! Export flow: validate, lay out, render, and upload both book variants.

use aws_sdk_s3::primitives::ByteStream;
use axum::{
    extract::{Path, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::render::render_pdf;
use crate::layout::{build_document, PageSizePreset};
use crate::state::AppState;
use crate::stories::handlers::{fetch_pages, fetch_story};
use crate::validation::reading_level::ReadingLevel;
use crate::validation::validate_document;

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub story_id: Uuid,
    pub status: String,
    pub web_pdf_key: String,
    pub print_pdf_key: String,
}

/// POST /api/v1/stories/:id/export
///
/// Gate first: any validation error blocks the whole export with a 422
/// carrying the field-tagged error list. Otherwise both variants are built
/// from current page state — re-exporting after edits always reflects the
/// latest text, there is no frozen exported snapshot.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(story_id): Path<Uuid>,
) -> Result<Json<ExportResponse>, AppError> {
    let story = fetch_story(&state, story_id).await?;
    let level = ReadingLevel::parse_or_default(&story.reading_level);
    let preset = PageSizePreset::parse_or_default(&story.page_size);

    let drafts: Vec<_> = fetch_pages(&state, story_id)
        .await?
        .iter()
        .map(|r| r.to_draft())
        .collect();

    let errors = validate_document(&drafts, level);
    if !errors.is_empty() {
        return Err(AppError::ExportBlocked(errors));
    }

    let meta = story.cover_meta();
    let title = meta.title();

    // Web reads on screen at trim size; print carries bleed for the vendor.
    let web_doc = build_document(&drafts, preset, false, &meta);
    let print_doc = build_document(&drafts, preset, true, &meta);

    let web_bytes = Bytes::from(render_pdf(&web_doc, &title)?);
    let print_bytes = Bytes::from(render_pdf(&print_doc, &title)?);

    let web_key = format!("stories/{story_id}/web.pdf");
    let print_key = format!("stories/{story_id}/print.pdf");

    upload_pdf(&state, &web_key, web_bytes).await?;
    upload_pdf(&state, &print_key, print_bytes).await?;

    sqlx::query(
        "UPDATE stories SET s3_web_pdf_key = $1, s3_print_pdf_key = $2,
                status = 'exported', updated_at = now()
         WHERE id = $3",
    )
    .bind(&web_key)
    .bind(&print_key)
    .bind(story_id)
    .execute(&state.db)
    .await?;

    info!(story_id = %story_id, %web_key, %print_key, "story exported");

    Ok(Json(ExportResponse {
        story_id,
        status: "exported".to_string(),
        web_pdf_key: web_key,
        print_pdf_key: print_key,
    }))
}

async fn upload_pdf(state: &AppState, key: &str, bytes: Bytes) -> Result<(), AppError> {
    state
        .s3
        .put_object()
        .bucket(&state.config.s3_bucket)
        .key(key)
        .content_type("application/pdf")
        .body(ByteStream::from(bytes))
        .send()
        .await
        .map_err(|e| AppError::S3(format!("upload of {key} failed: {e}")))?;
    Ok(())
}
