//! Axum route handlers for story CRUD and page editing.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::layout::PageSizePreset;
use crate::models::story::{PageRow, StoryRow};
use crate::state::AppState;
use crate::validation::reading_level::ReadingLevel;
use crate::validation::words::{classify, count_words, WordCountStatus};
use crate::validation::{validate_document, ValidationError};

/// Bounds on the number of story pages a parent can order. The lower bound
/// keeps the arc from degenerating; the upper bound is the print vendor's
/// saddle-stitch limit.
const MIN_PAGE_COUNT: i16 = 4;
const MAX_PAGE_COUNT: i16 = 24;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateStoryRequest {
    #[serde(default)]
    pub child_names: Vec<String>,
    pub story_type: String,
    #[serde(default)]
    pub dedication: Option<String>,
    pub reading_level: String,
    pub page_size: String,
    pub page_count: i16,
}

#[derive(Debug, Serialize)]
pub struct StoryDetailResponse {
    pub story: StoryRow,
    pub pages: Vec<PageRow>,
}

#[derive(Debug, Deserialize)]
pub struct EditPageRequest {
    pub text: String,
}

/// Echo of an edited page with its fresh word-count reading, so the editor
/// UI can recolor the count badge without a second request.
#[derive(Debug, Serialize)]
pub struct EditPageResponse {
    pub page_number: u32,
    pub word_count: u32,
    pub word_count_status: WordCountStatus,
}

#[derive(Debug, Deserialize)]
pub struct ImageLockRequest {
    pub image_locked: bool,
}

#[derive(Debug, Serialize)]
pub struct ImageLockResponse {
    pub page_number: u32,
    pub image_locked: bool,
}

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub export_ready: bool,
    pub errors: Vec<ValidationError>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/stories
///
/// Creates a story from the parent's preferences. Unknown reading-level or
/// page-size strings fall back to the defaults rather than erroring, so old
/// clients keep working across renames.
pub async fn handle_create_story(
    State(state): State<AppState>,
    Json(request): Json<CreateStoryRequest>,
) -> Result<Json<StoryRow>, AppError> {
    if request.story_type.trim().is_empty() {
        return Err(AppError::Validation("story_type cannot be empty".to_string()));
    }
    if !(MIN_PAGE_COUNT..=MAX_PAGE_COUNT).contains(&request.page_count) {
        return Err(AppError::Validation(format!(
            "page_count must be between {MIN_PAGE_COUNT} and {MAX_PAGE_COUNT}"
        )));
    }

    let child_names: Vec<String> = request
        .child_names
        .iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();

    let reading_level = ReadingLevel::parse_or_default(&request.reading_level);
    let page_size = PageSizePreset::parse_or_default(&request.page_size);

    let story = sqlx::query_as::<_, StoryRow>(
        "INSERT INTO stories (id, child_names, story_type, dedication, reading_level, page_size, page_count, status)
         VALUES ($1, $2, $3, $4, $5, $6, $7, 'new')
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&child_names)
    .bind(request.story_type.trim())
    .bind(&request.dedication)
    .bind(reading_level.as_str())
    .bind(page_size.as_str())
    .bind(request.page_count)
    .fetch_one(&state.db)
    .await?;

    info!(story_id = %story.id, level = %reading_level, preset = page_size.as_str(), "story created");

    Ok(Json(story))
}

/// GET /api/v1/stories/:id
pub async fn handle_get_story(
    State(state): State<AppState>,
    Path(story_id): Path<Uuid>,
) -> Result<Json<StoryDetailResponse>, AppError> {
    let story = fetch_story(&state, story_id).await?;
    let pages = fetch_pages(&state, story_id).await?;
    Ok(Json(StoryDetailResponse { story, pages }))
}

/// PATCH /api/v1/stories/:id/pages/:n
///
/// Replaces one page's text with the parent's edit and marks the page
/// user-edited so the writing step will not overwrite it.
pub async fn handle_edit_page(
    State(state): State<AppState>,
    Path((story_id, page_number)): Path<(Uuid, u32)>,
    Json(request): Json<EditPageRequest>,
) -> Result<Json<EditPageResponse>, AppError> {
    let story = fetch_story(&state, story_id).await?;
    let level = ReadingLevel::parse_or_default(&story.reading_level);

    let updated = sqlx::query(
        "UPDATE story_pages SET text = $1, is_user_edited = true, updated_at = now()
         WHERE story_id = $2 AND page_number = $3",
    )
    .bind(&request.text)
    .bind(story_id)
    .bind(page_number as i32)
    .execute(&state.db)
    .await?;

    if updated.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Page {page_number} of story {story_id} not found"
        )));
    }

    let word_count = count_words(&request.text);
    Ok(Json(EditPageResponse {
        page_number,
        word_count,
        word_count_status: classify(word_count, level),
    }))
}

/// PATCH /api/v1/stories/:id/pages/:n/image-lock
///
/// Marks a page as intentionally text-only (or clears the mark). Locked
/// pages pass document validation without an illustration.
pub async fn handle_image_lock(
    State(state): State<AppState>,
    Path((story_id, page_number)): Path<(Uuid, u32)>,
    Json(request): Json<ImageLockRequest>,
) -> Result<Json<ImageLockResponse>, AppError> {
    let updated = sqlx::query(
        "UPDATE story_pages SET image_locked = $1, updated_at = now()
         WHERE story_id = $2 AND page_number = $3",
    )
    .bind(request.image_locked)
    .bind(story_id)
    .bind(page_number as i32)
    .execute(&state.db)
    .await?;

    if updated.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Page {page_number} of story {story_id} not found"
        )));
    }

    Ok(Json(ImageLockResponse {
        page_number,
        image_locked: request.image_locked,
    }))
}

/// GET /api/v1/stories/:id/validation
///
/// Dry-run of the export gate: the same checks the export handler enforces,
/// returned as data instead of a 422.
pub async fn handle_validation(
    State(state): State<AppState>,
    Path(story_id): Path<Uuid>,
) -> Result<Json<ValidationResponse>, AppError> {
    let story = fetch_story(&state, story_id).await?;
    let level = ReadingLevel::parse_or_default(&story.reading_level);

    let drafts: Vec<_> = fetch_pages(&state, story_id)
        .await?
        .iter()
        .map(|r| r.to_draft())
        .collect();

    let errors = validate_document(&drafts, level);
    Ok(Json(ValidationResponse {
        export_ready: errors.is_empty(),
        errors,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Shared lookups
// ────────────────────────────────────────────────────────────────────────────

pub(crate) async fn fetch_story(state: &AppState, story_id: Uuid) -> Result<StoryRow, AppError> {
    sqlx::query_as::<_, StoryRow>("SELECT * FROM stories WHERE id = $1")
        .bind(story_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Story {story_id} not found")))
}

pub(crate) async fn fetch_pages(
    state: &AppState,
    story_id: Uuid,
) -> Result<Vec<PageRow>, AppError> {
    Ok(sqlx::query_as::<_, PageRow>(
        "SELECT * FROM story_pages WHERE story_id = $1 ORDER BY page_number",
    )
    .bind(story_id)
    .fetch_all(&state.db)
    .await?)
}
