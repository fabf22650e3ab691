//! Axum route handlers for the story-generation pipeline.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::outline::generate_outline;
use crate::generation::prompts::IMAGE_PROMPT_TEMPLATE;
use crate::generation::writer::write_pages;
use crate::models::story::{PageRow, StoryRow};
use crate::state::AppState;
use crate::stories::handlers::{fetch_pages, fetch_story};
use crate::validation::reading_level::ReadingLevel;
use crate::validation::words::{classify, count_words, WordCountStatus};

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct OutlineResponse {
    pub story_id: Uuid,
    pub status: String,
    pub pages: Vec<OutlinedPage>,
}

#[derive(Debug, Serialize)]
pub struct OutlinedPage {
    pub page_number: u32,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct WriteResponse {
    pub story_id: Uuid,
    pub status: String,
    pub pages: Vec<WrittenPageSummary>,
}

/// Per-page writing result: the word count plus the display classification
/// against the story's reading-level band.
#[derive(Debug, Serialize)]
pub struct WrittenPageSummary {
    pub page_number: u32,
    pub word_count: u32,
    pub word_count_status: WordCountStatus,
    pub was_adjusted: bool,
}

#[derive(Debug, Serialize)]
pub struct PageImageResponse {
    pub page_number: u32,
    pub image_url: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/stories/:id/outline
///
/// Plans the story arc and persists one page row per planned page. Any
/// previous outline (and its drafts) for the story is replaced.
pub async fn handle_outline(
    State(state): State<AppState>,
    Path(story_id): Path<Uuid>,
) -> Result<Json<OutlineResponse>, AppError> {
    let story = fetch_story(&state, story_id).await?;

    let outline = generate_outline(&state.llm, &story).await?;

    let mut tx = state.db.begin().await?;

    sqlx::query("DELETE FROM story_pages WHERE story_id = $1")
        .bind(story_id)
        .execute(&mut *tx)
        .await?;

    for page in &outline {
        sqlx::query(
            "INSERT INTO story_pages (id, story_id, page_number, text, summary, image_locked, is_user_edited)
             VALUES ($1, $2, $3, '', $4, false, false)",
        )
        .bind(Uuid::new_v4())
        .bind(story_id)
        .bind(page.page_number as i32)
        .bind(&page.summary)
        .execute(&mut *tx)
        .await?;
    }

    sqlx::query("UPDATE stories SET status = 'outlined', updated_at = now() WHERE id = $1")
        .bind(story_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(story_id = %story_id, pages = outline.len(), "outline persisted");

    Ok(Json(OutlineResponse {
        story_id,
        status: "outlined".to_string(),
        pages: outline
            .into_iter()
            .map(|p| OutlinedPage {
                page_number: p.page_number,
                summary: p.summary,
            })
            .collect(),
    }))
}

/// POST /api/v1/stories/:id/write
///
/// Writes body text for every outlined page concurrently, then reports each
/// page's word count against the reading-level band. Pages a parent already
/// edited by hand are left untouched.
pub async fn handle_write(
    State(state): State<AppState>,
    Path(story_id): Path<Uuid>,
) -> Result<Json<WriteResponse>, AppError> {
    let story = fetch_story(&state, story_id).await?;
    let level = ReadingLevel::parse_or_default(&story.reading_level);

    let rows = fetch_pages(&state, story_id).await?;
    if rows.is_empty() {
        return Err(AppError::Validation(format!(
            "Story {story_id} has no outline; call the outline step first"
        )));
    }

    let outline: Vec<_> = rows
        .iter()
        .filter(|r| !r.is_user_edited)
        .map(|r| crate::generation::outline::PageOutline {
            page_number: r.page_number as u32,
            summary: r.summary.clone(),
        })
        .collect();

    let written = write_pages(&state.llm, &story, &outline).await?;

    let mut tx = state.db.begin().await?;
    for page in &written {
        sqlx::query(
            "UPDATE story_pages SET text = $1, updated_at = now()
             WHERE story_id = $2 AND page_number = $3",
        )
        .bind(&page.text)
        .bind(story_id)
        .bind(page.page_number as i32)
        .execute(&mut *tx)
        .await?;
    }
    sqlx::query("UPDATE stories SET status = 'drafted', updated_at = now() WHERE id = $1")
        .bind(story_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    // Summaries cover every page, including user-edited ones that were
    // skipped by the writer.
    let rows = fetch_pages(&state, story_id).await?;
    let pages = rows
        .iter()
        .map(|r| {
            let word_count = count_words(&r.text);
            WrittenPageSummary {
                page_number: r.page_number as u32,
                word_count,
                word_count_status: classify(word_count, level),
                was_adjusted: written
                    .iter()
                    .any(|w| w.page_number == r.page_number as u32 && w.was_adjusted),
            }
        })
        .collect();

    Ok(Json(WriteResponse {
        story_id,
        status: "drafted".to_string(),
        pages,
    }))
}

/// POST /api/v1/stories/:id/pages/:n/image
///
/// Generates (or regenerates) the illustration for one page from its outline
/// summary. Locked text-only pages refuse regeneration until unlocked.
pub async fn handle_page_image(
    State(state): State<AppState>,
    Path((story_id, page_number)): Path<(Uuid, u32)>,
) -> Result<Json<PageImageResponse>, AppError> {
    let story = fetch_story(&state, story_id).await?;

    let page = sqlx::query_as::<_, PageRow>(
        "SELECT * FROM story_pages WHERE story_id = $1 AND page_number = $2",
    )
    .bind(story_id)
    .bind(page_number as i32)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Page {page_number} of story {story_id} not found")))?;

    if page.image_locked {
        return Err(AppError::Validation(format!(
            "Page {page_number} is locked as text-only; unlock it before generating an image"
        )));
    }

    let prompt = build_image_prompt(&story, &page.summary);
    let image_url = state.images.generate(story_id, page_number, &prompt).await?;

    sqlx::query(
        "UPDATE story_pages SET image_url = $1, updated_at = now()
         WHERE story_id = $2 AND page_number = $3",
    )
    .bind(&image_url)
    .bind(story_id)
    .bind(page_number as i32)
    .execute(&state.db)
    .await?;

    Ok(Json(PageImageResponse {
        page_number,
        image_url,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn build_image_prompt(story: &StoryRow, summary: &str) -> String {
    let names = if story.child_names.is_empty() {
        "a brave child".to_string()
    } else {
        story.child_names.join(", ")
    };
    IMAGE_PROMPT_TEMPLATE
        .replace("{story_type}", &story.story_type)
        .replace("{child_names}", &names)
        .replace("{summary}", summary)
}
