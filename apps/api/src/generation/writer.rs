//! Page writing — one LLM call per page, fired concurrently.
//!
//! Results are collected in completion order, which is arbitrary; callers
//! persist them keyed by `page_number` and the layout engine re-establishes
//! page order at build time. After the concurrent writes, a single
//! adjustment pass expands or compresses any page whose word count falls
//! outside the export band, then accepts whatever the model returned —
//! remaining outliers surface through validation, not as hard failures.

use serde::Deserialize;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::outline::PageOutline;
use crate::generation::prompts::{
    ADJUST_SYSTEM, COMPRESS_PROMPT_TEMPLATE, EXPAND_PROMPT_TEMPLATE, PAGE_WRITE_PROMPT_TEMPLATE,
    PAGE_WRITE_SYSTEM,
};
use crate::llm_client::prompts::AGE_APPROPRIATE_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::models::story::StoryRow;
use crate::validation::reading_level::ReadingLevel;
use crate::validation::validate_page;
use crate::validation::words::{classify, count_words, WordCountStatus};

/// A written page in completion order. `was_adjusted` marks pages that went
/// through an expand/compress call.
#[derive(Debug, Clone)]
pub struct WrittenPage {
    pub page_number: u32,
    pub text: String,
    pub was_adjusted: bool,
}

/// Intermediate type for deserializing the model's page response.
#[derive(Debug, Deserialize)]
struct DraftPageText {
    text: String,
}

/// Writes every outlined page concurrently, then runs the adjustment pass.
pub async fn write_pages(
    llm: &LlmClient,
    story: &StoryRow,
    outline: &[PageOutline],
) -> Result<Vec<WrittenPage>, AppError> {
    let level = ReadingLevel::parse_or_default(&story.reading_level);
    let outline_json = serde_json::to_string(outline)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize outline: {e}")))?;

    let mut set: JoinSet<Result<WrittenPage, AppError>> = JoinSet::new();
    for page in outline.iter().cloned() {
        let llm = llm.clone();
        let story = story.clone();
        let outline_json = outline_json.clone();
        set.spawn(async move { write_one(&llm, &story, &page, &outline_json, level).await });
    }

    // Completion order, not page order — downstream sorts by page_number.
    let mut pages = Vec::with_capacity(outline.len());
    while let Some(joined) = set.join_next().await {
        let page = joined
            .map_err(|e| AppError::Internal(anyhow::anyhow!("page write task panicked: {e}")))??;
        pages.push(page);
    }

    // Adjustment pass: one expand/compress attempt per out-of-band page.
    let mut adjusted_count = 0u32;
    for page in &mut pages {
        if validate_page(page.page_number, &page.text, level).is_valid {
            continue;
        }
        let adjusted = adjust_page(llm, &page.text, level).await;
        match adjusted {
            Ok(text) => {
                page.text = text;
                page.was_adjusted = true;
                adjusted_count += 1;
            }
            Err(e) => {
                // Keep the original draft; validation will flag it.
                warn!(
                    page_number = page.page_number,
                    "length adjustment failed, keeping draft: {e}"
                );
            }
        }
    }

    info!(
        story_id = %story.id,
        pages = pages.len(),
        adjusted = adjusted_count,
        "page writing complete"
    );
    Ok(pages)
}

async fn write_one(
    llm: &LlmClient,
    story: &StoryRow,
    page: &PageOutline,
    outline_json: &str,
    level: ReadingLevel,
) -> Result<WrittenPage, AppError> {
    let prompt = build_page_prompt(story, page, outline_json, level);
    let draft: DraftPageText = llm
        .call_json(&prompt, PAGE_WRITE_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Page {} write failed: {e}", page.page_number)))?;

    Ok(WrittenPage {
        page_number: page.page_number,
        text: draft.text,
        was_adjusted: false,
    })
}

/// One expand-or-compress call, direction chosen by the display
/// classification. A page already inside the strict band never gets here.
async fn adjust_page(
    llm: &LlmClient,
    text: &str,
    level: ReadingLevel,
) -> Result<String, AppError> {
    let band = level.word_band();
    let word_count = count_words(text);
    let template = match classify(word_count, level) {
        WordCountStatus::Low => EXPAND_PROMPT_TEMPLATE,
        WordCountStatus::High => COMPRESS_PROMPT_TEMPLATE,
        WordCountStatus::Good => return Ok(text.to_string()),
    };

    let prompt = template
        .replace("{page_text}", text)
        .replace("{word_count}", &word_count.to_string())
        .replace("{min_words}", &band.min.to_string())
        .replace("{max_words}", &band.max.to_string());

    let adjusted: DraftPageText = llm
        .call_json(&prompt, ADJUST_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Length adjustment failed: {e}")))?;
    Ok(adjusted.text)
}

pub(crate) fn build_page_prompt(
    story: &StoryRow,
    page: &PageOutline,
    outline_json: &str,
    level: ReadingLevel,
) -> String {
    let band = level.word_band();
    let names = if story.child_names.is_empty() {
        "a brave child".to_string()
    } else {
        story.child_names.join(", ")
    };

    PAGE_WRITE_PROMPT_TEMPLATE
        .replace("{age_instruction}", AGE_APPROPRIATE_INSTRUCTION)
        .replace("{page_number}", &page.page_number.to_string())
        .replace("{page_count}", &story.page_count.to_string())
        .replace("{summary}", &page.summary)
        .replace("{outline_json}", outline_json)
        .replace("{child_names}", &names)
        .replace("{story_type}", &story.story_type)
        .replace("{min_words}", &band.min.to_string())
        .replace("{max_words}", &band.max.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
