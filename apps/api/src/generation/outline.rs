//! Outline generation — one LLM call planning the whole story arc.
//!
//! The model must return exactly `page_count` entries numbered densely from
//! 1; malformed numbering is retried a bounded number of times before the
//! request fails.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::generation::prompts::{OUTLINE_PROMPT_TEMPLATE, OUTLINE_SYSTEM};
use crate::llm_client::prompts::AGE_APPROPRIATE_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::models::story::StoryRow;

/// Max LLM retries when the outline comes back mis-numbered.
const MAX_OUTLINE_RETRIES: u32 = 2;

/// One planned page: a number and a one-beat summary. The summary later
/// seeds both the page-writing prompt and the illustration prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageOutline {
    pub page_number: u32,
    pub summary: String,
}

/// Generates the story outline, retrying on sparse or duplicated numbering.
pub async fn generate_outline(
    llm: &LlmClient,
    story: &StoryRow,
) -> Result<Vec<PageOutline>, AppError> {
    let page_count = story.page_count as u32;
    let prompt = build_outline_prompt(story);

    for attempt in 0..=MAX_OUTLINE_RETRIES {
        let mut outline: Vec<PageOutline> = llm
            .call_json(&prompt, OUTLINE_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Outline LLM call failed: {e}")))?;

        if is_densely_numbered(&outline, page_count) {
            outline.sort_by_key(|p| p.page_number);
            return Ok(outline);
        }

        warn!(
            "Outline attempt {}/{}: expected pages 1..={}, got {:?} — retrying",
            attempt + 1,
            MAX_OUTLINE_RETRIES + 1,
            page_count,
            outline.iter().map(|p| p.page_number).collect::<Vec<_>>()
        );
    }

    Err(AppError::Llm(format!(
        "Outline generation failed after {} attempts: page numbers were never dense 1..={}",
        MAX_OUTLINE_RETRIES + 1,
        page_count
    )))
}

/// True iff the outline contains exactly `expected` pages numbered
/// 1..=expected with no gaps or duplicates, in any order.
pub(crate) fn is_densely_numbered(pages: &[PageOutline], expected: u32) -> bool {
    if pages.len() != expected as usize {
        return false;
    }
    let mut numbers: Vec<u32> = pages.iter().map(|p| p.page_number).collect();
    numbers.sort_unstable();
    numbers
        .iter()
        .enumerate()
        .all(|(i, &n)| n == i as u32 + 1)
}

fn build_outline_prompt(story: &StoryRow) -> String {
    let names = if story.child_names.is_empty() {
        "a brave child".to_string()
    } else {
        story.child_names.join(", ")
    };

    OUTLINE_PROMPT_TEMPLATE
        .replace("{age_instruction}", AGE_APPROPRIATE_INSTRUCTION)
        .replace("{page_count}", &story.page_count.to_string())
        .replace("{child_names}", &names)
        .replace("{story_type}", &story.story_type)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn outline(numbers: &[u32]) -> Vec<PageOutline> {
        numbers
            .iter()
            .map(|&n| PageOutline {
                page_number: n,
                summary: format!("beat {n}"),
            })
            .collect()
    }

    fn story() -> StoryRow {
        StoryRow {
            id: Uuid::new_v4(),
            child_names: vec!["Mia".to_string(), "Leo".to_string()],
            story_type: "Pirate Voyage".to_string(),
            dedication: None,
            reading_level: "early_reader".to_string(),
            page_size: "small_portrait".to_string(),
            page_count: 8,
            status: "new".to_string(),
            s3_web_pdf_key: None,
            s3_print_pdf_key: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_dense_numbering_in_order() {
        assert!(is_densely_numbered(&outline(&[1, 2, 3, 4]), 4));
    }

    #[test]
    fn test_dense_numbering_out_of_order_is_still_dense() {
        assert!(is_densely_numbered(&outline(&[3, 1, 4, 2]), 4));
    }

    #[test]
    fn test_sparse_numbering_rejected() {
        assert!(!is_densely_numbered(&outline(&[1, 2, 4, 5]), 4));
    }

    #[test]
    fn test_duplicate_numbering_rejected() {
        assert!(!is_densely_numbered(&outline(&[1, 2, 2, 3]), 4));
    }

    #[test]
    fn test_wrong_count_rejected() {
        assert!(!is_densely_numbered(&outline(&[1, 2, 3]), 4));
        assert!(!is_densely_numbered(&outline(&[1, 2, 3, 4, 5]), 4));
    }

    #[test]
    fn test_zero_based_numbering_rejected() {
        assert!(!is_densely_numbered(&outline(&[0, 1, 2, 3]), 4));
    }

    #[test]
    fn test_outline_prompt_contains_story_fields() {
        let prompt = build_outline_prompt(&story());
        assert!(prompt.contains("8-page"));
        assert!(prompt.contains("Mia, Leo"));
        assert!(prompt.contains("Pirate Voyage"));
        assert!(!prompt.contains("{page_count}"));
    }

    #[test]
    fn test_outline_prompt_handles_missing_names() {
        let mut s = story();
        s.child_names.clear();
        let prompt = build_outline_prompt(&s);
        assert!(prompt.contains("a brave child"));
    }

    #[test]
    fn test_page_outline_deserializes_from_model_output() {
        let json = r#"[{"page_number": 1, "summary": "Mia finds a map."}]"#;
        let parsed: Vec<PageOutline> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed[0].page_number, 1);
    }
}
