//! Export-readiness checks for pages and whole documents.
//!
//! The acceptance band is deliberately wider than the display band: strict
//! targets steer the writer, lenient bounds gate export. A page can show as
//! `low` in the UI and still export.

use serde::{Deserialize, Serialize};

use crate::models::book::PageDraft;
use crate::validation::reading_level::{ReadingLevel, EXPORT_TOLERANCE_WORDS};
use crate::validation::words::count_words;

// ────────────────────────────────────────────────────────────────────────────
// Result types
// ────────────────────────────────────────────────────────────────────────────

/// Outcome of checking one page's text against the export band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageValidation {
    pub is_valid: bool,
    pub word_count: u32,
    /// Human-readable explanation, present only when invalid. Names the
    /// page and the shortfall or excess.
    pub message: Option<String>,
}

/// Which per-page rule a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationField {
    Text,
    Image,
}

/// One violated rule on one page. A page can contribute at most two errors:
/// one for text, one for the missing illustration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub page_number: u32,
    pub field: ValidationField,
    pub message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Checks
// ────────────────────────────────────────────────────────────────────────────

/// Validates one page's text against the level band widened by
/// [`EXPORT_TOLERANCE_WORDS`] on each side.
pub fn validate_page(page_number: u32, text: &str, level: ReadingLevel) -> PageValidation {
    let band = level.word_band();
    let word_count = count_words(text);

    let floor = band.min.saturating_sub(EXPORT_TOLERANCE_WORDS);
    let ceiling = band.max + EXPORT_TOLERANCE_WORDS;

    if word_count < floor {
        PageValidation {
            is_valid: false,
            word_count,
            message: Some(format!(
                "Page {page_number} has {word_count} words, {} short of the {level} minimum of {floor}",
                floor - word_count
            )),
        }
    } else if word_count > ceiling {
        PageValidation {
            is_valid: false,
            word_count,
            message: Some(format!(
                "Page {page_number} has {word_count} words, {} over the {level} maximum of {ceiling}",
                word_count - ceiling
            )),
        }
    } else {
        PageValidation {
            is_valid: true,
            word_count,
            message: None,
        }
    }
}

/// Validates a whole document for export.
///
/// Each page must pass [`validate_page`] and must either carry an image or
/// be explicitly locked as text-only. Export is permitted iff the returned
/// list is empty.
pub fn validate_document(pages: &[PageDraft], level: ReadingLevel) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for page in pages {
        let text_check = validate_page(page.page_number, &page.text, level);
        if let Some(message) = text_check.message {
            errors.push(ValidationError {
                page_number: page.page_number,
                field: ValidationField::Text,
                message,
            });
        }

        if page.image_url.is_none() && !page.image_locked {
            errors.push(ValidationError {
                page_number: page.page_number,
                field: ValidationField::Image,
                message: format!(
                    "Page {} has no illustration; generate one or mark the page as text-only",
                    page.page_number
                ),
            });
        }
    }

    errors
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::words::{classify, WordCountStatus};

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    fn page(n: u32, word_count: usize, image: bool, locked: bool) -> PageDraft {
        PageDraft {
            page_number: n,
            text: words(word_count),
            image_url: image.then(|| format!("https://img.example/{n}.png")),
            image_locked: locked,
        }
    }

    // ── validate_page tolerance ─────────────────────────────────────────────

    #[test]
    fn test_tolerance_accepts_below_display_band() {
        // Growing reader band is 80–120; export floor is 65.
        let v = validate_page(1, &words(65), ReadingLevel::GrowingReader);
        assert!(v.is_valid);
        assert_eq!(v.word_count, 65);
        // ...yet the display classification still reads low.
        assert_eq!(
            classify(65, ReadingLevel::GrowingReader),
            WordCountStatus::Low
        );
    }

    #[test]
    fn test_one_word_below_tolerance_is_invalid() {
        let v = validate_page(1, &words(64), ReadingLevel::GrowingReader);
        assert!(!v.is_valid);
        let message = v.message.unwrap();
        assert!(message.contains("Page 1"), "message: {message}");
        assert!(message.contains("64"), "message: {message}");
    }

    #[test]
    fn test_tolerance_upper_edge() {
        assert!(validate_page(1, &words(135), ReadingLevel::GrowingReader).is_valid);
        let v = validate_page(1, &words(136), ReadingLevel::GrowingReader);
        assert!(!v.is_valid);
        assert!(v.message.unwrap().contains("over"));
    }

    #[test]
    fn test_empty_text_is_invalid_for_every_level() {
        for level in [
            ReadingLevel::EarlyReader,
            ReadingLevel::GrowingReader,
            ReadingLevel::ConfidentReader,
        ] {
            let v = validate_page(2, "", level);
            assert!(!v.is_valid, "{level} should reject empty text");
            assert_eq!(v.word_count, 0);
            assert!(v.message.unwrap().contains("Page 2"));
        }
    }

    #[test]
    fn test_message_reports_shortfall_against_export_floor() {
        // Early reader floor is 45; 40 words is 5 short.
        let v = validate_page(3, &words(40), ReadingLevel::EarlyReader);
        let message = v.message.unwrap();
        assert!(message.contains("5 short"), "message: {message}");
        assert!(message.contains("early reader"), "message: {message}");
    }

    // ── validate_document ───────────────────────────────────────────────────

    #[test]
    fn test_document_flags_missing_image_only_on_offending_page() {
        let pages = vec![
            page(1, 70, true, false),
            page(2, 70, false, false), // no image, not locked
            page(3, 70, true, false),
        ];
        let errors = validate_document(&pages, ReadingLevel::EarlyReader);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].page_number, 2);
        assert_eq!(errors[0].field, ValidationField::Image);
    }

    #[test]
    fn test_image_lock_suppresses_image_error() {
        let pages = vec![
            page(1, 70, true, false),
            page(2, 70, false, true), // locked text-only
            page(3, 70, true, false),
        ];
        assert!(validate_document(&pages, ReadingLevel::EarlyReader).is_empty());
    }

    #[test]
    fn test_page_can_contribute_two_errors() {
        let pages = vec![page(1, 3, false, false)];
        let errors = validate_document(&pages, ReadingLevel::EarlyReader);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.field == ValidationField::Text));
        assert!(errors.iter().any(|e| e.field == ValidationField::Image));
    }

    #[test]
    fn test_empty_document_has_no_errors() {
        assert!(validate_document(&[], ReadingLevel::ConfidentReader).is_empty());
    }

    #[test]
    fn test_valid_document_exports_clean() {
        let pages = vec![page(1, 100, true, false), page(2, 110, true, false)];
        assert!(validate_document(&pages, ReadingLevel::GrowingReader).is_empty());
    }
}
