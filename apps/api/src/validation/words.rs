//! Word counting and display classification.
//!
//! `count_words` is the single source of truth for word counts everywhere
//! in the service — the writer, the validator, and the UI responses all go
//! through it so a page can never count differently in two places.

use serde::{Deserialize, Serialize};

use crate::validation::reading_level::ReadingLevel;

/// Counts words in `text`: leading/trailing whitespace ignored, runs of
/// whitespace collapse, empty or whitespace-only input counts zero.
pub fn count_words(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

/// Display classification against the strict word band (no tolerance).
/// The UI shows this to steer the writer; export acceptance is wider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordCountStatus {
    Low,
    Good,
    High,
}

/// Classifies a word count against the level's strict band.
pub fn classify(word_count: u32, level: ReadingLevel) -> WordCountStatus {
    let band = level.word_band();
    if word_count < band.min {
        WordCountStatus::Low
    } else if word_count > band.max {
        WordCountStatus::High
    } else {
        WordCountStatus::Good
    }
}
