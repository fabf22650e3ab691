//! Reading-level tiers and their per-page word-count targets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Symmetric tolerance applied around a level's word band at export time.
/// The display classification is strict; export acceptance is this much
/// wider on each side. Applied identically across all three levels.
pub const EXPORT_TOLERANCE_WORDS: u32 = 15;

/// Audience tiers, youngest to oldest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingLevel {
    /// Ages ~3–5: short sentences, 60–80 words per page.
    EarlyReader,
    /// Ages ~5–7: 80–120 words per page.
    GrowingReader,
    /// Ages ~7–9: 120–150 words per page.
    ConfidentReader,
}

/// Closed word-count interval targeted for one page at a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordBand {
    pub min: u32,
    pub max: u32,
}

impl ReadingLevel {
    pub const DEFAULT: ReadingLevel = ReadingLevel::EarlyReader;

    /// Target body-text length for one page at this tier.
    pub fn word_band(self) -> WordBand {
        match self {
            ReadingLevel::EarlyReader => WordBand { min: 60, max: 80 },
            ReadingLevel::GrowingReader => WordBand { min: 80, max: 120 },
            ReadingLevel::ConfidentReader => WordBand { min: 120, max: 150 },
        }
    }

    /// Parses a level name arriving from an untyped boundary. The UI
    /// constrains the enumeration; anything else falls back to the youngest
    /// tier rather than failing.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "early_reader" => ReadingLevel::EarlyReader,
            "growing_reader" => ReadingLevel::GrowingReader,
            "confident_reader" => ReadingLevel::ConfidentReader,
            _ => ReadingLevel::DEFAULT,
        }
    }

    /// Stable string form, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ReadingLevel::EarlyReader => "early_reader",
            ReadingLevel::GrowingReader => "growing_reader",
            ReadingLevel::ConfidentReader => "confident_reader",
        }
    }
}

impl fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReadingLevel::EarlyReader => "early reader",
            ReadingLevel::GrowingReader => "growing reader",
            ReadingLevel::ConfidentReader => "confident reader",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_bands_match_product_targets() {
        assert_eq!(
            ReadingLevel::EarlyReader.word_band(),
            WordBand { min: 60, max: 80 }
        );
        assert_eq!(
            ReadingLevel::GrowingReader.word_band(),
            WordBand { min: 80, max: 120 }
        );
        assert_eq!(
            ReadingLevel::ConfidentReader.word_band(),
            WordBand { min: 120, max: 150 }
        );
    }

    #[test]
    fn test_tolerance_is_fifteen_words() {
        assert_eq!(EXPORT_TOLERANCE_WORDS, 15);
    }

    #[test]
    fn test_parse_or_default_unknown_falls_back_to_youngest() {
        assert_eq!(
            ReadingLevel::parse_or_default("college"),
            ReadingLevel::EarlyReader
        );
    }

    #[test]
    fn test_as_str_round_trips_through_parse() {
        for level in [
            ReadingLevel::EarlyReader,
            ReadingLevel::GrowingReader,
            ReadingLevel::ConfidentReader,
        ] {
            assert_eq!(ReadingLevel::parse_or_default(level.as_str()), level);
        }
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(ReadingLevel::GrowingReader.to_string(), "growing reader");
    }
}
