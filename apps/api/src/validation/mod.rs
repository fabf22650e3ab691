// Validation Engine: word counting, reading-level classification, and
// export-readiness aggregation. Pure computation, no I/O.

pub mod readiness;
pub mod reading_level;
pub mod words;

pub use readiness::{validate_document, validate_page, ValidationError, ValidationField};
pub use reading_level::{ReadingLevel, EXPORT_TOLERANCE_WORDS};
pub use words::{classify, count_words, WordCountStatus};
