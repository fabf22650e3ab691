//! Story generation pipeline: outline → concurrent page writing → length
//! adjustment. Illustration requests live here too since they are driven by
//! the outline summaries.

pub mod handlers;
pub mod outline;
pub mod prompts;
pub mod writer;
