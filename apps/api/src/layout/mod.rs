// Layout Engine: page-size resolution, greedy text wrapping, and document
// assembly. Pure computation — no I/O, no shared state, safe to call from
// any number of concurrent requests.

pub mod document;
pub mod font_metrics;
pub mod page_size;
pub mod wrap;

// Re-export the surface consumed by the export flow and handlers.
pub use document::{build_document, DocumentArtifact};
pub use page_size::{resolve_page_rect, PageSizePreset, MM_TO_PT};
