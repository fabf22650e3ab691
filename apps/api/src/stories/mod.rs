//! Story CRUD: creation from parent preferences, retrieval, page text
//! edits, and the text-only image lock.

pub mod handlers;
