//! Export: the validation gate, dual-variant layout, PDF rendering, and
//! S3 upload.

pub mod handlers;
pub mod render;
