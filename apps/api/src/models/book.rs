//! Boundary types shared by the layout and validation engines.
//!
//! Pages arrive from upstream producers (DB rows, concurrent generation
//! results) in arbitrary order; both engines treat them as plain values and
//! never mutate them.

use serde::{Deserialize, Serialize};

/// One logical page of the finished book, as seen by the engines.
///
/// `image_locked = true` means the parent intentionally wants no
/// illustration on this page — the validator must not flag it as incomplete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDraft {
    pub page_number: u32,
    pub text: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_locked: bool,
}

/// Cover inputs derived from the parent's story preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverMeta {
    pub child_names: Vec<String>,
    pub story_type: String,
    pub dedication: Option<String>,
}

impl CoverMeta {
    /// Book title: "<names>'s <story type>", or a generic fallback when no
    /// child names were provided.
    pub fn title(&self) -> String {
        if self.child_names.is_empty() {
            return "A Storybook Adventure".to_string();
        }
        format!("{}'s {}", join_names(&self.child_names), self.story_type)
    }
}

/// "Mia", "Mia and Leo", "Mia, Leo and Ada".
fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [one] => one.clone(),
        [head @ .., last] => format!("{} and {}", head.join(", "), last),
    }
}
