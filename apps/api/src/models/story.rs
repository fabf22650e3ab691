use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::book::{CoverMeta, PageDraft};

/// A story row. `reading_level` and `page_size` are stored as their stable
/// string forms and re-typed at the boundary via `parse_or_default`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoryRow {
    pub id: Uuid,
    pub child_names: Vec<String>,
    pub story_type: String,
    pub dedication: Option<String>,
    pub reading_level: String,
    pub page_size: String,
    pub page_count: i16,
    pub status: String,
    pub s3_web_pdf_key: Option<String>,
    pub s3_print_pdf_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoryRow {
    pub fn cover_meta(&self) -> CoverMeta {
        CoverMeta {
            child_names: self.child_names.clone(),
            story_type: self.story_type.clone(),
            dedication: self.dedication.clone(),
        }
    }
}

/// One page of a story. `text` is empty until the writing step fills it;
/// `image_url` stays NULL until the image step runs or the page is locked
/// as text-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PageRow {
    pub id: Uuid,
    pub story_id: Uuid,
    pub page_number: i32,
    pub text: String,
    pub summary: String,
    pub image_url: Option<String>,
    pub image_locked: bool,
    pub is_user_edited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PageRow {
    pub fn to_draft(&self) -> PageDraft {
        PageDraft {
            page_number: self.page_number as u32,
            text: self.text.clone(),
            image_url: self.image_url.clone(),
            image_locked: self.image_locked,
        }
    }
}

/// A submitted print order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PrintOrderRow {
    pub id: Uuid,
    pub story_id: Uuid,
    pub vendor_order_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
