//! Axum route handler for print-order submission.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::layout::PageSizePreset;
use crate::state::AppState;
use crate::stories::handlers::fetch_story;

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub story_id: Uuid,
    pub vendor_order_id: String,
    pub status: String,
}

/// POST /api/v1/stories/:id/order
///
/// Submits the exported print PDF to the vendor. Requires a completed
/// export; ordering an unexported story is a validation error, not a
/// vendor round trip.
pub async fn handle_order(
    State(state): State<AppState>,
    Path(story_id): Path<Uuid>,
) -> Result<Json<OrderResponse>, AppError> {
    let story = fetch_story(&state, story_id).await?;

    let print_key = story.s3_print_pdf_key.as_deref().ok_or_else(|| {
        AppError::Validation(format!("Story {story_id} has not been exported yet"))
    })?;

    let preset = PageSizePreset::parse_or_default(&story.page_size);
    let pdf_url = format!(
        "{}/{}/{}",
        state.config.s3_endpoint, state.config.s3_bucket, print_key
    );

    let order = state
        .print
        .submit_order(&pdf_url, preset, story.page_count as u32)
        .await?;

    sqlx::query(
        "INSERT INTO print_orders (id, story_id, vendor_order_id, status)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(Uuid::new_v4())
    .bind(story_id)
    .bind(&order.order_id)
    .bind(&order.status)
    .execute(&state.db)
    .await?;

    info!(story_id = %story_id, vendor_order_id = %order.order_id, "print order submitted");

    Ok(Json(OrderResponse {
        story_id,
        vendor_order_id: order.order_id,
        status: order.status,
    }))
}
