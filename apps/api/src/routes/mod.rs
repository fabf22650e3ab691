pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::export::handlers as export_handlers;
use crate::generation::handlers as generation_handlers;
use crate::print_client::handlers as print_handlers;
use crate::state::AppState;
use crate::stories::handlers as story_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Story CRUD
        .route("/api/v1/stories", post(story_handlers::handle_create_story))
        .route("/api/v1/stories/:id", get(story_handlers::handle_get_story))
        .route(
            "/api/v1/stories/:id/pages/:n",
            patch(story_handlers::handle_edit_page),
        )
        .route(
            "/api/v1/stories/:id/pages/:n/image-lock",
            patch(story_handlers::handle_image_lock),
        )
        // Generation pipeline
        .route(
            "/api/v1/stories/:id/outline",
            post(generation_handlers::handle_outline),
        )
        .route(
            "/api/v1/stories/:id/write",
            post(generation_handlers::handle_write),
        )
        .route(
            "/api/v1/stories/:id/pages/:n/image",
            post(generation_handlers::handle_page_image),
        )
        // Validation and export
        .route(
            "/api/v1/stories/:id/validation",
            get(story_handlers::handle_validation),
        )
        .route(
            "/api/v1/stories/:id/export",
            post(export_handlers::handle_export),
        )
        .route(
            "/api/v1/stories/:id/order",
            post(print_handlers::handle_order),
        )
        .with_state(state)
}
