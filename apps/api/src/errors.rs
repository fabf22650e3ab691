use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::validation::ValidationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Export blocked by {} validation error(s)", .0.len())]
    ExportBlocked(Vec<ValidationError>),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Image generation error: {0}")]
    ImageGen(String),

    #[error("S3 error: {0}")]
    S3(String),

    #[error("Print vendor error: {0}")]
    PrintVendor(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::ExportBlocked(errors) => {
                // Field-tagged per-page errors get their own body shape so
                // the UI can attach each one to the offending page.
                let body = Json(json!({
                    "error": {
                        "code": "EXPORT_BLOCKED",
                        "message": "The book is not ready to export",
                        "details": errors,
                    }
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::ImageGen(msg) => {
                tracing::error!("Image generation error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "IMAGE_ERROR",
                    "An illustration error occurred".to_string(),
                )
            }
            AppError::S3(msg) => {
                tracing::error!("S3 error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "S3_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::PrintVendor(msg) => {
                tracing::error!("Print vendor error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PRINT_VENDOR_ERROR",
                    "The print vendor could not accept the order".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationField;
    use serde_json::Value;

    async fn response_json(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_export_blocked_is_422_with_field_tagged_details() {
        let errors = vec![
            ValidationError {
                page_number: 2,
                field: ValidationField::Text,
                message: "Page 2 has 10 words, 35 short of the early reader minimum of 45"
                    .to_string(),
            },
            ValidationError {
                page_number: 2,
                field: ValidationField::Image,
                message: "Page 2 has no illustration; generate one or mark the page as text-only"
                    .to_string(),
            },
        ];

        let (status, body) = response_json(AppError::ExportBlocked(errors)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "EXPORT_BLOCKED");

        let details = body["error"]["details"].as_array().unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0]["page_number"], 2);
        assert_eq!(details[0]["field"], "text");
        assert_eq!(details[1]["field"], "image");
        assert!(details[0]["message"].as_str().unwrap().contains("Page 2"));
    }

    #[tokio::test]
    async fn test_empty_error_list_still_blocks_with_422() {
        // The export handler only constructs this variant with a non-empty
        // list, but the response contract must hold regardless.
        let (status, body) = response_json(AppError::ExportBlocked(vec![])).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]["details"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_not_found_uses_standard_error_shape() {
        let (status, body) = response_json(AppError::NotFound("Story x not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "Story x not found");
        assert!(body["error"].get("details").is_none());
    }

    #[tokio::test]
    async fn test_database_error_does_not_leak_internals() {
        let (status, body) = response_json(AppError::Database(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "A database error occurred");
    }
}
