//! Illustration generation — pluggable provider behind a trait object.
//!
//! The provider implementation calls the OpenAI images API; the placeholder
//! implementation returns a deterministic stand-in URL and is used in local
//! development and as the fallback when the provider fails, so a flaky image
//! API never blocks the writing flow.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;

const OPENAI_IMAGES_URL: &str = "https://api.openai.com/v1/images/generations";
const IMAGE_MODEL: &str = "dall-e-3";
/// Square source images; the layout engine letterboxes them into the
/// per-preset illustration region.
const IMAGE_SIZE: &str = "1024x1024";

/// Produces one illustration URL for a page.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, story_id: Uuid, page_number: u32, prompt: &str)
        -> Result<String, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Provider-backed implementation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    url: String,
}

pub struct OpenAiImageClient {
    client: Client,
    api_key: String,
}

impl OpenAiImageClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    async fn generate(
        &self,
        story_id: Uuid,
        page_number: u32,
        prompt: &str,
    ) -> Result<String, AppError> {
        let request_body = ImageRequest {
            model: IMAGE_MODEL,
            prompt,
            n: 1,
            size: IMAGE_SIZE,
        };

        let response = self
            .client
            .post(OPENAI_IMAGES_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::ImageGen(format!("image request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // A failed illustration must not sink the page; hand back the
            // placeholder and let the parent regenerate later.
            warn!(
                story_id = %story_id,
                page_number,
                "image provider returned {status}, falling back to placeholder: {body}"
            );
            return Ok(placeholder_url(story_id, page_number));
        }

        let parsed: ImageResponse = response
            .json()
            .await
            .map_err(|e| AppError::ImageGen(format!("image response parse failed: {e}")))?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.url)
            .ok_or_else(|| AppError::ImageGen("image provider returned no images".to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Placeholder implementation
// ────────────────────────────────────────────────────────────────────────────

/// Returns deterministic placeholder URLs without any network call.
pub struct PlaceholderImageClient;

#[async_trait]
impl ImageGenerator for PlaceholderImageClient {
    async fn generate(
        &self,
        story_id: Uuid,
        page_number: u32,
        _prompt: &str,
    ) -> Result<String, AppError> {
        Ok(placeholder_url(story_id, page_number))
    }
}

fn placeholder_url(story_id: Uuid, page_number: u32) -> String {
    format!("https://placeholder.storybook.local/{story_id}/{page_number}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_placeholder_is_deterministic() {
        let id = Uuid::new_v4();
        let client = PlaceholderImageClient;
        let a = client.generate(id, 3, "a turtle").await.unwrap();
        let b = client.generate(id, 3, "a different prompt").await.unwrap();
        assert_eq!(a, b);
        assert!(a.contains(&id.to_string()));
        assert!(a.ends_with("/3.png"));
    }

    #[tokio::test]
    async fn test_placeholder_differs_per_page() {
        let id = Uuid::new_v4();
        let client = PlaceholderImageClient;
        let p1 = client.generate(id, 1, "x").await.unwrap();
        let p2 = client.generate(id, 2, "x").await.unwrap();
        assert_ne!(p1, p2);
    }
}
