use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use redis::Client as RedisClient;
use sqlx::PgPool;

use crate::config::Config;
use crate::image_client::ImageGenerator;
use crate::llm_client::LlmClient;
use crate::print_client::PrintClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Redis client reserved for the async export job queue.
    #[allow(dead_code)]
    pub redis: RedisClient,
    pub s3: S3Client,
    pub llm: LlmClient,
    /// Pluggable illustration provider. Placeholder by default; swap via
    /// ENABLE_IMAGE_PROVIDER env.
    pub images: Arc<dyn ImageGenerator>,
    pub print: PrintClient,
    pub config: Config,
}
