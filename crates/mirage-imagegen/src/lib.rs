#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod provider;
mod server;
mod types;

use std::sync::Arc;

use axum::{Router, extract::State, routing::post};
use mirage_core::{ExtractPayload, ResponseMode};

pub use error::{ImageGenError, Result};
pub use server::{ImageGenServerBuilder, Server};
pub use types::{ImageJob, ImageRequest, MAX_PROMPT_CHARS};

/// Build the image engine from configuration
pub fn build_server(config: &mirage_config::Config) -> Arc<Server> {
    Arc::new(ImageGenServerBuilder::new(config).build())
}

/// Create the endpoint router for image generation
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new()
        .route("/v1/images/generations", post(images_json))
        .route("/v1/images/generations/raw", post(images_binary))
}

async fn images_json(
    State(server): State<Arc<Server>>,
    ExtractPayload(request): ExtractPayload<ImageRequest>,
) -> Result<axum::response::Response> {
    generate(&server, request, ResponseMode::JsonBase64).await
}

async fn images_binary(
    State(server): State<Arc<Server>>,
    ExtractPayload(request): ExtractPayload<ImageRequest>,
) -> Result<axum::response::Response> {
    generate(&server, request, ResponseMode::Binary).await
}

async fn generate(
    server: &Server,
    request: ImageRequest,
    mode: ResponseMode,
) -> Result<axum::response::Response> {
    let job = ImageJob::from_request(request)?;

    tracing::debug!(
        prompt_len = job.prompt.len(),
        width = job.width,
        height = job.height,
        "image handler called"
    );

    let media = server.generate(job).await?;

    Ok(media.into_http(mode))
}
