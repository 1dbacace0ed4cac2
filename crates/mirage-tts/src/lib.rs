#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod provider;
mod server;
mod types;

use std::sync::Arc;

use axum::{Router, extract::State, routing::post};
use mirage_core::{ExtractPayload, ResponseMode};

pub use error::{Result, TtsError};
pub use server::{Server, TtsServerBuilder};
pub use types::{AudioFormat, MAX_TEXT_CHARS, SpeechJob, SpeechRequest};

/// Build the speech engine from configuration
pub fn build_server(config: &mirage_config::Config) -> Arc<Server> {
    Arc::new(TtsServerBuilder::new(config).build())
}

/// Create the endpoint router for speech generation
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new()
        .route("/v1/audio/speech", post(speech_binary))
        .route("/v1/audio/speech/base64", post(speech_base64))
}

async fn speech_binary(
    State(server): State<Arc<Server>>,
    ExtractPayload(request): ExtractPayload<SpeechRequest>,
) -> Result<axum::response::Response> {
    generate(&server, request, ResponseMode::Binary).await
}

async fn speech_base64(
    State(server): State<Arc<Server>>,
    ExtractPayload(request): ExtractPayload<SpeechRequest>,
) -> Result<axum::response::Response> {
    generate(&server, request, ResponseMode::JsonBase64).await
}

async fn generate(
    server: &Server,
    request: SpeechRequest,
    mode: ResponseMode,
) -> Result<axum::response::Response> {
    let job = SpeechJob::from_request(request)?;

    tracing::debug!(input_len = job.text.len(), format = job.format.token(), "speech handler called");

    let media = server.generate(job).await?;

    Ok(media.into_http(mode))
}
