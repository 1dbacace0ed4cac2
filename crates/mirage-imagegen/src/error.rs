use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mirage_core::ErrorBody;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImageGenError>;

/// Image endpoint errors
#[derive(Debug, Error)]
pub enum ImageGenError {
    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Placeholder rendering failed; an internal invariant violation
    #[error("Image generation failed")]
    SynthesisFailed(#[from] mirage_synth::SynthError),
}

impl ImageGenError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::SynthesisFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ImageGenError {
    fn into_response(self) -> Response {
        let body = match &self {
            Self::InvalidRequest(message) => ErrorBody::new("invalid request").with_details(message.clone()),
            Self::SynthesisFailed(cause) => {
                tracing::error!(error = %cause, "placeholder rendering failed");
                ErrorBody::new("image generation failed")
            }
        };

        (self.status_code(), Json(body)).into_response()
    }
}
