use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mirage_core::ErrorBody;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Speech endpoint errors
///
/// Provider failures never surface here; the waterfall absorbs them and
/// falls back to synthesis. What remains is request validation and the
/// not-expected-in-practice synthesis failure.
#[derive(Debug, Error)]
pub enum TtsError {
    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Placeholder synthesis failed; an internal invariant violation
    #[error("Speech generation failed")]
    SynthesisFailed(#[from] mirage_synth::SynthError),
}

impl TtsError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::SynthesisFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TtsError {
    fn into_response(self) -> Response {
        let body = match &self {
            Self::InvalidRequest(message) => ErrorBody::new("invalid request").with_details(message.clone()),
            Self::SynthesisFailed(cause) => {
                // Cause stays server-side; the caller gets a generic message
                tracing::error!(error = %cause, "placeholder synthesis failed");
                ErrorBody::new("speech generation failed")
            }
        };

        (self.status_code(), Json(body)).into_response()
    }
}
