pub mod elevenlabs;
pub mod openai_tts;

use mirage_core::{FailureReason, MediaBytes, ProviderOutcome};

/// Drain a provider's audio reply into an outcome
///
/// Maps a non-success status, an unreadable body, or an empty body to a
/// failure; otherwise captures the bytes with the upstream content type
/// (falling back to the expected type when the header is absent).
async fn read_audio_body(response: reqwest::Response, default_mime: &str) -> ProviderOutcome {
    let status = response.status();

    if !status.is_success() {
        let message = response.text().await.unwrap_or_else(|_| "unknown error".to_owned());
        return ProviderOutcome::Failure(FailureReason::Status {
            status: status.as_u16(),
            message,
        });
    }

    let mime_type = response
        .headers()
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(default_mime)
        .to_owned();

    match response.bytes().await {
        Ok(bytes) if bytes.is_empty() => ProviderOutcome::Failure(FailureReason::EmptyBody),
        Ok(bytes) => ProviderOutcome::Success(MediaBytes {
            bytes: bytes.to_vec(),
            mime_type,
        }),
        Err(e) => ProviderOutcome::Failure(FailureReason::Connection(format!("failed to read body: {e}"))),
    }
}
