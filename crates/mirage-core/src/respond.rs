use axum::response::IntoResponse;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Map, Value, json};

/// Metadata header naming the provider (or synthesizer) that produced the body
pub const SOURCE_HEADER: &str = "x-mirage-source";

/// Source value used when the waterfall was exhausted and bytes were
/// synthesized locally
pub const SOURCE_SYNTHESIZER: &str = "synthesizer";

/// What kind of media the payload carries; selects the base64 field name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Image,
}

impl MediaKind {
    const fn base64_field(self) -> &'static str {
        match self {
            Self::Audio => "audio_base64",
            Self::Image => "image_base64",
        }
    }
}

/// How an endpoint returns the generated media
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// Raw bytes with download headers
    Binary,
    /// JSON envelope with a base64 payload, for consumers that cannot
    /// handle binary bodies
    JsonBase64,
}

/// Final generation result, ready to be shaped into an HTTP response
#[derive(Debug)]
pub struct MediaResponse {
    pub kind: MediaKind,
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub suggested_filename: String,
    /// Name of the provider that produced the bytes, or
    /// [`SOURCE_SYNTHESIZER`]
    pub source: String,
    /// Request options echoed back in the JSON envelope
    pub echoed_options: Map<String, Value>,
}

impl MediaResponse {
    /// Shape the result into an HTTP response for the given mode
    pub fn into_http(self, mode: ResponseMode) -> axum::response::Response {
        match mode {
            ResponseMode::Binary => self.into_binary(),
            ResponseMode::JsonBase64 => self.into_json(),
        }
    }

    fn into_binary(self) -> axum::response::Response {
        let disposition = format!("attachment; filename=\"{}\"", self.suggested_filename);

        let builder = axum::response::Response::builder()
            .status(http::StatusCode::OK)
            .header(http::header::CONTENT_TYPE, &self.mime_type)
            .header(http::header::CONTENT_LENGTH, self.bytes.len())
            .header(http::header::CONTENT_DISPOSITION, disposition)
            .header(SOURCE_HEADER, &self.source);

        builder
            .body(axum::body::Body::from(self.bytes))
            .unwrap_or_else(|_| http::StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }

    fn into_json(self) -> axum::response::Response {
        let mut data = Map::new();
        data.insert(
            self.kind.base64_field().to_owned(),
            Value::String(BASE64.encode(&self.bytes)),
        );
        data.insert("mime_type".to_owned(), Value::String(self.mime_type));
        data.insert("size".to_owned(), Value::from(self.bytes.len()));
        data.insert("filename".to_owned(), Value::String(self.suggested_filename));
        data.insert("source".to_owned(), Value::String(self.source));
        for (key, value) in self.echoed_options {
            data.entry(key).or_insert(value);
        }

        axum::Json(json!({ "success": true, "data": data })).into_response()
    }
}
