use axum::body::Body;
use axum::response::IntoResponse;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Body limit for generation requests (1 MiB)
const BODY_LIMIT_BYTES: usize = 1 << 20;

/// JSON error shape returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

fn reject(status: http::StatusCode, body: ErrorBody) -> axum::response::Response {
    (status, axum::Json(body)).into_response()
}

/// Extractor for JSON request bodies
///
/// Rejects non-JSON content types (415), oversized bodies (413), and
/// malformed JSON (400) before the handler runs, all with the gateway's
/// error body shape.
pub struct ExtractPayload<T>(pub T);

impl<S, T: DeserializeOwned> axum::extract::FromRequest<S> for ExtractPayload<T>
where
    S: Send + Sync,
{
    type Rejection = axum::response::Response;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let is_json = request
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .is_some_and(|media| media.trim().eq_ignore_ascii_case("application/json"));
        if !is_json {
            return Err(reject(
                http::StatusCode::UNSUPPORTED_MEDIA_TYPE,
                ErrorBody::new("unsupported content type, expected application/json"),
            ));
        }

        let bytes = axum::body::to_bytes(request.into_body(), BODY_LIMIT_BYTES)
            .await
            .map_err(|err| {
                if std::error::Error::source(&err)
                    .is_some_and(|source| source.is::<http_body_util::LengthLimitError>())
                {
                    reject(
                        http::StatusCode::PAYLOAD_TOO_LARGE,
                        ErrorBody::new(format!("request body exceeds {BODY_LIMIT_BYTES} bytes")),
                    )
                } else {
                    reject(
                        http::StatusCode::BAD_REQUEST,
                        ErrorBody::new("failed to read request body").with_details(err.to_string()),
                    )
                }
            })?;

        let payload = serde_json::from_slice::<T>(&bytes).map_err(|e| {
            reject(
                http::StatusCode::BAD_REQUEST,
                ErrorBody::new("failed to parse request body").with_details(e.to_string()),
            )
        })?;

        Ok(Self(payload))
    }
}
