use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use mirage_config::ImageGenProviderConfig;
use mirage_core::{FailureReason, MediaBytes, MediaProvider, ProviderOutcome, http_client};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::types::ImageJob;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "dall-e-3";

/// `OpenAI` image generation provider
///
/// Always requests `b64_json` so the payload comes back inline instead of
/// as a short-lived URL.
pub struct OpenAiImageProvider {
    name: String,
    client: Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
}

impl OpenAiImageProvider {
    pub fn new(name: String, config: &ImageGenProviderConfig) -> Self {
        Self {
            name,
            client: http_client(),
            api_key: config.api_key.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            model: config.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
        }
    }
}

/// Wire format for the `OpenAI` image generation API request
#[derive(Serialize)]
struct OpenAiImageRequest<'a> {
    prompt: &'a str,
    model: &'a str,
    n: u32,
    size: String,
    response_format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<&'a str>,
}

/// Wire format for the `OpenAI` image generation API response
#[derive(Deserialize)]
struct OpenAiImageResponse {
    data: Vec<OpenAiImageData>,
}

#[derive(Deserialize)]
struct OpenAiImageData {
    b64_json: Option<String>,
}

#[async_trait]
impl MediaProvider<ImageJob> for OpenAiImageProvider {
    async fn fetch(&self, job: &ImageJob) -> ProviderOutcome {
        let Some(api_key) = self.api_key.as_ref() else {
            return ProviderOutcome::Failure(FailureReason::Unconfigured);
        };

        let url = format!("{}/images/generations", self.base_url.trim_end_matches('/'));
        let body = OpenAiImageRequest {
            prompt: &job.prompt,
            model: &self.model,
            n: 1,
            size: job.resolution_token(),
            response_format: "b64_json",
            style: job.style.as_deref(),
        };

        tracing::debug!(
            provider = %self.name,
            model = %self.model,
            size = %body.size,
            "sending image generation request"
        );

        let response = match self
            .client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return ProviderOutcome::Failure(FailureReason::Connection(e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "unknown error".to_owned());
            return ProviderOutcome::Failure(FailureReason::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: OpenAiImageResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                return ProviderOutcome::Failure(FailureReason::Invalid(format!("bad response JSON: {e}")));
            }
        };

        let Some(encoded) = parsed.data.into_iter().find_map(|d| d.b64_json) else {
            return ProviderOutcome::Failure(FailureReason::Invalid("response carried no b64_json datum".to_owned()));
        };

        match BASE64.decode(encoded.as_bytes()) {
            Ok(bytes) if bytes.is_empty() => ProviderOutcome::Failure(FailureReason::EmptyBody),
            Ok(bytes) => ProviderOutcome::Success(MediaBytes {
                bytes,
                mime_type: "image/png".to_owned(),
            }),
            Err(e) => ProviderOutcome::Failure(FailureReason::Invalid(format!("bad base64 payload: {e}"))),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
