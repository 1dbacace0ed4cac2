use std::time::Duration;

use async_trait::async_trait;
use mirage_config::ImageGenProviderConfig;
use mirage_core::{FailureReason, MediaBytes, MediaProvider, ProviderOutcome, http_client};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::types::ImageJob;

const DEFAULT_BASE_URL: &str = "https://api.replicate.com/v1";
const DEFAULT_MODEL: &str = "black-forest-labs/flux-schnell";

/// Replicate image provider with asynchronous job semantics
///
/// Submitting a prediction returns immediately; the provider then polls
/// the job status at a fixed interval until it reaches a terminal state.
/// The poll loop is bounded by `max_polls` so a stuck upstream job cannot
/// hold a request open indefinitely.
pub struct ReplicateProvider {
    name: String,
    client: Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
    poll_interval: Duration,
    max_polls: u32,
}

impl ReplicateProvider {
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
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            max_polls: config.max_polls,
        }
    }

    async fn poll_prediction(&self, api_key: &SecretString, id: &str) -> Result<String, FailureReason> {
        let url = format!("{}/predictions/{id}", self.base_url.trim_end_matches('/'));

        for attempt in 1..=self.max_polls {
            tokio::time::sleep(self.poll_interval).await;

            let response = self
                .client
                .get(&url)
                .bearer_auth(api_key.expose_secret())
                .send()
                .await
                .map_err(|e| FailureReason::Connection(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let message = response.text().await.unwrap_or_else(|_| "unknown error".to_owned());
                return Err(FailureReason::Status {
                    status: status.as_u16(),
                    message,
                });
            }

            let prediction: Prediction = response
                .json()
                .await
                .map_err(|e| FailureReason::Invalid(format!("bad prediction JSON: {e}")))?;

            tracing::debug!(
                provider = %self.name,
                id,
                attempt,
                status = %prediction.status,
                "polled prediction"
            );

            match prediction.status.as_str() {
                "succeeded" => {
                    return prediction
                        .first_output()
                        .ok_or_else(|| FailureReason::Invalid("succeeded prediction carried no output".to_owned()));
                }
                "failed" | "canceled" => {
                    let detail = prediction.error.unwrap_or_else(|| prediction.status.clone());
                    return Err(FailureReason::Invalid(format!("prediction terminated: {detail}")));
                }
                // "starting" / "processing" keep polling
                _ => {}
            }
        }

        Err(FailureReason::Invalid(format!(
            "prediction not finished after {} polls",
            self.max_polls
        )))
    }

    async fn download_output(&self, url: &str) -> ProviderOutcome {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return ProviderOutcome::Failure(FailureReason::Connection(e.to_string())),
        };

        let status = response.status();
        if !status.is_success() {
            return ProviderOutcome::Failure(FailureReason::Status {
                status: status.as_u16(),
                message: "output download failed".to_owned(),
            });
        }

        let mime_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/png")
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
}

/// Wire format for prediction submission
#[derive(Serialize)]
struct PredictionRequest<'a> {
    version: &'a str,
    input: PredictionInput<'a>,
}

#[derive(Serialize)]
struct PredictionInput<'a> {
    prompt: &'a str,
    width: u32,
    height: u32,
}

/// Wire format for prediction status
#[derive(Deserialize)]
struct Prediction {
    id: Option<String>,
    status: String,
    #[serde(default)]
    output: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

impl Prediction {
    /// Output may be a URL string or an array of URL strings
    fn first_output(&self) -> Option<String> {
        match &self.output {
            Some(serde_json::Value::String(url)) => Some(url.clone()),
            Some(serde_json::Value::Array(urls)) => urls.first().and_then(|v| v.as_str().map(str::to_owned)),
            _ => None,
        }
    }
}

#[async_trait]
impl MediaProvider<ImageJob> for ReplicateProvider {
    async fn fetch(&self, job: &ImageJob) -> ProviderOutcome {
        let Some(api_key) = self.api_key.as_ref() else {
            return ProviderOutcome::Failure(FailureReason::Unconfigured);
        };

        let url = format!("{}/predictions", self.base_url.trim_end_matches('/'));
        let body = PredictionRequest {
            version: &self.model,
            input: PredictionInput {
                prompt: &job.prompt,
                width: job.width,
                height: job.height,
            },
        };

        tracing::debug!(provider = %self.name, model = %self.model, "submitting prediction");

        let response = match self
            .client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return ProviderOutcome::Failure(FailureReason::Connection(e.to_string())),
        };

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "unknown error".to_owned());
            return ProviderOutcome::Failure(FailureReason::Status {
                status: status.as_u16(),
                message,
            });
        }

        let submitted: Prediction = match response.json().await {
            Ok(submitted) => submitted,
            Err(e) => {
                return ProviderOutcome::Failure(FailureReason::Invalid(format!("bad submission JSON: {e}")));
            }
        };

        let Some(id) = submitted.id else {
            return ProviderOutcome::Failure(FailureReason::Invalid("submission response carried no id".to_owned()));
        };

        let output_url = match self.poll_prediction(api_key, &id).await {
            Ok(url) => url,
            Err(reason) => return ProviderOutcome::Failure(reason),
        };

        self.download_output(&output_url).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
