use async_trait::async_trait;
use mirage_config::TtsProviderConfig;
use mirage_core::{FailureReason, MediaProvider, ProviderOutcome, http_client};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use super::read_audio_body;
use crate::types::SpeechJob;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "tts-1";
const DEFAULT_VOICE: &str = "alloy";

/// `OpenAI` speech synthesis provider
pub struct OpenAiTtsProvider {
    name: String,
    client: Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
    voice: String,
}

impl OpenAiTtsProvider {
    pub fn new(name: String, config: &TtsProviderConfig) -> Self {
        Self {
            name,
            client: http_client(),
            api_key: config.api_key.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            model: config.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            voice: config.voice.clone().unwrap_or_else(|| DEFAULT_VOICE.to_owned()),
        }
    }
}

/// Wire format for the `OpenAI` speech API
#[derive(serde::Serialize)]
struct OpenAiSpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
    speed: f64,
}

#[async_trait]
impl MediaProvider<SpeechJob> for OpenAiTtsProvider {
    async fn fetch(&self, job: &SpeechJob) -> ProviderOutcome {
        // Credential check comes first so unconfigured providers cost no
        // network round trip
        let Some(api_key) = self.api_key.as_ref() else {
            return ProviderOutcome::Failure(FailureReason::Unconfigured);
        };

        let url = format!("{}/audio/speech", self.base_url.trim_end_matches('/'));
        let body = OpenAiSpeechRequest {
            model: &self.model,
            input: &job.text,
            voice: job.voice.as_deref().unwrap_or(&self.voice),
            response_format: job.format.token(),
            speed: job.rate,
        };

        tracing::debug!(
            provider = %self.name,
            model = %self.model,
            input_len = job.text.len(),
            "sending speech request"
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

        read_audio_body(response, job.format.mime_type()).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
