use async_trait::async_trait;
use mirage_config::TtsProviderConfig;
use mirage_core::{FailureReason, MediaProvider, ProviderOutcome, http_client};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use super::read_audio_body;
use crate::types::SpeechJob;

const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io/v1";
const DEFAULT_MODEL: &str = "eleven_multilingual_v2";
const DEFAULT_VOICE: &str = "21m00Tcm4TlvDq8ikWAM";

/// `ElevenLabs` speech synthesis provider
pub struct ElevenLabsProvider {
    name: String,
    client: Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
    voice: String,
}

impl ElevenLabsProvider {
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

/// Wire format for the `ElevenLabs` text-to-speech API
#[derive(serde::Serialize)]
struct ElevenLabsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

#[async_trait]
impl MediaProvider<SpeechJob> for ElevenLabsProvider {
    async fn fetch(&self, job: &SpeechJob) -> ProviderOutcome {
        let Some(api_key) = self.api_key.as_ref() else {
            return ProviderOutcome::Failure(FailureReason::Unconfigured);
        };

        let voice = job.voice.as_deref().unwrap_or(&self.voice);
        let url = format!("{}/text-to-speech/{voice}", self.base_url.trim_end_matches('/'));
        let body = ElevenLabsRequest {
            text: &job.text,
            model_id: &self.model,
        };

        tracing::debug!(
            provider = %self.name,
            voice,
            input_len = job.text.len(),
            "sending speech request"
        );

        let response = match self
            .client
            .post(&url)
            .header("xi-api-key", api_key.expose_secret())
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return ProviderOutcome::Failure(FailureReason::Connection(e.to_string()));
            }
        };

        read_audio_body(response, "audio/mpeg").await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
