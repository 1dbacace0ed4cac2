//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use mirage_config::{
    Config, HealthConfig, ImageGenProviderConfig, ImageGenProviderType, ServerConfig, TtsProviderConfig,
    TtsProviderType,
};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                    cors: None,
                },
                ..Config::default()
            },
        }
    }

    /// Add an `OpenAI` speech provider pointed at a mock backend
    pub fn with_openai_tts(mut self, name: &str, base_url: &str, priority: u32) -> Self {
        self.config.tts.providers.insert(
            name.to_owned(),
            TtsProviderConfig {
                provider_type: TtsProviderType::OpenaiTts,
                api_key: Some(SecretString::from("test-key")),
                base_url: Some(base_url.to_owned()),
                priority,
                model: None,
                voice: None,
            },
        );
        self
    }

    /// Add an `OpenAI` speech provider with no API key; it should be
    /// skipped without any network traffic
    pub fn with_keyless_openai_tts(mut self, name: &str, base_url: &str, priority: u32) -> Self {
        self.config.tts.providers.insert(
            name.to_owned(),
            TtsProviderConfig {
                provider_type: TtsProviderType::OpenaiTts,
                api_key: None,
                base_url: Some(base_url.to_owned()),
                priority,
                model: None,
                voice: None,
            },
        );
        self
    }

    /// Add an `ElevenLabs` speech provider pointed at a mock backend
    pub fn with_elevenlabs(mut self, name: &str, base_url: &str, priority: u32) -> Self {
        self.config.tts.providers.insert(
            name.to_owned(),
            TtsProviderConfig {
                provider_type: TtsProviderType::Elevenlabs,
                api_key: Some(SecretString::from("test-key")),
                base_url: Some(base_url.to_owned()),
                priority,
                model: None,
                voice: None,
            },
        );
        self
    }

    /// Add an `OpenAI` image provider pointed at a mock backend
    pub fn with_openai_images(mut self, name: &str, base_url: &str, priority: u32) -> Self {
        self.config.imagegen.providers.insert(
            name.to_owned(),
            ImageGenProviderConfig {
                provider_type: ImageGenProviderType::OpenaiImages,
                api_key: Some(SecretString::from("test-key")),
                base_url: Some(base_url.to_owned()),
                priority,
                model: None,
                poll_interval_ms: 10,
                max_polls: 30,
            },
        );
        self
    }

    /// Add a Replicate-style job provider pointed at a mock backend
    pub fn with_replicate(mut self, name: &str, base_url: &str, priority: u32, max_polls: u32) -> Self {
        self.config.imagegen.providers.insert(
            name.to_owned(),
            ImageGenProviderConfig {
                provider_type: ImageGenProviderType::Replicate,
                api_key: Some(SecretString::from("test-key")),
                base_url: Some(base_url.to_owned()),
                priority,
                model: None,
                poll_interval_ms: 10,
                max_polls,
            },
        );
        self
    }

    /// Override the audio plausibility threshold
    pub fn with_min_audio_bytes(mut self, min: usize) -> Self {
        self.config.fallback.min_audio_bytes = min;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
