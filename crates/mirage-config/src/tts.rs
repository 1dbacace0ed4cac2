use indexmap::IndexMap;
use secrecy::SecretString;
use serde::Deserialize;

/// Top-level speech synthesis configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    /// Speech provider configurations keyed by name
    #[serde(default)]
    pub providers: IndexMap<String, TtsProviderConfig>,
}

/// Configuration for a single speech provider
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsProviderConfig {
    /// Provider type
    #[serde(rename = "type")]
    pub provider_type: TtsProviderType,
    /// API key; a provider without one is registered but never invoked
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<String>,
    /// Waterfall position, lower is tried first
    #[serde(default = "default_priority")]
    pub priority: u32,
    /// Upstream model identifier
    #[serde(default)]
    pub model: Option<String>,
    /// Default voice when the request does not name one
    #[serde(default)]
    pub voice: Option<String>,
}

/// Supported speech providers
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtsProviderType {
    /// `OpenAI` TTS
    OpenaiTts,
    /// `ElevenLabs`
    Elevenlabs,
}

pub(crate) const fn default_priority() -> u32 {
    100
}
