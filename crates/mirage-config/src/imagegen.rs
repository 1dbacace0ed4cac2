use indexmap::IndexMap;
use secrecy::SecretString;
use serde::Deserialize;

use crate::tts::default_priority;

/// Top-level image generation configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageGenConfig {
    /// Image provider configurations keyed by name
    #[serde(default)]
    pub providers: IndexMap<String, ImageGenProviderConfig>,
}

/// Configuration for a single image provider
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageGenProviderConfig {
    /// Provider type
    #[serde(rename = "type")]
    pub provider_type: ImageGenProviderType,
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
    /// Poll interval for job-based providers, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Maximum number of status polls before the job is abandoned
    #[serde(default = "default_max_polls")]
    pub max_polls: u32,
}

/// Supported image providers
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageGenProviderType {
    /// `OpenAI` image generation
    OpenaiImages,
    /// Replicate prediction jobs (submit, then poll)
    Replicate,
}

const fn default_poll_interval_ms() -> u64 {
    2000
}

const fn default_max_polls() -> u32 {
    30
}
