#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod fallback;
pub mod health;
pub mod imagegen;
mod loader;
pub mod server;
pub mod synthesis;
pub mod tts;

use serde::Deserialize;

pub use cors::*;
pub use fallback::*;
pub use health::*;
pub use imagegen::*;
pub use server::*;
pub use synthesis::*;
pub use tts::*;

/// Top-level mirage configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Speech provider configuration
    #[serde(default)]
    pub tts: TtsConfig,
    /// Image provider configuration
    #[serde(default)]
    pub imagegen: ImageGenConfig,
    /// Plausibility policy for provider responses
    #[serde(default)]
    pub fallback: FallbackConfig,
    /// Placeholder synthesis tuning
    #[serde(default)]
    pub synthesis: SynthesisConfig,
}
