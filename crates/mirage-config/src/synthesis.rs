use serde::Deserialize;

/// Tuning for locally synthesized placeholder audio
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthesisConfig {
    /// Output sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Estimated speaking time per character of input text
    #[serde(default = "default_seconds_per_char")]
    pub seconds_per_char: f64,
    /// Hard cap on synthesized audio duration
    #[serde(default = "default_max_seconds")]
    pub max_seconds: f64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            seconds_per_char: default_seconds_per_char(),
            max_seconds: default_max_seconds(),
        }
    }
}

const fn default_sample_rate() -> u32 {
    22_050
}

const fn default_seconds_per_char() -> f64 {
    0.08
}

const fn default_max_seconds() -> f64 {
    30.0
}
