use serde::Deserialize;

/// Plausibility policy applied to provider response bodies
///
/// A 200 response smaller than the threshold for its media kind is treated
/// the same as a provider failure and the waterfall moves on. The
/// thresholds are policy, not tuned constants.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FallbackConfig {
    /// Minimum plausible audio body, in bytes
    #[serde(default = "default_min_bytes")]
    pub min_audio_bytes: usize,
    /// Minimum plausible image body, in bytes
    #[serde(default = "default_min_bytes")]
    pub min_image_bytes: usize,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            min_audio_bytes: default_min_bytes(),
            min_image_bytes: default_min_bytes(),
        }
    }
}

const fn default_min_bytes() -> usize {
    1024
}
