#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Deterministic placeholder media
//!
//! When every external provider fails, the gateway still answers with
//! format-valid bytes produced here: formant-shaped WAV audio, MP3-sniffing
//! filler frames, and gradient PNG/JPEG images. Everything in this crate is
//! a pure function of its inputs; no I/O, no clock, no global state.

mod image_gen;
mod mp3;
mod voice;
mod wav;

use std::hash::{DefaultHasher, Hash, Hasher};

pub use image_gen::{DEFAULT_RESOLUTION, ImageEncoding, palette_for, parse_resolution, render_image};
pub use mp3::placeholder_mp3;
pub use voice::{VoiceParams, render_pcm};
pub use wav::encode_wav;

use thiserror::Error;

/// Failures while encoding synthesized media
///
/// Not expected in normal operation: both encoders write to in-memory
/// buffers. If one of these surfaces, it is an internal invariant
/// violation, not a recoverable condition.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("WAV encoding failed: {0}")]
    Audio(#[from] hound::Error),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Deterministic per-text seed for noise generation
///
/// Identical input text always produces identical placeholder bytes.
pub(crate) fn text_seed(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}
