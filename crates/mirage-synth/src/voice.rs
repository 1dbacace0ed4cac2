use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::text_seed;

/// Tuning for placeholder voice rendering
#[derive(Debug, Clone)]
pub struct VoiceParams {
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Estimated speaking time per input character
    pub seconds_per_char: f64,
    /// Hard cap on total duration
    pub max_seconds: f64,
    /// Speaking rate multiplier; higher is faster (shorter output)
    pub rate: f64,
    /// Formant frequency multiplier
    pub pitch: f64,
    /// Output amplitude in [0, 1]
    pub volume: f64,
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self {
            sample_rate: 22_050,
            seconds_per_char: 0.08,
            max_seconds: 30.0,
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

impl VoiceParams {
    /// Duration of the rendered signal for the given text
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_secs(&self, text: &str) -> f64 {
        let chars = text.chars().count() as f64;
        (chars * self.seconds_per_char).min(self.max_seconds) / self.rate
    }
}

/// First three formant frequencies, in Hz
type Formants = [f64; 3];

/// Relative amplitudes of the three formant components
const FORMANT_WEIGHTS: [f64; 3] = [1.0, 0.5, 0.25];

/// Base output amplitude before volume scaling, leaving headroom for the
/// summed components and noise
const BASE_AMPLITUDE: f64 = 0.25;

const NOISE_AMPLITUDE: f64 = 0.01;

/// Canonical vowel formants; consonants and anything else get a neutral
/// mid-vowel so the interpolation always has a target
fn formants_for(c: char) -> Formants {
    match c.to_ascii_lowercase() {
        'a' => [800.0, 1200.0, 2500.0],
        'e' => [400.0, 2200.0, 2900.0],
        'i' => [300.0, 2700.0, 3300.0],
        'o' => [450.0, 800.0, 2830.0],
        'u' => [325.0, 700.0, 2530.0],
        _ => [500.0, 1500.0, 2500.0],
    }
}

/// Per-character amplitude envelope: a half-sine ramp across each word,
/// silence between words
fn envelope(text_chars: &[char]) -> Vec<f64> {
    let mut env = vec![0.0; text_chars.len()];
    let mut start = None;

    for (i, &c) in text_chars.iter().enumerate() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                fill_word(&mut env, s, i);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        fill_word(&mut env, s, text_chars.len());
    }

    env
}

#[allow(clippy::cast_precision_loss)]
fn fill_word(env: &mut [f64], start: usize, end: usize) {
    let len = (end - start) as f64;
    for (offset, slot) in env[start..end].iter_mut().enumerate() {
        // Half-sine peaks mid-word; +0.5 keeps single-char words audible
        *slot = (PI * (offset as f64 + 0.5) / len).sin();
    }
}

/// Render speech-shaped PCM for the given text
///
/// The signal walks the text character by character, linearly
/// interpolating between successive characters' formant triples and
/// summing three weighted sinusoids per sample under a per-word half-sine
/// envelope, with a little seeded noise for texture. Structurally valid,
/// deliberately unintelligible.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn render_pcm(text: &str, params: &VoiceParams) -> Vec<i16> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    let duration = params.duration_secs(text);
    let total_samples = (duration * f64::from(params.sample_rate)) as usize;
    let samples_per_char = total_samples as f64 / chars.len() as f64;

    let targets: Vec<Formants> = chars.iter().map(|&c| formants_for(c)).collect();
    let env = envelope(&chars);

    let mut rng = StdRng::seed_from_u64(text_seed(text));
    let mut pcm = Vec::with_capacity(total_samples);

    for i in 0..total_samples {
        let position = i as f64 / samples_per_char;
        let idx = (position as usize).min(chars.len() - 1);
        let next = (idx + 1).min(chars.len() - 1);
        let frac = position - position.floor();

        let t = f64::from(i as u32) / f64::from(params.sample_rate);
        let amplitude = env[idx] * BASE_AMPLITUDE * params.volume;

        let mut sample = 0.0;
        for (k, weight) in FORMANT_WEIGHTS.iter().enumerate() {
            let freq = (targets[idx][k] + (targets[next][k] - targets[idx][k]) * frac) * params.pitch;
            sample += weight * (2.0 * PI * freq * t).sin();
        }
        sample = sample * amplitude + rng.random_range(-NOISE_AMPLITUDE..NOISE_AMPLITUDE);

        pcm.push((sample.clamp(-1.0, 1.0) * f64::from(i16::MAX)) as i16);
    }

    pcm
}
