use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::TtsError;

/// Maximum accepted speech text length, in characters
pub const MAX_TEXT_CHARS: usize = 5000;

/// Raw speech synthesis request body
#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    /// Text to synthesize into speech
    pub input: String,
    /// Voice identifier, provider-specific
    pub voice: Option<String>,
    /// Speaking rate multiplier, clamped to [0.1, 2.0]
    pub rate: Option<f64>,
    /// Pitch multiplier, clamped to [0.0, 2.0]
    pub pitch: Option<f64>,
    /// Output volume, clamped to [0.0, 1.0]
    pub volume: Option<f64>,
    /// Output audio format ("mp3" or "wav"; default mp3)
    pub format: Option<String>,
}

/// Output audio container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Wav,
}

impl AudioFormat {
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
        }
    }

    /// Token used toward upstream APIs and in filenames
    pub const fn token(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
        }
    }

    /// Parse a format token, falling back to MP3 for anything unrecognized
    fn from_token(token: Option<&str>) -> Self {
        match token.map(str::to_ascii_lowercase).as_deref() {
            Some("wav") => Self::Wav,
            _ => Self::Mp3,
        }
    }
}

/// Validated, normalized speech job
///
/// Immutable once constructed; everything downstream (providers and the
/// synthesizer) reads from this.
#[derive(Debug, Clone)]
pub struct SpeechJob {
    pub text: String,
    pub voice: Option<String>,
    pub rate: f64,
    pub pitch: f64,
    pub volume: f64,
    pub format: AudioFormat,
}

impl SpeechJob {
    /// Validate and normalize a raw request
    ///
    /// Text is trimmed and length-bounded; numeric options are clamped
    /// into range rather than rejected; unrecognized format tokens fall
    /// back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`TtsError::InvalidRequest`] when the input text is empty
    /// after trimming or exceeds [`MAX_TEXT_CHARS`].
    pub fn from_request(request: SpeechRequest) -> Result<Self, TtsError> {
        let text = mirage_core::validate::required_text(&request.input, MAX_TEXT_CHARS, "input")
            .map_err(TtsError::InvalidRequest)?;

        Ok(Self {
            text,
            voice: request.voice,
            rate: mirage_core::validate::clamp_option(request.rate, 0.1, 2.0, 1.0),
            pitch: mirage_core::validate::clamp_option(request.pitch, 0.0, 2.0, 1.0),
            volume: mirage_core::validate::clamp_option(request.volume, 0.0, 1.0, 1.0),
            format: AudioFormat::from_token(request.format.as_deref()),
        })
    }

    /// Options echoed back in JSON envelope responses
    pub fn echoed_options(&self) -> Map<String, Value> {
        let mut options = Map::new();
        if let Some(ref voice) = self.voice {
            options.insert("voice".to_owned(), Value::String(voice.clone()));
        }
        options.insert("rate".to_owned(), Value::from(self.rate));
        options.insert("pitch".to_owned(), Value::from(self.pitch));
        options.insert("volume".to_owned(), Value::from(self.volume));
        options.insert("format".to_owned(), Value::String(self.format.token().to_owned()));
        options
    }

    pub fn suggested_filename(&self) -> String {
        format!("speech.{}", self.format.token())
    }
}
