use mirage_synth::ImageEncoding;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ImageGenError;

/// Maximum accepted image prompt length, in characters
pub const MAX_PROMPT_CHARS: usize = 1000;

/// Raw image generation request body
#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    /// Text description of the desired image
    pub prompt: String,
    /// Style hint, provider-specific
    pub style: Option<String>,
    /// Resolution preset or "WxH" literal (default "1024x1024")
    pub resolution: Option<String>,
    /// Output format ("png" or "jpeg"; default png)
    pub format: Option<String>,
}

/// Validated, normalized image job
#[derive(Debug, Clone)]
pub struct ImageJob {
    pub prompt: String,
    pub style: Option<String>,
    pub width: u32,
    pub height: u32,
    pub format: ImageEncoding,
}

impl ImageJob {
    /// Validate and normalize a raw request
    ///
    /// The prompt is trimmed and length-bounded; unrecognized resolution
    /// and format tokens fall back to documented defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ImageGenError::InvalidRequest`] when the prompt is empty
    /// after trimming or exceeds [`MAX_PROMPT_CHARS`].
    pub fn from_request(request: ImageRequest) -> Result<Self, ImageGenError> {
        let prompt = mirage_core::validate::required_text(&request.prompt, MAX_PROMPT_CHARS, "prompt")
            .map_err(ImageGenError::InvalidRequest)?;

        let (width, height) = mirage_synth::parse_resolution(request.resolution.as_deref());

        Ok(Self {
            prompt,
            style: request.style,
            width,
            height,
            format: ImageEncoding::from_token(request.format.as_deref()),
        })
    }

    /// Resolution as the upstream "WxH" token
    pub fn resolution_token(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// Options echoed back in JSON envelope responses
    pub fn echoed_options(&self) -> Map<String, Value> {
        let mut options = Map::new();
        if let Some(ref style) = self.style {
            options.insert("style".to_owned(), Value::String(style.clone()));
        }
        options.insert("resolution".to_owned(), Value::String(self.resolution_token()));
        options.insert("format".to_owned(), Value::String(self.format.extension().to_owned()));
        options
    }

    pub fn suggested_filename(&self) -> String {
        format!("image.{}", self.format.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: &str) -> ImageRequest {
        ImageRequest {
            prompt: prompt.to_owned(),
            style: None,
            resolution: None,
            format: None,
        }
    }

    #[test]
    fn defaults_applied() {
        let job = ImageJob::from_request(request("a cat")).unwrap();
        assert_eq!((job.width, job.height), (1024, 1024));
        assert_eq!(job.format, ImageEncoding::Png);
        assert_eq!(job.suggested_filename(), "image.png");
    }

    #[test]
    fn explicit_resolution_is_honored() {
        let job = ImageJob::from_request(ImageRequest {
            resolution: Some("640x480".to_owned()),
            ..request("a cat")
        })
        .unwrap();
        assert_eq!(job.resolution_token(), "640x480");
    }

    #[test]
    fn unknown_resolution_falls_back() {
        let job = ImageJob::from_request(ImageRequest {
            resolution: Some("huge".to_owned()),
            ..request("a cat")
        })
        .unwrap();
        assert_eq!((job.width, job.height), (1024, 1024));
    }

    #[test]
    fn oversized_prompt_is_rejected() {
        let err = ImageJob::from_request(request(&"p".repeat(1500))).unwrap_err();
        assert!(matches!(err, ImageGenError::InvalidRequest(_)));
    }

    #[test]
    fn empty_prompt_is_rejected() {
        assert!(ImageJob::from_request(request("  ")).is_err());
    }
}
