use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};

use crate::SynthError;

/// Default pixel dimensions when no resolution is requested
pub const DEFAULT_RESOLUTION: (u32, u32) = (1024, 1024);

const MIN_DIMENSION: u32 = 16;
const MAX_DIMENSION: u32 = 4096;

/// Output container for synthesized images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoding {
    Png,
    Jpeg,
}

impl ImageEncoding {
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }

    /// Parse a format token, falling back to PNG for anything unrecognized
    pub fn from_token(token: Option<&str>) -> Self {
        match token.map(str::to_ascii_lowercase).as_deref() {
            Some("jpeg" | "jpg") => Self::Jpeg,
            _ => Self::Png,
        }
    }

    const fn as_image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Resolve a resolution token to pixel dimensions
///
/// Accepts the named presets (`square`, `portrait`, `landscape`,
/// `thumbnail`) or a `WxH` literal. Dimensions are clamped to
/// [16, 4096]; unrecognized tokens fall back to [`DEFAULT_RESOLUTION`].
pub fn parse_resolution(token: Option<&str>) -> (u32, u32) {
    let Some(token) = token else {
        return DEFAULT_RESOLUTION;
    };

    match token.to_ascii_lowercase().as_str() {
        "square" => (1024, 1024),
        "portrait" => (1024, 1792),
        "landscape" => (1792, 1024),
        "thumbnail" => (256, 256),
        literal => parse_literal(literal).unwrap_or(DEFAULT_RESOLUTION),
    }
}

fn parse_literal(token: &str) -> Option<(u32, u32)> {
    let (w, h) = token.split_once(['x', 'X'])?;
    let width: u32 = w.trim().parse().ok()?;
    let height: u32 = h.trim().parse().ok()?;
    Some((
        width.clamp(MIN_DIMENSION, MAX_DIMENSION),
        height.clamp(MIN_DIMENSION, MAX_DIMENSION),
    ))
}

/// Two-color gradient palette derived from prompt keywords
///
/// Returns `(top, bottom)` colors for a vertical gradient.
pub fn palette_for(prompt: &str) -> ([u8; 3], [u8; 3]) {
    let lowered = prompt.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lowered.contains(w));

    if has(&["sunset", "sunrise", "dawn", "dusk"]) {
        ([255, 94, 58], [255, 195, 113])
    } else if has(&["ocean", "sea", "water", "sky"]) {
        ([21, 101, 192], [144, 202, 249])
    } else if has(&["forest", "tree", "grass", "jungle"]) {
        ([27, 94, 32], [165, 214, 167])
    } else if has(&["night", "dark", "space", "star"]) {
        ([13, 13, 40], [60, 60, 110])
    } else if has(&["fire", "flame", "lava", "volcano"]) {
        ([183, 28, 28], [255, 152, 0])
    } else {
        ([96, 96, 128], [176, 176, 200])
    }
}

/// Render a gradient placeholder image for the prompt
///
/// Fills `width` x `height` pixels with a vertical linear interpolation
/// between the prompt's palette colors and encodes a real container, so
/// the result decodes to exactly the requested dimensions.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn render_image(prompt: &str, width: u32, height: u32, encoding: ImageEncoding) -> Result<Vec<u8>, SynthError> {
    let (top, bottom) = palette_for(prompt);

    let img = RgbImage::from_fn(width, height, |_, y| {
        let t = if height > 1 {
            f64::from(y) / f64::from(height - 1)
        } else {
            0.0
        };
        let channel = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Rgb([
            channel(top[0], bottom[0]),
            channel(top[1], bottom[1]),
            channel(top[2], bottom[2]),
        ])
    });

    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, encoding.as_image_format())?;
    Ok(cursor.into_inner())
}
