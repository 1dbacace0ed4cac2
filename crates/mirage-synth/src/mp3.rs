use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::text_seed;

/// MPEG-1 Layer III header: sync, 128 kbps, 44.1 kHz, no padding
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];

/// Frame length for 128 kbps at 44.1 kHz: 144 * 128000 / 44100
const FRAME_LEN: usize = 417;

/// Samples per MPEG-1 Layer III frame
const SAMPLES_PER_FRAME: f64 = 1152.0;

const FRAME_SAMPLE_RATE: f64 = 44_100.0;

/// Build an MP3-shaped placeholder buffer
///
/// Each frame opens with a valid sync header followed by deterministic
/// filler, sized to a plausible 128 kbps bitrate for the requested
/// duration. Format sniffers recognize it as MP3; it does not decode to
/// real audio. Swapping in a real encoder would be contained to this
/// module.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn placeholder_mp3(text: &str, duration_secs: f64) -> Vec<u8> {
    let frames = ((duration_secs * FRAME_SAMPLE_RATE / SAMPLES_PER_FRAME).ceil() as usize).max(1);

    let mut rng = StdRng::seed_from_u64(text_seed(text));
    let mut out = Vec::with_capacity(frames * FRAME_LEN);

    for _ in 0..frames {
        out.extend_from_slice(&FRAME_HEADER);
        for _ in FRAME_HEADER.len()..FRAME_LEN {
            out.push(rng.random::<u8>());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_frame_starts_with_sync() {
        let bytes = placeholder_mp3("Hello world", 1.0);
        assert_eq!(bytes.len() % FRAME_LEN, 0);
        for frame in bytes.chunks(FRAME_LEN) {
            assert_eq!(&frame[0..4], &FRAME_HEADER);
        }
    }

    #[test]
    fn frame_count_tracks_duration() {
        let bytes = placeholder_mp3("Hello world", 1.0);
        // 1 s at 44.1 kHz / 1152 samples per frame -> 39 frames
        assert_eq!(bytes.len() / FRAME_LEN, 39);
    }

    #[test]
    fn zero_duration_still_emits_one_frame() {
        let bytes = placeholder_mp3("x", 0.0);
        assert_eq!(bytes.len(), FRAME_LEN);
    }

    #[test]
    fn filler_is_deterministic_per_text() {
        assert_eq!(placeholder_mp3("same", 0.5), placeholder_mp3("same", 0.5));
        assert_ne!(placeholder_mp3("one", 0.5), placeholder_mp3("two", 0.5));
    }
}
