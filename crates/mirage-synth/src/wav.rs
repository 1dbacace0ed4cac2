use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::SynthError;

/// Encode mono 16-bit PCM into an in-memory WAV container
///
/// The writer emits the canonical 44-byte RIFF/WAVE/fmt/data layout, so
/// the header invariants hold: "RIFF" at offset 0, "WAVE" at offset 8,
/// the RIFF chunk size at offset 4 equal to 36 + data bytes.
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, SynthError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec)?;
        for &sample in samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
    }

    Ok(cursor.into_inner())
}
