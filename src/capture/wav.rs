//! WAV container encoding for captured audio.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};

use super::CaptureError;

/// Content type of clips produced by [`encode_wav`].
pub const WAV_MIME_TYPE: &str = "audio/wav";

/// Encode mono `f32` samples as a 16-bit PCM WAV file in memory.
///
/// Samples outside [-1.0, 1.0] are clamped.
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, CaptureError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
    {
        let mut writer =
            WavWriter::new(&mut cursor, spec).map_err(|e| CaptureError::Encode(e.to_string()))?;
        for &sample in samples {
            let pcm = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer
                .write_sample(pcm)
                .map_err(|e| CaptureError::Encode(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| CaptureError::Encode(e.to_string()))?;
    }

    Ok(cursor.into_inner())
}
