//! Clips loaded from audio files instead of the microphone.

use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

use super::{AudioClip, CaptureError, WAV_MIME_TYPE};

/// Content type for a file, judged by extension.
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("wav") => Some(WAV_MIME_TYPE),
        Some("mp3") => Some("audio/mpeg"),
        Some("ogg" | "oga") => Some("audio/ogg"),
        Some("webm") => Some("audio/webm"),
        Some("m4a" | "mp4" | "aac") => Some("audio/mp4"),
        Some("flac") => Some("audio/flac"),
        _ => None,
    }
}

/// Read an audio file as a clip.
///
/// Duration is only known for WAV files; other formats report zero.
pub fn load_clip(path: &Path) -> Result<AudioClip, CaptureError> {
    let mime_type = mime_type_for(path)
        .ok_or_else(|| CaptureError::UnsupportedFormat(path.display().to_string()))?;
    let bytes = std::fs::read(path)
        .map_err(|e| CaptureError::Read(path.display().to_string(), e.to_string()))?;

    let duration = if mime_type == WAV_MIME_TYPE {
        wav_duration(&bytes)
            .map_err(|e| CaptureError::Read(path.display().to_string(), e.to_string()))?
    } else {
        Duration::ZERO
    };

    tracing::debug!("Loaded {:?} ({} bytes, {})", path, bytes.len(), mime_type);
    Ok(AudioClip::new(bytes, mime_type, duration))
}

fn wav_duration(bytes: &[u8]) -> Result<Duration, hound::Error> {
    let reader = hound::WavReader::new(Cursor::new(bytes))?;
    let rate = reader.spec().sample_rate.max(1);
    Ok(Duration::from_secs_f64(
        reader.duration() as f64 / rate as f64,
    ))
}
