//! Test utilities and fixtures for nanny-ai tests.
//!
//! Shared results and clips so individual test modules don't rebuild the
//! same values by hand.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{hunger_result, sample_clip};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let clip = sample_clip();
//!     let expected = hunger_result();
//!     // ... test logic
//! }
//! ```

use std::time::Duration;

use crate::capture::{AudioClip, WAV_MIME_TYPE, encode_wav};
use crate::classifier::{ClassificationResult, CryReason, Urgency};

/// Sample rate used by [`sample_clip`]; low so the fixture stays small.
pub const SAMPLE_CLIP_RATE: u32 = 8_000;

/// The result the service gives for a rhythmic, rising hunger cry.
pub fn hunger_result() -> ClassificationResult {
    ClassificationResult {
        reason: CryReason::Hunger,
        confidence: 82.0,
        explanation: "rhythmic rising cry".to_string(),
        advice: vec![
            "feed".to_string(),
            "check last feeding time".to_string(),
            "check latch".to_string(),
        ],
        urgency: Urgency::Medium,
    }
}

/// A plausible result for `reason`, otherwise like [`hunger_result`].
///
/// ```ignore
/// let pain = ClassificationResult {
///     urgency: Urgency::High,
///     ..result_with_reason(CryReason::Pain)
/// };
/// ```
pub fn result_with_reason(reason: CryReason) -> ClassificationResult {
    ClassificationResult {
        reason,
        explanation: format!("sounds like {}", reason.label()),
        ..hunger_result()
    }
}

/// A six-second WAV clip of a quiet sine tone.
pub fn sample_clip() -> AudioClip {
    let total = SAMPLE_CLIP_RATE as usize * 6;
    let samples: Vec<f32> = (0..total)
        .map(|i| {
            let t = i as f32 / SAMPLE_CLIP_RATE as f32;
            0.25 * (2.0 * std::f32::consts::PI * 440.0 * t).sin()
        })
        .collect();
    let bytes = encode_wav(&samples, SAMPLE_CLIP_RATE).expect("Failed to encode sample clip");
    AudioClip::new(bytes, WAV_MIME_TYPE, Duration::from_secs(6))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hunger_result_defaults() {
        let result = hunger_result();
        assert_eq!(result.reason, CryReason::Hunger);
        assert_eq!(result.confidence, 82.0);
        assert_eq!(result.advice.len(), 3);
        assert_eq!(result.urgency, Urgency::Medium);
    }

    #[test]
    fn test_result_with_reason() {
        let result = result_with_reason(CryReason::Pain);
        assert_eq!(result.reason, CryReason::Pain);
        assert!(result.explanation.contains("pain"));
    }

    #[test]
    fn test_sample_clip_is_wav() {
        let clip = sample_clip();
        assert_eq!(clip.mime_type, WAV_MIME_TYPE);
        assert_eq!(clip.duration, Duration::from_secs(6));
        assert_eq!(&clip.bytes[..4], b"RIFF");
        assert_eq!(clip.len(), 44 + SAMPLE_CLIP_RATE as usize * 6 * 2);
    }
}
