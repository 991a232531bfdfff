//! Microphone capture.
//!
//! The capture unit owns exactly one microphone session at a time:
//!
//! ```text
//! Idle --start_capture()--> Capturing --stop_capture()--> Idle
//!   \--permission denied--> Idle
//! ```
//!
//! Audio arrives on the device thread as mono `f32` segments and is pushed
//! through a channel. Nothing is processed until [`CaptureUnit::stop_capture`]
//! drains the channel and encodes the segments, in arrival order, into one
//! [`AudioClip`].
//!
//! The microphone itself is a capability ([`Microphone`]) so the unit can be
//! driven without audio hardware in tests.

mod device;
mod file;
mod wav;

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, unbounded};

pub use device::{CpalMicrophone, InputDeviceInfo, list_input_devices};
pub use file::load_clip;
pub use wav::{WAV_MIME_TYPE, encode_wav};

/// One finalized recording, ready for classification.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    /// Encoded audio bytes
    pub bytes: Vec<u8>,
    /// Content type of `bytes` (e.g. `audio/wav`)
    pub mime_type: String,
    /// Length of the recorded audio
    pub duration: Duration,
}

impl AudioClip {
    /// Create a clip from already encoded bytes.
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>, duration: Duration) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
            duration,
        }
    }

    /// Size of the encoded payload in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

/// Errors raised while acquiring or finalizing microphone input.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CaptureError {
    #[error("Microphone access denied: {0}")]
    PermissionDenied(String),

    #[error("Audio device error: {0}")]
    Device(String),

    #[error("Failed to encode recording: {0}")]
    Encode(String),

    #[error("A recording is already in progress")]
    AlreadyCapturing,

    #[error("Failed to read audio file {0}: {1}")]
    Read(String, String),

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),
}

/// Receiving end handed to a [`Microphone`]; the device thread pushes mono
/// segments into it.
#[derive(Debug, Clone)]
pub struct SegmentSink {
    tx: Sender<Vec<f32>>,
}

impl SegmentSink {
    /// Push one segment of mono samples. Empty segments are ignored.
    pub fn push(&self, samples: Vec<f32>) {
        if samples.is_empty() {
            return;
        }
        // The receiver only goes away once capture has stopped.
        let _ = self.tx.send(samples);
    }
}

/// A live input stream. Dropping it releases the device.
pub trait ActiveInput {
    /// Sample rate of the segments pushed by this stream.
    fn sample_rate(&self) -> u32;
}

/// Capability to request microphone access and stream audio.
pub trait Microphone {
    /// Request access and start delivering mono segments into `sink`.
    ///
    /// Returns [`CaptureError::PermissionDenied`] when access is refused or
    /// there is no input device to open.
    fn open(&self, sink: SegmentSink) -> Result<Box<dyn ActiveInput>, CaptureError>;
}

struct ActiveCapture {
    input: Box<dyn ActiveInput>,
    segments: Receiver<Vec<f32>>,
    started: Instant,
}

/// Records one clip at a time from a [`Microphone`].
pub struct CaptureUnit<M: Microphone> {
    microphone: M,
    active: Option<ActiveCapture>,
}

impl<M: Microphone> CaptureUnit<M> {
    pub fn new(microphone: M) -> Self {
        Self {
            microphone,
            active: None,
        }
    }

    pub fn is_capturing(&self) -> bool {
        self.active.is_some()
    }

    /// Request microphone access and begin accumulating segments.
    ///
    /// On any error the unit stays idle.
    pub fn start_capture(&mut self) -> Result<(), CaptureError> {
        if self.active.is_some() {
            return Err(CaptureError::AlreadyCapturing);
        }

        let (tx, rx) = unbounded();
        let input = self.microphone.open(SegmentSink { tx })?;
        tracing::info!("Capture started at {}Hz", input.sample_rate());

        self.active = Some(ActiveCapture {
            input,
            segments: rx,
            started: Instant::now(),
        });
        Ok(())
    }

    /// Finalize the current capture into a clip and release the device.
    ///
    /// Returns `Ok(None)` when nothing is being captured.
    pub fn stop_capture(&mut self) -> Result<Option<AudioClip>, CaptureError> {
        let Some(active) = self.active.take() else {
            tracing::debug!("stop_capture called while idle");
            return Ok(None);
        };

        let ActiveCapture {
            input,
            segments,
            started,
        } = active;
        let sample_rate = input.sample_rate();
        // Release the device before draining so no further segments arrive.
        drop(input);

        let mut samples = Vec::new();
        let mut segment_count = 0usize;
        for segment in segments.try_iter() {
            samples.extend_from_slice(&segment);
            segment_count += 1;
        }

        tracing::info!(
            "Capture stopped after {:.1}s: {} segments, {} samples",
            started.elapsed().as_secs_f32(),
            segment_count,
            samples.len()
        );

        let bytes = encode_wav(&samples, sample_rate)?;
        let duration = samples_duration(samples.len(), sample_rate);
        Ok(Some(AudioClip::new(bytes, WAV_MIME_TYPE, duration)))
    }

    /// Time since capture started, or zero when idle.
    pub fn elapsed(&self) -> Duration {
        self.active
            .as_ref()
            .map(|a| a.started.elapsed())
            .unwrap_or(Duration::ZERO)
    }
}

fn samples_duration(sample_count: usize, sample_rate: u32) -> Duration {
    if sample_rate == 0 {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(sample_count as f64 / sample_rate as f64)
}
