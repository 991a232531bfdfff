//! Microphone input using cpal.
//!
//! The input callback runs on cpal's audio thread. It only downmixes each
//! buffer to mono and pushes it into the [`SegmentSink`]; all encoding
//! happens after capture stops.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BuildStreamError, DefaultStreamConfigError, Device, SampleFormat, Stream, StreamConfig};

use super::{ActiveInput, CaptureError, Microphone, SegmentSink};

/// Input device information for the `devices` command.
#[derive(Debug, Clone)]
pub struct InputDeviceInfo {
    pub name: String,
    pub is_default: bool,
    /// Default sample rate, when the device reports one
    pub sample_rate: Option<u32>,
    pub channels: Option<u16>,
}

/// The system microphone.
#[derive(Debug, Clone, Default)]
pub struct CpalMicrophone {
    /// Preferred device name (None = system default input)
    device_name: Option<String>,
}

impl CpalMicrophone {
    pub fn new(device_name: Option<String>) -> Self {
        Self {
            device_name: device_name.filter(|n| !n.trim().is_empty()),
        }
    }

    fn select_device(&self, host: &cpal::Host) -> Result<Device, CaptureError> {
        if let Some(wanted) = &self.device_name {
            let devices = host
                .input_devices()
                .map_err(|e| CaptureError::Device(e.to_string()))?;
            for device in devices {
                if device.name().map(|n| &n == wanted).unwrap_or(false) {
                    tracing::info!("Using configured input device: {}", wanted);
                    return Ok(device);
                }
            }
            tracing::warn!(
                "Configured input device {:?} not found, falling back to default",
                wanted
            );
        }

        require_device(host.default_input_device())
    }
}

struct CpalInput {
    _stream: Stream,
    sample_rate: u32,
}

impl ActiveInput for CpalInput {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl Microphone for CpalMicrophone {
    fn open(&self, sink: SegmentSink) -> Result<Box<dyn ActiveInput>, CaptureError> {
        let host = cpal::default_host();
        let device = self.select_device(&host)?;

        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        tracing::info!("Opening input device: {}", device_name);

        let supported = device
            .default_input_config()
            .map_err(map_config_error)?;
        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels() as usize;
        let config: StreamConfig = supported.config();

        tracing::debug!(
            "Input format: {}Hz, {} channels, {:?}",
            sample_rate,
            channels,
            supported.sample_format()
        );

        let stream = match supported.sample_format() {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, channels, sink),
            SampleFormat::I16 => build_stream::<i16>(&device, &config, channels, sink),
            SampleFormat::U16 => build_stream::<u16>(&device, &config, channels, sink),
            SampleFormat::I32 => build_stream::<i32>(&device, &config, channels, sink),
            format => {
                return Err(CaptureError::Device(format!(
                    "Unsupported sample format: {:?}",
                    format
                )));
            }
        }?;

        stream.play().map_err(|e| CaptureError::Device(e.to_string()))?;

        Ok(Box::new(CpalInput {
            _stream: stream,
            sample_rate,
        }))
    }
}

fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    channels: usize,
    sink: SegmentSink,
) -> Result<Stream, CaptureError>
where
    T: cpal::SizedSample + Send + 'static,
    f32: cpal::FromSample<T>,
{
    let channels = channels.max(1);
    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                let mono = data
                    .chunks(channels)
                    .map(|frame| {
                        let sum: f32 = frame
                            .iter()
                            .map(|&s| <f32 as cpal::Sample>::from_sample(s))
                            .sum();
                        sum / frame.len() as f32
                    })
                    .collect();
                sink.push(mono);
            },
            |err| tracing::error!("Input stream error: {}", err),
            None,
        )
        .map_err(map_build_error)
}

fn map_build_error(err: BuildStreamError) -> CaptureError {
    match err {
        BuildStreamError::DeviceNotAvailable => {
            CaptureError::PermissionDenied("input device not available".to_string())
        }
        BuildStreamError::BackendSpecific { err } => {
            let message = err.to_string();
            if looks_like_permission_error(&message) {
                CaptureError::PermissionDenied(message)
            } else {
                CaptureError::Device(message)
            }
        }
        other => CaptureError::Device(other.to_string()),
    }
}

fn map_config_error(err: DefaultStreamConfigError) -> CaptureError {
    match err {
        DefaultStreamConfigError::DeviceNotAvailable => {
            CaptureError::PermissionDenied("input device not available".to_string())
        }
        other => {
            let message = other.to_string();
            if looks_like_permission_error(&message) {
                CaptureError::PermissionDenied(message)
            } else {
                CaptureError::Device(message)
            }
        }
    }
}

/// A host without any input device is treated like a refused microphone.
fn require_device<D>(device: Option<D>) -> Result<D, CaptureError> {
    device.ok_or_else(|| CaptureError::PermissionDenied("no input device present".to_string()))
}

/// Backends report denied access as free text.
fn looks_like_permission_error(message: &str) -> bool {
    let lower = message.to_lowercase();
    ["permission", "denied", "not authorized", "access"]
        .iter()
        .any(|k| lower.contains(k))
}

/// Enumerate input devices on the default host.
pub fn list_input_devices() -> Result<Vec<InputDeviceInfo>, CaptureError> {
    let host = cpal::default_host();
    let default_name = host.default_input_device().and_then(|d| d.name().ok());

    let devices = host
        .input_devices()
        .map_err(|e| CaptureError::Device(e.to_string()))?;

    Ok(devices
        .map(|device| {
            let name = device.name().unwrap_or_else(|_| "Unknown Device".to_string());
            let config = device.default_input_config().ok();
            InputDeviceInfo {
                is_default: default_name.as_deref() == Some(name.as_str()),
                sample_rate: config.as_ref().map(|c| c.sample_rate().0),
                channels: config.as_ref().map(|c| c.channels()),
                name,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_text_detection() {
        assert!(looks_like_permission_error("Permission denied (os error 13)"));
        assert!(looks_like_permission_error("Microphone access not authorized"));
        assert!(!looks_like_permission_error("buffer size out of range"));
    }

    #[test]
    fn test_blank_device_name_means_default() {
        let mic = CpalMicrophone::new(Some("  ".to_string()));
        assert!(mic.device_name.is_none());
    }

    #[test]
    fn test_missing_device_is_permission_denied() {
        let err = require_device::<()>(None).unwrap_err();
        assert!(matches!(err, CaptureError::PermissionDenied(_)));
        assert!(crate::error::Error::from(err).is_permission_denied());
        assert_eq!(require_device(Some(3)).unwrap(), 3);
    }

    #[test]
    fn test_device_not_available_maps_to_permission() {
        let err = map_build_error(BuildStreamError::DeviceNotAvailable);
        assert!(matches!(err, CaptureError::PermissionDenied(_)));
    }
}
