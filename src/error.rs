//! Error types for band level analysis

use std::path::PathBuf;

use thiserror::Error;

/// Result type for analysis operations
pub(crate) type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading, validating or analyzing a recording
#[derive(Debug, Error)]
pub(crate) enum Error {
    /// Signal shorter than the frame it must be analyzed with
    #[error("invalid length - input must be at least {required} samples long, got {actual}")]
    InvalidAudioLength { required: usize, actual: usize },

    /// Signal sample rate differs from the calibration sample rate
    #[error("invalid sampling rate - input must have fs = {expected} Hz, got {actual} Hz")]
    InvalidSampleRate { expected: u32, actual: u32 },

    /// Signal is not mono
    #[error("invalid channel count - input must be mono, got {channels} channels")]
    InvalidChannelCount { channels: u16 },

    #[error("invalid response time '{0}' - must be 'fast' or 'slow'")]
    InvalidResponseMode(String),

    /// Filename does not follow the token convention
    #[error("failed to parse '{file}': {reason}")]
    MetadataParseFailure { file: String, reason: String },

    /// Calibration frame has no energy, so no offset can be derived
    #[error("calibration recording is silent - measured level is {0} dB")]
    SilentCalibration(f64),

    #[error("A-weighting is not defined for a sample rate of {0} Hz")]
    UnsupportedWeightingRate(u32),

    #[error("no limits defined for test type '{0}'")]
    UnknownTestType(String),

    #[error("channel {channel} out of range for {channels}-channel input")]
    ChannelOutOfRange { channel: usize, channels: u16 },

    #[error("failed to decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    #[error("invalid limits: {0}")]
    Limits(String),

    #[error("failed to render chart: {0}")]
    Chart(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error rejects the input before any analysis ran
    pub(crate) fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidAudioLength { .. }
                | Error::InvalidSampleRate { .. }
                | Error::InvalidChannelCount { .. }
        )
    }
}
