//! Reference-level calibration

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::aweight::WeightingFilter;
use super::fft::half_spectrum;
use super::frame::{extract_frame, find_loudest_frame};
use crate::audio::Signal;
use crate::error::{Error, Result};

/// Sound level meter response time the reference was read with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ResponseMode {
    /// 170.67 ms @ 48 kHz
    Fast,
    /// 1.365 s @ 48 kHz
    Slow,
}

impl ResponseMode {
    pub(crate) fn frame_len(self) -> usize {
        match self {
            ResponseMode::Fast => 8192,
            ResponseMode::Slow => 65536,
        }
    }
}

impl FromStr for ResponseMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fast" => Ok(ResponseMode::Fast),
            "slow" => Ok(ResponseMode::Slow),
            other => Err(Error::InvalidResponseMode(other.to_string())),
        }
    }
}

impl fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseMode::Fast => write!(f, "fast"),
            ResponseMode::Slow => write!(f, "slow"),
        }
    }
}

/// Offset mapping FFT-relative levels to dB SPL
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct CalibrationProfile {
    pub(crate) target_level_db: f64,
    pub(crate) measured_level_db: f64,
    pub(crate) offset_db: f64,
}

impl CalibrationProfile {
    pub(crate) fn new(target_level_db: f64, measured_level_db: f64) -> Self {
        Self {
            target_level_db,
            measured_level_db,
            offset_db: target_level_db - measured_level_db,
        }
    }
}

/// Measures a reference recording of known SPL
pub(crate) struct Calibrator<'a> {
    mode: ResponseMode,
    filter: &'a WeightingFilter,
}

impl<'a> Calibrator<'a> {
    pub(crate) fn new(mode: ResponseMode, filter: &'a WeightingFilter) -> Self {
        Self { mode, filter }
    }

    pub(crate) fn frame_len(&self) -> usize {
        self.mode.frame_len()
    }

    /// Level of the loudest frame, 20 log10((2/N) * sum |Y|^2). A frame with
    /// no energy is an error.
    ///
    /// Note this sums power while band energies sum magnitudes; the offset
    /// absorbs the difference.
    pub(crate) fn measure(&self, signal: &Signal) -> Result<f64> {
        let n = self.frame_len();
        signal.validate(n, self.filter.sample_rate())?;

        let offset = find_loudest_frame(&signal.samples, n);
        let frame = extract_frame(&signal.samples, offset, n);
        log::debug!("Calibration frame at sample {} ({} mode)", offset, self.mode);

        let weighted = self.filter.apply(frame);
        let total_energy: f64 = half_spectrum(&weighted).iter().map(|c| c.norm_sqr()).sum();

        let level = 20.0 * ((2.0 / n as f64) * total_energy).log10();
        if !level.is_finite() {
            return Err(Error::SilentCalibration(level));
        }
        Ok(level)
    }

    /// Build the profile for a recording whose true level is `target_db`
    pub(crate) fn calibrate(&self, signal: &Signal, target_db: f64) -> Result<CalibrationProfile> {
        let measured = self.measure(signal)?;
        let profile = CalibrationProfile::new(target_db, measured);
        log::info!(
            "Calibration: target {:.1} dB, measured {:.2} dB, offset {:+.2} dB",
            profile.target_level_db,
            profile.measured_level_db,
            profile.offset_db
        );
        Ok(profile)
    }
}
