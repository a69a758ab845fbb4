//! Per-recording band spectrum

use serde::Serialize;

use super::aweight::WeightingFilter;
use super::bands::{Band, band_energies};
use super::fft::magnitude_spectrum;
use super::frame::{extract_frame, find_loudest_frame};
use crate::audio::Signal;
use crate::error::Result;

/// Samples analyzed per measurement (1.365 s @ 48 kHz)
pub(crate) const ANALYSIS_FRAME_LEN: usize = 65536;

/// Raw band energies of the loudest frame of a recording
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct AnalysisResult {
    /// Summed FFT magnitudes per band, uncalibrated
    pub(crate) band_energies: Vec<f64>,
    pub(crate) selected_frame_offset: usize,
    pub(crate) frame_len: usize,
}

/// A-weight, window and fold an already extracted frame into bands
pub(crate) fn analyze_frame(frame: &[f32], filter: &WeightingFilter, bands: &[Band]) -> Vec<f64> {
    let weighted = filter.apply(frame);
    let magnitudes = magnitude_spectrum(&weighted);
    band_energies(&magnitudes, bands)
}

/// Validate `signal`, pick its loudest `frame_len` window and analyze it
pub(crate) fn analyze(
    signal: &Signal,
    filter: &WeightingFilter,
    bands: &[Band],
    frame_len: usize,
) -> Result<AnalysisResult> {
    signal.validate(frame_len, filter.sample_rate())?;

    let offset = find_loudest_frame(&signal.samples, frame_len);
    let frame = extract_frame(&signal.samples, offset, frame_len);
    log::debug!(
        "Analyzing frame at sample {} ({:.2} s)",
        offset,
        offset as f64 / signal.sample_rate as f64
    );

    Ok(AnalysisResult {
        band_energies: analyze_frame(frame, filter, bands),
        selected_frame_offset: offset,
        frame_len,
    })
}
