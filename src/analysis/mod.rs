//! 1/3-octave band level analysis

mod aweight;
mod bands;
mod calibrate;
mod evaluate;
mod fft;
mod frame;
mod spectrum;

pub(crate) use aweight::WeightingFilter;
pub(crate) use bands::{BAND_COUNT, Band, get_bands};
pub(crate) use calibrate::{CalibrationProfile, Calibrator, ResponseMode};
pub(crate) use evaluate::{Evaluation, FIRST_REPORTED_BAND, evaluate};
pub(crate) use frame::extract_frame;
pub(crate) use spectrum::{ANALYSIS_FRAME_LEN, AnalysisResult, analyze};

#[cfg(test)]
mod tests;
