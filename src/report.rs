//! JSON batch report

use std::path::Path;

use serde::Serialize;

use crate::analysis::{CalibrationProfile, Evaluation, ResponseMode};
use crate::error::Result;
use crate::metadata::TestDetails;

#[derive(Debug, Serialize)]
pub(crate) struct CalibrationSummary {
    pub(crate) file: String,
    pub(crate) response: ResponseMode,
    #[serde(flatten)]
    pub(crate) profile: CalibrationProfile,
}

/// One analyzed test recording
#[derive(Debug, Serialize)]
pub(crate) struct FileReport {
    pub(crate) file: String,
    pub(crate) details: TestDetails,
    pub(crate) selected_frame_offset: usize,
    pub(crate) evaluation: Evaluation,
    /// Raw samples of the analyzed frame
    #[serde(skip)]
    pub(crate) frame: Vec<f32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FailedFile {
    pub(crate) file: String,
    pub(crate) error: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchReport<'a> {
    pub(crate) calibration: CalibrationSummary,
    pub(crate) ambient: String,
    pub(crate) results: Vec<&'a FileReport>,
    pub(crate) failures: Vec<FailedFile>,
}

pub(crate) fn write_report(path: &Path, report: &BatchReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    log::info!("Report written to {}", path.display());
    Ok(())
}
