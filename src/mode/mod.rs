//! Batch analysis against a fixed calibration and ambient reference

mod batch;

pub(crate) use batch::run_batch;

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::analysis::{
    ANALYSIS_FRAME_LEN, AnalysisResult, Band, CalibrationProfile, Calibrator, WeightingFilter,
    analyze, evaluate, extract_frame, get_bands,
};
use crate::audio::load_audio;
use crate::config::Settings;
use crate::error;
use crate::limits::SpecLimits;
use crate::metadata::{parse_calibration_target, parse_test_details};
use crate::report::FileReport;

/// Calibration and ambient measurement, computed once per run
#[derive(Debug, Clone)]
pub(crate) struct Reference {
    pub(crate) calibration: CalibrationProfile,
    pub(crate) ambient: AnalysisResult,
}

/// Read-only state shared by every per-file analysis
pub(crate) struct Session {
    pub(crate) filter: WeightingFilter,
    pub(crate) bands: Vec<Band>,
    pub(crate) limits: SpecLimits,
    pub(crate) reference: Reference,
    pub(crate) channel: Option<usize>,
}

impl Session {
    /// Build the weighting filter, calibrate, and measure the ambient
    /// recording. Any failure here is fatal for the run.
    pub(crate) fn start(settings: &Settings) -> Result<Self> {
        let filter = WeightingFilter::new(settings.cal_rate)?;
        let bands = get_bands();

        let limits = SpecLimits::load(&settings.limits, &bands)
            .with_context(|| format!("Failed to load limits {}", settings.limits.display()))?;

        let target = parse_calibration_target(&settings.cal_file)?;
        let cal_signal = load_audio(&settings.cal_file, settings.channel)?;
        let calibration = Calibrator::new(settings.response, &filter)
            .calibrate(&cal_signal, target as f64)
            .with_context(|| format!("Calibration failed for {}", settings.cal_file.display()))?;

        let amb_signal = load_audio(&settings.ambient, settings.channel)?;
        let ambient = analyze(&amb_signal, &filter, &bands, ANALYSIS_FRAME_LEN)
            .with_context(|| format!("Ambient analysis failed for {}", settings.ambient.display()))?;
        log::info!(
            "Ambient reference: {} (frame at sample {})",
            settings.ambient.display(),
            ambient.selected_frame_offset
        );

        Ok(Self {
            filter,
            bands,
            limits,
            reference: Reference {
                calibration,
                ambient,
            },
            channel: settings.channel,
        })
    }

    /// Analyze one test recording. The filename is parsed and its limits
    /// looked up before any audio is decoded.
    pub(crate) fn analyze_file(&self, path: &Path) -> error::Result<FileReport> {
        let details = parse_test_details(path)?;
        let limits = self.limits.get(&details.test_type)?;

        let signal = load_audio(path, self.channel)?;
        let result = analyze(&signal, &self.filter, &self.bands, ANALYSIS_FRAME_LEN)?;
        let evaluation = evaluate(
            &result,
            &self.reference.ambient,
            &self.reference.calibration,
            limits,
            &self.bands,
        );

        log::info!(
            "{}: {}",
            path.display(),
            if evaluation.passed { "pass" } else { "fail" }
        );

        Ok(FileReport {
            file: path.display().to_string(),
            details,
            selected_frame_offset: result.selected_frame_offset,
            evaluation,
            frame: extract_frame(&signal.samples, result.selected_frame_offset, result.frame_len)
                .to_vec(),
        })
    }

    pub(crate) fn sample_rate(&self) -> u32 {
        self.filter.sample_rate()
    }
}
