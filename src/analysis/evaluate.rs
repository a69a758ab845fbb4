//! Calibrated levels and limit checks

use serde::Serialize;

use super::bands::Band;
use super::calibrate::CalibrationProfile;
use super::spectrum::AnalysisResult;
use crate::limits::SpecThresholds;

/// First band shown in reports (ANSI band 25, 315 Hz)
pub(crate) const FIRST_REPORTED_BAND: usize = 15;

/// Calibrated level of one band against its limit
#[derive(Debug, Clone, Serialize)]
pub(crate) struct BandLevel {
    pub(crate) number: u32,
    pub(crate) label: String,
    pub(crate) level_db: f64,
    pub(crate) limit_db: Option<f64>,
    pub(crate) ambient_db: f64,
    /// `None` when the band has no limit
    pub(crate) passed: Option<bool>,
}

/// Loudest adjacent band pair against the two-band limit
#[derive(Debug, Clone, Serialize)]
pub(crate) struct TwoBandCheck {
    pub(crate) bands: [u32; 2],
    pub(crate) level_db: f64,
    pub(crate) limit_db: f64,
    pub(crate) passed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Evaluation {
    pub(crate) levels: Vec<BandLevel>,
    pub(crate) two_band: TwoBandCheck,
    pub(crate) passed: bool,
}

/// Convert raw band energies to dB SPL: 20 log10((2/N) |E|) + offset
pub(crate) fn calibrated_levels(result: &AnalysisResult, profile: &CalibrationProfile) -> Vec<f64> {
    let scale = 2.0 / result.frame_len as f64;
    result
        .band_energies
        .iter()
        .map(|e| 20.0 * (scale * e.abs()).log10() + profile.offset_db)
        .collect()
}

/// Energetic sum of two dB levels
pub(crate) fn combine_db(a: f64, b: f64) -> f64 {
    10.0 * (10f64.powf(a / 10.0) + 10f64.powf(b / 10.0)).log10()
}

fn loudest_pair(levels: &[f64], limits: &[Option<f64>]) -> (usize, f64) {
    let regulated: Vec<usize> = (0..levels.len().saturating_sub(1))
        .filter(|&k| limits.get(k).is_some_and(Option::is_some))
        .filter(|&k| limits.get(k + 1).is_some_and(Option::is_some))
        .collect();

    let candidates: Vec<usize> = if regulated.is_empty() {
        (0..levels.len().saturating_sub(1)).collect()
    } else {
        regulated
    };

    let mut best = (0, f64::NEG_INFINITY);
    for k in candidates {
        let level = combine_db(levels[k], levels[k + 1]);
        if level > best.1 {
            best = (k, level);
        }
    }
    best
}

/// Compare a measurement against `limits`, reporting the ambient level of
/// each band alongside. Ambient levels never affect the outcome.
pub(crate) fn evaluate(
    result: &AnalysisResult,
    ambient: &AnalysisResult,
    profile: &CalibrationProfile,
    limits: &SpecThresholds,
    bands: &[Band],
) -> Evaluation {
    let measured = calibrated_levels(result, profile);
    let ambient = calibrated_levels(ambient, profile);

    let levels: Vec<BandLevel> = bands
        .iter()
        .enumerate()
        .map(|(i, band)| {
            let limit_db = limits.bands.get(i).copied().flatten();
            BandLevel {
                number: band.number,
                label: band.label(),
                level_db: measured[i],
                limit_db,
                ambient_db: ambient[i],
                passed: limit_db.map(|limit| measured[i] <= limit),
            }
        })
        .collect();

    let (k, pair_level) = loudest_pair(&measured, &limits.bands);
    let two_band = TwoBandCheck {
        bands: [bands[k].number, bands[k + 1].number],
        level_db: pair_level,
        limit_db: limits.two_band,
        passed: pair_level <= limits.two_band,
    };

    let passed = two_band.passed && levels.iter().all(|l| l.passed.unwrap_or(true));

    Evaluation {
        levels,
        two_band,
        passed,
    }
}
