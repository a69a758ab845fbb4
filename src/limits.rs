//! Sound level limits per test type

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;

use crate::analysis::{BAND_COUNT, Band, FIRST_REPORTED_BAND};
use crate::error::{Error, Result};

/// Per-band limits (dB SPL) and the two-band aggregate limit for one test type
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SpecThresholds {
    /// One entry per band; `None` means the band is not regulated
    pub(crate) bands: Vec<Option<f64>>,
    pub(crate) two_band: f64,
}

/// All test types of a limits file
#[derive(Debug, Clone, Default)]
pub(crate) struct SpecLimits {
    types: HashMap<String, SpecThresholds>,
}

/// Band limits as written in the file: a list covering all bands or the
/// reported bands, or a map keyed by band label ("1260") or preferred
/// nominal frequency ("1250").
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BandLimitsFile {
    Ordered(Vec<f64>),
    Keyed(BTreeMap<String, f64>),
}

#[derive(Debug, Deserialize)]
struct TestLimitsFile {
    #[serde(rename = "1/3 octave bands")]
    bands: BandLimitsFile,
    #[serde(rename = "two band spec")]
    two_band: f64,
}

impl SpecLimits {
    pub(crate) fn load(path: &Path, bands: &[Band]) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let limits = Self::from_json(&content, bands)?;
        log::info!(
            "Loaded limits for {} test type(s) from {}",
            limits.types.len(),
            path.display()
        );
        Ok(limits)
    }

    pub(crate) fn from_json(content: &str, bands: &[Band]) -> Result<Self> {
        let raw: BTreeMap<String, TestLimitsFile> = serde_json::from_str(content)?;
        let mut types = HashMap::new();

        for (test_type, entry) in raw {
            let band_limits = resolve_bands(&test_type, entry.bands, bands)?;
            types.insert(
                test_type,
                SpecThresholds {
                    bands: band_limits,
                    two_band: entry.two_band,
                },
            );
        }

        Ok(Self { types })
    }

    pub(crate) fn get(&self, test_type: &str) -> Result<&SpecThresholds> {
        self.types
            .get(test_type)
            .ok_or_else(|| Error::UnknownTestType(test_type.to_string()))
    }
}

fn resolve_bands(
    test_type: &str,
    file: BandLimitsFile,
    bands: &[Band],
) -> Result<Vec<Option<f64>>> {
    let mut out = vec![None; BAND_COUNT];
    let reported = BAND_COUNT - FIRST_REPORTED_BAND;

    match file {
        BandLimitsFile::Ordered(values) if values.len() == BAND_COUNT => {
            for (slot, v) in out.iter_mut().zip(values) {
                *slot = Some(v);
            }
        }
        BandLimitsFile::Ordered(values) if values.len() == reported => {
            for (slot, v) in out[FIRST_REPORTED_BAND..].iter_mut().zip(values) {
                *slot = Some(v);
            }
        }
        BandLimitsFile::Ordered(values) => {
            return Err(Error::Limits(format!(
                "'{}': expected {} or {} band limits, got {}",
                test_type,
                BAND_COUNT,
                reported,
                values.len()
            )));
        }
        BandLimitsFile::Keyed(map) => {
            for (label, v) in map {
                let idx = bands
                    .iter()
                    .position(|b| b.label() == label || b.nominal_name() == Some(label.as_str()))
                    .ok_or_else(|| {
                        Error::Limits(format!("'{}': unknown band '{}' Hz", test_type, label))
                    })?;
                out[idx] = Some(v);
            }
        }
    }

    Ok(out)
}

/// Display name of a test type for titles
pub(crate) fn test_display_name(test_type: &str) -> &str {
    match test_type {
        "30" => "30km/hr",
        "20" => "20km/hr",
        "10" => "10km/hr",
        "stat" => "Stationary",
        "rev" => "Reverse",
        other => other,
    }
}
