//! Chart rendering for calibrated band levels

mod colors;
mod joint;
mod levels;

pub(crate) use joint::render_joint_chart;
pub(crate) use levels::render_level_chart;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Error;

/// Data for one test recording's band level chart
pub(crate) struct LevelChartData {
    pub(crate) title: String,
    pub(crate) subtitle: String,
    pub(crate) band_labels: Vec<String>,
    pub(crate) measured: Vec<f64>,
    /// NaN where a band has no limit
    pub(crate) limits: Vec<f64>,
    pub(crate) ambient: Vec<f64>,
    pub(crate) two_band_limit: f64,
}

/// Analyzed frame of a recording, for the joint chart
pub(crate) struct WaveformData<'a> {
    pub(crate) samples: &'a [f32],
    /// Position of the first sample in the recording
    pub(crate) start_secs: f64,
    pub(crate) sample_rate: u32,
}

/// Chart dimensions (2x for Retina quality)
pub(super) const CHART_WIDTH: u32 = 2800;
pub(super) const CHART_HEIGHT: u32 = 1200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChartFormat {
    Png,
    Svg,
}

impl ChartFormat {
    pub(crate) fn extension(self) -> &'static str {
        match self {
            ChartFormat::Png => "png",
            ChartFormat::Svg => "svg",
        }
    }
}

impl FromStr for ChartFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ChartFormat::Png),
            "svg" => Ok(ChartFormat::Svg),
            other => Err(Error::Chart(format!(
                "unsupported image format '{}' (png, svg)",
                other
            ))),
        }
    }
}

impl fmt::Display for ChartFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Band level chart path for a recording: `<dir>/<stem>_f.<ext>`
pub(crate) fn chart_path(dir: &Path, file_stem: &str, format: ChartFormat) -> PathBuf {
    dir.join(format!("{}_f.{}", file_stem, format.extension()))
}

/// Joint waveform and band chart path: `<dir>/<stem>_j.<ext>`
pub(crate) fn joint_chart_path(dir: &Path, file_stem: &str, format: ChartFormat) -> PathBuf {
    dir.join(format!("{}_j.{}", file_stem, format.extension()))
}

/// Format frequency for display (e.g., 1000 -> "1k", 1260 -> "1.3k", 500 -> "500")
pub(super) fn format_freq(hz: f64) -> String {
    if hz >= 1000.0 {
        let k = hz / 1000.0;
        if k == k.floor() {
            format!("{}k", k as u32)
        } else {
            format!("{:.1}k", k)
        }
    } else {
        format!("{}", hz.round() as u32)
    }
}
