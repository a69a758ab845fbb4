use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::analysis::ResponseMode;
use crate::chart::ChartFormat;
use crate::cli::Cli;

/// Config file looked up in the working directory when `--config` is absent
pub(crate) const DEFAULT_CONFIG_FILE: &str = "bandspl.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) calibration: CalibrationConfig,
    #[serde(default)]
    pub(crate) analysis: AnalysisConfig,
    #[serde(default)]
    pub(crate) output: OutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CalibrationConfig {
    pub(crate) file: Option<PathBuf>,
    #[serde(default = "default_sample_rate")]
    pub(crate) sample_rate: u32,
    #[serde(default = "default_response")]
    pub(crate) response: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct AnalysisConfig {
    pub(crate) ambient: Option<PathBuf>,
    #[serde(default = "default_limits")]
    pub(crate) limits: PathBuf,
    pub(crate) channel: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub(crate) dir: PathBuf,
    #[serde(default = "default_format")]
    pub(crate) format: String,
    pub(crate) report: Option<PathBuf>,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            file: None,
            sample_rate: default_sample_rate(),
            response: default_response(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ambient: None,
            limits: default_limits(),
            channel: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            format: default_format(),
            report: None,
        }
    }
}

fn default_sample_rate() -> u32 { 48000 }
fn default_response() -> String { "fast".into() }
fn default_limits() -> PathBuf { "sound_level_reqs.json".into() }
fn default_output_dir() -> PathBuf { "plots".into() }
fn default_format() -> String { "png".into() }

pub(crate) fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
}

/// Effective run settings: CLI flags over config file over defaults
#[derive(Debug)]
pub(crate) struct Settings {
    pub(crate) cal_file: PathBuf,
    pub(crate) cal_rate: u32,
    pub(crate) response: ResponseMode,
    pub(crate) ambient: PathBuf,
    pub(crate) limits: PathBuf,
    pub(crate) channel: Option<usize>,
    pub(crate) output_dir: PathBuf,
    pub(crate) format: ChartFormat,
    pub(crate) report: Option<PathBuf>,
    pub(crate) charts: bool,
}

impl Settings {
    pub(crate) fn resolve(cli: &Cli, config: Config) -> Result<Self> {
        let Some(cal_file) = cli.cal_file.clone().or(config.calibration.file) else {
            bail!("No calibration recording given (--cal-file or [calibration] file)");
        };
        let Some(ambient) = cli.ambient.clone().or(config.analysis.ambient) else {
            bail!("No ambient recording given (--ambient or [analysis] ambient)");
        };

        let response = cli
            .response
            .clone()
            .unwrap_or(config.calibration.response)
            .parse::<ResponseMode>()?;
        let format = cli
            .format
            .clone()
            .unwrap_or(config.output.format)
            .parse::<ChartFormat>()?;

        Ok(Self {
            cal_file,
            cal_rate: cli.cal_rate.unwrap_or(config.calibration.sample_rate),
            response,
            ambient,
            limits: cli.limits.clone().unwrap_or(config.analysis.limits),
            channel: cli.channel.or(config.analysis.channel),
            output_dir: cli.output_dir.clone().unwrap_or(config.output.dir),
            format,
            report: cli.report.clone().or(config.output.report),
            charts: !cli.no_chart,
        })
    }
}
