use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bandspl",
    version,
    about = "Calibrated 1/3-octave band SPL analyzer for acoustic compliance testing",
    after_help = "Examples:
  bandspl --cal-file cal_94_0412.wav --ambient amb_0412_1.wav stat_0412_1.wav
  bandspl --config bandspl.toml recordings/*.wav
  bandspl --response slow --report report.json --no-chart stat_0412_*.wav

Test recordings must be named {type}_{date}_{index}.wav; the calibration
recording's second '_' token is its level in dB SPL (e.g. cal_94_0412.wav)."
)]
pub struct Cli {
    /// Test recordings to analyze
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Config file (default: ./bandspl.toml if present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Calibration recording of known level
    #[arg(long, value_name = "PATH")]
    pub cal_file: Option<PathBuf>,

    /// Sample rate every recording must have (Hz)
    #[arg(long, value_name = "HZ")]
    pub cal_rate: Option<u32>,

    /// Sound level meter response time used for calibration (fast, slow)
    #[arg(long, value_name = "MODE")]
    pub response: Option<String>,

    /// Ambient (background) recording
    #[arg(long, value_name = "PATH")]
    pub ambient: Option<PathBuf>,

    /// Sound level limits file (JSON)
    #[arg(long, value_name = "PATH")]
    pub limits: Option<PathBuf>,

    /// Analyze only this channel of multi-channel recordings
    #[arg(long, value_name = "INDEX")]
    pub channel: Option<usize>,

    /// Directory for charts
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Chart image format (png, svg)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Write a JSON report of all results
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Don't render charts
    #[arg(long)]
    pub no_chart: bool,

    /// Number of parallel workers (default: number of CPUs)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Only show the summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Show debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
