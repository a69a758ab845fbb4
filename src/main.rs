mod analysis;
mod audio;
mod chart;
mod cli;
mod config;
mod error;
mod limits;
mod metadata;
mod mode;
mod output;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use config::{Config, DEFAULT_CONFIG_FILE, Settings, load_config};
use output::print_error;

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}

/// Size the global rayon pool. Returns false, with a warning, when the pool
/// was already built and `jobs` is not applied.
fn init_thread_pool(jobs: usize) -> bool {
    match rayon::ThreadPoolBuilder::new().num_threads(jobs).build_global() {
        Ok(()) => {
            log::debug!("Using {} worker thread(s)", jobs);
            true
        }
        Err(e) => {
            log::warn!("Could not use {} worker thread(s): {}", jobs, e);
            false
        }
    }
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    // Explicit --config path, or ./bandspl.toml when present
    let config_path = cli.config.clone().or_else(|| {
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        local.exists().then_some(local)
    });

    let config = match config_path {
        Some(ref path) => {
            let cfg = load_config(path)?;
            log::info!("Loaded config from {}", path.display());
            cfg
        }
        None => Config::default(),
    };

    Settings::resolve(cli, config)
}

fn run(cli: &Cli) -> Result<bool> {
    let settings = load_settings(cli)?;
    log::debug!("Settings: {:?}", settings);

    if let Some(jobs) = cli.jobs {
        init_thread_pool(jobs);
    }

    let session = mode::Session::start(&settings)?;
    mode::run_batch(&cli.files, &session, &settings, cli.quiet)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    init_logging(&cli);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            print_error(&format!("{:#}", e));
            ExitCode::from(2)
        }
    }
}
