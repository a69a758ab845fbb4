//! Parallel analysis of test recordings

use std::path::PathBuf;

use anyhow::{Context, Result};
use rayon::prelude::*;

use super::Session;
use crate::analysis::FIRST_REPORTED_BAND;
use crate::chart::{self, LevelChartData, WaveformData};
use crate::config::Settings;
use crate::error;
use crate::limits::test_display_name;
use crate::output::{get_display_name, print_calibration, print_error, print_evaluation, print_summary};
use crate::report::{BatchReport, CalibrationSummary, FailedFile, FileReport, write_report};

fn chart_data(report: &FileReport) -> LevelChartData {
    let levels = &report.evaluation.levels[FIRST_REPORTED_BAND..];
    let details = &report.details;

    LevelChartData {
        title: format!(
            "{} # {} | {}",
            test_display_name(&details.test_type),
            details.index,
            details.date
        ),
        subtitle: get_display_name(&report.file).to_string(),
        band_labels: levels.iter().map(|l| l.label.clone()).collect(),
        measured: levels.iter().map(|l| l.level_db).collect(),
        limits: levels.iter().map(|l| l.limit_db.unwrap_or(f64::NAN)).collect(),
        ambient: levels.iter().map(|l| l.ambient_db).collect(),
        two_band_limit: report.evaluation.two_band.limit_db,
    }
}

/// Band level chart and joint waveform chart. Failures are reported and
/// do not affect the verdict.
fn render_charts(report: &FileReport, session: &Session, settings: &Settings) {
    let data = chart_data(report);
    let stem = &report.details.file_stem;
    let waveform = WaveformData {
        samples: &report.frame,
        start_secs: report.selected_frame_offset as f64 / session.sample_rate() as f64,
        sample_rate: session.sample_rate(),
    };

    let level_path = chart::chart_path(&settings.output_dir, stem, settings.format);
    let joint_path = chart::joint_chart_path(&settings.output_dir, stem, settings.format);
    let results = [
        (
            &level_path,
            chart::render_level_chart(&data, settings.format, &level_path),
        ),
        (
            &joint_path,
            chart::render_joint_chart(&data, &waveform, settings.format, &joint_path),
        ),
    ];

    for (path, result) in results {
        match result {
            Ok(()) => log::info!("Chart saved to: {}", path.display()),
            Err(e) => print_error(&e.to_string()),
        }
    }
}

/// Analyze `files` in parallel, then print, chart and report the results in
/// input order. A file that cannot be analyzed is reported and skipped.
/// Returns true when every file was analyzed and passed.
pub(crate) fn run_batch(files: &[PathBuf], session: &Session, settings: &Settings, quiet: bool) -> Result<bool> {
    if !quiet {
        print_calibration(
            &session.reference.calibration,
            get_display_name(&settings.cal_file.display().to_string()),
            &settings.response.to_string(),
        );
    }

    let outcomes: Vec<(&PathBuf, error::Result<FileReport>)> = files
        .par_iter()
        .map(|path| (path, session.analyze_file(path)))
        .collect();

    if settings.charts {
        std::fs::create_dir_all(&settings.output_dir).with_context(|| {
            format!("Failed to create output directory {}", settings.output_dir.display())
        })?;
    }

    let mut reports: Vec<FileReport> = Vec::new();
    let mut failures: Vec<FailedFile> = Vec::new();

    for (path, outcome) in outcomes {
        let report = match outcome {
            Ok(report) => report,
            Err(e) => {
                if e.is_validation() {
                    log::warn!("{}: rejected: {}", path.display(), e);
                } else {
                    log::error!("{}: {}", path.display(), e);
                }
                print_error(&format!("{}: {}", path.display(), e));
                failures.push(FailedFile {
                    file: path.display().to_string(),
                    error: e.to_string(),
                });
                continue;
            }
        };

        if !quiet {
            let title = format!(
                "{} ({} # {} | {})",
                report.details.file_stem,
                test_display_name(&report.details.test_type),
                report.details.index,
                report.details.date
            );
            let offset_secs = report.selected_frame_offset as f64 / session.sample_rate() as f64;
            print_evaluation(&title, offset_secs, &report.evaluation, FIRST_REPORTED_BAND);
        }

        if settings.charts {
            render_charts(&report, session, settings);
        }

        reports.push(report);
    }

    let passed = reports.iter().filter(|r| r.evaluation.passed).count();
    let failed = reports.len() - passed;
    let errors: Vec<(String, String)> = failures
        .iter()
        .map(|f| (f.file.clone(), f.error.clone()))
        .collect();
    print_summary(passed, failed, &errors);

    if let Some(ref path) = settings.report {
        let report = BatchReport {
            calibration: CalibrationSummary {
                file: settings.cal_file.display().to_string(),
                response: settings.response,
                profile: session.reference.calibration,
            },
            ambient: settings.ambient.display().to_string(),
            results: reports.iter().collect(),
            failures,
        };
        write_report(path, &report)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
    }

    Ok(failed == 0 && errors.is_empty())
}
