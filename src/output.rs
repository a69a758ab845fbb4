use colored::*;

use crate::analysis::{CalibrationProfile, Evaluation};

fn style_label(label: &str) -> ColoredString {
    label.bold()
}

pub(crate) fn print_error(msg: &str) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

pub(crate) fn print_separator(columns: usize, prefix_width: usize) {
    println!("{}{}", "-".repeat(prefix_width), "-".repeat(columns * 7));
}

pub(crate) fn print_header(labels: &[String], prefix: &str) {
    print!("{}", prefix);
    for label in labels {
        print!(" {:>6}", label);
    }
    println!();
}

pub(crate) fn print_row(label: &str, values: &[Option<f64>]) {
    print!("{}", style_label(label));
    for v in values {
        match v {
            Some(v) if v.is_finite() => print!(" {:>6.1}", v),
            _ => print!("      -"),
        }
    }
    println!();
}

pub(crate) fn print_verdict_row(label: &str, verdicts: &[Option<bool>]) {
    print!("{}", style_label(label));
    for v in verdicts {
        match v {
            Some(true) => print!(" {:>6}", "ok".green()),
            Some(false) => print!(" {:>6}", "FAIL".red().bold()),
            None => print!("      -"),
        }
    }
    println!();
}

pub(crate) fn verdict(passed: bool) -> ColoredString {
    if passed {
        "PASS".green().bold()
    } else {
        "FAIL".red().bold()
    }
}

pub(crate) fn print_calibration(profile: &CalibrationProfile, file: &str, mode: &str) {
    println!("Calibration: {} ({} response)", file, mode);
    println!(
        "  target {:.1} dB SPL, measured {:.2} dB, offset {:+.2} dB",
        profile.target_level_db, profile.measured_level_db, profile.offset_db
    );
    println!();
}

/// Band table of one evaluation, starting at band `first`
pub(crate) fn print_evaluation(title: &str, frame_offset_secs: f64, eval: &Evaluation, first: usize) {
    let levels = &eval.levels[first..];
    let labels: Vec<String> = levels.iter().map(|l| l.label.clone()).collect();

    println!(
        "{} {}  (frame at {:.2} s)",
        verdict(eval.passed),
        title.bold(),
        frame_offset_secs
    );
    print_header(&labels, "Hz     ");
    print_separator(labels.len(), 7);
    print_row(
        "Meas   ",
        &levels.iter().map(|l| Some(l.level_db)).collect::<Vec<_>>(),
    );
    print_row("Spec   ", &levels.iter().map(|l| l.limit_db).collect::<Vec<_>>());
    print_row(
        "Amb    ",
        &levels.iter().map(|l| Some(l.ambient_db)).collect::<Vec<_>>(),
    );
    print_verdict_row("Pass   ", &levels.iter().map(|l| l.passed).collect::<Vec<_>>());
    print_separator(labels.len(), 7);
    println!(
        "2-band ({}+{}): {:.1} dB SPL vs {:.1} dB limit  {}",
        eval.two_band.bands[0],
        eval.two_band.bands[1],
        eval.two_band.level_db,
        eval.two_band.limit_db,
        verdict(eval.two_band.passed)
    );
    println!();
}

pub(crate) fn print_summary(passed: usize, failed: usize, errors: &[(String, String)]) {
    println!(
        "Summary: {} passed, {} failed, {} not analyzed",
        passed.to_string().green(),
        failed.to_string().red(),
        errors.len()
    );
    for (file, err) in errors {
        println!("  {} {}: {}", "!".yellow().bold(), file, err);
    }
}

pub(crate) fn get_display_name(filename: &str) -> &str {
    std::path::Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename)
}
