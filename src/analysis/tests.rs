//! Unit tests for analysis module

use super::bands::{band_energies, get_bands};
use super::calibrate::{CalibrationProfile, Calibrator, ResponseMode};
use super::evaluate::{calibrated_levels, combine_db, evaluate};
use super::fft::{create_blackman_harris_window, magnitude_spectrum};
use super::frame::{extract_frame, find_loudest_frame};
use super::spectrum::{ANALYSIS_FRAME_LEN, AnalysisResult, analyze};
use super::{BAND_COUNT, WeightingFilter};
use crate::audio::Signal;
use crate::error::Error;
use crate::limits::SpecThresholds;

const SAMPLE_RATE: u32 = 48000;

/// Sine wave of `len` samples
fn sine(freq: f64, amplitude: f64, len: usize) -> Vec<f32> {
    let pi2 = 2.0 * std::f64::consts::PI;
    (0..len)
        .map(|i| (amplitude * (pi2 * freq * i as f64 / SAMPLE_RATE as f64).sin()) as f32)
        .collect()
}

fn filter() -> WeightingFilter {
    WeightingFilter::new(SAMPLE_RATE).unwrap()
}

// =============================================================================
// Band table
// =============================================================================

#[test]
fn test_first_band_ranges() {
    let bands = get_bands();
    let expected = [13..16, 16..20, 20..25, 25..31, 31..39, 39..49];
    for (band, range) in bands.iter().zip(expected) {
        assert_eq!(band.bins, range, "band {}", band.number);
    }
    let widths: Vec<usize> = bands[..6].iter().map(|b| b.bins.len()).collect();
    assert_eq!(widths, vec![3, 4, 5, 6, 8, 10]);
}

#[test]
fn test_bands_contiguous_and_widening() {
    let bands = get_bands();
    assert_eq!(bands.len(), BAND_COUNT);
    for pair in bands.windows(2) {
        assert_eq!(pair[0].bins.end, pair[1].bins.start);
        assert!(pair[0].bins.len() <= pair[1].bins.len());
        assert!(!pair[0].bins.is_empty());
    }
    assert_eq!(bands[BAND_COUNT - 1].bins.end, 7681);
}

#[test]
fn test_band_numbers_and_labels() {
    let bands = get_bands();
    assert_eq!(bands[0].number, 10);
    assert_eq!(bands[BAND_COUNT - 1].number, 37);
    assert_eq!(bands[20].label(), "1000");
    assert_eq!(bands[17].label(), "500");
    assert_eq!(bands[27].label(), "5040");
    assert!((bands[23].nominal_hz() - 2000.0).abs() < 1e-9);
}

#[test]
fn test_band_nominal_names() {
    let bands = get_bands();
    assert_eq!(bands[0].nominal_name(), Some("10"));
    assert_eq!(bands[16].nominal_name(), Some("400"));
    assert_eq!(bands[21].nominal_name(), Some("1250"));
    assert_eq!(bands[27].nominal_name(), Some("5000"));

    // No band's label is another band's nominal name
    for band in &bands {
        let label = band.label();
        assert!(
            bands
                .iter()
                .all(|other| other.number == band.number || other.nominal_name() != Some(label.as_str())),
            "label {} is ambiguous",
            label
        );
    }
}

#[test]
fn test_band_sums_truncate_at_spectrum_end() {
    let bands = get_bands();
    let energies = band_energies(&vec![1.0; 5000], &bands);
    assert_eq!(energies[0], 3.0);
    assert_eq!(energies[5], 10.0);
    // band 26 spans 4865..6145, band 27 starts past the end
    assert_eq!(energies[26], 135.0);
    assert_eq!(energies[27], 0.0);
}

// =============================================================================
// Window and spectrum
// =============================================================================

#[test]
fn test_blackman_harris_endpoints() {
    let window = create_blackman_harris_window(1024);
    assert!(window[0].abs() < 1e-4, "First sample should be ~6e-5");
    assert!(window[1023].abs() < 1e-4, "Last sample should be ~6e-5");
}

#[test]
fn test_blackman_harris_symmetry() {
    let window = create_blackman_harris_window(1025);
    assert!((window[512] - 1.0).abs() < 1e-9, "Center should be 1");
    for i in 0..512 {
        let diff = (window[i] - window[1024 - i]).abs();
        assert!(diff < 1e-12, "Window should be symmetric at {}", i);
    }
}

#[test]
fn test_magnitude_spectrum_half_length() {
    let frame: Vec<f64> = vec![0.5; 4096];
    assert_eq!(magnitude_spectrum(&frame).len(), 2048);
}

#[test]
fn test_magnitude_spectrum_peak_bin() {
    // 1500 Hz at 48 kHz with 4096 points lands exactly on bin 128
    let frame: Vec<f64> = sine(1500.0, 0.5, 4096).iter().map(|&s| s as f64).collect();
    let spectrum = magnitude_spectrum(&frame);
    let peak = spectrum
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap();
    assert_eq!(peak, 128);
}

// =============================================================================
// A-weighting
// =============================================================================

#[test]
fn test_a_weight_1khz_unity() {
    let db = filter().response_db(1000.0);
    assert!(db.abs() < 0.1, "1kHz should be ~0 dB, got {:.3} dB", db);
}

#[test]
fn test_a_weight_100hz_attenuation() {
    // Analog A-weighting is -19.1 dB at 100 Hz
    let db = filter().response_db(100.0);
    assert!((db + 19.1).abs() < 0.5, "100Hz should be ~-19.1 dB, got {:.2} dB", db);
}

#[test]
fn test_a_weight_low_freq_rolloff() {
    let f = filter();
    assert!(f.response_db(31.5) < f.response_db(100.0));
    assert!(f.response_db(100.0) < f.response_db(1000.0));
    assert!(f.response_db(2500.0) > 0.0, "A-weighting peaks above 1 kHz");
}

// =============================================================================
// Frame selection
// =============================================================================

#[test]
fn test_loudest_frame_finds_burst() {
    let frame_len = 1024;
    let mut samples = vec![0.0f32; 8192];
    let burst = 3000..5048;
    for s in &mut samples[burst.clone()] {
        *s = 0.8;
    }

    let offset = find_loudest_frame(&samples, frame_len);
    assert!(offset < burst.end && offset + frame_len > burst.start);
    // First hop-aligned window fully inside the burst
    assert_eq!(offset, 3072);
}

#[test]
fn test_loudest_frame_ties_keep_first() {
    let samples = vec![0.5f32; 8192];
    let first = find_loudest_frame(&samples, 1024);
    assert_eq!(first, 0);
    assert_eq!(find_loudest_frame(&samples, 1024), first);
}

#[test]
fn test_loudest_frame_short_signal() {
    assert_eq!(find_loudest_frame(&[0.1; 100], 1024), 0);
}

#[test]
fn test_extract_frame() {
    let samples: Vec<f32> = (0..100).map(|i| i as f32).collect();
    let frame = extract_frame(&samples, 25, 50);
    assert_eq!(frame.len(), 50);
    assert_eq!(frame[0], 25.0);
    assert_eq!(extract_frame(&samples, 80, 50).len(), 20);
}

// =============================================================================
// Calibration
// =============================================================================

#[test]
fn test_response_mode_parsing() {
    assert_eq!("fast".parse::<ResponseMode>().unwrap(), ResponseMode::Fast);
    assert_eq!("slow".parse::<ResponseMode>().unwrap(), ResponseMode::Slow);
    assert_eq!(ResponseMode::Fast.frame_len(), 8192);
    assert_eq!(ResponseMode::Slow.frame_len(), 65536);
    assert!(matches!(
        "medium".parse::<ResponseMode>(),
        Err(Error::InvalidResponseMode(m)) if m == "medium"
    ));
}

#[test]
fn test_profile_offset() {
    let profile = CalibrationProfile::new(94.0, 81.5);
    assert_eq!(profile.offset_db, 12.5);
}

#[test]
fn test_calibration_matching_target_has_zero_offset() {
    let filter = filter();
    let calibrator = Calibrator::new(ResponseMode::Fast, &filter);
    let signal = Signal::mono(sine(1000.0, 0.5, 48000), SAMPLE_RATE);

    let measured = calibrator.measure(&signal).unwrap();
    let profile = calibrator.calibrate(&signal, measured).unwrap();
    assert_eq!(profile.offset_db, 0.0);
}

#[test]
fn test_calibration_is_repeatable() {
    let filter = filter();
    let calibrator = Calibrator::new(ResponseMode::Fast, &filter);
    let signal = Signal::mono(sine(1000.0, 0.5, 48000), SAMPLE_RATE);

    let first = calibrator.calibrate(&signal, 94.0).unwrap();
    let second = calibrator.calibrate(&signal, 94.0).unwrap();
    assert_eq!(first, second);
    assert!(first.measured_level_db.is_finite());
    assert_eq!(first.offset_db, 94.0 - first.measured_level_db);
}

#[test]
fn test_calibration_louder_signal_measures_higher() {
    let filter = filter();
    let calibrator = Calibrator::new(ResponseMode::Fast, &filter);
    let quiet = Signal::mono(sine(1000.0, 0.1, 16384), SAMPLE_RATE);
    let loud = Signal::mono(sine(1000.0, 0.2, 16384), SAMPLE_RATE);

    let diff = calibrator.measure(&loud).unwrap() - calibrator.measure(&quiet).unwrap();
    // Power sum: doubling amplitude adds 20 log10(4) dB
    assert!((diff - 12.041).abs() < 0.01, "got {:.3} dB", diff);
}

#[test]
fn test_calibration_rejects_short_recording() {
    let filter = filter();
    let calibrator = Calibrator::new(ResponseMode::Slow, &filter);
    let signal = Signal::mono(sine(1000.0, 0.5, 48000), SAMPLE_RATE);
    assert!(matches!(
        calibrator.measure(&signal),
        Err(Error::InvalidAudioLength {
            required: 65536,
            actual: 48000
        })
    ));
}

#[test]
fn test_calibration_rejects_silent_recording() {
    let filter = filter();
    let calibrator = Calibrator::new(ResponseMode::Fast, &filter);
    let silence = Signal::mono(vec![0.0; 48000], SAMPLE_RATE);

    let result = calibrator.calibrate(&silence, 94.0);
    assert!(
        matches!(result, Err(Error::SilentCalibration(level)) if level == f64::NEG_INFINITY),
        "got {:?}",
        result
    );
}

// =============================================================================
// Analysis and evaluation
// =============================================================================

#[test]
fn test_analyze_rejects_invalid_input() {
    let filter = filter();
    let bands = get_bands();

    let stereo = Signal {
        samples: vec![0.0; ANALYSIS_FRAME_LEN * 2],
        sample_rate: SAMPLE_RATE,
        channels: 2,
    };
    let short = Signal::mono(vec![0.0; ANALYSIS_FRAME_LEN - 1], SAMPLE_RATE);
    let wrong_rate = Signal::mono(vec![0.0; ANALYSIS_FRAME_LEN], 44100);

    assert!(matches!(
        analyze(&stereo, &filter, &bands, ANALYSIS_FRAME_LEN),
        Err(Error::InvalidChannelCount { channels: 2 })
    ));
    assert!(matches!(
        analyze(&short, &filter, &bands, ANALYSIS_FRAME_LEN),
        Err(Error::InvalidAudioLength { .. })
    ));
    assert!(matches!(
        analyze(&wrong_rate, &filter, &bands, ANALYSIS_FRAME_LEN),
        Err(Error::InvalidSampleRate {
            expected: 48000,
            actual: 44100
        })
    ));
}

#[test]
fn test_1khz_sine_dominates_1khz_band() {
    let filter = filter();
    let bands = get_bands();
    let signal = Signal::mono(sine(1000.0, 0.5, ANALYSIS_FRAME_LEN), SAMPLE_RATE);

    let result = analyze(&signal, &filter, &bands, ANALYSIS_FRAME_LEN).unwrap();
    assert_eq!(result.band_energies.len(), BAND_COUNT);
    assert_eq!(result.selected_frame_offset, 0);

    let closest = bands
        .iter()
        .enumerate()
        .min_by(|a, b| {
            (a.1.nominal_hz() - 1000.0)
                .abs()
                .total_cmp(&(b.1.nominal_hz() - 1000.0).abs())
        })
        .map(|(i, _)| i)
        .unwrap();
    assert_eq!(closest, 20);

    let peak = result.band_energies[closest];
    for (i, &e) in result.band_energies.iter().enumerate() {
        assert!(e >= 0.0);
        if i != closest {
            assert!(peak > e, "band {} ({}) >= 1 kHz band ({})", i, e, peak);
        }
    }
}

fn flat_result(level: f64) -> AnalysisResult {
    // Energy that maps to `level` dB with a zero offset
    let energy = 10f64.powf(level / 20.0) * ANALYSIS_FRAME_LEN as f64 / 2.0;
    AnalysisResult {
        band_energies: vec![energy; BAND_COUNT],
        selected_frame_offset: 0,
        frame_len: ANALYSIS_FRAME_LEN,
    }
}

#[test]
fn test_calibrated_levels_apply_offset() {
    let profile = CalibrationProfile::new(94.0, 94.0 - 10.0);
    let levels = calibrated_levels(&flat_result(0.0), &profile);
    assert!(levels.iter().all(|l| (l - 10.0).abs() < 1e-9));
}

#[test]
fn test_combine_db() {
    assert!((combine_db(60.0, 60.0) - 63.0103).abs() < 1e-3);
    assert!((combine_db(70.0, f64::NEG_INFINITY) - 70.0).abs() < 1e-9);
}

#[test]
fn test_evaluate_pass_and_fail() {
    let bands = get_bands();
    let profile = CalibrationProfile::new(0.0, 0.0);
    let ambient = flat_result(30.0);

    let mut limits = SpecThresholds {
        bands: vec![None; BAND_COUNT],
        two_band: 70.0,
    };
    limits.bands[20] = Some(65.0);
    limits.bands[21] = Some(55.0);

    let eval = evaluate(&flat_result(60.0), &ambient, &profile, &limits, &bands);
    assert_eq!(eval.levels[20].passed, Some(true));
    assert_eq!(eval.levels[21].passed, Some(false));
    assert_eq!(eval.levels[0].passed, None);
    assert!((eval.levels[5].ambient_db - 30.0).abs() < 1e-9);
    assert_eq!(eval.two_band.bands, [30, 31]);
    assert!((eval.two_band.level_db - 63.0103).abs() < 1e-3);
    assert!(eval.two_band.passed);
    assert!(!eval.passed);

    limits.bands[21] = Some(60.5);
    let eval = evaluate(&flat_result(60.0), &ambient, &profile, &limits, &bands);
    assert!(eval.passed);

    limits.two_band = 62.0;
    let eval = evaluate(&flat_result(60.0), &ambient, &profile, &limits, &bands);
    assert!(!eval.two_band.passed);
    assert!(!eval.passed);
}

#[test]
fn test_two_band_without_limits_uses_loudest_pair() {
    let bands = get_bands();
    let profile = CalibrationProfile::new(0.0, 0.0);
    let mut result = flat_result(40.0);
    result.band_energies[8] *= 10.0;
    result.band_energies[9] *= 10.0;

    let limits = SpecThresholds {
        bands: vec![None; BAND_COUNT],
        two_band: 100.0,
    };
    let eval = evaluate(&result, &flat_result(0.0), &profile, &limits, &bands);
    assert_eq!(eval.two_band.bands, [18, 19]);
    assert!((eval.two_band.level_db - 63.0103).abs() < 1e-3);
    assert!(eval.passed);
}
