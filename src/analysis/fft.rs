//! Windowing and magnitude spectrum

use rustfft::FftPlanner;
use rustfft::num_complex::Complex;

/// Create a symmetric 4-term Blackman-Harris window of the given size
pub(crate) fn create_blackman_harris_window(size: usize) -> Vec<f64> {
    const A0: f64 = 0.35875;
    const A1: f64 = 0.48829;
    const A2: f64 = 0.14128;
    const A3: f64 = 0.01168;

    if size < 2 {
        return vec![1.0; size];
    }

    let pi2 = 2.0 * std::f64::consts::PI;
    let denom = (size - 1) as f64;
    (0..size)
        .map(|i| {
            let x = pi2 * i as f64 / denom;
            A0 - A1 * x.cos() + A2 * (2.0 * x).cos() - A3 * (3.0 * x).cos()
        })
        .collect()
}

/// Window `frame` and return the complex spectrum of its non-negative
/// frequencies (first `len / 2` bins).
pub(crate) fn half_spectrum(frame: &[f64]) -> Vec<Complex<f64>> {
    let size = frame.len();
    let window = create_blackman_harris_window(size);

    let mut buffer: Vec<Complex<f64>> = frame
        .iter()
        .zip(&window)
        .map(|(&x, &w)| Complex::new(x * w, 0.0))
        .collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(size);
    fft.process(&mut buffer);

    buffer.truncate(size / 2);
    buffer
}

/// Magnitudes of the windowed half spectrum
pub(crate) fn magnitude_spectrum(frame: &[f64]) -> Vec<f64> {
    half_spectrum(frame).iter().map(|c| c.norm()).collect()
}
