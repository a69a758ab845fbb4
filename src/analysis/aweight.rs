//! A-weighting filter implementation (IEC 61672 analog curve, bilinear transform)

use std::f64::consts::PI;

use crate::error::{Error, Result};

/// Pole frequencies of the analog A-weighting curve (Hz)
const F1: f64 = 20.598997;
const F2: f64 = 107.65265;
const F3: f64 = 737.86223;
const F4: f64 = 12194.217;

/// Gain (dB) that normalises the curve to 0 dB at 1 kHz
const A1000: f64 = 1.9997;

/// Digital A-weighting filter as a rational transfer function b(z) / a(z)
#[derive(Debug, Clone)]
pub(crate) struct WeightingFilter {
    b: Vec<f64>,
    a: Vec<f64>,
    sample_rate: u32,
}

impl WeightingFilter {
    /// Design the filter for `sample_rate`. The curve's highest pole must lie
    /// below Nyquist.
    pub(crate) fn new(sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 || sample_rate as f64 / 2.0 <= F4 {
            return Err(Error::UnsupportedWeightingRate(sample_rate));
        }

        let w1 = 2.0 * PI * F1;
        let w2 = 2.0 * PI * F2;
        let w3 = 2.0 * PI * F3;
        let w4 = 2.0 * PI * F4;

        // Analog prototype, highest power of s first
        let num = [w4 * w4 * 10f64.powf(A1000 / 20.0), 0.0, 0.0, 0.0, 0.0];
        let den = polymul(
            &polymul(
                &polymul(&[1.0, 2.0 * w4, w4 * w4], &[1.0, 2.0 * w1, w1 * w1]),
                &[1.0, w3],
            ),
            &[1.0, w2],
        );

        let (b, a) = bilinear(&num, &den, sample_rate as f64);
        log::debug!("A-weighting filter for {} Hz: b={:?} a={:?}", sample_rate, b, a);

        Ok(Self { b, a, sample_rate })
    }

    pub(crate) fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Filter `frame` from zero initial state (transposed direct form II)
    pub(crate) fn apply(&self, frame: &[f32]) -> Vec<f64> {
        let order = self.a.len() - 1;
        let mut state = vec![0.0f64; order];

        frame
            .iter()
            .map(|&sample| {
                let x = sample as f64;
                let y = self.b[0] * x + state[0];
                for i in 0..order {
                    let next = if i + 1 < order { state[i + 1] } else { 0.0 };
                    state[i] = self.b[i + 1] * x - self.a[i + 1] * y + next;
                }
                y
            })
            .collect()
    }

    /// Magnitude response in dB at `freq` Hz
    #[cfg(test)]
    pub(crate) fn response_db(&self, freq: f64) -> f64 {
        let omega = 2.0 * PI * freq / self.sample_rate as f64;
        let eval = |coeffs: &[f64]| {
            coeffs
                .iter()
                .enumerate()
                .fold((0.0, 0.0), |(re, im), (k, c)| {
                    let phase = -(k as f64) * omega;
                    (re + c * phase.cos(), im + c * phase.sin())
                })
        };
        let (nr, ni) = eval(&self.b);
        let (dr, di) = eval(&self.a);
        10.0 * ((nr * nr + ni * ni) / (dr * dr + di * di)).log10()
    }
}

/// Multiply two polynomials given highest power first
fn polymul(p: &[f64], q: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; p.len() + q.len() - 1];
    for (i, a) in p.iter().enumerate() {
        for (j, b) in q.iter().enumerate() {
            out[i + j] += a * b;
        }
    }
    out
}

fn binomial(n: usize, k: usize) -> f64 {
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// Substitute s = 2fs (z - 1) / (z + 1) into the analog polynomial `poly`
/// of degree `<= order`, returning coefficients in powers of z^-1.
fn bilinear_poly(poly: &[f64], order: usize, fs: f64) -> Vec<f64> {
    let degree = poly.len() - 1;
    let mut out = vec![0.0; order + 1];

    for i in 0..=degree {
        let coeff = poly[degree - i] * (2.0 * fs).powi(i as i32);
        // (1 - z^-1)^i (1 + z^-1)^(order - i)
        for k in 0..=i {
            let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
            for l in 0..=(order - i) {
                out[k + l] += coeff * sign * binomial(i, k) * binomial(order - i, l);
            }
        }
    }

    out
}

/// Bilinear transform of an analog filter, normalised so that a[0] == 1
fn bilinear(b: &[f64], a: &[f64], fs: f64) -> (Vec<f64>, Vec<f64>) {
    let order = (b.len() - 1).max(a.len() - 1);
    let bz = bilinear_poly(b, order, fs);
    let az = bilinear_poly(a, order, fs);
    let norm = az[0];
    (
        bz.iter().map(|c| c / norm).collect(),
        az.iter().map(|c| c / norm).collect(),
    )
}
