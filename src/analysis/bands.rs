//! 1/3-octave band definitions on a linear FFT grid

use std::ops::Range;

/// Number of bands in the table (ANSI bands 10-37)
pub(crate) const BAND_COUNT: usize = 28;

/// ANSI band number of the first band
pub(crate) const FIRST_BAND_NUMBER: u32 = 10;

/// First FFT bin of the lowest band
const FIRST_BIN: usize = 13;

/// Width in bins of the lowest band
const FIRST_WIDTH: usize = 3;

/// Preferred nominal frequencies (IEC 61260) of ANSI bands 10-37
const NOMINAL_NAMES: [&str; BAND_COUNT] = [
    "10", "12.5", "16", "20", "25", "31.5", "40", "50", "63", "80", "100", "125", "160", "200",
    "250", "315", "400", "500", "630", "800", "1000", "1250", "1600", "2000", "2500", "3150",
    "4000", "5000",
];

/// 1/3-octave band with its FFT bin range
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Band {
    pub(crate) number: u32,
    pub(crate) bins: Range<usize>,
}

impl Band {
    /// Nominal centre frequency: 2^((n - 30) / 3) kHz
    pub(crate) fn nominal_hz(&self) -> f64 {
        2f64.powf((self.number as f64 - 30.0) / 3.0) * 1000.0
    }

    /// Centre frequency rounded for display (e.g. "1000", "13")
    pub(crate) fn label(&self) -> String {
        format!("{}", self.nominal_hz().round() as u64)
    }

    /// Preferred nominal frequency, e.g. "1250" for the band labelled "1260"
    pub(crate) fn nominal_name(&self) -> Option<&'static str> {
        let idx = self.number.checked_sub(FIRST_BAND_NUMBER)? as usize;
        NOMINAL_NAMES.get(idx).copied()
    }

    /// Sum of `magnitudes` over this band's bins. Bins past the end of the
    /// spectrum contribute nothing.
    pub(crate) fn sum(&self, magnitudes: &[f64]) -> f64 {
        let end = self.bins.end.min(magnitudes.len());
        let start = self.bins.start.min(end);
        magnitudes[start..end].iter().sum()
    }
}

/// Build the 28-band table.
///
/// Widths start at 3 bins and grow by `step` after every band; `step` doubles
/// after every third band, giving roughly geometric growth without
/// resampling the spectrum.
pub(crate) fn get_bands() -> Vec<Band> {
    let mut bands = Vec::with_capacity(BAND_COUNT);
    let mut step = 1;
    let mut width = FIRST_WIDTH;
    let mut start = FIRST_BIN;

    for idx in 0..BAND_COUNT {
        bands.push(Band {
            number: FIRST_BAND_NUMBER + idx as u32,
            bins: start..start + width,
        });
        start += width;
        width += step;
        if idx % 3 == 2 {
            step *= 2;
        }
    }

    bands
}

/// Fold a magnitude spectrum into per-band sums, in band order
pub(crate) fn band_energies(magnitudes: &[f64], bands: &[Band]) -> Vec<f64> {
    bands.iter().map(|band| band.sum(magnitudes)).collect()
}
