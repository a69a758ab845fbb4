//! Color definitions for charts

/// Common colors
pub(super) const COLOR_BACKGROUND: &str = "#0A0A0C"; // Near black
pub(super) const COLOR_TEXT: &str = "#FFFFFF"; // White
pub(super) const COLOR_GRID: &str = "#505050"; // Grid lines

/// Bar gradient for one series
pub(super) struct ColorSet {
    pub(super) top: &'static str,
    pub(super) bottom: &'static str,
}

/// Measured levels - blue family
pub(super) const COLOR_MEASURED: ColorSet = ColorSet {
    top: "#68B4FF",
    bottom: "#1888F8",
};

/// Limits - green family
pub(super) const COLOR_LIMIT: ColorSet = ColorSet {
    top: "#48F89C",
    bottom: "#10D878",
};

/// Ambient levels - gold
pub(super) const COLOR_AMBIENT: ColorSet = ColorSet {
    top: "#F8D848",
    bottom: "#D9B310",
};

/// Two-band limit line
pub(super) const COLOR_TWO_BAND: &str = "#FF68A8";

/// Frame waveform
pub(super) const COLOR_WAVEFORM: &str = "#4C8FD6";
