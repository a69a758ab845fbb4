//! Joint chart: analyzed frame waveform above the band level bars

use std::path::Path;

use charming::{
    Chart,
    component::{Axis, Grid},
    element::{AxisLabel, AxisType, Color, LineStyle, SplitLine},
    series::Line,
};

use super::colors::{COLOR_BACKGROUND, COLOR_GRID, COLOR_TEXT, COLOR_WAVEFORM};
use super::levels::{add_level_series, band_axis, legend, level_axis, save, text_style, title};
use super::{ChartFormat, LevelChartData, WaveformData};
use crate::error::{Error, Result};

/// Points kept from the frame for plotting
const MAX_WAVEFORM_POINTS: usize = 4096;

/// Reduce `samples` to at most `max_points` points, keeping the minimum and
/// maximum of each chunk in time order. Returns (sample index, value).
pub(super) fn decimate(samples: &[f32], max_points: usize) -> Vec<(usize, f32)> {
    if samples.len() <= max_points || max_points < 2 {
        return samples.iter().copied().enumerate().collect();
    }

    let chunk = samples.len().div_ceil(max_points / 2);
    let mut points = Vec::with_capacity(max_points);

    for (c, values) in samples.chunks(chunk).enumerate() {
        let base = c * chunk;
        let mut lo = (0, values[0]);
        let mut hi = (0, values[0]);
        for (i, &v) in values.iter().enumerate() {
            if v < lo.1 {
                lo = (i, v);
            }
            if v > hi.1 {
                hi = (i, v);
            }
        }
        let (first, second) = if lo.0 <= hi.0 { (lo, hi) } else { (hi, lo) };
        points.push((base + first.0, first.1));
        if second.0 != first.0 {
            points.push((base + second.0, second.1));
        }
    }

    points
}

/// Render the waveform of the analyzed frame above its band levels
pub(crate) fn render_joint_chart(
    data: &LevelChartData,
    waveform: &WaveformData,
    format: ChartFormat,
    output_path: &Path,
) -> Result<()> {
    if data.measured.is_empty() || waveform.samples.is_empty() {
        return Err(Error::Chart("nothing to render".to_string()));
    }

    let rate = waveform.sample_rate as f64;
    let points: Vec<Vec<f64>> = decimate(waveform.samples, MAX_WAVEFORM_POINTS)
        .into_iter()
        .map(|(i, v)| vec![waveform.start_secs + i as f64 / rate, v as f64])
        .collect();
    let end_secs = waveform.start_secs + waveform.samples.len() as f64 / rate;
    let peak = waveform
        .samples
        .iter()
        .fold(0.0f32, |acc, v| acc.max(v.abs()))
        .max(f32::EPSILON) as f64;

    let chart = Chart::new()
        .background_color(Color::Value(COLOR_BACKGROUND.to_string()))
        .title(title(&data.title, &data.subtitle))
        .legend(legend())
        .grid(
            Grid::new()
                .left("3%")
                .right("3%")
                .top("13%")
                .height("30%")
                .contain_label(true),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("3%")
                .top("52%")
                .bottom("9%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Value)
                .grid_index(0)
                .name("Time (s)")
                .name_text_style(text_style(24))
                .min(waveform.start_secs)
                .max(end_secs)
                .axis_label(AxisLabel::new().color(COLOR_TEXT).font_size(24)),
        )
        .x_axis(band_axis(data, 1))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .grid_index(0)
                .name("Amplitude")
                .name_text_style(text_style(24))
                .min(-peak)
                .max(peak)
                .axis_label(AxisLabel::new().color(COLOR_TEXT).font_size(24))
                .split_line(
                    SplitLine::new().line_style(LineStyle::new().width(0.5).color(COLOR_GRID)),
                ),
        )
        .y_axis(level_axis(1))
        .series(
            Line::new()
                .name("Waveform")
                .data(points)
                .x_axis_index(0)
                .y_axis_index(0)
                .show_symbol(false)
                .line_style(LineStyle::new().width(1).color(COLOR_WAVEFORM)),
        );

    save(&add_level_series(chart, data, 1), format, output_path)
}
