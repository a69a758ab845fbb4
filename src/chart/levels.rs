//! Band level chart (measured, limit and ambient bars with the two-band limit line)

use std::path::Path;

use charming::{
    Chart, ImageRenderer,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisType, Color, ColorStop, ItemStyle, LineStyle, SplitLine, Symbol, TextStyle,
    },
    renderer::ImageFormat,
    series::{Bar, Line},
};

use super::colors::{
    COLOR_AMBIENT, COLOR_BACKGROUND, COLOR_GRID, COLOR_LIMIT, COLOR_MEASURED, COLOR_TEXT,
    COLOR_TWO_BAND, ColorSet,
};
use super::{CHART_HEIGHT, CHART_WIDTH, ChartFormat, LevelChartData, format_freq};
use crate::error::{Error, Result};

fn gradient_bar(name: &str, data: Vec<f64>, colors: &ColorSet, axis: u32) -> Bar {
    Bar::new()
        .name(name)
        .data(data)
        .x_axis_index(axis)
        .y_axis_index(axis)
        .item_style(
            ItemStyle::new()
                .color(Color::LinearGradient {
                    x: 0.0,
                    y: 0.0,
                    x2: 0.0,
                    y2: 1.0,
                    color_stops: vec![
                        ColorStop::new(0.0, colors.top),
                        ColorStop::new(1.0, colors.bottom),
                    ],
                })
                .opacity(0.9),
        )
}

// Round values to 1 decimal place for display
fn round(v: &f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub(super) fn text_style(size: u32) -> TextStyle {
    TextStyle::new().color(COLOR_TEXT).font_size(size)
}

pub(super) fn title(text: &str, subtext: &str) -> Title {
    Title::new()
        .text(text)
        .subtext(subtext)
        .left("center")
        .top("3%")
        .text_style(text_style(36))
        .subtext_style(text_style(24))
}

pub(super) fn legend() -> Legend {
    let legend_data: Vec<(String, String)> = ["Measured", "Spec", "Ambient"]
        .iter()
        .map(|name| (name.to_string(), "rect".to_string()))
        .chain(std::iter::once(("2-Band Spec".to_string(), "line".to_string())))
        .collect();

    Legend::new()
        .data(legend_data)
        .bottom("3%")
        .item_gap(40)
        .text_style(text_style(24))
}

/// Band category axis placed on grid `grid`
pub(super) fn band_axis(data: &LevelChartData, grid: u32) -> Axis {
    let band_labels: Vec<String> = data
        .band_labels
        .iter()
        .map(|label| label.parse::<f64>().map(format_freq).unwrap_or_else(|_| label.clone()))
        .collect();

    Axis::new()
        .type_(AxisType::Category)
        .grid_index(grid)
        .name("1/3 Octave Bands - Freq (Hz)")
        .name_text_style(text_style(24))
        .data(band_labels)
        .axis_label(AxisLabel::new().color(COLOR_TEXT).font_size(24))
}

/// dB SPL value axis placed on grid `grid`
pub(super) fn level_axis(grid: u32) -> Axis {
    Axis::new()
        .type_(AxisType::Value)
        .grid_index(grid)
        .name("Amplitude (dB SPL)")
        .name_text_style(text_style(24))
        .axis_label(AxisLabel::new().color(COLOR_TEXT).font_size(24))
        .split_line(SplitLine::new().line_style(LineStyle::new().width(0.5).color(COLOR_GRID)))
}

/// Add the measured, limit and ambient bars and the two-band limit line,
/// drawn against axis pair `axis`
pub(super) fn add_level_series(chart: Chart, data: &LevelChartData, axis: u32) -> Chart {
    chart
        .series(gradient_bar(
            "Measured",
            data.measured.iter().map(round).collect(),
            &COLOR_MEASURED,
            axis,
        ))
        .series(gradient_bar(
            "Spec",
            data.limits.iter().map(round).collect(),
            &COLOR_LIMIT,
            axis,
        ))
        .series(gradient_bar(
            "Ambient",
            data.ambient.iter().map(round).collect(),
            &COLOR_AMBIENT,
            axis,
        ))
        .series(
            Line::new()
                .name("2-Band Spec")
                .data(vec![round(&data.two_band_limit); data.measured.len()])
                .x_axis_index(axis)
                .y_axis_index(axis)
                .symbol(Symbol::Circle)
                .symbol_size(4)
                .line_style(LineStyle::new().width(3).color(COLOR_TWO_BAND))
                .item_style(ItemStyle::new().color(COLOR_TWO_BAND)),
        )
}

pub(super) fn save(chart: &Chart, format: ChartFormat, output_path: &Path) -> Result<()> {
    let mut renderer = ImageRenderer::new(CHART_WIDTH, CHART_HEIGHT);
    match format {
        ChartFormat::Png => renderer.save_format(ImageFormat::Png, chart, output_path),
        ChartFormat::Svg => renderer.save(chart, output_path),
    }
    .map_err(|e| Error::Chart(format!("{}: {}", output_path.display(), e)))
}

/// Render a band level chart to `output_path`
pub(crate) fn render_level_chart(
    data: &LevelChartData,
    format: ChartFormat,
    output_path: &Path,
) -> Result<()> {
    if data.measured.is_empty() {
        return Err(Error::Chart("no bands to render".to_string()));
    }

    let chart = Chart::new()
        .background_color(Color::Value(COLOR_BACKGROUND.to_string()))
        .title(title(&data.title, &data.subtitle))
        .legend(legend())
        .grid(
            Grid::new()
                .left("3%")
                .right("3%")
                .bottom("7%")
                .top("15%")
                .contain_label(true),
        )
        .x_axis(band_axis(data, 0))
        .y_axis(level_axis(0));

    save(&add_level_series(chart, data, 0), format, output_path)
}
