use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::{debug, info};

use super::{FigureRenderer, configure_axes, draw_legend, hex_color, padded_range, with_canvas};
use crate::data;
use crate::error::PlotError;
use crate::figures::BIFURCATION_FILE;

const LOW_COLOR: u32 = 0x7570b3;
const HIGH_COLOR: u32 = 0xe7298a;
/// Frequencies live in [0, 1]; keep a small margin around it.
const Y_RANGE: Range<f64> = -0.05..1.05;
/// Dash and gap lengths of the threshold line, in points.
const DASH_PT: f64 = 3.7;
const GAP_PT: f64 = 1.6;

/// Long-run modifier frequency across a sweep of the reinforcement strength.
#[derive(Debug, Clone, Copy)]
pub struct BifurcationScan<'a> {
    pub p_values: &'a [f64],
    /// Asymptotic y from the low initial condition.
    pub asym_low: &'a [f64],
    /// Asymptotic y from the high initial condition.
    pub asym_high: &'a [f64],
    pub p_c: f64,
}

impl BifurcationScan<'_> {
    pub fn validate(&self) -> Result<(), PlotError> {
        let m = self.p_values.len();
        if self.asym_low.len() != m {
            return Err(PlotError::shape("low-initial series length", m, self.asym_low.len()));
        }
        if self.asym_high.len() != m {
            return Err(PlotError::shape(
                "high-initial series length",
                m,
                self.asym_high.len(),
            ));
        }
        Ok(())
    }
}

/// Splits `[start, end]` into alternating dash intervals of `dash` separated by `gap`.
fn dash_segments(start: f64, end: f64, dash: f64, gap: f64) -> Vec<(f64, f64)> {
    let mut out = Vec::new();
    if dash.is_nan() || dash <= 0.0 || start.is_nan() || end.is_nan() || end <= start {
        return out;
    }
    let mut a = start;
    while a < end {
        let b = (a + dash).min(end);
        out.push((a, b));
        a = b + gap.max(0.0);
    }
    out
}

impl FigureRenderer {
    /// Draws both asymptotic series against p with the threshold marked, and writes the image.
    ///
    /// Writes to `path`, or to `bifurcation.png` in the figures directory.
    pub fn render_bifurcation(
        &self,
        scan: &BifurcationScan<'_>,
        path: Option<&Path>,
    ) -> Result<PathBuf, PlotError> {
        scan.validate()?;
        let out_path = self.figure_dir().resolve(path, BIFURCATION_FILE);
        let style = *self.style();
        let size = style.canvas_size()?;
        debug!(
            path = %out_path.display(),
            points = scan.p_values.len(),
            p_c = scan.p_c,
            "rendering bifurcation scan"
        );

        let x_range = padded_range(scan.p_values.iter().copied(), &[scan.p_c])?;

        with_canvas(&out_path, size, style.dpi, |root| {
            let mut chart = ChartBuilder::on(root)
                .caption("Bifurcation scan", style.font(12.0))
                .margin(style.px(8.0))
                .x_label_area_size(style.px(32.0))
                .y_label_area_size(style.px(44.0))
                .build_cartesian_2d(x_range, Y_RANGE)?;

            configure_axes(
                &mut chart,
                &style,
                "Reinforcement strength p",
                "Asymptotic modifier frequency",
            )?;

            let line_w = style.px(1.5);
            let marker = style.px(3.0);
            let handle_len = style.px(20.0) as i32;

            let low = hex_color(LOW_COLOR);
            let low_points = || scan.p_values.iter().copied().zip(scan.asym_low.iter().copied());
            chart.draw_series(LineSeries::new(low_points(), low.stroke_width(line_w)))?;
            chart
                .draw_series(
                    low_points().map(|c| EmptyElement::at(c) + Circle::new((0, 0), marker, low.filled())),
                )?
                .label("low initial y")
                .legend(move |(x, y)| {
                    EmptyElement::at((x, y))
                        + PathElement::new(vec![(0, 0), (handle_len, 0)], low.stroke_width(line_w))
                        + Circle::new((handle_len / 2, 0), marker, low.filled())
                });

            let high = hex_color(HIGH_COLOR);
            let half = marker as i32;
            let high_points = || scan.p_values.iter().copied().zip(scan.asym_high.iter().copied());
            chart.draw_series(LineSeries::new(high_points(), high.stroke_width(line_w)))?;
            chart
                .draw_series(high_points().map(|c| {
                    EmptyElement::at(c) + Rectangle::new([(-half, -half), (half, half)], high.filled())
                }))?
                .label("high initial y")
                .legend(move |(x, y)| {
                    let mid = handle_len / 2;
                    EmptyElement::at((x, y))
                        + PathElement::new(vec![(0, 0), (handle_len, 0)], high.stroke_width(line_w))
                        + Rectangle::new([(mid - half, -half), (mid + half, half)], high.filled())
                });

            // Dash lengths are fixed in points, so convert through the plot height.
            let (_, area_h) = chart.plotting_area().dim_in_pixel();
            let units_per_px = (Y_RANGE.end - Y_RANGE.start) / f64::from(area_h.max(1));
            let dash_px = style.px(DASH_PT);
            let gap_px = style.px(GAP_PT);
            let threshold = BLACK.stroke_width(style.px(1.0));
            let segments = dash_segments(
                Y_RANGE.start,
                Y_RANGE.end,
                f64::from(dash_px) * units_per_px,
                f64::from(gap_px) * units_per_px,
            );
            let (dash_px, gap_px) = (dash_px as i32, gap_px as i32);
            chart
                .draw_series(
                    segments
                        .into_iter()
                        .map(|(y0, y1)| PathElement::new(vec![(scan.p_c, y0), (scan.p_c, y1)], threshold)),
                )?
                .label("p_c")
                .legend(move |(x, y)| {
                    let second = dash_px + gap_px;
                    EmptyElement::at((x, y))
                        + PathElement::new(vec![(0, 0), (dash_px, 0)], threshold)
                        + PathElement::new(vec![(second, 0), (second + dash_px, 0)], threshold)
                        + PathElement::new(
                            vec![(2 * second, 0), ((2 * second + dash_px).min(handle_len), 0)],
                            threshold,
                        )
                });

            draw_legend(&mut chart, &style)
        })?;

        if self.writes_csv() {
            let csv_path = out_path.with_extension("csv");
            data::write_bifurcation_csv(&csv_path, scan)?;
            debug!(path = %csv_path.display(), "wrote bifurcation data");
        }

        info!(path = %out_path.display(), "saved bifurcation figure");
        Ok(out_path)
    }
}
