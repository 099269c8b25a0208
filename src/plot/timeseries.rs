use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::{debug, info};

use super::{
    FigureRenderer, configure_axes, draw_legend, format_label_value, hex_color, padded_range,
    with_canvas,
};
use crate::data;
use crate::error::PlotError;
use crate::figures::TIMESERIES_FILE;

/// One color per initial condition.
const TRAJECTORY_COLORS: [u32; 2] = [0x1b9e77, 0xd95f02];
/// The modifier frequency is absorbed at 0 and 1.
const BOUNDARIES: [f64; 2] = [0.0, 1.0];

/// Modifier frequency y(t) for two initial conditions.
#[derive(Debug, Clone, Copy)]
pub struct Timeseries<'a> {
    pub time: &'a [f64],
    /// Row `i` is the trajectory started from `initial_conditions.i`.
    pub trajectories: &'a [Vec<f64>],
    /// Reinforcement strength used by the simulation.
    pub p: f64,
    /// Critical reinforcement threshold.
    pub p_c: f64,
    pub initial_conditions: (f64, f64),
}

impl Timeseries<'_> {
    /// Two rows, each as long as the time grid.
    pub fn validate(&self) -> Result<(), PlotError> {
        if self.trajectories.len() != 2 {
            return Err(PlotError::shape(
                "trajectory rows",
                2,
                self.trajectories.len(),
            ));
        }
        for row in self.trajectories {
            if row.len() != self.time.len() {
                return Err(PlotError::shape("trajectory length", self.time.len(), row.len()));
            }
        }
        Ok(())
    }

    pub fn labels(&self) -> [String; 2] {
        let (a, b) = self.initial_conditions;
        [
            format!("y0={}", format_label_value(a)),
            format!("y0={}", format_label_value(b)),
        ]
    }

    pub fn title(&self) -> String {
        format!("Time evolution (p={:.3}, p_c={:.3})", self.p, self.p_c)
    }
}

impl FigureRenderer {
    /// Draws both trajectories against time and writes the image.
    ///
    /// Writes to `path`, or to `timeseries.png` in the figures directory.
    pub fn render_timeseries(
        &self,
        series: &Timeseries<'_>,
        path: Option<&Path>,
    ) -> Result<PathBuf, PlotError> {
        series.validate()?;
        let out_path = self.figure_dir().resolve(path, TIMESERIES_FILE);
        let style = *self.style();
        let size = style.canvas_size()?;
        debug!(
            path = %out_path.display(),
            samples = series.time.len(),
            p = series.p,
            p_c = series.p_c,
            "rendering timeseries"
        );

        let x_range = padded_range(series.time.iter().copied(), &[])?;
        let y_range = padded_range(
            series.trajectories.iter().flatten().copied(),
            &BOUNDARIES,
        )?;
        let labels = series.labels();

        with_canvas(&out_path, size, style.dpi, |root| {
            let mut chart = ChartBuilder::on(root)
                .caption(series.title(), style.font(12.0))
                .margin(style.px(8.0))
                .x_label_area_size(style.px(32.0))
                .y_label_area_size(style.px(44.0))
                .build_cartesian_2d(x_range.clone(), y_range)?;

            configure_axes(&mut chart, &style, "Time", "Modifier frequency y")?;

            for &y in &BOUNDARIES {
                chart.draw_series(std::iter::once(PathElement::new(
                    vec![(x_range.start, y), (x_range.end, y)],
                    BLACK.mix(0.5).stroke_width(style.px(0.8)),
                )))?;
            }

            let line_w = style.px(2.0);
            let handle_len = style.px(20.0) as i32;
            for ((row, label), hex) in series
                .trajectories
                .iter()
                .zip(labels.iter())
                .zip(TRAJECTORY_COLORS)
            {
                let color = hex_color(hex);
                chart
                    .draw_series(LineSeries::new(
                        series.time.iter().copied().zip(row.iter().copied()),
                        color.stroke_width(line_w),
                    ))?
                    .label(label.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + handle_len, y)], color.stroke_width(line_w))
                    });
            }

            draw_legend(&mut chart, &style)
        })?;

        if self.writes_csv() {
            let csv_path = out_path.with_extension("csv");
            data::write_timeseries_csv(&csv_path, series)?;
            debug!(path = %csv_path.display(), "wrote timeseries data");
        }

        info!(path = %out_path.display(), "saved timeseries figure");
        Ok(out_path)
    }
}
