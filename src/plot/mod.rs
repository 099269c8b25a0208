//! Figure rendering for simulation output.
//!
//! Each render call validates its inputs, resolves the destination path,
//! draws into a bitmap scoped to [`with_canvas`], and returns the path that
//! was written.

pub mod bifurcation;
pub mod timeseries;

pub use bifurcation::BifurcationScan;
pub use timeseries::Timeseries;

use std::fs::File;
use std::io::{self, BufWriter};
use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

use crate::config::{FigureConfig, PlotConfig};
use crate::error::PlotError;
use crate::figures::FigureDir;

pub(crate) type Chart2d<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const FONT_FAMILY: &str = "sans-serif";
const GRID_ALPHA: f64 = 0.3;
/// Fraction of the data span added on each side of an autoscaled axis.
const AXIS_MARGIN: f64 = 0.05;

/// Physical figure size and resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureStyle {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl FigureStyle {
    /// Canvas size in pixels.
    pub fn canvas_size(&self) -> Result<(u32, u32), PlotError> {
        let w = self.width_in * self.dpi as f64;
        let h = self.height_in * self.dpi as f64;
        if !(w.is_finite() && h.is_finite()) || w < 1.0 || h < 1.0 {
            return Err(PlotError::Render(format!(
                "invalid figure size {}x{} in at {} dpi",
                self.width_in, self.height_in, self.dpi
            )));
        }
        Ok((w.round() as u32, h.round() as u32))
    }

    /// Points (1/72 in) to pixels at this resolution.
    pub fn px(&self, points: f64) -> u32 {
        (points * self.dpi as f64 / 72.0).round().max(1.0) as u32
    }

    pub(crate) fn font(&self, points: f64) -> (&'static str, u32) {
        (FONT_FAMILY, self.px(points))
    }
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self::from(&FigureConfig::default())
    }
}

impl From<&FigureConfig> for FigureStyle {
    fn from(cfg: &FigureConfig) -> Self {
        Self {
            width_in: cfg.width_in,
            height_in: cfg.height_in,
            dpi: cfg.dpi,
        }
    }
}

/// Renders figures into a figures directory.
#[derive(Debug, Clone)]
pub struct FigureRenderer {
    dir: FigureDir,
    style: FigureStyle,
    write_csv: bool,
}

impl FigureRenderer {
    /// Creates the figures directory (idempotently) and returns a renderer bound to it.
    pub fn new(dir: FigureDir, style: FigureStyle) -> io::Result<Self> {
        dir.ensure()?;
        Ok(Self {
            dir,
            style,
            write_csv: false,
        })
    }

    pub fn from_config(cfg: &PlotConfig) -> io::Result<Self> {
        Ok(Self::new(cfg.output.figure_dir(), FigureStyle::from(&cfg.figure))?
            .with_csv_export(cfg.export.write_csv))
    }

    pub fn with_csv_export(mut self, enabled: bool) -> Self {
        self.write_csv = enabled;
        self
    }

    pub fn figure_dir(&self) -> &FigureDir {
        &self.dir
    }

    pub fn style(&self) -> &FigureStyle {
        &self.style
    }

    pub(crate) fn writes_csv(&self) -> bool {
        self.write_csv
    }
}

/// Draws onto a white in-memory bitmap, then encodes it as a PNG at `path`
/// with the pixel density recorded in a `pHYs` chunk.
///
/// The backend borrows the pixel buffer inside this frame, so it is released
/// on success and on every error path. Nothing is written to `path` unless
/// drawing succeeds.
pub(crate) fn with_canvas<F>(
    path: &Path,
    size: (u32, u32),
    dpi: u32,
    draw: F,
) -> Result<(), PlotError>
where
    F: FnOnce(&DrawingArea<BitMapBackend, Shift>) -> Result<(), PlotError>,
{
    let (w, h) = size;
    let mut pixels = vec![0u8; w as usize * h as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, size).into_drawing_area();
        root.fill(&WHITE)?;
        draw(&root)?;
        root.present()?;
    }
    write_png(path, &pixels, size, dpi)
}

/// Pixels per metre for a resolution in dots per inch.
pub(crate) fn dots_per_metre(dpi: u32) -> u32 {
    (dpi as f64 / 0.0254).round() as u32
}

fn write_png(path: &Path, rgb: &[u8], (w, h): (u32, u32), dpi: u32) -> Result<(), PlotError> {
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), w, h);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let ppm = dots_per_metre(dpi);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgb)?;
    writer.finish()?;
    Ok(())
}

pub(crate) fn configure_axes(
    chart: &mut Chart2d<'_, '_>,
    style: &FigureStyle,
    x_desc: &str,
    y_desc: &str,
) -> Result<(), PlotError> {
    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .axis_desc_style(style.font(10.0))
        .label_style(style.font(9.0))
        .axis_style(BLACK.stroke_width(style.px(0.8)))
        .bold_line_style(BLACK.mix(GRID_ALPHA).stroke_width(style.px(0.8)))
        .light_line_style(TRANSPARENT)
        .draw()?;
    Ok(())
}

/// Legend without frame or background.
pub(crate) fn draw_legend<'a, 'b: 'a>(
    chart: &mut Chart2d<'a, 'b>,
    style: &FigureStyle,
) -> Result<(), PlotError> {
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .margin(style.px(6.0))
        .legend_area_size(style.px(24.0))
        .label_font(style.font(9.0))
        .background_style(TRANSPARENT)
        .border_style(TRANSPARENT)
        .draw()?;
    Ok(())
}

/// Autoscaled axis range over the finite `values` and `include`, with a margin.
///
/// Fails when the padded range is not representable in `f64` (e.g. data
/// spanning `-f64::MAX..f64::MAX`); the mesh cannot be laid out over it.
pub(crate) fn padded_range(
    values: impl IntoIterator<Item = f64>,
    include: &[f64],
) -> Result<Range<f64>, PlotError> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values.into_iter().chain(include.iter().copied()) {
        if v.is_finite() {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return Ok(0.0..1.0);
    }
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * AXIS_MARGIN
    } else if lo != 0.0 {
        lo.abs() * AXIS_MARGIN
    } else {
        AXIS_MARGIN
    };
    let (start, end) = (lo - pad, hi + pad);
    if !(end - start).is_finite() {
        return Err(PlotError::Render(format!(
            "axis range {lo}..{hi} is too wide to plot"
        )));
    }
    Ok(start..end)
}

/// Prints a value the way it reads as a float literal: `0.1`, `0.9`, `1.0`.
pub(crate) fn format_label_value(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
        format!("{x:.1}")
    } else {
        format!("{x}")
    }
}

pub(crate) fn hex_color(hex: u32) -> RGBColor {
    RGBColor((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}
