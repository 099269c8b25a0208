//! CSV sidecars for rendered figures, and the column tables the CLI reads back.

use std::fs::write;
use std::path::Path;

use crate::error::PlotError;
use crate::plot::{BifurcationScan, Timeseries};

pub fn timeseries_csv(series: &Timeseries<'_>) -> String {
    let [a, b] = series.labels();
    let mut out = format!("t,{a},{b}\n");
    for (i, t) in series.time.iter().enumerate() {
        let ya = series.trajectories.first().and_then(|r| r.get(i));
        let yb = series.trajectories.get(1).and_then(|r| r.get(i));
        if let (Some(ya), Some(yb)) = (ya, yb) {
            out.push_str(&format!("{t},{ya},{yb}\n"));
        }
    }
    out
}

pub fn bifurcation_csv(scan: &BifurcationScan<'_>) -> String {
    let mut out = String::from("p,asym_low,asym_high\n");
    for ((p, lo), hi) in scan
        .p_values
        .iter()
        .zip(scan.asym_low)
        .zip(scan.asym_high)
    {
        out.push_str(&format!("{p},{lo},{hi}\n"));
    }
    out
}

pub fn write_timeseries_csv(path: &Path, series: &Timeseries<'_>) -> Result<(), PlotError> {
    write(path, timeseries_csv(series))?;
    Ok(())
}

pub fn write_bifurcation_csv(path: &Path, scan: &BifurcationScan<'_>) -> Result<(), PlotError> {
    write(path, bifurcation_csv(scan))?;
    Ok(())
}

/// Reads `n_cols` numeric columns. A leading row with no numeric field is a
/// header and is skipped; blank lines and `#` comments are ignored.
pub fn parse_columns(text: &str, n_cols: usize) -> Result<Vec<Vec<f64>>, PlotError> {
    let mut cols = vec![Vec::new(); n_cols];
    let mut seen_row = false;
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        let first_row = !seen_row;
        seen_row = true;
        if first_row && fields.iter().all(|f| f.parse::<f64>().is_err()) {
            continue;
        }
        if fields.len() != n_cols {
            return Err(PlotError::Parse {
                line: line_no,
                message: format!("expected {n_cols} columns, found {}", fields.len()),
            });
        }
        for (col, field) in cols.iter_mut().zip(&fields) {
            let value = field.parse::<f64>().map_err(|e| PlotError::Parse {
                line: line_no,
                message: format!("invalid number `{field}`: {e}"),
            })?;
            col.push(value);
        }
    }
    Ok(cols)
}

/// `t,y_a,y_b` rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeseriesTable {
    pub time: Vec<f64>,
    pub trajectories: Vec<Vec<f64>>,
}

impl TimeseriesTable {
    pub fn parse(text: &str) -> Result<Self, PlotError> {
        let mut cols = parse_columns(text, 3)?.into_iter();
        let time = cols.next().unwrap_or_default();
        Ok(Self {
            time,
            trajectories: cols.collect(),
        })
    }

    pub fn series(&self, p: f64, p_c: f64, initial_conditions: (f64, f64)) -> Timeseries<'_> {
        Timeseries {
            time: &self.time,
            trajectories: &self.trajectories,
            p,
            p_c,
            initial_conditions,
        }
    }
}

/// `p,asym_low,asym_high` rows.
#[derive(Debug, Clone, PartialEq)]
pub struct BifurcationTable {
    pub p_values: Vec<f64>,
    pub asym_low: Vec<f64>,
    pub asym_high: Vec<f64>,
}

impl BifurcationTable {
    pub fn parse(text: &str) -> Result<Self, PlotError> {
        let mut cols = parse_columns(text, 3)?.into_iter();
        Ok(Self {
            p_values: cols.next().unwrap_or_default(),
            asym_low: cols.next().unwrap_or_default(),
            asym_high: cols.next().unwrap_or_default(),
        })
    }

    pub fn scan(&self, p_c: f64) -> BifurcationScan<'_> {
        BifurcationScan {
            p_values: &self.p_values,
            asym_low: &self.asym_low,
            asym_high: &self.asym_high,
            p_c,
        }
    }
}
