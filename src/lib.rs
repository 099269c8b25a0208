//! Figures for the rule-taking vs rule-making reinforcement model.
//!
//! Renders modifier-frequency time series and bifurcation scans produced by
//! the simulation into PNG files under a figures directory.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod figures;
pub mod plot;

pub use config::PlotConfig;
pub use error::PlotError;
pub use figures::FigureDir;
pub use plot::{BifurcationScan, FigureRenderer, FigureStyle, Timeseries};
