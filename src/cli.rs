use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML
    #[arg(long, default_value = "rulemaker.toml")]
    pub config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Plot y(t) for two initial conditions from `t,y_a,y_b` rows
    Timeseries {
        /// CSV input
        #[arg(long)]
        input: PathBuf,

        /// Reinforcement strength p
        #[arg(long)]
        p: f64,

        /// Critical threshold p_c
        #[arg(long = "p-c")]
        p_c: f64,

        /// Initial conditions of the two trajectories, e.g. 0.1,0.9
        #[arg(long, value_parser = parse_pair)]
        y0: (f64, f64),

        /// Output image (defaults to timeseries.png in the figures directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Plot asymptotic y against p from `p,asym_low,asym_high` rows
    Bifurcation {
        /// CSV input
        #[arg(long)]
        input: PathBuf,

        /// Critical threshold p_c
        #[arg(long = "p-c")]
        p_c: f64,

        /// Output image (defaults to bifurcation.png in the figures directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Render both figures from built-in reference data
    Demo,
}

/// Parse a pair like "0.1,0.9"
pub fn parse_pair(s: &str) -> Result<(f64, f64), String> {
    let mut parts = s.split(',');
    let mut next = |name: &str| -> Result<f64, String> {
        parts
            .next()
            .ok_or_else(|| format!("missing {name} value in `{s}`"))?
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid {name} value in `{s}`: {e}"))
    };
    let a = next("first")?;
    let b = next("second")?;
    if parts.next().is_some() {
        return Err(format!("expected exactly two values in `{s}`"));
    }
    Ok((a, b))
}
