// Entry point: renders model figures from CSV data or built-in reference runs.
use std::error::Error;
use std::fs::read_to_string;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use rulemaker::cli::{Args, Command};
use rulemaker::config::PlotConfig;
use rulemaker::data::{BifurcationTable, TimeseriesTable};
use rulemaker::plot::{BifurcationScan, FigureRenderer, Timeseries};

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn render_demo(renderer: &FigureRenderer) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let trajectories = vec![
        vec![0.1, 0.2, 0.3, 0.35, 0.36],
        vec![0.9, 0.8, 0.75, 0.74, 0.735],
    ];
    let series = Timeseries {
        time: &[0.0, 1.0, 2.0, 3.0, 4.0],
        trajectories: &trajectories,
        p: 0.5,
        p_c: 0.42,
        initial_conditions: (0.1, 0.9),
    };
    let scan = BifurcationScan {
        p_values: &[0.1, 0.2, 0.3, 0.4, 0.5],
        asym_low: &[0.0, 0.0, 0.0, 0.1, 0.4],
        asym_high: &[1.0, 1.0, 0.95, 0.9, 0.6],
        p_c: 0.35,
    };
    Ok(vec![
        renderer.render_timeseries(&series, None)?,
        renderer.render_bifurcation(&scan, None)?,
    ])
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let cfg = PlotConfig::load_or_default(&args.config);
    let renderer = FigureRenderer::from_config(&cfg)?;
    info!(dir = %renderer.figure_dir().path().display(), "figures directory");

    let written = match args.command {
        Command::Timeseries {
            input,
            p,
            p_c,
            y0,
            out,
        } => {
            let table = TimeseriesTable::parse(&read_to_string(&input)?)?;
            vec![renderer.render_timeseries(&table.series(p, p_c, y0), out.as_deref())?]
        }
        Command::Bifurcation { input, p_c, out } => {
            let table = BifurcationTable::parse(&read_to_string(&input)?)?;
            vec![renderer.render_bifurcation(&table.scan(p_c), out.as_deref())?]
        }
        Command::Demo => render_demo(&renderer)?,
    };

    for path in written {
        println!("Saved {}", path.display());
    }
    Ok(())
}
