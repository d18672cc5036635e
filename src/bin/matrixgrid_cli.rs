//! CLI tool for matrixgrid - generates a grid and outputs a JSON report
//!
//! Build with `--features cli`.
//!
//! Usage:
//!   matrixgrid_cli --rows 10 --cols 10                  # Snapshot + window to stdout
//!   matrixgrid_cli --rows 10 --cols 10 --seed 7 --nearest 12 -k 5
//!   matrixgrid_cli --rows 100 --cols 100 --scroll-top 2000 -o out.json
//!
//! Set `RUST_LOG=matrixgrid=debug` for engine tracing on stderr.

#![allow(clippy::exit)]

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use matrixgrid::config::GridConfig;
use matrixgrid::engine::{random_amount, SeededAmounts};
use matrixgrid::error::Result;
use matrixgrid::input::clamp_dimension;
use matrixgrid::layout::GridWindow;
use matrixgrid::session::GridSession;
use matrixgrid::types::{CellId, MatrixSnapshot};

#[derive(Parser, Debug)]
#[command(name = "matrixgrid_cli", version, about = "Generate a numeric grid and inspect it")]
struct Args {
    /// Number of rows (clamped to 100)
    #[arg(long, default_value_t = 10)]
    rows: u64,
    /// Number of columns (clamped to 100)
    #[arg(long, default_value_t = 10)]
    cols: u64,
    /// Seed for reproducible amounts
    #[arg(long)]
    seed: Option<u64>,
    /// Report the nearest cells to this cell id
    #[arg(long, value_name = "ID")]
    nearest: Option<CellId>,
    /// Nearest-cell count
    #[arg(short = 'k', long, default_value_t = 5)]
    k: usize,
    /// Vertical scroll offset for the window report
    #[arg(long, default_value_t = 0.0)]
    scroll_top: f64,
    /// Horizontal scroll offset for the window report
    #[arg(long, default_value_t = 0.0)]
    scroll_left: f64,
    /// JSON grid config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the report here instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    snapshot: &'a MatrixSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    nearest: Option<Vec<CellId>>,
    window: GridWindow,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn run(args: &Args) -> Result<String> {
    let config = match &args.config {
        Some(path) => GridConfig::from_json(&fs::read_to_string(path)?)?,
        None => GridConfig::default(),
    };

    let rows = clamp_dimension(args.rows) as usize;
    let cols = clamp_dimension(args.cols) as usize;

    let mut session = GridSession::new(config);
    match args.seed {
        Some(seed) => {
            let mut rng = SeededAmounts::new(seed);
            session.resize(rows, cols, || rng.next_amount());
        }
        None => session.resize(rows, cols, random_amount),
    }
    session.scroll_to(args.scroll_top, args.scroll_left);

    let nearest = args.nearest.map(|id| {
        session.set_nearest_count(args.k);
        session.hover_cell(id).to_vec()
    });

    let window = session
        .viewport()
        .try_window(session.rows(), session.cols())?;

    let report = Report {
        snapshot: session.snapshot(),
        nearest,
        window,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let json = match run(&args) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path.display(), e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout();
            if let Err(e) = writeln!(stdout, "{json}") {
                eprintln!("Error writing stdout: {}", e);
                std::process::exit(1);
            }
        }
    }
}
