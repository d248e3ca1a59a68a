//! Headless forest fire demo
//!
//! Seeds a forest from gradient noise, lights one or more cells and runs the
//! spread engine frame by frame, printing statistics (and optionally the grid).
//!
//! # Usage
//!
//! ```bash
//! cargo run --package demo-headless -- --size 60 --radius 2 --show-grid
//! cargo run --package demo-headless -- --size 20 --show-values --snapshot final.json
//! cargo run --package demo-headless -- --spread-pattern spread.txt --exposure erode
//! ```

mod pattern;
mod render;
mod terrain;

use clap::{Parser, ValueEnum};
use forest_fire_core::{
    ExposurePolicy, ForestFireSimulation, GridState, GridStats, KernelSpec, SimulationConfig,
};
use rand::Rng;
use serde::Serialize;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Forest fire spread demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "forest-fire-demo")]
#[command(about = "Kernel-based forest fire spread demo", long_about = None)]
struct Args {
    /// JSON configuration file (command-line values override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Forest side length in cells
    #[arg(short, long)]
    size: Option<usize>,

    /// Maximum tree age
    #[arg(long)]
    tree_life: Option<i32>,

    /// Burn countdown length
    #[arg(long)]
    fire_life: Option<i32>,

    /// Disk kernel radius
    #[arg(short, long, conflicts_with = "spread_pattern")]
    radius: Option<i32>,

    /// File with a 0/1 spread pattern (odd x odd)
    #[arg(long)]
    spread_pattern: Option<PathBuf>,

    /// What exposure does to living trees
    #[arg(short, long, value_enum)]
    exposure: Option<ExposureArg>,

    /// Noise seed (random in 1..=1000 when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Noise scale in cells
    #[arg(long, default_value_t = 40.0)]
    scale: f32,

    /// Maximum number of frames to run
    #[arg(short, long, default_value_t = 2000)]
    frames: u64,

    /// Cell to ignite as ROW,COL (repeatable, defaults to the centre)
    #[arg(short, long, value_parser = parse_cell)]
    ignite: Vec<(usize, usize)>,

    /// Report interval in frames
    #[arg(long, default_value_t = 10)]
    report_interval: u64,

    /// Print the grid at every report
    #[arg(long)]
    show_grid: bool,

    /// Print raw cell values at every report
    #[arg(long)]
    show_values: bool,

    /// Write the final frame as JSON
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

/// Final frame as written by `--snapshot`
#[derive(Serialize)]
struct Snapshot<'a> {
    frame: u64,
    stats: GridStats,
    grid: &'a GridState,
}

fn write_snapshot(path: &Path, sim: &ForestFireSimulation) -> Result<(), Box<dyn Error>> {
    let snapshot = Snapshot {
        frame: sim.frame(),
        stats: sim.stats(),
        grid: sim.grid(),
    };
    fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
    info!("Snapshot written to {}", path.display());
    Ok(())
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ExposureArg {
    Shielded,
    Ignite,
    Erode,
}

impl From<ExposureArg> for ExposurePolicy {
    fn from(arg: ExposureArg) -> Self {
        match arg {
            ExposureArg::Shielded => ExposurePolicy::Shielded,
            ExposureArg::Ignite => ExposurePolicy::Ignite,
            ExposureArg::Erode => ExposurePolicy::Erode,
        }
    }
}

fn parse_cell(s: &str) -> Result<(usize, usize), String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{s}'"))?;
    let row = row
        .trim()
        .parse()
        .map_err(|e| format!("invalid row '{row}': {e}"))?;
    let col = col
        .trim()
        .parse()
        .map_err(|e| format!("invalid column '{col}': {e}"))?;
    Ok((row, col))
}

fn build_config(args: &Args) -> Result<SimulationConfig, Box<dyn Error>> {
    let mut config = if let Some(path) = &args.config {
        SimulationConfig::load(path)?
    } else {
        SimulationConfig::default()
    };

    if let Some(size) = args.size {
        config.forest_size = size;
    }
    if let Some(tree_life) = args.tree_life {
        config.tree_life = tree_life;
    }
    if let Some(fire_life) = args.fire_life {
        config.fire_life = fire_life;
    }
    if let Some(radius) = args.radius {
        config.kernel = KernelSpec::Disk { radius };
    }
    if let Some(path) = &args.spread_pattern {
        config.kernel = KernelSpec::Custom {
            pattern: pattern::load_pattern(path)?,
        };
    }
    if let Some(exposure) = args.exposure {
        config.exposure = exposure.into();
    }

    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = build_config(args)?;
    let seed = args
        .seed
        .unwrap_or_else(|| rand::rng().random_range(1..=1000));

    println!("=== Forest Fire Demo ===\n");
    println!(
        "Forest: {0}x{0}, tree life {1}, fire life {2}, seed {3}",
        config.forest_size, config.tree_life, config.fire_life, seed
    );

    let mut grid = config.empty_grid()?;
    terrain::seed_forest(&mut grid, &terrain::TerrainNoise::new(seed), args.scale)?;

    let mut sim = ForestFireSimulation::new(&config, grid)?;
    println!(
        "Kernel: {} offsets (reach {}), exposure {:?}\n",
        sim.kernel().len(),
        sim.kernel().reach(),
        sim.exposure()
    );

    let center = config.forest_size / 2;
    let ignitions = if args.ignite.is_empty() {
        vec![(center, center)]
    } else {
        args.ignite.clone()
    };
    for (row, col) in ignitions {
        sim.ignite(row, col)?;
        info!("Ignited ({}, {})", row, col);
    }

    println!("Frame | Trees | Burning | Dead");
    println!("------|-------|---------|-----");

    let interval = args.report_interval.max(1);
    while sim.frame() < args.frames && !sim.is_extinguished() {
        sim.update()?;
        if sim.frame() % interval == 0 {
            let stats = sim.stats();
            println!(
                "{:5} | {:5} | {:7} | {:4}",
                sim.frame(),
                stats.trees,
                stats.burning,
                stats.dead
            );
            if args.show_grid {
                println!("{}", render::render_ascii(sim.grid()));
            }
            if args.show_values {
                println!("{}", render::render_values(sim.grid()));
            }
        }
    }

    let stats = sim.stats();
    let total = stats.total() as f32;
    println!("\n=== Summary ===");
    println!("Frames run: {}", sim.frame());
    println!(
        "Trees: {} ({:.1}%), burning: {}, burned: {} ({:.1}%)",
        stats.trees,
        100.0 * stats.trees as f32 / total,
        stats.burning,
        stats.dead,
        100.0 * stats.dead as f32 / total
    );
    if sim.is_extinguished() {
        println!("Fire is out.");
    }

    if let Some(path) = &args.snapshot {
        write_snapshot(path, &sim)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
