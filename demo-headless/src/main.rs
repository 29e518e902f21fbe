use clap::Parser;
use flamecell_core::{ClassificationMap, Environment, Grid, RulePipeline, Simulation};
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Cellular-automaton wildfire demo
#[derive(Parser, Debug)]
#[command(name = "flamecell-demo")]
#[command(about = "Run a FlameCell fire spread simulation in the terminal", long_about = None)]
struct Args {
    /// Side length of the generated square landscape (ignored with --codes)
    #[arg(short, long, default_value_t = 32)]
    size: usize,

    /// Land-cover code matrix: one row per line, values separated by spaces or commas
    #[arg(long)]
    codes: Option<PathBuf>,

    /// Seed for reproducible runs (entropy-seeded if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Step ceiling (defaults to the grid width)
    #[arg(short = 'n', long)]
    steps: Option<u32>,

    /// Base ignition probability per burning neighbor
    #[arg(short, long, default_value_t = 0.2)]
    prob: f64,

    /// Relative humidity in %
    #[arg(long, default_value_t = 40.0)]
    humidity: f64,

    /// Temperature in °C
    #[arg(short, long, default_value_t = 20.0)]
    temperature: f64,

    /// Wind speed
    #[arg(short, long, default_value_t = 0.0)]
    wind_speed: f64,

    /// Wind direction in degrees (0 = +x, 90 = +y)
    #[arg(long, default_value_t = 0.0)]
    wind_direction: f64,

    /// JSON environment file; replaces the weather flags above
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Ignition column (defaults to the grid center)
    #[arg(short = 'x', long)]
    ignite_x: Option<i64>,

    /// Ignition row (defaults to the grid center)
    #[arg(short = 'y', long)]
    ignite_y: Option<i64>,

    /// Print the grid every N ticks (0 = final grid only)
    #[arg(short, long, default_value_t = 5)]
    frame_interval: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    println!("=== FlameCell Demo ===\n");

    let env = load_environment(&args)?;
    env.validate()?;
    println!(
        "Weather: prob {:.2}, humidity {:.0}%, temperature {:.1}°C, wind ({:.1}, {:.1})",
        env.ignition_probability, env.humidity, env.temperature, env.wind.x, env.wind.y
    );

    let classification = ClassificationMap::new();
    let mut grid = match &args.codes {
        Some(path) => {
            let (values, width, height) = load_codes(path)?;
            info!("Loaded {}x{} code matrix from {}", width, height, path.display());
            classification.raster_to_grid(&values, width, height)?
        }
        None => {
            let codes = synthetic_landscape(args.size);
            classification.codes_to_grid(&codes, args.size, args.size)?
        }
    };

    let x = args.ignite_x.unwrap_or(grid.width() as i64 / 2);
    let y = args.ignite_y.unwrap_or(grid.height() as i64 / 2);
    if !grid.ignite(x, y) {
        let found = grid
            .state_at(x, y)
            .map_or_else(|| "outside the grid".to_string(), |s| format!("{s}"));
        return Err(format!("cannot ignite ({x}, {y}): cell is {found}").into());
    }
    println!("Ignited ({x}, {y})");
    println!("Initial landscape: {}\n", grid.census());

    let max_steps = args.steps.unwrap_or(grid.width() as u32);
    let sim = match args.seed {
        Some(seed) => Simulation::with_seed(grid, RulePipeline::standard(), seed),
        None => Simulation::new(grid, RulePipeline::standard()),
    };
    let mut sim = sim.with_max_steps(max_steps);

    println!("Tick | Ignited | Burned out | Burning");
    println!("-----|---------|------------|--------");

    while !sim.reached_max_steps() {
        let summary = sim.step(&env);
        println!(
            "{:4} | {:7} | {:10} | {:7}",
            summary.tick, summary.newly_ignited, summary.burned_out, summary.burning
        );

        if args.frame_interval > 0 && sim.step_count() % args.frame_interval == 0 {
            println!();
            print_grid(sim.grid());
            println!();
        }

        if !sim.is_burning() {
            info!("Fire burned out after {} ticks", sim.step_count());
            break;
        }
    }

    if sim.is_burning() {
        warn!("Step limit {} reached with fire still burning", max_steps);
    }

    println!("\n=== Simulation Complete ===");
    println!("Ticks run: {}", sim.step_count());
    println!("Final landscape: {}", sim.grid().census());
    print_grid(sim.grid());

    let log = sim.ignition();
    println!("\nCells burned: {}", log.ignited_count());
    if let Some(latest) = log.latest() {
        println!("Last ignition observed at tick {latest}");
        println!("\nIgnition time (0 = earliest, 9 = latest, . = never):");
        for row in 0..log.height() {
            let line: String = (0..log.width())
                .map(|col| match log.tick_at(row * log.width() + col) {
                    Some(tick) => time_glyph(tick, latest),
                    None => '.',
                })
                .collect();
            println!("{line}");
        }
    }

    Ok(())
}

fn load_environment(args: &Args) -> Result<Environment, Box<dyn Error>> {
    match &args.env_file {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let env = serde_json::from_str(&text)?;
            info!("Loaded environment from {}", path.display());
            Ok(env)
        }
        None => Ok(Environment::new(
            args.prob,
            args.humidity,
            Environment::wind_from(args.wind_speed, args.wind_direction),
            args.temperature,
        )),
    }
}

/// Read a whitespace- or comma-separated numeric matrix
///
/// Blank lines and lines starting with `#` are skipped. Values are kept as
/// `f64` so the classifier can report non-integer codes with their position.
fn load_codes(path: &Path) -> Result<(Vec<f64>, usize, usize), Box<dyn Error>> {
    let text = std::fs::read_to_string(path)?;
    let mut values = Vec::new();
    let mut width = None;
    let mut height = 0;

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let row = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(str::parse::<f64>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("{}:{}: {e}", path.display(), line_no + 1))?;

        match width {
            None => width = Some(row.len()),
            Some(w) if w != row.len() => {
                return Err(format!(
                    "{}:{}: expected {w} values, got {}",
                    path.display(),
                    line_no + 1,
                    row.len()
                )
                .into());
            }
            Some(_) => {}
        }
        values.extend(row);
        height += 1;
    }

    Ok((values, width.unwrap_or(0), height))
}

/// Forest with a lake, a grass meadow along the bottom and scattered clearings
fn synthetic_landscape(size: usize) -> Vec<u32> {
    let center = size / 2;
    let lake_x = size * 3 / 4;
    let lake_y = size / 4;
    let lake_r2 = (size / 8).pow(2);

    let mut codes = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let lake_d2 = x.abs_diff(lake_x).pow(2) + y.abs_diff(lake_y).pow(2);
            let near_center = x.abs_diff(center) <= 1 && y.abs_diff(center) <= 1;
            let code = if lake_d2 <= lake_r2 && !near_center {
                4
            } else if y >= size * 2 / 3 {
                22
            } else if (x + 2 * y) % 11 == 0 && !near_center {
                0
            } else {
                31
            };
            codes.push(code);
        }
    }
    codes
}

fn print_grid(grid: &Grid) {
    for row in grid.rows() {
        let line: String = row.iter().map(|s| s.glyph()).collect();
        println!("{line}");
    }
}

fn time_glyph(tick: u32, latest: u32) -> char {
    let bucket = u64::from(tick) * 10 / (u64::from(latest) + 1);
    char::from_digit(bucket as u32, 10).unwrap_or('9')
}
