use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, warn};
use scene2d::SimulationConfig;

mod breakout;
mod damping;
mod invaders;
mod nbodies;

#[derive(Parser)]
#[command(name = "scene2d-demos")]
#[command(about = "Runs the scene2d demo scenarios headlessly and logs a summary")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Number of ticks to simulate
    #[arg(short, long, default_value = "600")]
    ticks: usize,

    /// Seconds per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// JSON file with simulation constants
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Stars pulling on each other with pairwise Newtonian gravity
    Nbodies {
        /// Number of stars
        #[arg(short, long, default_value = "60")]
        count: usize,

        /// RNG seed for star placement
        #[arg(short, long, default_value = "1")]
        seed: u64,
    },
    /// A chain of springs between two fixed anchors, damped by drag
    Damping {
        /// Number of links
        #[arg(short, long, default_value = "48")]
        count: usize,
    },
    /// A ball breaking bricks inside three walls
    Breakout,
    /// A ship shooting rows of invaders
    Invaders,
}

fn load_config(path: Option<&PathBuf>) -> SimulationConfig {
    let Some(path) = path else {
        return SimulationConfig::default();
    };
    match fs::read_to_string(path) {
        Ok(text) => SimulationConfig::from_json_or_default(&text),
        Err(err) => {
            warn!("could not read {}: {}", path.display(), err);
            SimulationConfig::default()
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let config = load_config(cli.config.as_ref());
    info!("running {} ticks of {:.4}s", cli.ticks, cli.dt);

    match cli.command {
        Commands::Nbodies { count, seed } => nbodies::run(config, count, seed, cli.ticks, cli.dt),
        Commands::Damping { count } => damping::run(config, count, cli.ticks, cli.dt),
        Commands::Breakout => breakout::run(config, cli.ticks, cli.dt),
        Commands::Invaders => invaders::run(config, cli.ticks, cli.dt),
    }
}
