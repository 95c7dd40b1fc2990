mod app;
mod colors;
mod config;
mod controls;
mod error;
mod gradient;
mod grid;
mod help;
mod render;
mod settings;
mod sim;
mod terminal;

use clap::{Args, Parser, Subcommand};
use config::{LifeConfig, Overrides};
use error::Result;
use settings::Settings;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "afterglow")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(about = "Terminal Game of Life with afterglow trails", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive visualizer
    Run {
        #[command(flatten)]
        common: CommonArgs,

        /// Ticks per second
        #[arg(short, long)]
        rate: Option<f32>,

        /// Grid width in pixels (a terminal column is 1px, a row 2px)
        #[arg(long)]
        width: Option<usize>,

        /// Grid height in pixels
        #[arg(long)]
        height: Option<usize>,
    },

    /// Run a number of generations and print the final frame
    Print {
        #[command(flatten)]
        common: CommonArgs,

        /// Generations to simulate before printing
        #[arg(short = 'n', long, default_value = "50")]
        generations: u64,

        /// Grid columns
        #[arg(long, default_value = "40")]
        cols: usize,

        /// Grid rows
        #[arg(long, default_value = "20")]
        rows: usize,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Aging policy: plain, decay, trail
    #[arg(short = 'P', long)]
    policy: Option<String>,

    /// Number of gradient steps (decay length is steps - 1)
    #[arg(long)]
    steps: Option<usize>,

    /// Block size in pixels (even, >= 2)
    #[arg(short, long)]
    block: Option<usize>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Palette preset: dusk, ember, ice, matrix, mono, neon
    #[arg(short = 'p', long)]
    preset: Option<String>,

    /// Character used to draw cells
    #[arg(short, long)]
    glyph: Option<char>,

    /// Settings file (default: <config dir>/afterglow/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl CommonArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            policy: self.policy.clone(),
            steps: self.steps,
            block_size: self.block,
            seed: self.seed,
            preset: self.preset.clone(),
            glyph: self.glyph,
            log_file: self.log_file.clone(),
            ..Default::default()
        }
    }

    fn resolve(&self, extra: Overrides) -> Result<LifeConfig> {
        let settings = Settings::load(self.config.as_deref())?;
        let base = self.overrides();
        let cli = Overrides {
            tick_rate: extra.tick_rate,
            width: extra.width,
            height: extra.height,
            ..base
        };
        LifeConfig::resolve(settings, cli)
    }
}

/// Log to a file; the terminal is busy drawing
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn start(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            common,
            rate,
            width,
            height,
        } => {
            let extra = Overrides {
                tick_rate: rate,
                width,
                height,
                ..Default::default()
            };
            let config = common.resolve(extra)?;
            if let Some(path) = &config.log_file {
                init_logging(path)?;
            }
            app::run(config)
        }
        Commands::Print {
            common,
            generations,
            cols,
            rows,
        } => {
            let config = common.resolve(Overrides::default())?;
            if let Some(path) = &config.log_file {
                init_logging(path)?;
            }
            app::print(config, generations, cols, rows)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match start(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
