//! Hive CLI - Command-line interface
//!
//! Commands:
//! - board: Parse, edit and transform a board
//! - grid: Pixel layout of a board as JSON or SVG
//! - play: Play against an engine over TCP

mod board_cmd;
mod grid_cmd;
mod play_cmd;
mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use board_cmd::BoardArgs;
use grid_cmd::GridArgs;
use play_cmd::PlayArgs;
use settings::Settings;

#[derive(Parser)]
#[command(name = "hive")]
#[command(about = "Hive board editor and engine client")]
struct Cli {
    /// Settings JSON file
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse, edit and transform a board
    Board(BoardArgs),
    /// Dump the pixel layout of a board
    Grid(GridArgs),
    /// Play against an engine
    Play(PlayArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::load_or_default(cli.settings.as_deref())?;

    match cli.command {
        Commands::Board(args) => board_cmd::run(args, &settings),
        Commands::Grid(args) => grid_cmd::run(args, &settings),
        Commands::Play(args) => play_cmd::run(args, &settings),
    }
}
