//! HEXLINK CLI - Command-line interface
//!
//! Commands:
//! - play: Play one game at the terminal
//! - match: Pit the engine against itself over many games

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hexlink_cli::{match_cmd, play_cmd};

#[derive(Parser)]
#[command(name = "hexlink")]
#[command(about = "HEXLINK connection game with an alpha-beta opponent")]
struct Cli {
    /// Random seed for the engines
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game
    Play(play_cmd::PlayArgs),
    /// Play many computer-vs-computer games and report the tally
    Match(match_cmd::MatchArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
    }
}
