//! Play command - one interactive or computer game at the terminal

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use hexlink_core::{Agent, Board, Controller, Player, SearchConfig};

use crate::build_search_config;
use crate::game::{play_game, GameOutcome, TurnOptions};
use crate::human::HumanPlayer;

/// Who controls each side
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GameMode {
    /// Two people at the same terminal
    HumanVsHuman,
    /// Human plays Red (left-right), computer plays Blue
    HumanVsAi,
    /// Computer against computer
    AiVsAi,
}

#[derive(Args)]
pub struct PlayArgs {
    /// Board size (at least 2; 5-7 plays well)
    #[arg(long, default_value = "7")]
    pub size: usize,

    #[arg(long, value_enum, default_value = "human-vs-ai")]
    pub mode: GameMode,

    /// Search time budget per move, in seconds
    #[arg(long)]
    pub time: Option<f64>,

    /// Fixed search depth instead of the phase-based policy
    #[arg(long)]
    pub depth: Option<u32>,

    /// Search config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pause before each computer move, in milliseconds
    #[arg(long, default_value = "500")]
    pub delay_ms: u64,
}

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = build_search_config(args.config.as_deref(), args.time, args.depth, seed)?;
    let board = Board::new(args.size).context("Cannot create board")?;

    let (mut red, mut blue) = create_players(args.mode, &config);

    tracing::info!(
        "Starting {:?} game on a {}x{} board (budget {:.1}s)",
        args.mode,
        args.size,
        args.size,
        config.time_budget_secs
    );

    let options = TurnOptions {
        pacing: Duration::from_millis(args.delay_ms),
        show_board: true,
    };
    let mut stdout = io::stdout();
    let (_, record) = play_game(board, red.as_mut(), blue.as_mut(), options, &mut stdout)?;

    match record.outcome {
        GameOutcome::Winner(p) => tracing::info!("{} won after {} moves", p, record.moves.len()),
        GameOutcome::Stalemate => tracing::warn!("Game ended without a winner"),
    }

    Ok(())
}

/// Red and Blue controllers for a mode. Blue's engine gets a different seed.
fn create_players(
    mode: GameMode,
    config: &SearchConfig,
) -> (Box<dyn Controller>, Box<dyn Controller>) {
    let ai = |player: Player, offset: u64| -> Box<dyn Controller> {
        let config = config.clone().with_seed(config.seed.wrapping_add(offset));
        Box::new(Agent::new(player, config))
    };

    match mode {
        GameMode::HumanVsHuman => (
            Box::new(HumanPlayer::stdio(Player::Red)),
            Box::new(HumanPlayer::stdio(Player::Blue)),
        ),
        GameMode::HumanVsAi => (Box::new(HumanPlayer::stdio(Player::Red)), ai(Player::Blue, 1)),
        GameMode::AiVsAi => (ai(Player::Red, 0), ai(Player::Blue, 1)),
    }
}
