//! Match command - computer against computer over many games
//!
//! ## Architecture
//!
//! - run() - orchestration
//! - play_match() - games, sequential or parallel
//! - play_single_game() - one seeded game
//! - report_results() - text or JSON

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Args;
use rayon::prelude::*;
use serde::Serialize;

use hexlink_core::{Agent, Board, HexError, Player, SearchConfig};

use crate::build_search_config;
use crate::game::{play_game, GameRecord, TurnOptions};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Board size
    #[arg(long, default_value = "5")]
    pub size: usize,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Search time budget per move, in seconds
    #[arg(long, default_value = "0.5")]
    pub time: f64,

    /// Fixed search depth instead of the phase-based policy
    #[arg(long)]
    pub depth: Option<u32>,

    /// Run games in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Settings shared by every game of a match
#[derive(Clone, Debug)]
pub struct MatchConfig {
    pub size: usize,
    pub games: usize,
    pub search: SearchConfig,
    pub parallel: bool,
}

/// Aggregated match results
#[derive(Clone, Debug, Serialize)]
pub struct MatchResults {
    pub games: usize,
    pub red_wins: usize,
    pub blue_wins: usize,
    pub stalemates: usize,
    pub avg_moves: f32,
    pub elapsed_secs: f64,
    #[serde(skip)]
    pub records: Vec<GameRecord>,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run match command
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let search = build_search_config(None, Some(args.time), args.depth, seed)?;
    let config = MatchConfig {
        size: args.size,
        games: args.games,
        search,
        parallel: args.parallel,
    };

    tracing::info!(
        "Starting match: {} games on {}x{} (budget {:.2}s, parallel={})",
        config.games,
        config.size,
        config.size,
        config.search.time_budget_secs,
        config.parallel
    );

    let results = play_match(&config)?;
    report_results(&results, args.json)?;

    Ok(())
}

// ============================================================================
// PHASES
// ============================================================================

/// Play every game of the match. Game `i` seeds both engines from `seed + i`.
pub fn play_match(config: &MatchConfig) -> Result<MatchResults, HexError> {
    // Fail on a bad size before spawning any work
    Board::new(config.size)?;

    let start = Instant::now();
    let indices: Vec<usize> = (0..config.games).collect();

    let records: Result<Vec<GameRecord>, HexError> = if config.parallel {
        indices
            .par_iter()
            .map(|&i| play_single_game(config, i))
            .collect()
    } else {
        indices.iter().map(|&i| play_single_game(config, i)).collect()
    };
    let records = records?;

    Ok(summarize(records, start.elapsed()))
}

/// One silent computer-vs-computer game
pub fn play_single_game(config: &MatchConfig, game_index: usize) -> Result<GameRecord, HexError> {
    let seed = config.search.seed.wrapping_add(game_index as u64);
    let mut red = Agent::new(Player::Red, config.search.clone().with_seed(seed));
    let mut blue = Agent::new(
        Player::Blue,
        config.search.clone().with_seed(seed.wrapping_add(1)),
    );

    let options = TurnOptions {
        pacing: Duration::ZERO,
        show_board: false,
    };
    let (_, record) = play_game(
        Board::new(config.size)?,
        &mut red,
        &mut blue,
        options,
        &mut io::sink(),
    )?;

    tracing::debug!(
        "Game {}: {:?} in {} moves",
        game_index,
        record.outcome,
        record.moves.len()
    );
    Ok(record)
}

fn summarize(records: Vec<GameRecord>, elapsed: Duration) -> MatchResults {
    let count = |p: Player| records.iter().filter(|r| r.winner() == Some(p)).count();
    let red_wins = count(Player::Red);
    let blue_wins = count(Player::Blue);
    let games = records.len();
    let total_moves: usize = records.iter().map(|r| r.moves.len()).sum();

    MatchResults {
        games,
        red_wins,
        blue_wins,
        stalemates: games - red_wins - blue_wins,
        avg_moves: if games == 0 {
            0.0
        } else {
            total_moves as f32 / games as f32
        },
        elapsed_secs: elapsed.as_secs_f64(),
        records,
    }
}

/// Print results as text or JSON
fn report_results(results: &MatchResults, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    println!();
    println!("=== Match Results ===");
    println!("Games:       {}", results.games);
    println!("Red wins:    {}", results.red_wins);
    println!("Blue wins:   {}", results.blue_wins);
    println!("Stalemates:  {}", results.stalemates);
    println!("Avg moves:   {:.1}", results.avg_moves);
    println!("Time:        {:.2}s", results.elapsed_secs);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_match(parallel: bool) -> MatchConfig {
        MatchConfig {
            size: 3,
            games: 4,
            search: SearchConfig::default().with_depth(1).with_time_budget(5.0),
            parallel,
        }
    }

    #[test]
    fn test_every_game_has_a_winner() {
        let results = play_match(&tiny_match(false)).unwrap();
        assert_eq!(results.games, 4);
        assert_eq!(results.red_wins + results.blue_wins, 4);
        assert_eq!(results.stalemates, 0);
        assert!(results.avg_moves >= 3.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = play_match(&tiny_match(false)).unwrap();
        let parallel = play_match(&tiny_match(true)).unwrap();
        assert_eq!(sequential.red_wins, parallel.red_wins);
        assert_eq!(sequential.blue_wins, parallel.blue_wins);
    }

    #[test]
    fn test_bad_size_is_rejected() {
        let mut config = tiny_match(false);
        config.size = 1;
        assert!(matches!(play_match(&config), Err(HexError::InvalidSize { .. })));
    }
}
