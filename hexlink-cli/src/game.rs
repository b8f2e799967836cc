//! Turn loop

use std::io::Write;
use std::thread;
use std::time::Duration;

use serde::Serialize;

use hexlink_core::{Board, Controller, HexError, Move, Player};

use crate::display::render;

/// How a game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GameOutcome {
    Winner(Player),
    /// Board filled with nobody connected
    Stalemate,
}

/// Finished game
#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub outcome: GameOutcome,
    pub moves: Vec<(Player, Move)>,
    pub final_board_size: usize,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            GameOutcome::Winner(p) => Some(p),
            GameOutcome::Stalemate => None,
        }
    }
}

/// Presentation settings for [`play_game`]
#[derive(Clone, Copy, Debug)]
pub struct TurnOptions {
    /// Pause before each computer move
    pub pacing: Duration,
    /// Print the board after every move
    pub show_board: bool,
}

impl Default for TurnOptions {
    fn default() -> Self {
        Self {
            pacing: Duration::from_millis(500),
            show_board: true,
        }
    }
}

/// Play `board` to the end; Red moves first.
///
/// A refused placement is reported on `out` and the same player moves again.
pub fn play_game(
    mut board: Board,
    red: &mut dyn Controller,
    blue: &mut dyn Controller,
    options: TurnOptions,
    out: &mut dyn Write,
) -> Result<(Board, GameRecord), HexError> {
    let mut moves = Vec::new();
    let mut red_to_move = true;

    if options.show_board {
        writeln!(out, "{}", render(&board))?;
    }

    let outcome = loop {
        if board.is_full() {
            break GameOutcome::Stalemate;
        }

        let current: &mut dyn Controller = if red_to_move { &mut *red } else { &mut *blue };
        let player = current.player();

        if !current.is_interactive() && !options.pacing.is_zero() {
            thread::sleep(options.pacing);
        }

        let mv = current.choose_move(&board)?;
        match board.try_place(mv, player) {
            Ok(()) => {}
            Err(e @ (HexError::Occupied { .. } | HexError::OutOfBounds { .. })) => {
                writeln!(out, "Invalid move: {}", e)?;
                continue;
            }
            Err(e) => return Err(e),
        }
        moves.push((player, mv));
        tracing::debug!("{} played {}", player, mv);

        if options.show_board {
            writeln!(out, "{}", render(&board))?;
        }

        if board.is_connected(player) {
            break GameOutcome::Winner(player);
        }

        red_to_move = !red_to_move;
    };

    match outcome {
        GameOutcome::Winner(p) => writeln!(out, "{} has won the game.", p)?,
        GameOutcome::Stalemate => writeln!(out, "The board is full with no winner.")?,
    }

    let record = GameRecord {
        outcome,
        moves,
        final_board_size: board.size(),
    };
    Ok((board, record))
}
