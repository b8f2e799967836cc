//! Move-producing players

use crate::board::{Board, Move, Player};
use crate::config::SearchConfig;
use crate::error::HexError;
use crate::search::SearchEngine;

/// Anything that can produce a move for its player
pub trait Controller {
    fn player(&self) -> Player;

    /// True for players driven by a person at the terminal
    fn is_interactive(&self) -> bool {
        false
    }

    /// Choose a move on `board`; it must be one of `board.possible_moves()`
    fn choose_move(&mut self, board: &Board) -> Result<Move, HexError>;
}

/// A move that connects `player` right away, if one exists
pub fn immediate_win(board: &Board, player: Player) -> Option<Move> {
    board
        .possible_moves()
        .into_iter()
        .find(|&mv| board.with_move(mv, player).is_connected(player))
}

/// Computer player: immediate-win check, then search
pub struct Agent {
    player: Player,
    engine: SearchEngine,
}

impl Agent {
    pub fn new(player: Player, config: SearchConfig) -> Self {
        Self {
            player,
            engine: SearchEngine::new(config),
        }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Pick a move for `player`. None only when the board is full.
    pub fn select_move(&mut self, board: &Board, player: Player) -> Option<Move> {
        if let Some(mv) = immediate_win(board, player) {
            tracing::trace!("{} wins immediately at {}", player, mv);
            return Some(mv);
        }
        self.engine.best_move(board, player)
    }
}

impl Controller for Agent {
    fn player(&self) -> Player {
        self.player
    }

    fn choose_move(&mut self, board: &Board) -> Result<Move, HexError> {
        self.select_move(board, self.player)
            .ok_or(HexError::NoLegalMoves)
    }
}
