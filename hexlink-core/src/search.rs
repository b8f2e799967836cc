//! Time-boxed minimax search with alpha-beta pruning

use std::cmp::Ordering;
use std::time::Instant;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::board::{Board, Move, Player};
use crate::config::SearchConfig;
use crate::eval::{evaluate, Weights, WIN_VALUE};
use crate::path::weighted_moves;

// ============================================================================
// RESULTS
// ============================================================================

/// Outcome of one search
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Chosen move, None only when the board is full
    pub best_move: Option<Move>,
    /// Minimax value of the chosen move (meaningless after a fallback)
    pub score: f32,
    /// Depth the search was started with
    pub depth: u32,
    /// Nodes visited
    pub nodes: u64,
    /// Alpha-beta cutoffs taken
    pub cutoffs: u64,
    /// The time budget ran out somewhere in the tree
    pub timed_out: bool,
    /// No root move finished searching; the defensive selector chose
    pub fallback: bool,
}

// ============================================================================
// SEARCH ENGINE
// ============================================================================

/// Minimax engine; holds only configuration and the fallback RNG
pub struct SearchEngine {
    config: SearchConfig,
    rng: ChaCha8Rng,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Best move for `player`, or None if the board is full
    pub fn best_move(&mut self, board: &Board, player: Player) -> Option<Move> {
        self.search(board, player).best_move
    }

    /// Search `board` for `player` within the configured budget
    pub fn search(&mut self, board: &Board, player: Player) -> SearchResult {
        let depth = self.config.depth_for(board).max(1);
        let mut ctx = SearchContext {
            player,
            config: &self.config,
            weights: &self.config.weights,
            start: Instant::now(),
            nodes: 0,
            cutoffs: 0,
            timed_out: false,
        };

        let (best, score) = ctx.root(board, depth);
        let (nodes, cutoffs, timed_out) = (ctx.nodes, ctx.cutoffs, ctx.timed_out);

        let (best_move, fallback) = match best {
            Some(mv) => (Some(mv), false),
            None if board.possible_moves().is_empty() => (None, false),
            None => {
                tracing::trace!("No root move completed, falling back to defensive move");
                (self.defensive_move(board, player), true)
            }
        };

        tracing::debug!(
            "{} searched depth {}: {} nodes, {} cutoffs, timed_out={}, score={:.2}, move={:?}",
            player,
            depth,
            nodes,
            cutoffs,
            timed_out,
            score,
            best_move
        );

        SearchResult {
            best_move,
            score,
            depth,
            nodes,
            cutoffs,
            timed_out,
            fallback,
        }
    }

    /// The legal move leaving the opponent with the lowest one-ply score.
    ///
    /// Picks uniformly at random if no score is usable.
    pub fn defensive_move(&mut self, board: &Board, player: Player) -> Option<Move> {
        let moves = board.possible_moves();
        let weights = &self.config.weights;

        let defensive = moves
            .iter()
            .map(|&mv| (mv, evaluate(&board.with_move(mv, player), player.opponent(), weights)))
            .filter(|(_, score)| !score.is_nan())
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
            .map(|(mv, _)| mv);

        defensive.or_else(|| moves.choose(&mut self.rng).copied())
    }
}

// ============================================================================
// MINIMAX WITH ALPHA-BETA
// ============================================================================

/// Per-search state; lives for one call to [`SearchEngine::search`]
struct SearchContext<'a> {
    player: Player,
    config: &'a SearchConfig,
    weights: &'a Weights,
    start: Instant,
    nodes: u64,
    cutoffs: u64,
    timed_out: bool,
}

impl SearchContext<'_> {
    fn out_of_time(&mut self) -> bool {
        if !self.timed_out && self.start.elapsed() >= self.config.time_budget() {
            self.timed_out = true;
        }
        self.timed_out
    }

    /// Search every root move; None if the clock ran out before the first.
    ///
    /// A full board scores as its static evaluation.
    fn root(&mut self, board: &Board, depth: u32) -> (Option<Move>, f32) {
        let moves = board.possible_moves();
        if moves.is_empty() {
            return (None, evaluate(board, self.player, self.weights));
        }
        let moves = self.order_by_evaluation(board, moves, true);

        let mut alpha = f32::NEG_INFINITY;
        let mut best_move = None;
        let mut best_score = f32::NEG_INFINITY;

        for mv in moves {
            if self.out_of_time() {
                break;
            }
            let child = board.with_move(mv, self.player);
            let score = self.minimax(&child, depth - 1, alpha, f32::INFINITY, false);

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
        }

        (best_move, best_score)
    }

    fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: f32,
        mut beta: f32,
        maximizing: bool,
    ) -> f32 {
        self.nodes += 1;

        // Terminal check with depth bonus: sooner wins, later losses
        if board.is_connected(self.player) {
            return WIN_VALUE + depth as f32;
        }
        if board.is_connected(self.player.opponent()) {
            return -WIN_VALUE - depth as f32;
        }

        let moves = board.possible_moves();
        if depth == 0 || moves.is_empty() || self.out_of_time() {
            return evaluate(board, self.player, self.weights);
        }

        let mover = self.mover(maximizing);
        let mut moves = self.order_moves(board, moves, maximizing);
        if let Some(limit) = self.config.max_branching {
            moves.truncate(limit);
        }

        if maximizing {
            let mut best = f32::NEG_INFINITY;
            for mv in moves {
                let child = board.with_move(mv, mover);
                best = best.max(self.minimax(&child, depth - 1, alpha, beta, false));
                alpha = alpha.max(best);
                if beta <= alpha {
                    self.cutoffs += 1;
                    break;
                }
            }
            best
        } else {
            let mut best = f32::INFINITY;
            for mv in moves {
                let child = board.with_move(mv, mover);
                best = best.min(self.minimax(&child, depth - 1, alpha, beta, true));
                beta = beta.min(best);
                if beta <= alpha {
                    self.cutoffs += 1;
                    break;
                }
            }
            best
        }
    }

    // ========================================================================
    // MOVE ORDERING
    // ========================================================================

    /// Most promising moves for the side to move first; ties keep
    /// enumeration order.
    fn order_moves(&self, board: &Board, moves: Vec<Move>, maximizing: bool) -> Vec<Move> {
        if moves.len() > self.config.weighted_ordering_above {
            self.order_by_weight(board, moves, maximizing)
        } else {
            self.order_by_evaluation(board, moves, maximizing)
        }
    }

    /// Sort by the one-ply evaluation of each child
    fn order_by_evaluation(&self, board: &Board, moves: Vec<Move>, maximizing: bool) -> Vec<Move> {
        let mover = self.mover(maximizing);
        let scored = moves
            .into_iter()
            .map(|mv| (mv, evaluate(&board.with_move(mv, mover), self.player, self.weights)))
            .collect();
        sort_scored(scored, maximizing)
    }

    /// Sort by the mover's own `weighted_moves` desirability, best first
    fn order_by_weight(&self, board: &Board, moves: Vec<Move>, maximizing: bool) -> Vec<Move> {
        let weights = weighted_moves(board, self.mover(maximizing));
        let scored = moves
            .into_iter()
            .map(|mv| (mv, weights.get(&mv).copied().unwrap_or(f32::NEG_INFINITY)))
            .collect();
        sort_scored(scored, true)
    }

    fn mover(&self, maximizing: bool) -> Player {
        if maximizing {
            self.player
        } else {
            self.player.opponent()
        }
    }
}

/// Stable sort, descending or ascending by score
fn sort_scored(mut scored: Vec<(Move, f32)>, descending: bool) -> Vec<Move> {
    if descending {
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    } else {
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
    }
    scored.into_iter().map(|(mv, _)| mv).collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(depth: u32) -> SearchEngine {
        SearchEngine::new(
            SearchConfig::default()
                .with_depth(depth)
                .with_time_budget(60.0),
        )
    }

    /// Blue needs only (2,2); Red has no one-move win
    fn threatened_small() -> Board {
        let mut board = Board::new(3).unwrap();
        board.place(1, 0, Player::Red);
        board.place(0, 2, Player::Blue);
        board.place(1, 2, Player::Blue);
        board
    }

    /// Blue owns the right column down to row 3 and needs only (4,4)
    fn threatened_large() -> Board {
        let mut board = Board::new(5).unwrap();
        for row in 0..4 {
            board.place(row, 4, Player::Blue);
        }
        for row in 0..4 {
            board.place(row, 0, Player::Red);
        }
        board
    }

    #[test]
    fn test_returns_legal_move() {
        let board = Board::new(4).unwrap();
        let mut engine = engine(2);
        let mv = engine.best_move(&board, Player::Red).unwrap();
        assert!(board.possible_moves().contains(&mv));
    }

    #[test]
    fn test_search_does_not_mutate_board() {
        let board = threatened_small();
        let before = board.clone();
        engine(3).search(&board, Player::Red);
        assert_eq!(board, before);
    }

    #[test]
    fn test_blocks_single_threat() {
        let mut engine = engine(2);
        let result = engine.search(&threatened_small(), Player::Red);
        assert_eq!(result.best_move, Some(Move::new(2, 2)));
        assert!(!result.fallback);
        assert!(result.score > -WIN_VALUE);
    }

    #[test]
    fn test_blocks_threat_on_larger_board() {
        let board = threatened_large();
        assert_eq!(crate::path::path_cost(&board, Player::Blue), 1);
        let mut engine = engine(2);
        assert_eq!(engine.best_move(&board, Player::Red), Some(Move::new(4, 4)));
    }

    #[test]
    fn test_takes_winning_move() {
        let mut board = Board::new(4).unwrap();
        board.place(1, 0, Player::Red);
        board.place(1, 1, Player::Red);
        board.place(1, 2, Player::Red);
        board.place(0, 0, Player::Blue);
        board.place(0, 1, Player::Blue);
        board.place(3, 3, Player::Blue);

        let mut engine = engine(3);
        let result = engine.search(&board, Player::Red);
        let mv = result.best_move.unwrap();
        assert!(board.with_move(mv, Player::Red).is_connected(Player::Red));
        assert!(result.score >= WIN_VALUE);
    }

    #[test]
    fn test_dynamic_depth() {
        let board = Board::new(4).unwrap();
        let mut engine = SearchEngine::new(SearchConfig::default().with_time_budget(60.0));
        let result = engine.search(&board, Player::Blue);
        assert_eq!(result.depth, 2);
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_pruning_happens() {
        let board = Board::new(4).unwrap();
        let result = engine(3).search(&board, Player::Red);
        assert!(result.cutoffs > 0);
    }

    #[test]
    fn test_zero_budget_falls_back() {
        let board = threatened_small();
        let mut engine = SearchEngine::new(SearchConfig::default().with_time_budget(0.0));
        let result = engine.search(&board, Player::Red);
        assert!(result.fallback);
        assert!(result.timed_out);
        assert!(board.possible_moves().contains(&result.best_move.unwrap()));
    }

    #[test]
    fn test_defensive_move_is_legal() {
        let board = threatened_large();
        let mut engine = engine(1);
        let mv = engine.defensive_move(&board, Player::Red).unwrap();
        assert!(board.possible_moves().contains(&mv));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut board = Board::new(2).unwrap();
        board.place(0, 0, Player::Red);
        board.place(0, 1, Player::Blue);
        board.place(1, 0, Player::Blue);
        board.place(1, 1, Player::Red);
        let result = engine(2).search(&board, Player::Red);
        assert_eq!(result.best_move, None);
        assert!(!result.fallback);
        assert_eq!(
            result.score,
            evaluate(&board, Player::Red, &Weights::default())
        );
        assert!(result.score.is_finite());
    }

    #[test]
    fn test_weighted_ordering_still_blocks() {
        let mut config = SearchConfig::default().with_depth(2).with_time_budget(60.0);
        config.weighted_ordering_above = 0;
        let mut engine = SearchEngine::new(config);
        assert_eq!(engine.best_move(&threatened_small(), Player::Red), Some(Move::new(2, 2)));
    }

    #[test]
    fn test_same_seed_same_move() {
        let board = threatened_large();
        let a = engine(2).best_move(&board, Player::Blue);
        let b = engine(2).best_move(&board, Player::Blue);
        assert_eq!(a, b);
    }
}
