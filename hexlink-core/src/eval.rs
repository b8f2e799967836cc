//! Position evaluation

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Player};
use crate::path::{path_cost, UNREACHABLE_COST};
use crate::positional::{
    blocking_score, centrality, group_score, neighbor_affinity, strategic_block_score,
};

/// Win value (effectively infinite)
pub const WIN_VALUE: f32 = 1_000_000.0;

/// Feature weights for position evaluation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    /// Per-stone material difference
    pub material: f32,
    /// Scale `k` of the `k / (1 + cost)` path terms
    pub path: f32,
    /// Opponent path cost at or below which the loss alarm fires
    pub alarm_threshold: u32,
    /// Scale of the loss alarm penalty
    pub alarm_penalty: f32,
    /// Weight of the squared group-size difference
    pub groups: f32,
    /// Centrality weight for contested empty cells
    pub center: f32,
    /// Flat weight per net adjacent stone around empty cells
    pub affinity: f32,
    /// Weight of the strategic-block difference
    pub block: f32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            material: 1.0,
            path: 200.0,
            alarm_threshold: 1,
            alarm_penalty: 5_000.0,
            groups: 2.0,
            center: 0.5,
            affinity: 1.0,
            block: 15.0,
        }
    }
}

/// `k / (1 + cost)`, zero for an unreachable goal
#[inline]
fn path_term(k: f32, cost: u32) -> f32 {
    if cost == UNREACHABLE_COST {
        0.0
    } else {
        k / (1.0 + cost as f32)
    }
}

/// Evaluate `board` from `player`'s point of view (higher is better).
///
/// Terminal positions short-circuit to `WIN_VALUE` / `-WIN_VALUE`.
pub fn evaluate(board: &Board, player: Player, weights: &Weights) -> f32 {
    let opponent = player.opponent();

    if board.is_connected(player) {
        return WIN_VALUE;
    }
    if board.is_connected(opponent) {
        return -WIN_VALUE;
    }

    let size = board.size();
    let mut score = 0.0f32;

    // Material
    let my_stones = board.stone_count(player) as f32;
    let opp_stones = board.stone_count(opponent) as f32;
    score += weights.material * (my_stones - opp_stones);

    // Connection distance
    let my_cost = path_cost(board, player);
    let opp_cost = path_cost(board, opponent);
    score += path_term(weights.path, my_cost);
    score -= path_term(weights.path, opp_cost);
    if opp_cost <= weights.alarm_threshold {
        score -= weights.alarm_penalty / (1.0 + opp_cost as f32);
    }

    // Group structure
    let my_groups = group_score(board, player) as f32;
    let opp_groups = blocking_score(board, player) as f32;
    score += weights.groups * (my_groups - opp_groups);

    // Control of the empty cells
    for (row, col, cell) in board.cells() {
        if cell != Cell::Empty {
            continue;
        }
        let control = neighbor_affinity(board, row, col, player) as f32
            - neighbor_affinity(board, row, col, opponent) as f32;
        if control != 0.0 {
            score += (weights.center * centrality(row, col, size) + weights.affinity) * control;
        }
    }

    // Cuts across the opponent's routes
    score += weights.block
        * (strategic_block_score(board, player) - strategic_block_score(board, opponent));

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_is_balanced() {
        let board = Board::new(5).unwrap();
        let weights = Weights::default();
        assert_eq!(evaluate(&board, Player::Red, &weights), 0.0);
        assert_eq!(evaluate(&board, Player::Blue, &weights), 0.0);
    }

    #[test]
    fn test_terminal_scores() {
        let mut board = Board::new(3).unwrap();
        for row in 0..3 {
            board.place(row, 1, Player::Blue);
        }
        let weights = Weights::default();
        assert_eq!(evaluate(&board, Player::Blue, &weights), WIN_VALUE);
        assert_eq!(evaluate(&board, Player::Red, &weights), -WIN_VALUE);
    }

    #[test]
    fn test_does_not_mutate_board() {
        let mut board = Board::new(4).unwrap();
        board.place(1, 1, Player::Red);
        board.place(2, 2, Player::Blue);
        let before = board.clone();
        evaluate(&board, Player::Red, &Weights::default());
        assert_eq!(board, before);
    }

    #[test]
    fn test_central_stone_beats_corner_stone() {
        let weights = Weights::default();
        let mut center = Board::new(5).unwrap();
        center.place(2, 2, Player::Red);
        let mut corner = Board::new(5).unwrap();
        corner.place(0, 4, Player::Red);
        assert!(
            evaluate(&center, Player::Red, &weights) > evaluate(&corner, Player::Red, &weights)
        );
        assert!(evaluate(&center, Player::Red, &weights) > 0.0);
        assert!(evaluate(&center, Player::Blue, &weights) < 0.0);
    }

    #[test]
    fn test_imminent_loss_alarm() {
        // Blue needs only (2,2) to finish the right-hand column
        let mut board = Board::new(3).unwrap();
        board.place(0, 2, Player::Blue);
        board.place(1, 2, Player::Blue);
        board.place(1, 0, Player::Red);
        let weights = Weights::default();
        let threatened = evaluate(&board, Player::Red, &weights);

        let blocked = board.with_move(crate::board::Move::new(2, 2), Player::Red);
        let elsewhere = board.with_move(crate::board::Move::new(0, 0), Player::Red);
        assert!(threatened < -weights.alarm_penalty / 2.0);
        assert!(
            evaluate(&blocked, Player::Red, &weights) > evaluate(&elsewhere, Player::Red, &weights)
        );
    }

    #[test]
    fn test_default_weights() {
        let w = Weights::default();
        assert!(w.path > w.material);
        assert!(w.alarm_penalty > w.path);
        assert!(w.alarm_threshold >= 1);
    }
}
