//! Shortest-connection path heuristic
//!
//! Uniform-cost search over the board graph where a player's own stones are
//! free, empty cells cost one placement and opponent stones are walls.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use crate::board::{Board, Cell, Move, Player};
use crate::positional::{centrality, neighbor_affinity};
use crate::topology::neighbors;

/// Cost reported when the opponent has cut every route
pub const UNREACHABLE_COST: u32 = u32::MAX;

/// Bonus per own stone next to a candidate cell
const ADJACENCY_BONUS: f32 = 2.0;

/// Cost of stepping onto a cell, or None for an opponent stone
#[inline]
fn step_cost(cell: Cell, player: Player) -> Option<u32> {
    match cell {
        Cell::Empty => Some(1),
        Cell::Stone(p) if p == player => Some(0),
        Cell::Stone(_) => None,
    }
}

/// Seed the frontier with every passable cell on the player's start edge
fn seed_frontier(
    board: &Board,
    player: Player,
    dist: &mut [u32],
    heap: &mut BinaryHeap<Reverse<(u32, usize)>>,
) {
    let size = board.size();
    for (row, col) in player.start_edge(size) {
        if let Some(cost) = step_cost(board.get(row, col), player) {
            let idx = row * size + col;
            dist[idx] = cost;
            heap.push(Reverse((cost, idx)));
        }
    }
}

/// Minimal number of empty cells `player` must still fill to link both edges.
///
/// Zero means the player is already connected; [`UNREACHABLE_COST`] means no
/// route survives.
pub fn path_cost(board: &Board, player: Player) -> u32 {
    let size = board.size();
    let mut dist = vec![UNREACHABLE_COST; size * size];
    let mut heap = BinaryHeap::new();
    seed_frontier(board, player, &mut dist, &mut heap);

    while let Some(Reverse((cost, idx))) = heap.pop() {
        if cost > dist[idx] {
            continue;
        }
        let (row, col) = (idx / size, idx % size);
        if player.on_goal_edge(row, col, size) {
            return cost;
        }
        for (nr, nc) in neighbors(row, col, size) {
            let Some(step) = step_cost(board.get(nr, nc), player) else {
                continue;
            };
            let next = cost + step;
            let nidx = nr * size + nc;
            if next < dist[nidx] {
                dist[nidx] = next;
                heap.push(Reverse((next, nidx)));
            }
        }
    }

    UNREACHABLE_COST
}

/// Desirability of every empty cell the player can still route through.
///
/// Runs the same search as [`path_cost`] without stopping at the goal. Each
/// empty cell gets its centrality and own-neighbour bonus once, plus a share
/// of `1 / (1 + cost)` from every settled cell that reaches it, so cells that
/// are cheap to get to from many directions rank highest.
pub fn weighted_moves(board: &Board, player: Player) -> FxHashMap<Move, f32> {
    let size = board.size();
    let mut dist = vec![UNREACHABLE_COST; size * size];
    let mut settled = vec![false; size * size];
    let mut heap = BinaryHeap::new();
    let mut weights: FxHashMap<Move, f32> = FxHashMap::default();
    seed_frontier(board, player, &mut dist, &mut heap);

    while let Some(Reverse((cost, idx))) = heap.pop() {
        if settled[idx] {
            continue;
        }
        settled[idx] = true;
        let (row, col) = (idx / size, idx % size);

        if board.get(row, col).is_empty() {
            let own = neighbor_affinity(board, row, col, player) as f32;
            *weights.entry(Move::new(row, col)).or_insert(0.0) +=
                centrality(row, col, size) + ADJACENCY_BONUS * own;
        }

        let reach = 1.0 / (1.0 + cost as f32);
        for (nr, nc) in neighbors(row, col, size) {
            let cell = board.get(nr, nc);
            let Some(step) = step_cost(cell, player) else {
                continue;
            };
            if cell.is_empty() {
                *weights.entry(Move::new(nr, nc)).or_insert(0.0) += reach;
            }
            let next = cost + step;
            let nidx = nr * size + nc;
            if next < dist[nidx] {
                dist[nidx] = next;
                heap.push(Reverse((next, nidx)));
            }
        }
    }

    weights
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    fn random_board(rng: &mut ChaCha8Rng, size: usize) -> Board {
        let mut board = Board::new(size).unwrap();
        let mut moves = board.possible_moves();
        moves.shuffle(rng);
        let stones = rng.gen_range(0..=moves.len());
        let mut player = Player::Red;
        for mv in moves.into_iter().take(stones) {
            board.place(mv.row, mv.col, player);
            player = player.opponent();
        }
        board
    }

    #[test]
    fn test_empty_board_cost_is_size() {
        for size in 2..8 {
            let board = Board::new(size).unwrap();
            assert_eq!(path_cost(&board, Player::Red), size as u32);
            assert_eq!(path_cost(&board, Player::Blue), size as u32);
        }
    }

    #[test]
    fn test_own_stones_are_free() {
        let mut board = Board::new(5).unwrap();
        board.place(2, 1, Player::Red);
        board.place(2, 2, Player::Red);
        assert_eq!(path_cost(&board, Player::Red), 3);
    }

    #[test]
    fn test_opponent_column_severs_red() {
        let mut board = Board::new(3).unwrap();
        for row in 0..3 {
            board.place(row, 1, Player::Blue);
        }
        assert_eq!(path_cost(&board, Player::Red), UNREACHABLE_COST);
        assert_eq!(path_cost(&board, Player::Blue), 0);
    }

    #[test]
    fn test_opponent_wall_forces_detour() {
        // Blue holds the middle column except the bottom cell
        let mut board = Board::new(3).unwrap();
        board.place(0, 1, Player::Blue);
        board.place(1, 1, Player::Blue);
        assert_eq!(path_cost(&board, Player::Red), 3);
        board.place(2, 1, Player::Blue);
        assert_eq!(path_cost(&board, Player::Red), UNREACHABLE_COST);
    }

    #[test]
    fn test_zero_cost_iff_connected() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..500 {
            let size = rng.gen_range(2..8);
            let board = random_board(&mut rng, size);
            for player in [Player::Red, Player::Blue] {
                assert_eq!(
                    path_cost(&board, player) == 0,
                    board.is_connected(player),
                    "{:?}",
                    board
                );
            }
        }
    }

    #[test]
    fn test_own_placement_never_increases_cost() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            let size = rng.gen_range(2..7);
            let board = random_board(&mut rng, size);
            for player in [Player::Red, Player::Blue] {
                let before = path_cost(&board, player);
                let mut improved = false;
                for mv in board.possible_moves() {
                    let after = path_cost(&board.with_move(mv, player), player);
                    assert!(after <= before);
                    improved |= after < before;
                }
                if before > 0 && before != UNREACHABLE_COST {
                    assert!(improved, "some empty cell lies on a shortest path");
                }
            }
        }
    }

    #[test]
    fn test_weighted_moves_prefers_center() {
        let board = Board::new(5).unwrap();
        let weights = weighted_moves(&board, Player::Red);
        assert_eq!(weights.len(), 25);
        assert!(weights[&Move::new(2, 2)] > weights[&Move::new(0, 0)]);
        assert!(weights[&Move::new(2, 2)] > weights[&Move::new(4, 4)]);
    }

    #[test]
    fn test_weighted_moves_rewards_own_neighbors() {
        let empty = Board::new(5).unwrap();
        let mut board = empty.clone();
        board.place(2, 2, Player::Red);
        let before = weighted_moves(&empty, Player::Red);
        let after = weighted_moves(&board, Player::Red);
        assert!(after[&Move::new(2, 1)] > before[&Move::new(2, 1)] + 1.5);
        assert!(!after.contains_key(&Move::new(2, 2)));
    }

    #[test]
    fn test_weighted_moves_skips_unreachable_cells() {
        let mut board = Board::new(3).unwrap();
        for row in 0..3 {
            board.place(row, 1, Player::Blue);
        }
        let weights = weighted_moves(&board, Player::Red);
        assert!(!weights.is_empty());
        assert!(weights.keys().all(|mv| mv.col == 0));
    }
}
