//! Positional heuristics: groups, centrality, adjacency and blocking

use crate::board::{Board, Cell, Player};
use crate::topology::neighbors;

/// `max(0, size - manhattan distance to the board centre)`
///
/// The centre sits between cells on even-sized boards, so distances are
/// measured from `(size - 1) / 2` in both axes.
pub fn centrality(row: usize, col: usize, size: usize) -> f32 {
    let center = (size as f32 - 1.0) / 2.0;
    let distance = (row as f32 - center).abs() + (col as f32 - center).abs();
    (size as f32 - distance).max(0.0)
}

/// Number of `player` stones adjacent to (row, col)
pub fn neighbor_affinity(board: &Board, row: usize, col: usize, player: Player) -> usize {
    neighbors(row, col, board.size())
        .filter(|&(r, c)| board.is_owned_by(r, c, player))
        .count()
}

/// Sizes of the connected groups of `player` stones, in discovery order
pub fn group_sizes(board: &Board, player: Player) -> Vec<usize> {
    let size = board.size();
    let mut visited = vec![false; size * size];
    let mut groups = Vec::new();
    let mut stack = Vec::new();

    for (row, col, cell) in board.cells() {
        if cell != Cell::Stone(player) || visited[row * size + col] {
            continue;
        }
        visited[row * size + col] = true;
        stack.push((row, col));
        let mut count = 0;

        while let Some((r, c)) = stack.pop() {
            count += 1;
            for (nr, nc) in neighbors(r, c, size) {
                let idx = nr * size + nc;
                if !visited[idx] && board.is_owned_by(nr, nc, player) {
                    visited[idx] = true;
                    stack.push((nr, nc));
                }
            }
        }

        groups.push(count);
    }

    groups
}

/// Sum of squared group sizes. A few big groups beat many small ones.
pub fn group_score(board: &Board, player: Player) -> u32 {
    group_sizes(board, player)
        .into_iter()
        .map(|n| (n * n) as u32)
        .sum()
}

/// Group score of the opponent, used as a penalty term for `player`
pub fn blocking_score(board: &Board, player: Player) -> u32 {
    group_score(board, player.opponent())
}

/// Bonus for `player` stones wedged between two opponent stones across the
/// opponent's direction of travel.
///
/// Red cuts Blue's top-to-bottom routes, so a Red stone with Blue on its left
/// and right counts; Blue cuts Red's left-to-right routes, so a Blue stone
/// with Red above and below counts. Each cut is worth more the closer it sits
/// to the edge the opponent is heading for.
pub fn strategic_block_score(board: &Board, player: Player) -> f32 {
    let size = board.size();
    let opponent = player.opponent();
    let mut score = 0.0;

    for (row, col, cell) in board.cells() {
        if cell != Cell::Stone(player) {
            continue;
        }
        let (flanked, progress) = match player {
            Player::Red => (
                col > 0
                    && col + 1 < size
                    && board.is_owned_by(row, col - 1, opponent)
                    && board.is_owned_by(row, col + 1, opponent),
                row,
            ),
            Player::Blue => (
                row > 0
                    && row + 1 < size
                    && board.is_owned_by(row - 1, col, opponent)
                    && board.is_owned_by(row + 1, col, opponent),
                col,
            ),
        };
        if flanked {
            score += (progress + 1) as f32 / size as f32;
        }
    }

    score
}
