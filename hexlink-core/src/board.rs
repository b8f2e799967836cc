//! Board state, placement and win detection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HexError;
use crate::topology::neighbors;

/// Smallest playable board
pub const MIN_BOARD_SIZE: usize = 2;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player identity
///
/// Red links the left column to the right column, Blue links the top row to
/// the bottom row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Red = 1,
    Blue = 2,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// Numeric id used on the rendered board (1 or 2)
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Player::Red),
            2 => Some(Player::Blue),
            _ => None,
        }
    }

    /// True if (row, col) lies on the edge this player starts from
    pub fn on_start_edge(self, row: usize, col: usize) -> bool {
        match self {
            Player::Red => col == 0,
            Player::Blue => row == 0,
        }
    }

    /// True if (row, col) lies on the edge this player must reach
    pub fn on_goal_edge(self, row: usize, col: usize, size: usize) -> bool {
        match self {
            Player::Red => col + 1 == size,
            Player::Blue => row + 1 == size,
        }
    }

    /// Cells of the starting edge, in edge order
    pub fn start_edge(self, size: usize) -> impl Iterator<Item = (usize, usize)> {
        (0..size).map(move |i| match self {
            Player::Red => (i, 0),
            Player::Blue => (0, i),
        })
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.id())
    }
}

/// State of one cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Stone(Player),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Stone(p) => Some(p),
        }
    }
}

/// A placement into an empty cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Move {
    type Err = HexError;

    /// Parse `row,col`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .trim()
            .split_once(',')
            .ok_or_else(|| HexError::Parse(format!("expected row,col but got '{}'", s.trim())))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| HexError::Parse(format!("'{}' is not a row or column number", part.trim())))
        };
        Ok(Move::new(parse(row)?, parse(col)?))
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Square board of hex cells (clone to explore)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Row-major cells
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty `size` x `size` board
    pub fn new(size: usize) -> Result<Self, HexError> {
        if size < MIN_BOARD_SIZE {
            return Err(HexError::InvalidSize { size });
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Cell state at (row, col). Coordinates must be on the board.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    /// True if (row, col) holds a stone of `player`
    #[inline]
    pub fn is_owned_by(&self, row: usize, col: usize, player: Player) -> bool {
        self.get(row, col) == Cell::Stone(player)
    }

    /// Place a stone. Returns false (and changes nothing) if the cell is
    /// occupied or off the board.
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> bool {
        if !self.contains(row, col) {
            return false;
        }
        let idx = self.index(row, col);
        if self.cells[idx] != Cell::Empty {
            return false;
        }
        self.cells[idx] = Cell::Stone(player);
        true
    }

    /// Like [`Board::place`] but says why a placement was refused
    pub fn try_place(&mut self, mv: Move, player: Player) -> Result<(), HexError> {
        if !self.contains(mv.row, mv.col) {
            return Err(HexError::OutOfBounds {
                row: mv.row,
                col: mv.col,
                size: self.size,
            });
        }
        if !self.place(mv.row, mv.col, player) {
            return Err(HexError::Occupied { row: mv.row, col: mv.col });
        }
        Ok(())
    }

    /// Copy of this board with `mv` played by `player`
    pub fn with_move(&self, mv: Move, player: Player) -> Board {
        let mut child = self.clone();
        child.place(mv.row, mv.col, player);
        child
    }

    /// All empty cells in row-major order
    pub fn possible_moves(&self) -> Vec<Move> {
        self.cells()
            .filter(|&(_, _, cell)| cell.is_empty())
            .map(|(row, col, _)| Move::new(row, col))
            .collect()
    }

    /// Iterate (row, col, cell) in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i / size, i % size, cell))
    }

    pub fn stone_count(&self, player: Player) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Stone(player)).count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Fraction of cells still empty, in [0, 1]
    pub fn fraction_empty(&self) -> f32 {
        self.empty_count() as f32 / self.cells.len() as f32
    }

    /// True if `player` has a chain of stones linking both of their edges.
    ///
    /// Depth-first from every owned cell on the start edge, through owned
    /// neighbours only.
    pub fn is_connected(&self, player: Player) -> bool {
        let mut visited = vec![false; self.cells.len()];
        let mut stack = Vec::with_capacity(self.size);

        for (row, col) in player.start_edge(self.size) {
            if self.is_owned_by(row, col, player) {
                visited[self.index(row, col)] = true;
                stack.push((row, col));
            }
        }

        while let Some((row, col)) = stack.pop() {
            if player.on_goal_edge(row, col, self.size) {
                return true;
            }
            for (nr, nc) in neighbors(row, col, self.size) {
                let idx = self.index(nr, nc);
                if !visited[idx] && self.cells[idx] == Cell::Stone(player) {
                    visited[idx] = true;
                    stack.push((nr, nc));
                }
            }
        }

        false
    }

    /// The connected player, if any
    pub fn winner(&self) -> Option<Player> {
        [Player::Red, Player::Blue]
            .into_iter()
            .find(|&p| self.is_connected(p))
    }
}

// ============================================================================
// TESTS
// ============================================================================
