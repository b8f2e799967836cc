//! Error type shared by the core and the interactive layer

use thiserror::Error;

/// Everything that can go wrong outside of the search itself.
///
/// The search never produces these: occupied cells, blocked paths and
/// exhausted budgets all resolve to plain values.
#[derive(Debug, Error)]
pub enum HexError {
    #[error("board size must be at least 2, got {size}")]
    InvalidSize { size: usize },

    #[error("cell ({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("cannot parse move: {0}")]
    Parse(String),

    #[error("no legal moves remain")]
    NoLegalMoves,

    #[error("invalid search configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
