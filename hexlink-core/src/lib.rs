//! HEXLINK Core - Connection-game engine and AI
//!
//! This crate provides the core logic for HEXLINK:
//! - Board state, placement and win detection
//! - Hex adjacency on a square matrix (row-parity offsets)
//! - Shortest-connection path heuristic
//! - Positional heuristics and position evaluation
//! - Time-boxed alpha-beta search and the move-selecting agent

pub mod error;
pub mod topology;
pub mod board;
pub mod path;
pub mod positional;
pub mod eval;
pub mod config;
pub mod search;
pub mod agent;

// Re-exports for convenient access
pub use error::HexError;
pub use topology::{neighbors, EVEN_ROW_OFFSETS, ODD_ROW_OFFSETS};
pub use board::{Board, Cell, Move, Player, MIN_BOARD_SIZE};
pub use path::{path_cost, weighted_moves, UNREACHABLE_COST};
pub use eval::{evaluate, Weights, WIN_VALUE};
pub use config::{DepthPolicy, SearchConfig};
pub use search::{SearchEngine, SearchResult};
pub use agent::{Agent, Controller};
