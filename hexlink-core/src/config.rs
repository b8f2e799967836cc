//! Search configuration
//!
//! Every tunable the engine reads lives here and is fixed for the lifetime
//! of a [`crate::SearchEngine`].

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::HexError;
use crate::eval::Weights;

/// Step function from "fraction of cells still empty" to search depth.
///
/// Steps are checked in order; the first whose threshold the board exceeds
/// wins. Boards emptier than every threshold fall through to `endgame_depth`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepthPolicy {
    /// (fraction empty strictly above which, depth) pairs, emptiest first
    pub steps: Vec<(f32, u32)>,
    /// Depth once the board is mostly full
    pub endgame_depth: u32,
}

impl Default for DepthPolicy {
    fn default() -> Self {
        Self {
            steps: vec![(0.75, 2), (0.5, 3), (0.25, 4)],
            endgame_depth: 5,
        }
    }
}

impl DepthPolicy {
    /// Search depth for the given board
    pub fn depth_for(&self, board: &Board) -> u32 {
        let empty = board.fraction_empty();
        self.steps
            .iter()
            .find(|&&(threshold, _)| empty > threshold)
            .map(|&(_, depth)| depth)
            .unwrap_or(self.endgame_depth)
    }

    fn validate(&self) -> Result<(), HexError> {
        if self.endgame_depth == 0 || self.steps.iter().any(|&(_, d)| d == 0) {
            return Err(HexError::Config("depths must be at least 1".to_string()));
        }
        let descending = self.steps.windows(2).all(|w| w[0].0 > w[1].0);
        let deepening = self.steps.windows(2).all(|w| w[0].1 <= w[1].1)
            && self.steps.last().map_or(true, |&(_, d)| d <= self.endgame_depth);
        if !descending || !deepening {
            return Err(HexError::Config(
                "depth steps must go from emptiest to fullest with non-decreasing depth".to_string(),
            ));
        }
        Ok(())
    }
}

/// Search engine parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Wall-clock budget per move, in seconds (soft ceiling)
    pub time_budget_secs: f64,
    /// Fixed depth that bypasses the depth policy
    pub depth_override: Option<u32>,
    pub depth_policy: DepthPolicy,
    pub weights: Weights,
    /// Keep only this many ordered candidates at interior nodes
    pub max_branching: Option<usize>,
    /// Above this many empty cells interior nodes order moves by
    /// `weighted_moves` instead of a one-ply evaluation each
    pub weighted_ordering_above: usize,
    /// Seed for the random last-resort move
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: 3.0,
            depth_override: None,
            depth_policy: DepthPolicy::default(),
            weights: Weights::default(),
            max_branching: None,
            weighted_ordering_above: 36,
            seed: 42,
        }
    }
}

impl SearchConfig {
    /// Config with a time budget in seconds
    pub fn with_time_budget(mut self, secs: f64) -> Self {
        self.time_budget_secs = secs;
        self
    }

    /// Config with a fixed search depth
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth_override = Some(depth);
        self
    }

    /// Config with a random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_secs_f64(self.time_budget_secs.max(0.0))
    }

    /// Depth to search `board` at
    pub fn depth_for(&self, board: &Board) -> u32 {
        self.depth_override
            .unwrap_or_else(|| self.depth_policy.depth_for(board))
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<(), HexError> {
        if !self.time_budget_secs.is_finite() || self.time_budget_secs < 0.0 {
            return Err(HexError::Config(format!(
                "time budget must be a non-negative number of seconds, got {}",
                self.time_budget_secs
            )));
        }
        if self.depth_override == Some(0) {
            return Err(HexError::Config("fixed depth must be at least 1".to_string()));
        }
        if self.max_branching == Some(0) {
            return Err(HexError::Config("max branching must be at least 1".to_string()));
        }
        self.depth_policy.validate()
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self, HexError> {
        let content = std::fs::read_to_string(path)?;
        let config: SearchConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), HexError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
