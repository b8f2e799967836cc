//! HEXLINK CLI - terminal front end
//!
//! - display: text rendering of the board
//! - human: interactive move prompt
//! - game: the turn loop
//! - play_cmd / match_cmd: subcommands

pub mod display;
pub mod human;
pub mod game;
pub mod play_cmd;
pub mod match_cmd;

use std::path::Path;

use anyhow::{Context, Result};
use hexlink_core::SearchConfig;

/// Build the search configuration from an optional file plus CLI overrides
pub fn build_search_config(
    config_path: Option<&Path>,
    time_budget_secs: Option<f64>,
    depth: Option<u32>,
    seed: Option<u64>,
) -> Result<SearchConfig> {
    let mut config = match config_path {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("Failed to load search config: {}", path.display()))?,
        None => SearchConfig::default(),
    };

    if let Some(secs) = time_budget_secs {
        config.time_budget_secs = secs;
    }
    if depth.is_some() {
        config.depth_override = depth;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }

    config.validate().context("Invalid search settings")?;
    Ok(config)
}
