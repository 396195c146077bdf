//! Session configuration.
//!
//! Defaults match the two-player desktop layout. Every field can be
//! overridden from the environment:
//!
//! - `DUO_TETRIS_SEED`: RNG seed
//! - `DUO_TETRIS_PREVIEW`: upcoming pieces shown per player (1-5)
//! - `DUO_TETRIS_TICK_MS`: initial gravity interval
//! - `DUO_TETRIS_COLOR_MODE`: `shape` or `independent`
//! - `DUO_TETRIS_MOVEMENT_LAG_MS`: input debounce window

use std::env;

use serde::{Deserialize, Serialize};

use crate::types::{
    BASE_SCORE_INCREMENT, BASE_TICK_MS, DEFAULT_PREVIEW_COUNT, LINES_THRESHOLD,
    MAX_PREVIEW_COUNT, MOVEMENT_LAG_MS, SCORE_INCREMENT_STEP, TICK_FLOOR_MS, TICK_STEP_MS,
};

/// How a new piece picks its color id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color id equals the shape index
    #[default]
    Shape,
    /// Color id drawn from the random source independently of the shape
    Independent,
}

impl ColorMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "shape" => Some(ColorMode::Shape),
            "independent" | "random" => Some(ColorMode::Independent),
            _ => None,
        }
    }
}

/// Tunables for one game session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub seed: u32,
    /// Upcoming pieces kept visible per player
    pub preview_count: usize,
    pub base_tick_ms: u32,
    pub tick_step_ms: u32,
    pub tick_floor_ms: u32,
    pub base_score_increment: u32,
    pub score_increment_step: u32,
    pub lines_threshold: u32,
    pub movement_lag_ms: u32,
    pub color_mode: ColorMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            preview_count: DEFAULT_PREVIEW_COUNT,
            base_tick_ms: BASE_TICK_MS,
            tick_step_ms: TICK_STEP_MS,
            tick_floor_ms: TICK_FLOOR_MS,
            base_score_increment: BASE_SCORE_INCREMENT,
            score_increment_step: SCORE_INCREMENT_STEP,
            lines_threshold: LINES_THRESHOLD,
            movement_lag_ms: MOVEMENT_LAG_MS,
            color_mode: ColorMode::Shape,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables, falling back to defaults for anything
    /// missing or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` with an explicit lookup (keeps tests off the process env)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parse_u32 = |key: &str, default: u32| {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        };

        let preview_count = lookup("DUO_TETRIS_PREVIEW")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(defaults.preview_count);

        let color_mode = lookup("DUO_TETRIS_COLOR_MODE")
            .and_then(|s| ColorMode::from_str(&s))
            .unwrap_or(defaults.color_mode);

        Self {
            seed: parse_u32("DUO_TETRIS_SEED", defaults.seed),
            preview_count,
            base_tick_ms: parse_u32("DUO_TETRIS_TICK_MS", defaults.base_tick_ms),
            movement_lag_ms: parse_u32("DUO_TETRIS_MOVEMENT_LAG_MS", defaults.movement_lag_ms),
            color_mode,
            ..defaults
        }
        .sanitized()
    }

    /// Clamp values the engine cannot run with
    pub fn sanitized(mut self) -> Self {
        self.preview_count = self.preview_count.clamp(1, MAX_PREVIEW_COUNT);
        self.tick_floor_ms = self.tick_floor_ms.max(1);
        self.base_tick_ms = self.base_tick_ms.max(self.tick_floor_ms);
        self.lines_threshold = self.lines_threshold.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_preview_count(mut self, preview_count: usize) -> Self {
        self.preview_count = preview_count;
        self.sanitized()
    }
}
