//! Difficulty ramp shared by both players.

use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;

/// Current score increment and gravity interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub score_increment: u32,
    pub tick_interval_ms: u32,
    /// How many times the ramp has fired
    pub level: u32,
    step_increment: u32,
    step_ms: u32,
    floor_ms: u32,
    lines_threshold: u32,
}

impl Difficulty {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            score_increment: config.base_score_increment,
            tick_interval_ms: config.base_tick_ms.max(config.tick_floor_ms),
            level: 0,
            step_increment: config.score_increment_step,
            step_ms: config.tick_step_ms,
            floor_ms: config.tick_floor_ms.max(1),
            lines_threshold: config.lines_threshold.max(1),
        }
    }

    /// Ramp if `player_lines` just reached a multiple of the threshold.
    ///
    /// Called once per completed line with the scoring player's running count.
    /// Returns `true` when the ramp fired.
    pub fn on_line(&mut self, player_lines: u32) -> bool {
        if player_lines == 0 || player_lines % self.lines_threshold != 0 {
            return false;
        }
        self.score_increment = self.score_increment.saturating_add(self.step_increment);
        self.tick_interval_ms = self
            .tick_interval_ms
            .saturating_sub(self.step_ms)
            .max(self.floor_ms);
        self.level += 1;
        true
    }

    pub fn floor_ms(&self) -> u32 {
        self.floor_ms
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}
