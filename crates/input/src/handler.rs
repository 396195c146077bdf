//! Movement-lag debounce for terminal input.
//!
//! Terminals report a held key as a stream of repeated presses. Presses are recorded
//! as pending intents, one per (player, action), and released together once more
//! than the movement lag has elapsed since the last release. Any number of repeats
//! inside one window therefore commit at most one move.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::handle_key_event;
use crate::types::{GameAction, PlayerIndex, MOVEMENT_LAG_MS, PLAYER_COUNT};

/// One player's intent
pub type Intent = (PlayerIndex, GameAction);

/// Distinct intents a window can hold (every action for every player)
pub const MAX_PENDING: usize = PLAYER_COUNT * GameAction::COUNT;

/// Pending intents released after the movement lag
pub type Intents = ArrayVec<Intent, MAX_PENDING>;

#[derive(Debug, Clone)]
pub struct InputHandler {
    pending: Intents,
    accumulator_ms: u32,
    lag_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_lag(MOVEMENT_LAG_MS)
    }

    pub fn with_lag(lag_ms: u32) -> Self {
        Self {
            pending: ArrayVec::new(),
            accumulator_ms: 0,
            lag_ms,
        }
    }

    pub fn lag_ms(&self) -> u32 {
        self.lag_ms
    }

    pub fn pending(&self) -> &[Intent] {
        &self.pending
    }

    /// Record a terminal key event. Returns `true` if it mapped to an intent.
    ///
    /// Release events are ignored.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        match handle_key_event(key) {
            Some((player, action)) => {
                self.press(player, action);
                true
            }
            None => false,
        }
    }

    /// Record an intent; repeats within the current window collapse into one.
    pub fn press(&mut self, player: PlayerIndex, action: GameAction) {
        let intent = (player, action);
        if !self.pending.contains(&intent) {
            // Capacity covers every distinct intent
            let _ = self.pending.try_push(intent);
        }
    }

    /// Advance the debounce clock.
    ///
    /// Once the accumulated time exceeds the lag, every pending intent is emitted in
    /// press order and the accumulator restarts from zero.
    pub fn update(&mut self, elapsed_ms: u32) -> Intents {
        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms);
        if self.accumulator_ms <= self.lag_ms {
            return Intents::new();
        }
        self.accumulator_ms = 0;
        std::mem::take(&mut self.pending)
    }

    /// Drop pending intents and restart the window
    pub fn reset(&mut self) {
        self.pending.clear();
        self.accumulator_ms = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
