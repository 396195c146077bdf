//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events to per-player [`crate::types::GameAction`] intents and
//! debounces them with the movement lag before they reach the game session.

pub mod handler;
pub mod map;

pub use duo_tetris_types as types;

pub use handler::{InputHandler, Intent, Intents};
pub use map::{handle_key_event, should_quit};
