//! Core game logic - the two-player game-state engine
//!
//! Pure and deterministic: no terminal, audio or network access. Collaborators drive
//! it with elapsed time and input intents, then read snapshots and drain events.
//!
//! # Module Structure
//!
//! - [`geometry`]: shape offsets, spawn rows, movement deltas
//! - [`grid`]: per-player 10x19 occupancy map with validity checks
//! - [`piece`]: a tetromino instance and its materialization
//! - [`motion`]: slide/rotate with validate-then-commit
//! - [`line_clear`]: landing, complete-row detection and collapse
//! - [`queue`]: per-player look-ahead queue and spawning
//! - [`difficulty`]: shared score increment and tick interval ramp
//! - [`session`]: [`GameSession`], owning both players
//! - [`events`], [`snapshot`]: the renderer/audio/persistence boundary
//!
//! # Example
//!
//! ```
//! use duo_tetris_core::{GameSession, SessionConfig};
//! use duo_tetris_types::{GameAction, PlayerIndex};
//!
//! let mut session = GameSession::new(SessionConfig::default().with_seed(7));
//! session.start().unwrap();
//!
//! session.apply_action(PlayerIndex::One, GameAction::SlideLeft);
//! session.apply_action(PlayerIndex::Two, GameAction::RotateCw);
//! session.tick(1000);
//!
//! assert!(!session.game_over());
//! assert!(session.drain_events().count() > 0);
//! ```

pub mod config;
pub mod difficulty;
pub mod error;
pub mod events;
pub mod geometry;
pub mod grid;
pub mod line_clear;
pub mod motion;
pub mod piece;
pub mod queue;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use duo_tetris_types as types;

pub use config::{ColorMode, SessionConfig};
pub use difficulty::Difficulty;
pub use error::{MoveRejection, SpawnConflict};
pub use events::{CoreEvent, MoveSource, SoundCue};
pub use grid::{CodeGrid, Grid};
pub use piece::Piece;
pub use queue::PieceQueue;
pub use rng::{ScriptedSource, ShapeSource, SimpleRng};
pub use session::{GameSession, PlayerState};
pub use snapshot::{ActiveSnapshot, FinalScores, GameSnapshot, PlayerSnapshot, ScoreSubmission};
