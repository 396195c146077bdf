//! Rejected transitions.
//!
//! Nothing in the engine fails with a panic: a move that cannot be applied is
//! reported as a `MoveRejection` and leaves all state untouched.

use crate::types::PlayerIndex;

/// Why a slide or rotation was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    #[error("game is paused")]
    Paused,
    #[error("game is over")]
    GameOver,
    #[error("game has not started")]
    NotStarted,
    #[error("player has no falling piece")]
    NoActivePiece,
    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i8, y: i8 },
    #[error("cell ({x}, {y}) is already landed")]
    Blocked { x: i8, y: i8 },
}

/// A new piece overlapped landed cells (or left the grid) when it spawned
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("spawn conflict for player {}", player.index())]
pub struct SpawnConflict {
    pub player: PlayerIndex,
}
