//! Events emitted on every committed mutation.
//!
//! The session buffers them; renderer and audio collaborators drain the buffer after
//! each tick or input and react. The core holds no drawing or sound state.

use arrayvec::ArrayVec;

use crate::geometry::PieceCells;
use crate::line_clear::RowSet;
use crate::types::{MoveAction, PlayerIndex, ShapeKind, MAX_PREVIEW_COUNT};

/// What caused a piece to move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    Input,
    Gravity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreEvent {
    PieceSpawned {
        player: PlayerIndex,
        kind: ShapeKind,
        color: u8,
        cells: PieceCells,
    },
    PreviewUpdated {
        player: PlayerIndex,
        kinds: ArrayVec<ShapeKind, MAX_PREVIEW_COUNT>,
    },
    PieceMoved {
        player: PlayerIndex,
        action: MoveAction,
        from: PieceCells,
        to: PieceCells,
        source: MoveSource,
    },
    PieceLanded {
        player: PlayerIndex,
        cells: PieceCells,
    },
    RowCleared {
        player: PlayerIndex,
        row: usize,
    },
    /// Stack shifted down onto the given (already emptied) rows
    RowsCollapsed {
        player: PlayerIndex,
        rows: RowSet,
    },
    LineCompleted {
        player: PlayerIndex,
        score: u32,
        lines: u32,
    },
    DifficultyRaised {
        score_increment: u32,
        tick_interval_ms: u32,
    },
    PauseToggled {
        paused: bool,
    },
    GameOver {
        /// Player whose spawn conflicted
        player: PlayerIndex,
    },
}

/// Discrete cues for a sound collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Moved,
    LineCompleted,
    GameOver,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Moved => "moved",
            SoundCue::LineCompleted => "lineCompleted",
            SoundCue::GameOver => "gameOver",
        }
    }
}

impl CoreEvent {
    /// Sound cue for this event, if any. Gravity moves are silent.
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            CoreEvent::PieceMoved {
                source: MoveSource::Input,
                ..
            } => Some(SoundCue::Moved),
            CoreEvent::LineCompleted { .. } => Some(SoundCue::LineCompleted),
            CoreEvent::GameOver { .. } => Some(SoundCue::GameOver),
            _ => None,
        }
    }

    /// Player the event belongs to; `None` for session-wide events
    pub fn player(&self) -> Option<PlayerIndex> {
        match self {
            CoreEvent::PieceSpawned { player, .. }
            | CoreEvent::PreviewUpdated { player, .. }
            | CoreEvent::PieceMoved { player, .. }
            | CoreEvent::PieceLanded { player, .. }
            | CoreEvent::RowCleared { player, .. }
            | CoreEvent::RowsCollapsed { player, .. }
            | CoreEvent::LineCompleted { player, .. }
            | CoreEvent::GameOver { player } => Some(*player),
            CoreEvent::DifficultyRaised { .. } | CoreEvent::PauseToggled { .. } => None,
        }
    }
}
