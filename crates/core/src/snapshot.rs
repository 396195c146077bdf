//! Read-only views of a session for renderers and persistence.

use serde::{Deserialize, Serialize};

use crate::geometry::{Coord, PieceCells};
use crate::grid::CodeGrid;
use crate::piece::Piece;
use crate::types::{PlayerIndex, ShapeKind, GRID_HEIGHT, GRID_WIDTH, MAX_PREVIEW_COUNT, PLAYER_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub color: u8,
    pub pivot: Coord,
    pub cells: PieceCells,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            color: value.color,
            pivot: value.pivot(),
            cells: *value.cells(),
        }
    }
}

/// One player's side of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Cell codes: 0 empty, 1 active, 2 landed
    pub grid: CodeGrid,
    pub active: Option<ActiveSnapshot>,
    /// Where the active piece would come to rest
    pub landing: Option<PieceCells>,
    /// Upcoming pieces, next first; unused slots are `None`
    pub next_queue: [Option<ShapeKind>; MAX_PREVIEW_COUNT],
    pub next_colors: [u8; MAX_PREVIEW_COUNT],
    pub score: u32,
    pub lines: u32,
}

impl PlayerSnapshot {
    pub fn clear(&mut self) {
        self.grid = [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
        self.active = None;
        self.landing = None;
        self.next_queue = [None; MAX_PREVIEW_COUNT];
        self.next_colors = [0; MAX_PREVIEW_COUNT];
        self.score = 0;
        self.lines = 0;
    }

    /// Queued shapes that are actually present
    pub fn previews(&self) -> impl Iterator<Item = (ShapeKind, u8)> + '_ {
        self.next_queue
            .iter()
            .zip(self.next_colors.iter())
            .filter_map(|(kind, &color)| kind.map(|k| (k, color)))
    }
}

impl Default for PlayerSnapshot {
    fn default() -> Self {
        Self {
            grid: [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            active: None,
            landing: None,
            next_queue: [None; MAX_PREVIEW_COUNT],
            next_colors: [0; MAX_PREVIEW_COUNT],
            score: 0,
            lines: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: [PlayerSnapshot; PLAYER_COUNT],
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
    pub score_increment: u32,
    pub tick_interval_ms: u32,
    pub level: u32,
}

impl GameSnapshot {
    pub fn player(&self, player: PlayerIndex) -> &PlayerSnapshot {
        &self.players[player.index()]
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over && !self.paused
    }
}

/// Final per-player results, exposed once the session is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FinalScores {
    pub scores: [u32; PLAYER_COUNT],
    pub lines: [u32; PLAYER_COUNT],
}

impl FinalScores {
    pub fn score(&self, player: PlayerIndex) -> u32 {
        self.scores[player.index()]
    }

    /// Higher score wins; `None` on a tie
    pub fn winner(&self) -> Option<PlayerIndex> {
        let [one, two] = self.scores;
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => Some(PlayerIndex::One),
            std::cmp::Ordering::Less => Some(PlayerIndex::Two),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn total(&self) -> u32 {
        self.scores.iter().sum()
    }
}

/// Payload for an external score submission (name + score)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub name: String,
    pub score: u32,
}
