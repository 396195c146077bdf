//! Shared types module - data structures and constants used by every crate
//!
//! All types here are plain data with no behaviour beyond parsing and formatting,
//! so they can be used by the engine, the input mapper and the renderer alike.
//!
//! # Grid Dimensions
//!
//! Each player owns one grid:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 19 rows (indexed 0-18, row 0 at the top)
//! - **Spawn column**: 5 (`GRID_WIDTH / 2`)
//!
//! # Timing and Difficulty
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_TICK_MS` | 1000 | Gravity interval at the start of a session |
//! | `TICK_STEP_MS` | 100 | Interval reduction per difficulty step |
//! | `TICK_FLOOR_MS` | 100 | Gravity interval never drops below this |
//! | `BASE_SCORE_INCREMENT` | 50 | Points per completed line at the start |
//! | `SCORE_INCREMENT_STEP` | 25 | Extra points per line per difficulty step |
//! | `LINES_THRESHOLD` | 3 | Completed lines per difficulty step |
//! | `MOVEMENT_LAG_MS` | 100 | Input debounce window |
//!
//! # Examples
//!
//! ```
//! use duo_tetris_types::{GameAction, ShapeKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! let shape = ShapeKind::from_str("t").unwrap();
//! assert_eq!(shape, ShapeKind::T);
//!
//! let action = GameAction::from_str("slideLeft").unwrap();
//! assert_eq!(action, GameAction::SlideLeft);
//!
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 19);
//! ```

use serde::{Deserialize, Serialize};

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Grid height in cells (19 rows)
pub const GRID_HEIGHT: u8 = 19;

/// Number of cells in every piece
pub const BLOCKS_PER_PIECE: usize = 4;

/// Number of distinct shapes
pub const SHAPE_COUNT: usize = 7;

/// Number of simultaneously simulated players
pub const PLAYER_COUNT: usize = 2;

/// Initial gravity interval (one row per second)
pub const BASE_TICK_MS: u32 = 1000;

/// Gravity speed-up applied at every difficulty step
pub const TICK_STEP_MS: u32 = 100;

/// Lowest gravity interval the difficulty ramp can reach
pub const TICK_FLOOR_MS: u32 = 100;

/// Points awarded per completed line at the start of a session
pub const BASE_SCORE_INCREMENT: u32 = 50;

/// Extra points per line added at every difficulty step
pub const SCORE_INCREMENT_STEP: u32 = 25;

/// Completed lines between two difficulty steps
pub const LINES_THRESHOLD: u32 = 3;

/// Two inputs closer than this are treated as one
pub const MOVEMENT_LAG_MS: u32 = 100;

/// Default number of upcoming pieces shown per player
pub const DEFAULT_PREVIEW_COUNT: usize = 1;

/// Largest supported preview length
pub const MAX_PREVIEW_COUNT: usize = 5;


/// The seven tetromino shapes, in the order of the shape table.
///
/// The index of a shape is also its conventional color id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    L,
    J,
    I,
    O,
    S,
    T,
    Z,
}

impl ShapeKind {
    /// All shapes in table order
    pub const ALL: [ShapeKind; SHAPE_COUNT] = [
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// Position in the shape table
    pub fn index(&self) -> usize {
        match self {
            ShapeKind::L => 0,
            ShapeKind::J => 1,
            ShapeKind::I => 2,
            ShapeKind::O => 3,
            ShapeKind::S => 4,
            ShapeKind::T => 5,
            ShapeKind::Z => 6,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse shape from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use duo_tetris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("Z"), Some(ShapeKind::Z));
    /// assert_eq!(ShapeKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "s" => Some(ShapeKind::S),
            "t" => Some(ShapeKind::T),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::L => "l",
            ShapeKind::J => "j",
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::S => "s",
            ShapeKind::T => "t",
            ShapeKind::Z => "z",
        }
    }
}

/// State of a single grid cell.
///
/// A cell is in exactly one state at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    #[default]
    Empty,
    /// Occupied by the player's currently falling piece
    Active,
    /// Occupied by a piece that has come to rest
    Landed,
}

impl CellState {
    /// Numeric code used in snapshots: 0 empty, 1 active, 2 landed
    pub fn code(&self) -> u8 {
        match self {
            CellState::Empty => 0,
            CellState::Active => 1,
            CellState::Landed => 2,
        }
    }
}

/// Which of the two players an operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerIndex {
    One,
    Two,
}

impl PlayerIndex {
    pub const ALL: [PlayerIndex; PLAYER_COUNT] = [PlayerIndex::One, PlayerIndex::Two];

    pub fn index(&self) -> usize {
        match self {
            PlayerIndex::One => 0,
            PlayerIndex::Two => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn other(&self) -> Self {
        match self {
            PlayerIndex::One => PlayerIndex::Two,
            PlayerIndex::Two => PlayerIndex::One,
        }
    }
}

/// Slide directions. Pieces never move up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
}

/// A transform of the active piece, validated as a whole before it is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveAction {
    Left,
    Right,
    Down,
    /// Rotate 90° clockwise around the pivot
    RotateCw,
    /// Rotate 90° counter-clockwise around the pivot
    RotateCcw,
}

impl MoveAction {
    pub fn slide(direction: Direction) -> Self {
        match direction {
            Direction::Left => MoveAction::Left,
            Direction::Right => MoveAction::Right,
            Direction::Down => MoveAction::Down,
        }
    }

    /// The slide direction, or `None` for rotations
    pub fn direction(&self) -> Option<Direction> {
        match self {
            MoveAction::Left => Some(Direction::Left),
            MoveAction::Right => Some(Direction::Right),
            MoveAction::Down => Some(Direction::Down),
            MoveAction::RotateCw | MoveAction::RotateCcw => None,
        }
    }

    pub fn is_rotation(&self) -> bool {
        self.direction().is_none()
    }
}

/// Discrete player intents delivered by the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    SlideLeft,
    /// Move piece one cell right
    SlideRight,
    /// Move piece one cell down
    SlideDown,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle pause state
    Pause,
}

impl GameAction {
    /// Number of distinct intents
    pub const COUNT: usize = 6;

    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use duo_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("slideRight"), Some(GameAction::SlideRight));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slideleft" => Some(GameAction::SlideLeft),
            "slideright" => Some(GameAction::SlideRight),
            "slidedown" => Some(GameAction::SlideDown),
            "rotate" | "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "pause" => Some(GameAction::Pause),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::SlideLeft => "slideLeft",
            GameAction::SlideRight => "slideRight",
            GameAction::SlideDown => "slideDown",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Pause => "pause",
        }
    }

    /// The piece transform this intent requests, if any
    pub fn move_action(&self) -> Option<MoveAction> {
        match self {
            GameAction::SlideLeft => Some(MoveAction::Left),
            GameAction::SlideRight => Some(MoveAction::Right),
            GameAction::SlideDown => Some(MoveAction::Down),
            GameAction::RotateCw => Some(MoveAction::RotateCw),
            GameAction::RotateCcw => Some(MoveAction::RotateCcw),
            GameAction::Pause => None,
        }
    }
}
