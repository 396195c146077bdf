//! Terminal renderer for the two-player game.
//!
//! Renders into a plain framebuffer instead of a widget toolkit, then flushes the
//! framebuffer with crossterm. Each grid cell is two columns wide to keep the
//! field roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use duo_tetris_core as core;
pub use duo_tetris_types as types;

pub use fb::{piece_color, Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, TerminalRenderer};
