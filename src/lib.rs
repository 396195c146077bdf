//! Duo Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `duo_tetris::{core,input,term,types}`.

pub use duo_tetris_core as core;
pub use duo_tetris_input as input;
pub use duo_tetris_term as term;
pub use duo_tetris_types as types;
