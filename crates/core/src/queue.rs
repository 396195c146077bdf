//! Queue controller - per-player look-ahead queue and spawning
//!
//! The queue is consumed from the front (next piece to fall) and produced at the
//! back (newest look-ahead). Before every spawn it is topped up so that after the pop
//! `preview_count` entries remain visible.

use std::collections::VecDeque;

use crate::config::ColorMode;
use crate::geometry::{preview_pivot, spawn_pivot};
use crate::grid::Grid;
use crate::piece::Piece;
use crate::rng::ShapeSource;
use crate::types::{ShapeKind, MAX_PREVIEW_COUNT};

/// Result of a spawn request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawned {
    pub piece: Piece,
    /// At least one spawn cell was out of bounds or already landed
    pub conflict: bool,
}

#[derive(Debug, Clone)]
pub struct PieceQueue {
    entries: VecDeque<Piece>,
    preview_count: usize,
    color_mode: ColorMode,
}

impl PieceQueue {
    pub fn new(preview_count: usize, color_mode: ColorMode) -> Self {
        let preview_count = preview_count.clamp(1, MAX_PREVIEW_COUNT);
        Self {
            entries: VecDeque::with_capacity(preview_count + 1),
            preview_count,
            color_mode,
        }
    }

    pub fn preview_count(&self) -> usize {
        self.preview_count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Queued pieces, next-to-spawn first
    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.entries.iter()
    }

    /// Shapes of the queued pieces, next-to-spawn first
    pub fn kinds(&self) -> impl Iterator<Item = ShapeKind> + '_ {
        self.entries.iter().map(|p| p.kind)
    }

    /// Pull random pieces until at least `preview_count + 1` are queued.
    pub fn top_up<S: ShapeSource + ?Sized>(&mut self, source: &mut S) {
        while self.entries.len() < self.preview_count + 1 {
            let kind = source.next_shape();
            let piece = match self.color_mode {
                ColorMode::Shape => Piece::new(kind),
                ColorMode::Independent => Piece::with_color(kind, source.next_color()),
            };
            self.entries.push_back(piece);
        }
    }

    /// Top up, pop the next piece, materialize it at its spawn position in `grid`
    /// and move the remaining entries to their preview slots.
    ///
    /// The popped piece is written into the grid even when it conflicts.
    pub fn spawn_into<S: ShapeSource + ?Sized>(&mut self, grid: &mut Grid, source: &mut S) -> Option<Spawned> {
        self.top_up(source);
        let mut piece = self.entries.pop_front()?;
        let conflict = piece.materialize_into(grid, spawn_pivot(piece.kind));
        self.layout_previews();
        Some(Spawned { piece, conflict })
    }

    fn layout_previews(&mut self) {
        for (slot, piece) in self.entries.iter_mut().enumerate() {
            piece.materialize_preview(preview_pivot(slot));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;
    use crate::types::CellState;

    #[test]
    fn test_top_up_fills_preview_plus_one() {
        let mut queue = PieceQueue::new(3, ColorMode::Shape);
        let mut source = ScriptedSource::from_letters("ijlo");
        queue.top_up(&mut source);
        assert_eq!(queue.len(), 4);
        // Already full: nothing more is drawn
        queue.top_up(&mut source);
        assert_eq!(queue.len(), 4);
        assert_eq!(
            queue.kinds().collect::<Vec<_>>(),
            vec![ShapeKind::I, ShapeKind::J, ShapeKind::L, ShapeKind::O]
        );
    }

    #[test]
    fn test_spawn_pops_front_and_keeps_previews() {
        let mut queue = PieceQueue::new(1, ColorMode::Shape);
        let mut source = ScriptedSource::from_letters("tsz");
        let mut grid = Grid::new();

        let spawned = queue.spawn_into(&mut grid, &mut source).unwrap();
        assert!(!spawned.conflict);
        assert_eq!(spawned.piece.kind, ShapeKind::T);
        assert_eq!(spawned.piece.pivot(), (5, 0));
        assert_eq!(grid.count(CellState::Active), 4);

        assert_eq!(queue.len(), 1);
        let preview = queue.iter().next().unwrap();
        assert_eq!(preview.kind, ShapeKind::S);
        assert_eq!(preview.pivot(), preview_pivot(0));

        let second = queue.spawn_into(&mut Grid::new(), &mut source).unwrap();
        assert_eq!(second.piece.kind, ShapeKind::S);
        assert_eq!(queue.kinds().next(), Some(ShapeKind::Z));
    }

    #[test]
    fn test_previews_never_touch_grid() {
        let mut queue = PieceQueue::new(5, ColorMode::Shape);
        let mut source = ScriptedSource::from_letters("ioiioo");
        let mut grid = Grid::new();

        queue.spawn_into(&mut grid, &mut source).unwrap();
        assert_eq!(queue.len(), 5);
        assert_eq!(grid.count(CellState::Active), 4);
        for (slot, piece) in queue.iter().enumerate() {
            assert_eq!(piece.pivot(), preview_pivot(slot));
        }
    }

    #[test]
    fn test_spawn_conflict_over_landed_stack() {
        let mut queue = PieceQueue::new(1, ColorMode::Shape);
        let mut source = ScriptedSource::from_letters("o");
        let mut grid = Grid::new();
        for (x, y) in crate::geometry::cells_at(ShapeKind::O, spawn_pivot(ShapeKind::O)) {
            grid.set(x, y, CellState::Landed);
        }

        let spawned = queue.spawn_into(&mut grid, &mut source).unwrap();
        assert!(spawned.conflict);
    }

    #[test]
    fn test_independent_colors_come_from_source() {
        let mut queue = PieceQueue::new(1, ColorMode::Independent);
        // Scripted colors follow the drawn shape
        let mut source = ScriptedSource::from_letters("z");
        queue.top_up(&mut source);
        let piece = queue.iter().next().unwrap();
        assert_eq!(piece.color, ShapeKind::Z.index() as u8);
    }
}
