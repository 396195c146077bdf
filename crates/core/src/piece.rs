//! Piece module - a tetromino instance owned by one player

use arrayvec::ArrayVec;

use crate::geometry::{cells_at, Coord, PieceCells};
use crate::grid::Grid;
use crate::types::{CellState, ShapeKind, BLOCKS_PER_PIECE};

/// A tetromino: shape, color id, pivot and the four absolute cells it covers.
///
/// A freshly created piece has not been materialized yet; its cells are all at the
/// origin until `materialize_into` or `materialize_preview` places it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    /// Color id used by the renderer; conventionally `kind.index()`
    pub color: u8,
    pivot: Coord,
    cells: PieceCells,
}

impl Piece {
    /// Create a piece whose color matches its shape
    pub fn new(kind: ShapeKind) -> Self {
        Self::with_color(kind, kind.index() as u8)
    }

    pub fn with_color(kind: ShapeKind, color: u8) -> Self {
        Self {
            kind,
            color,
            pivot: (0, 0),
            cells: [(0, 0); BLOCKS_PER_PIECE],
        }
    }

    pub fn pivot(&self) -> Coord {
        self.pivot
    }

    pub fn cells(&self) -> &PieceCells {
        &self.cells
    }

    /// Place the piece at `pivot` on a player's grid, marking its cells active.
    ///
    /// Each cell is tested for validity before it is marked. Cells are written even
    /// when a conflict is found; the caller decides what a conflict means.
    /// Returns `true` if any cell was out of bounds or on a landed cell.
    pub fn materialize_into(&mut self, grid: &mut Grid, pivot: Coord) -> bool {
        self.place(pivot);

        let mut conflict = false;
        for &(x, y) in &self.cells {
            if !grid.is_valid(x, y) {
                conflict = true;
            }
            grid.set(x, y, CellState::Active);
        }
        conflict
    }

    /// Place the piece at `pivot` without touching any grid (preview panel).
    pub fn materialize_preview(&mut self, pivot: Coord) {
        self.place(pivot);
    }

    fn place(&mut self, pivot: Coord) {
        self.pivot = pivot;
        self.cells = cells_at(self.kind, pivot);
    }

    /// Replace the cell coordinates and pivot after a committed move
    pub(crate) fn relocate(&mut self, cells: PieceCells, pivot: Coord) {
        self.cells = cells;
        self.pivot = pivot;
    }

    /// Distinct rows covered by the piece, in first-seen order
    pub fn rows(&self) -> ArrayVec<i8, BLOCKS_PER_PIECE> {
        let mut rows = ArrayVec::new();
        for &(_, y) in &self.cells {
            if !rows.contains(&y) {
                rows.push(y);
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::spawn_pivot;

    #[test]
    fn test_materialize_marks_active_cells() {
        let mut grid = Grid::new();
        let mut piece = Piece::new(ShapeKind::T);

        let conflict = piece.materialize_into(&mut grid, spawn_pivot(ShapeKind::T));

        assert!(!conflict);
        assert_eq!(piece.pivot(), (5, 0));
        assert_eq!(piece.cells(), &[(4, 0), (5, 0), (6, 0), (5, 1)]);
        assert_eq!(grid.count(CellState::Active), 4);
        for &(x, y) in piece.cells() {
            assert_eq!(grid.get(x, y), Some(CellState::Active));
        }
    }

    #[test]
    fn test_materialize_reports_conflict_but_still_writes() {
        let mut grid = Grid::new();
        grid.set(5, 0, CellState::Landed);
        let mut piece = Piece::new(ShapeKind::I);

        assert!(piece.materialize_into(&mut grid, (5, 0)));
        assert_eq!(grid.get(5, 0), Some(CellState::Active));
    }

    #[test]
    fn test_materialize_out_of_bounds_is_conflict() {
        let mut grid = Grid::new();
        let mut piece = Piece::new(ShapeKind::I);

        // I spans x-1..=x+2; pivot at 8 puts a cell at x=10
        assert!(piece.materialize_into(&mut grid, (8, 0)));
        assert_eq!(grid.count(CellState::Active), 3);
    }

    #[test]
    fn test_preview_never_touches_grid() {
        let mut piece = Piece::new(ShapeKind::O);
        piece.materialize_preview((1, 1));
        assert_eq!(piece.cells(), &[(0, 0), (1, 0), (1, 1), (0, 1)]);
    }

    #[test]
    fn test_rows_are_distinct() {
        let mut piece = Piece::new(ShapeKind::L);
        piece.materialize_preview((5, 1));
        assert_eq!(piece.rows().as_slice(), &[0, 1, 2]);

        let mut bar = Piece::new(ShapeKind::I);
        bar.materialize_preview((5, 0));
        assert_eq!(bar.rows().as_slice(), &[0]);
    }

    #[test]
    fn test_color_defaults_to_shape_index() {
        assert_eq!(Piece::new(ShapeKind::Z).color, 6);
        assert_eq!(Piece::with_color(ShapeKind::Z, 2).color, 2);
    }
}
