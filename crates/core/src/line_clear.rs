//! Line-clear and gravity engine
//!
//! Runs once a piece can no longer move down: its cells become landed, the rows it
//! touches are checked for completion, complete rows are emptied and the stack above
//! each one collapses downward.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::piece::Piece;
use crate::types::{CellState, BLOCKS_PER_PIECE};

/// Row indices touched by one landed piece (at most four)
pub type RowSet = ArrayVec<usize, BLOCKS_PER_PIECE>;

/// Commit the piece's cells as landed and return the distinct rows it touched.
pub fn land(grid: &mut Grid, piece: &Piece) -> RowSet {
    for &(x, y) in piece.cells() {
        grid.set(x, y, CellState::Landed);
    }
    piece
        .rows()
        .iter()
        .filter(|&&y| y >= 0)
        .map(|&y| y as usize)
        .collect()
}

/// Candidate rows that are completely landed, sorted top to bottom.
pub fn complete_rows(grid: &Grid, candidates: &[usize]) -> RowSet {
    let mut rows: RowSet = candidates
        .iter()
        .copied()
        .filter(|&y| grid.is_row_complete(y))
        .collect();
    rows.sort_unstable();
    rows
}

/// Collapse the stack onto already-emptied rows.
///
/// Rows are processed from the topmost to the bottommost. Each pass shifts only the
/// rows strictly above the current one down by one, so non-adjacent clears end up
/// with every surviving row dropped by the number of cleared rows below it.
pub fn collapse(grid: &mut Grid, rows: &[usize]) {
    let mut sorted: RowSet = rows.iter().copied().collect();
    sorted.sort_unstable();
    for &y in &sorted {
        grid.shift_down_onto(y);
    }
}

/// Land `piece`, remove every completed row it touched and collapse the stack.
///
/// Returns the removed rows (top to bottom); empty when nothing was completed.
pub fn land_and_clear(grid: &mut Grid, piece: &Piece) -> RowSet {
    let touched = land(grid, piece);
    let completed = complete_rows(grid, &touched);
    for &y in &completed {
        grid.clear_row(y);
    }
    if !completed.is_empty() {
        collapse(grid, &completed);
    }
    completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShapeKind;

    #[test]
    fn test_land_marks_cells_and_reports_rows() {
        let mut grid = Grid::new();
        let mut piece = Piece::new(ShapeKind::L);
        piece.materialize_into(&mut grid, (5, 16));

        let rows = land(&mut grid, &piece);
        assert_eq!(rows.as_slice(), &[15, 16, 17]);
        assert_eq!(grid.count(CellState::Landed), 4);
        assert_eq!(grid.count(CellState::Active), 0);
    }

    #[test]
    fn test_complete_rows_ignores_untouched_full_rows() {
        let grid = Grid::from_rows(&["##########", "##########"]).unwrap();
        assert_eq!(complete_rows(&grid, &[18]).as_slice(), &[18]);
        assert_eq!(complete_rows(&grid, &[18, 17]).as_slice(), &[17, 18]);
        assert!(complete_rows(&grid, &[16]).is_empty());
    }

    #[test]
    fn test_single_line_clear() {
        // I piece completes the bottom row
        let mut grid = Grid::from_rows(&[
            "...#......",
            "###....###",
        ])
        .unwrap();
        let mut piece = Piece::new(ShapeKind::I);
        piece.materialize_into(&mut grid, (4, 18));

        let cleared = land_and_clear(&mut grid, &piece);

        assert_eq!(cleared.as_slice(), &[18]);
        let rows = grid.to_rows();
        assert_eq!(rows[18], "...#......");
        assert_eq!(rows[17], "..........");
        assert_eq!(grid.count(CellState::Landed), 1);
    }

    #[test]
    fn test_non_adjacent_double_clear() {
        let mut grid = Grid::from_rows(&[
            "#.........",
            "#########.",
            ".#........",
            "#########.",
        ])
        .unwrap();
        // Vertical I in the last column fills rows 15..=18
        let mut piece = Piece::new(ShapeKind::I);
        piece.materialize_preview((9, 16));
        let mut vertical = piece;
        let rotated = crate::motion::candidate(&vertical, crate::types::MoveAction::RotateCw);
        vertical.relocate(rotated.cells, rotated.pivot);
        assert_eq!(vertical.cells(), &[(9, 15), (9, 16), (9, 17), (9, 18)]);
        for &(x, y) in vertical.cells() {
            grid.set(x, y, CellState::Active);
        }

        let cleared = land_and_clear(&mut grid, &vertical);

        assert_eq!(cleared.as_slice(), &[16, 18]);
        let rows = grid.to_rows();
        assert_eq!(rows[16], "..........");
        assert_eq!(rows[17], "#........#");
        assert_eq!(rows[18], ".#.......#");
    }

    #[test]
    fn test_collapse_order_does_not_matter() {
        let fixture = Grid::from_rows(&[
            ".#........",
            "..........",
            "..#.......",
            "..........",
            "...#......",
        ])
        .unwrap();

        let mut forward = fixture.clone();
        forward.clear_row(15);
        forward.clear_row(17);
        collapse(&mut forward, &[15, 17]);

        let mut backward = fixture.clone();
        backward.clear_row(17);
        backward.clear_row(15);
        collapse(&mut backward, &[17, 15]);

        assert_eq!(forward, backward);
        let rows = forward.to_rows();
        assert_eq!(rows[15], "..........");
        assert_eq!(rows[16], ".#........");
        assert_eq!(rows[17], "..#.......");
        assert_eq!(rows[18], "...#......");
    }
}
