//! Geometry tables - fixed shape offsets, spawn rows and movement deltas
//!
//! Coordinates are (x, y) in grid cells with x growing to the right and y growing
//! downwards. Offsets are relative to the piece pivot; every shape is stored in a
//! single canonical orientation and rotations are computed from the pivot at runtime.

use crate::types::{Direction, ShapeKind, BLOCKS_PER_PIECE, GRID_WIDTH};

/// A grid coordinate (x, y)
pub type Coord = (i8, i8);

/// Absolute coordinates of the four cells of a piece
pub type PieceCells = [Coord; BLOCKS_PER_PIECE];

/// Cell offsets from the pivot, indexed by `ShapeKind::index()`
const SHAPE_OFFSETS: [PieceCells; 7] = [
    [(0, -1), (0, 0), (0, 1), (1, 1)],    // L
    [(0, -1), (0, 0), (0, 1), (-1, 1)],   // J
    [(-1, 0), (0, 0), (1, 0), (2, 0)],    // I
    [(-1, -1), (0, -1), (0, 0), (-1, 0)], // O
    [(-1, 0), (0, 0), (0, -1), (1, -1)],  // S
    [(-1, 0), (0, 0), (1, 0), (0, 1)],    // T
    [(-1, -1), (0, -1), (0, 0), (1, 0)],  // Z
];

/// Pivot row at spawn, chosen so the whole piece is on the grid
const SPAWN_ROWS: [i8; 7] = [1, 1, 0, 1, 1, 0, 1];

/// Pivot column at spawn (center column)
pub const SPAWN_COLUMN: i8 = (GRID_WIDTH / 2) as i8;

/// Horizontal distance between two entries of the preview panel
pub const PREVIEW_SPACING: i8 = 3;

/// Get the pivot-relative cell offsets of a shape
#[inline(always)]
pub fn shape_offsets(kind: ShapeKind) -> &'static PieceCells {
    &SHAPE_OFFSETS[kind.index()]
}

/// Get the spawn row for a shape
#[inline(always)]
pub fn spawn_row(kind: ShapeKind) -> i8 {
    SPAWN_ROWS[kind.index()]
}

/// Spawn pivot for a shape
pub fn spawn_pivot(kind: ShapeKind) -> Coord {
    (SPAWN_COLUMN, spawn_row(kind))
}

/// Pivot of the `slot`-th queued piece inside the preview panel
pub fn preview_pivot(slot: usize) -> Coord {
    (1 + PREVIEW_SPACING * slot as i8, 1)
}

/// Unit delta for a slide direction
#[inline(always)]
pub fn direction_delta(direction: Direction) -> Coord {
    match direction {
        Direction::Left => (-1, 0),
        Direction::Right => (1, 0),
        Direction::Down => (0, 1),
    }
}

/// Absolute cells of a shape placed at `pivot`
pub fn cells_at(kind: ShapeKind, pivot: Coord) -> PieceCells {
    let offsets = shape_offsets(kind);
    let mut cells = [(0, 0); BLOCKS_PER_PIECE];
    for (cell, &(dx, dy)) in cells.iter_mut().zip(offsets.iter()) {
        *cell = (pivot.0 + dx, pivot.1 + dy);
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GRID_HEIGHT;

    #[test]
    fn every_shape_contains_its_pivot() {
        for kind in ShapeKind::ALL {
            assert!(
                shape_offsets(kind).contains(&(0, 0)),
                "{:?} must include the pivot cell",
                kind
            );
        }
    }

    #[test]
    fn every_shape_has_four_distinct_cells() {
        for kind in ShapeKind::ALL {
            let offsets = shape_offsets(kind);
            for i in 0..offsets.len() {
                for j in (i + 1)..offsets.len() {
                    assert_ne!(offsets[i], offsets[j], "{:?} repeats a cell", kind);
                }
            }
        }
    }

    #[test]
    fn spawned_pieces_are_fully_on_grid() {
        for kind in ShapeKind::ALL {
            for (x, y) in cells_at(kind, spawn_pivot(kind)) {
                assert!(x >= 0 && x < GRID_WIDTH as i8, "{:?} x={} off grid", kind, x);
                assert!(y >= 0 && y < GRID_HEIGHT as i8, "{:?} y={} off grid", kind, y);
            }
        }
    }

    #[test]
    fn spawn_rows_match_table() {
        assert_eq!(spawn_row(ShapeKind::I), 0);
        assert_eq!(spawn_row(ShapeKind::T), 0);
        assert_eq!(spawn_row(ShapeKind::L), 1);
        assert_eq!(spawn_row(ShapeKind::O), 1);
        assert_eq!(SPAWN_COLUMN, 5);
    }

    #[test]
    fn direction_deltas() {
        assert_eq!(direction_delta(Direction::Left), (-1, 0));
        assert_eq!(direction_delta(Direction::Right), (1, 0));
        assert_eq!(direction_delta(Direction::Down), (0, 1));
    }
}
