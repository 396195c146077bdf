//! Motion engine - slides and pivot rotations with validate-then-commit
//!
//! Every transform happens in two explicit phases:
//!
//! 1. [`candidate`] computes the four destination cells (pure, no grid access).
//! 2. [`check`] tests all four against the grid; only if every cell passes does
//!    [`commit`] rewrite the grid and the piece.
//!
//! Commit never partially fails, so no rollback exists. Rotations have no wall kicks:
//! a rotation blocked by a wall or a landed cell is rejected as a whole.

use crate::error::MoveRejection;
use crate::geometry::{direction_delta, Coord, PieceCells};
use crate::grid::Grid;
use crate::piece::Piece;
use crate::types::{CellState, MoveAction};

/// Destination of a transform: new cells and new pivot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub cells: PieceCells,
    pub pivot: Coord,
}

/// Rotate a pivot-relative offset.
///
/// With y pointing down the screen, clockwise maps (ox, oy) to (-oy, ox) and
/// counter-clockwise maps (ox, oy) to (oy, -ox).
#[inline(always)]
pub fn rotate_offset(offset: Coord, clockwise: bool) -> Coord {
    let (ox, oy) = offset;
    if clockwise {
        (-oy, ox)
    } else {
        (oy, -ox)
    }
}

/// Compute where the piece would be after `action`, without validating it.
pub fn candidate(piece: &Piece, action: MoveAction) -> Candidate {
    let pivot = piece.pivot();
    let mut cells = *piece.cells();

    match action.direction() {
        Some(direction) => {
            let (dx, dy) = direction_delta(direction);
            for cell in cells.iter_mut() {
                *cell = (cell.0 + dx, cell.1 + dy);
            }
            Candidate {
                cells,
                pivot: (pivot.0 + dx, pivot.1 + dy),
            }
        }
        None => {
            let clockwise = action == MoveAction::RotateCw;
            for cell in cells.iter_mut() {
                let offset = (cell.0 - pivot.0, cell.1 - pivot.1);
                let (rx, ry) = rotate_offset(offset, clockwise);
                *cell = (pivot.0 + rx, pivot.1 + ry);
            }
            // Rotation never moves the pivot.
            Candidate { cells, pivot }
        }
    }
}

/// Validate every candidate cell against the grid.
///
/// Reports the first failing cell. Active cells are free, so a piece may move into
/// cells it currently occupies.
pub fn check(grid: &Grid, candidate: &Candidate) -> Result<(), MoveRejection> {
    for &(x, y) in &candidate.cells {
        if grid.is_out_of_bounds(x, y) {
            return Err(MoveRejection::OutOfBounds { x, y });
        }
        if !grid.is_valid(x, y) {
            return Err(MoveRejection::Blocked { x, y });
        }
    }
    Ok(())
}

/// Apply a validated candidate to the grid and the piece.
///
/// All old cells are emptied before any new cell is marked, so cells shared by the
/// old and new positions end up active.
pub fn commit(grid: &mut Grid, piece: &mut Piece, candidate: Candidate) {
    for &(x, y) in piece.cells() {
        grid.set(x, y, CellState::Empty);
    }
    for &(x, y) in &candidate.cells {
        grid.set(x, y, CellState::Active);
    }
    piece.relocate(candidate.cells, candidate.pivot);
}

/// Validate and, on success, commit `action`.
pub fn try_apply(grid: &mut Grid, piece: &mut Piece, action: MoveAction) -> Result<Candidate, MoveRejection> {
    let next = candidate(piece, action);
    check(grid, &next)?;
    commit(grid, piece, next);
    Ok(next)
}

/// Cells the piece would occupy after sliding down as far as possible.
///
/// Pure: neither the grid nor the piece changes.
pub fn landing_cells(grid: &Grid, piece: &Piece) -> PieceCells {
    let mut probe = *piece;
    loop {
        let next = candidate(&probe, MoveAction::Down);
        if check(grid, &next).is_err() {
            return *probe.cells();
        }
        probe.relocate(next.cells, next.pivot);
    }
}
