//! Grid module - one player's occupancy map
//!
//! The grid is 10x19 where each cell is `Empty`, `Active` (the falling piece) or
//! `Landed`. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..18 (top to bottom).
//!
//! Validity only forbids out-of-bounds and `Landed` cells. `Active` cells count as
//! free: the only active cells on a grid belong to the piece being moved, and its
//! candidate cells are checked while its old cells are still marked.

use crate::types::{CellState, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

/// Numeric grid used by snapshots (row-major, `CellState::code`)
pub type CodeGrid = [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize];

/// Per-player grid using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [CellState; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [CellState::Empty; GRID_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (GRID_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<CellState> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, state: CellState) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = state;
                true
            }
            None => false,
        }
    }

    /// Check if a piece cell may be placed at (x, y): in bounds and not landed
    #[inline(always)]
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(
            self.get(x, y),
            Some(CellState::Empty) | Some(CellState::Active)
        )
    }

    pub fn is_landed(&self, x: i8, y: i8) -> bool {
        self.get(x, y) == Some(CellState::Landed)
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    fn row(&self, y: usize) -> &[CellState] {
        let start = y * GRID_WIDTH as usize;
        &self.cells[start..start + GRID_WIDTH as usize]
    }

    fn row_mut(&mut self, y: usize) -> &mut [CellState] {
        let start = y * GRID_WIDTH as usize;
        &mut self.cells[start..start + GRID_WIDTH as usize]
    }

    /// Number of non-empty (active or landed) cells in row `y`
    pub fn row_occupancy(&self, y: usize) -> usize {
        if y >= GRID_HEIGHT as usize {
            return 0;
        }
        self.row(y)
            .iter()
            .filter(|&&cell| cell != CellState::Empty)
            .count()
    }

    /// Number of landed cells in row `y`
    pub fn landed_in_row(&self, y: usize) -> usize {
        if y >= GRID_HEIGHT as usize {
            return 0;
        }
        self.row(y)
            .iter()
            .filter(|&&cell| cell == CellState::Landed)
            .count()
    }

    /// A row is complete exactly when every one of its cells is landed
    pub fn is_row_complete(&self, y: usize) -> bool {
        self.landed_in_row(y) == GRID_WIDTH as usize
    }

    /// Set every cell of row `y` to empty
    pub fn clear_row(&mut self, y: usize) {
        if y >= GRID_HEIGHT as usize {
            return;
        }
        self.row_mut(y).fill(CellState::Empty);
    }

    /// Shift every row strictly above `y` down by one, overwriting row `y`,
    /// and leave row 0 empty.
    pub fn shift_down_onto(&mut self, y: usize) {
        if y >= GRID_HEIGHT as usize {
            return;
        }

        let width = GRID_WIDTH as usize;

        // copy_within handles overlapping ranges safely
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        self.row_mut(0).fill(CellState::Empty);
    }

    /// Number of cells in a given state
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// Iterate all cells with their coordinates
    pub fn iter(&self) -> impl Iterator<Item = (i8, i8, CellState)> + '_ {
        self.cells.iter().enumerate().map(|(idx, &cell)| {
            let x = (idx % GRID_WIDTH as usize) as i8;
            let y = (idx / GRID_WIDTH as usize) as i8;
            (x, y, cell)
        })
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Write `CellState::code` values into a row-major numeric grid
    pub fn write_code_grid(&self, out: &mut CodeGrid) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, code) in row.iter_mut().enumerate() {
                *code = self.cells[y * GRID_WIDTH as usize + x].code();
            }
        }
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
    }

    /// Build a grid from text rows, top row first.
    ///
    /// `.` is empty, `@` is active and `#` is landed. Missing rows at the top are
    /// treated as empty, so a fixture only needs to spell out the bottom of the stack.
    /// Returns `None` for more than `GRID_HEIGHT` rows, a row of the wrong width or an
    /// unknown character.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        if rows.len() > GRID_HEIGHT as usize {
            return None;
        }

        let mut grid = Self::new();
        let offset = GRID_HEIGHT as usize - rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.chars().count() != GRID_WIDTH as usize {
                return None;
            }
            for (x, ch) in row.chars().enumerate() {
                let state = match ch {
                    '.' => CellState::Empty,
                    '@' => CellState::Active,
                    '#' => CellState::Landed,
                    _ => return None,
                };
                grid.row_mut(offset + i)[x] = state;
            }
        }
        Some(grid)
    }

    /// Render the grid as text rows (inverse of `from_rows` for a full grid)
    pub fn to_rows(&self) -> Vec<String> {
        (0..GRID_HEIGHT as usize)
            .map(|y| {
                self.row(y)
                    .iter()
                    .map(|cell| match cell {
                        CellState::Empty => '.',
                        CellState::Active => '@',
                        CellState::Landed => '#',
                    })
                    .collect()
            })
            .collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
