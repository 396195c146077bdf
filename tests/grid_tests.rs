//! Grid and line-clear tests on hand-built fixtures

use duo_tetris::core::line_clear::{collapse, land_and_clear};
use duo_tetris::core::{Grid, Piece};
use duo_tetris::types::{CellState, ShapeKind, GRID_HEIGHT, GRID_WIDTH};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.width(), GRID_WIDTH);
    assert_eq!(grid.height(), GRID_HEIGHT);
    for y in 0..GRID_HEIGHT as i8 {
        for x in 0..GRID_WIDTH as i8 {
            assert!(grid.is_valid(x, y), "cell ({}, {}) should be valid", x, y);
        }
    }
}

#[test]
fn test_validity_rules() {
    let mut grid = Grid::new();
    grid.set(3, 3, CellState::Active);
    grid.set(4, 3, CellState::Landed);

    assert!(grid.is_valid(3, 3));
    assert!(!grid.is_valid(4, 3));
    assert!(!grid.is_valid(-1, 0));
    assert!(!grid.is_valid(0, GRID_HEIGHT as i8));
    assert!(!grid.set(GRID_WIDTH as i8, 0, CellState::Landed));
}

#[test]
fn test_row_occupancy_counts_active_and_landed() {
    let grid = Grid::from_rows(&["@@##......"]).unwrap();
    assert_eq!(grid.row_occupancy(18), 4);
    assert_eq!(grid.landed_in_row(18), 2);
    assert!(!grid.is_row_complete(18));
}

#[test]
fn test_full_row_with_active_cell_is_not_complete() {
    let grid = Grid::from_rows(&["#########@"]).unwrap();
    assert_eq!(grid.row_occupancy(18), 10);
    assert!(!grid.is_row_complete(18));
}

#[test]
fn test_clear_shifts_rows_above_by_one() {
    // Row r full, the rows above hold a small stack
    let mut grid = Grid::from_rows(&[
        "#.........",
        ".##.......",
        "##########",
        "...#......",
    ])
    .unwrap();

    grid.clear_row(17);
    collapse(&mut grid, &[17]);

    assert_eq!(
        grid.to_rows()[15..].to_vec(),
        vec![
            "..........".to_string(),
            "#.........".to_string(),
            ".##.......".to_string(),
            "...#......".to_string(),
        ]
    );
    assert!(grid.to_rows()[0].chars().all(|c| c == '.'));
}

#[test]
fn test_o_piece_completes_two_rows() {
    let mut grid = Grid::from_rows(&[
        "....#.....",
        "########..",
        "########..",
    ])
    .unwrap();
    let mut piece = Piece::new(ShapeKind::O);
    // O at pivot (9, 18) covers columns 8-9 on rows 17-18
    assert!(!piece.materialize_into(&mut grid, (9, 18)));

    let cleared = land_and_clear(&mut grid, &piece);

    assert_eq!(cleared.as_slice(), &[17, 18]);
    let rows = grid.to_rows();
    assert_eq!(rows[18], "....#.....");
    assert_eq!(grid.count(CellState::Landed), 1);
}
