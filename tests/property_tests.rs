//! Property tests for the grid and motion invariants.
//!
//! - Every active and landed cell stays inside the grid.
//! - Each player's grid holds exactly the four active cells of its falling piece.
//! - Scores and line counts never decrease.
//! - Rotating clockwise then counter-clockwise from a free position is a no-op.

use proptest::prelude::*;

use duo_tetris::core::geometry::spawn_pivot;
use duo_tetris::core::{motion, GameSession, Grid, Piece, SessionConfig};
use duo_tetris::types::{CellState, GameAction, MoveAction, PlayerIndex, ShapeKind};

const ACTIONS: [GameAction; 5] = [
    GameAction::SlideLeft,
    GameAction::SlideRight,
    GameAction::SlideDown,
    GameAction::RotateCw,
    GameAction::RotateCcw,
];

fn assert_session_invariants(session: &GameSession) {
    for player in PlayerIndex::ALL {
        let grid = session.grid(player);
        for (x, y, _) in grid.iter() {
            assert!((0..10).contains(&x) && (0..19).contains(&y));
        }
        match session.active(player) {
            Some(piece) => {
                assert_eq!(grid.count(CellState::Active), 4);
                for &(x, y) in piece.cells() {
                    assert_eq!(grid.get(x, y), Some(CellState::Active), "({x}, {y})");
                }
            }
            None => assert_eq!(grid.count(CellState::Active), 0),
        }
    }
}

proptest! {
    #[test]
    fn generated_play_respects_invariants(
        seed in any::<u32>(),
        // index 5 means "gravity step"
        ops in prop::collection::vec((0usize..2, 0usize..6), 1..400),
    ) {
        let mut session = GameSession::new(SessionConfig::default().with_seed(seed));
        session.start().unwrap();
        let mut last = session.scores();

        for (player, op) in ops {
            if session.game_over() {
                break;
            }
            let player = PlayerIndex::ALL[player];
            if op == ACTIONS.len() {
                let _ = session.gravity_step();
            } else {
                session.apply_action(player, ACTIONS[op]);
            }
            assert_session_invariants(&session);

            let now = session.scores();
            for i in 0..2 {
                prop_assert!(now.scores[i] >= last.scores[i]);
                prop_assert!(now.lines[i] >= last.lines[i]);
            }
            last = now;
        }
    }

    #[test]
    fn rotation_is_reversible_from_free_positions(
        shape in 0usize..7,
        x in 3i8..7,
        y in 3i8..15,
        clockwise_first in any::<bool>(),
    ) {
        let kind = ShapeKind::ALL[shape];
        let mut grid = Grid::new();
        let mut piece = Piece::new(kind);
        piece.materialize_into(&mut grid, (x, y));
        let before = *piece.cells();

        let (first, second) = if clockwise_first {
            (MoveAction::RotateCw, MoveAction::RotateCcw)
        } else {
            (MoveAction::RotateCcw, MoveAction::RotateCw)
        };
        prop_assert!(motion::try_apply(&mut grid, &mut piece, first).is_ok());
        prop_assert!(motion::try_apply(&mut grid, &mut piece, second).is_ok());

        prop_assert_eq!(piece.cells(), &before);
        prop_assert_eq!(piece.pivot(), (x, y));
        prop_assert_eq!(grid.count(CellState::Active), 4);
    }

    #[test]
    fn four_rotations_return_to_start(shape in 0usize..7) {
        let kind = ShapeKind::ALL[shape];
        let mut grid = Grid::new();
        let mut piece = Piece::new(kind);
        piece.materialize_into(&mut grid, (5, 9));
        let before = *piece.cells();
        for _ in 0..4 {
            prop_assert!(motion::try_apply(&mut grid, &mut piece, MoveAction::RotateCw).is_ok());
        }
        prop_assert_eq!(piece.cells(), &before);
    }

    #[test]
    fn spawn_cells_are_on_screen(shape in 0usize..7) {
        let kind = ShapeKind::ALL[shape];
        let mut grid = Grid::new();
        let mut piece = Piece::new(kind);
        prop_assert!(!piece.materialize_into(&mut grid, spawn_pivot(kind)));
    }
}
