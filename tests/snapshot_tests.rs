//! Snapshot and score payload tests (serde boundary)

use duo_tetris::core::{FinalScores, GameSession, GameSnapshot, ScriptedSource, SessionConfig};
use duo_tetris::term::{GameView, Viewport};
use duo_tetris::types::{PlayerIndex, ShapeKind};

fn started(letters: &str) -> GameSession<ScriptedSource> {
    let mut session =
        GameSession::with_source(SessionConfig::default(), ScriptedSource::from_letters(letters));
    session.start().unwrap();
    session
}

#[test]
fn test_snapshot_json_roundtrip_keeps_fields() {
    let session = started("sz");
    let snapshot = session.snapshot();

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["players"][0]["active"]["kind"], "s");
    assert_eq!(json["players"][1]["next_queue"][0], "z");
    assert_eq!(json["tick_interval_ms"], 1000);
    assert_eq!(json["players"][0]["grid"][0].as_array().map(|r| r.len()), Some(10));

    let back: GameSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back, snapshot);
}

#[test]
fn test_final_scores_json() {
    let scores = FinalScores {
        scores: [250, 75],
        lines: [5, 1],
    };
    let json = serde_json::to_string(&scores).unwrap();
    assert_eq!(json, r#"{"scores":[250,75],"lines":[5,1]}"#);
    assert_eq!(scores.winner(), Some(PlayerIndex::One));
}

#[test]
fn test_snapshot_into_reuses_buffer() {
    let mut session = started("ti");
    let mut snapshot = GameSnapshot::default();
    session.snapshot_into(&mut snapshot);
    assert_eq!(snapshot.player(PlayerIndex::One).active.map(|a| a.kind), Some(ShapeKind::T));

    session.toggle_pause();
    session.snapshot_into(&mut snapshot);
    assert!(snapshot.paused);
    assert!(!snapshot.playable());
}

#[test]
fn test_render_through_facade() {
    let session = started("o");
    let fb = GameView::default().render(&session.snapshot(), Viewport::new(80, 24));
    assert!(fb.contains_text("NEXT"));
    assert!(fb.contains_text("LINES"));
}
