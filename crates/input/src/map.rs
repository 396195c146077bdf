//! Key mapping from terminal events to per-player intents.
//!
//! Player one plays on the letter keys, player two on the arrow keys:
//!
//! | Intent      | Player one | Player two |
//! |-------------|------------|------------|
//! | slide left  | `A`        | `Left`     |
//! | slide right | `D`        | `Right`    |
//! | slide down  | `S`        | `Down`     |
//! | rotate cw   | `W`        | `Up`       |
//! | rotate ccw  | `Q`        | `.`        |
//!
//! `P` pauses for both and is reported for player one.

use crate::types::{GameAction, PlayerIndex};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to a player's intent.
pub fn handle_key_event(key: KeyEvent) -> Option<(PlayerIndex, GameAction)> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    let intent = match key.code {
        // Player one
        KeyCode::Char('a') | KeyCode::Char('A') => (PlayerIndex::One, GameAction::SlideLeft),
        KeyCode::Char('d') | KeyCode::Char('D') => (PlayerIndex::One, GameAction::SlideRight),
        KeyCode::Char('s') | KeyCode::Char('S') => (PlayerIndex::One, GameAction::SlideDown),
        KeyCode::Char('w') | KeyCode::Char('W') => (PlayerIndex::One, GameAction::RotateCw),
        KeyCode::Char('q') | KeyCode::Char('Q') => (PlayerIndex::One, GameAction::RotateCcw),

        // Player two
        KeyCode::Left => (PlayerIndex::Two, GameAction::SlideLeft),
        KeyCode::Right => (PlayerIndex::Two, GameAction::SlideRight),
        KeyCode::Down => (PlayerIndex::Two, GameAction::SlideDown),
        KeyCode::Up => (PlayerIndex::Two, GameAction::RotateCw),
        KeyCode::Char('.') => (PlayerIndex::Two, GameAction::RotateCcw),

        KeyCode::Char('p') | KeyCode::Char('P') => (PlayerIndex::One, GameAction::Pause),

        _ => return None,
    };
    Some(intent)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_player_one_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('a'))),
            Some((PlayerIndex::One, GameAction::SlideLeft))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('D'))),
            Some((PlayerIndex::One, GameAction::SlideRight))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('s'))),
            Some((PlayerIndex::One, GameAction::SlideDown))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('W'))),
            Some((PlayerIndex::One, GameAction::RotateCw))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('q'))),
            Some((PlayerIndex::One, GameAction::RotateCcw))
        );
    }

    #[test]
    fn test_player_two_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some((PlayerIndex::Two, GameAction::SlideLeft))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some((PlayerIndex::Two, GameAction::SlideRight))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some((PlayerIndex::Two, GameAction::SlideDown))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some((PlayerIndex::Two, GameAction::RotateCw))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('.'))),
            Some((PlayerIndex::Two, GameAction::RotateCcw))
        );
    }

    #[test]
    fn test_pause_and_unmapped_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('p'))),
            Some((PlayerIndex::One, GameAction::Pause))
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
