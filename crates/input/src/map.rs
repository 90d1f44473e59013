//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to a game action.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(GameAction::MoveRight),
        _ if is_accelerate_key(key.code) => Some(GameAction::Accelerate),

        // Rotation
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W' | 'x' | 'X') => {
            Some(GameAction::RotateRight)
        }
        KeyCode::Char('z' | 'Z' | 'y' | 'Y') => Some(GameAction::RotateLeft),
        KeyCode::Char('v' | 'V') => Some(GameAction::RotateTwice),

        KeyCode::Char('p' | 'P') => Some(GameAction::Pause),
        KeyCode::Char('r' | 'R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Map a key release to a game action. Only the accelerate keys care.
pub fn handle_key_release(key: KeyEvent) -> Option<GameAction> {
    if is_accelerate_key(key.code) {
        Some(GameAction::Decelerate)
    } else {
        None
    }
}

/// Keys that hold the piece in fast-falling mode.
pub fn is_accelerate_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S'))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(press(KeyCode::Left), Some(GameAction::MoveLeft));
        assert_eq!(press(KeyCode::Right), Some(GameAction::MoveRight));
        assert_eq!(press(KeyCode::Down), Some(GameAction::Accelerate));

        assert_eq!(press(KeyCode::Char('A')), Some(GameAction::MoveLeft));
        assert_eq!(press(KeyCode::Char('l')), Some(GameAction::MoveRight));
        assert_eq!(press(KeyCode::Char('s')), Some(GameAction::Accelerate));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(press(KeyCode::Up), Some(GameAction::RotateRight));
        assert_eq!(press(KeyCode::Char('x')), Some(GameAction::RotateRight));
        assert_eq!(press(KeyCode::Char('Z')), Some(GameAction::RotateLeft));
        assert_eq!(press(KeyCode::Char('y')), Some(GameAction::RotateLeft));
        assert_eq!(press(KeyCode::Char('v')), Some(GameAction::RotateTwice));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(press(KeyCode::Char('p')), Some(GameAction::Pause));
        assert_eq!(press(KeyCode::Char('R')), Some(GameAction::Restart));
        assert_eq!(press(KeyCode::Char(' ')), None);
        assert_eq!(press(KeyCode::Char('c')), None);
    }

    #[test]
    fn test_release_decelerates_only_for_down_keys() {
        assert_eq!(
            handle_key_release(KeyEvent::from(KeyCode::Down)),
            Some(GameAction::Decelerate)
        );
        assert_eq!(
            handle_key_release(KeyEvent::from(KeyCode::Char('j'))),
            Some(GameAction::Decelerate)
        );
        assert_eq!(handle_key_release(KeyEvent::from(KeyCode::Left)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
