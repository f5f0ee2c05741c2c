//! Key mapping from terminal events to engine intents.

use crate::types::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a keyboard key to the intent it drives.
pub fn map_key(key: KeyEvent) -> Option<Intent> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Intent::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Intent::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Intent::SoftDrop)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('x')
        | KeyCode::Char('X')
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Intent::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Intent::RotateCcw),

        _ => None,
    }
}

/// Check if key should quit the game.
///
/// `Esc` stays unmapped so callers can bind it to pause.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left)), Some(Intent::MoveLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Right)), Some(Intent::MoveRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Down)), Some(Intent::SoftDrop));

        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('H'))), Some(Intent::MoveLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('d'))), Some(Intent::MoveRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('J'))), Some(Intent::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('x'))), Some(Intent::RotateCw));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Up)), Some(Intent::RotateCw));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('z'))), Some(Intent::RotateCcw));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('Z'))), Some(Intent::RotateCcw));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' '))), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('p'))), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Esc)));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Esc)), None);
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
