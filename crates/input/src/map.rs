//! Key mapping from terminal events to input keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::GameAction;

/// A game-relevant key, after collapsing aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Left,
    Right,
    Down,
    RotateLeft,
    RotateRight,
    HardDrop,
    Restart,
}

impl InputKey {
    /// Held keys contribute to every frame while down; the rest fire once per press.
    pub fn is_held(&self) -> bool {
        matches!(self, InputKey::Left | InputKey::Right | InputKey::Down)
    }

    pub fn action(&self) -> GameAction {
        match self {
            InputKey::Left => GameAction::MoveLeft,
            InputKey::Right => GameAction::MoveRight,
            InputKey::Down => GameAction::SoftDrop,
            InputKey::RotateLeft => GameAction::RotateCcw,
            InputKey::RotateRight => GameAction::RotateCw,
            InputKey::HardDrop => GameAction::HardDrop,
            InputKey::Restart => GameAction::Restart,
        }
    }
}

/// Map a key code to an input key.
pub fn map_key(code: KeyCode) -> Option<InputKey> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(InputKey::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(InputKey::Right),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(InputKey::Down),

        KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputKey::RotateLeft),
        KeyCode::Char('e') | KeyCode::Char('E') => Some(InputKey::RotateRight),

        KeyCode::Char(' ') => Some(InputKey::HardDrop),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputKey::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key.modifiers.contains(KeyModifiers::CONTROL))
}
