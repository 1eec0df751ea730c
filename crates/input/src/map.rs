//! Key mapping from terminal events to game actions.
//!
//! The same key can mean different things per phase: Enter starts a game on
//! the title menu and restarts one after game over, Esc pauses and resumes.

use crate::types::{GameAction, Phase};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys that hold the soft drop down
pub fn is_soft_drop_key(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S')
    )
}

/// Map a key press to the action it triggers in `phase`.
pub fn map_key(key: KeyEvent, phase: Phase) -> Option<GameAction> {
    if should_quit(key) {
        return Some(GameAction::Quit);
    }

    match phase {
        Phase::Menu => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(GameAction::Start),
            _ => None,
        },
        Phase::Playing => map_playing(key.code),
        Phase::Paused => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => {
                Some(GameAction::Resume)
            }
            KeyCode::Char('m') | KeyCode::Char('M') => Some(GameAction::Menu),
            _ => None,
        },
        Phase::GameOver => match key.code {
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(GameAction::Menu),
            _ => None,
        },
    }
}

fn map_playing(code: KeyCode) -> Option<GameAction> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::MoveRight),
        c if is_soft_drop_key(c) => Some(GameAction::SoftDropPressed),

        // Rotation
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(GameAction::RotateCw),

        // Actions
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Char('f') | KeyCode::Char('F') => {
            Some(GameAction::Hold)
        }
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
