//! Key mapping from terminal events to commands.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks for.
///
/// Only [`InputCommand::Game`] reaches the simulation; the rest are handled
/// by the driver around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Game(GameAction),
    TogglePause,
    SaveGame,
    LoadGame,
}

/// Map keyboard input to commands.
pub fn handle_key_event(key: KeyEvent) -> Option<InputCommand> {
    // Control chords belong to the terminal (Ctrl-C quits).
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    let action = match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            GameAction::MoveLeft
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            GameAction::MoveRight
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            GameAction::SoftDrop
        }

        // Rotation is one-directional.
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('z')
        | KeyCode::Char('Z') => GameAction::Rotate,

        // Actions
        KeyCode::Char(' ') => GameAction::HardDrop,
        KeyCode::Char('c') | KeyCode::Char('C') => GameAction::Hold,
        KeyCode::Char('r') | KeyCode::Char('R') => GameAction::Restart,

        // Driver commands
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => return Some(InputCommand::TogglePause),
        KeyCode::F(5) => return Some(InputCommand::SaveGame),
        KeyCode::F(9) => return Some(InputCommand::LoadGame),

        _ => return None,
    };
    Some(InputCommand::Game(action))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
