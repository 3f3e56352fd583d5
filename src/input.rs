#![warn(clippy::all, clippy::pedantic)]

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Player intent, decoupled from the key that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pick receptacle `n` directly (0-based)
    Select(usize),
    Left,
    Right,
    Up,
    Down,
    Confirm,
    Back,
    Quit,
    ToggleMusic,
    ToggleSound,
    VolumeUp,
    VolumeDown,
}

/// Maps a terminal key press to an [`InputEvent`]. Releases and unbound keys map to `None`.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    // Ctrl-C still quits while the terminal is in raw mode
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputEvent::Quit);
    }

    let event = match key.code {
        KeyCode::Char(c @ '1'..='4') => InputEvent::Select(c as usize - '1' as usize),
        KeyCode::Left | KeyCode::Char('a') => InputEvent::Left,
        KeyCode::Right | KeyCode::Char('d') => InputEvent::Right,
        KeyCode::Up | KeyCode::Char('w') => InputEvent::Up,
        KeyCode::Down | KeyCode::Char('s') => InputEvent::Down,
        KeyCode::Enter | KeyCode::Char(' ') => InputEvent::Confirm,
        KeyCode::Esc | KeyCode::Backspace => InputEvent::Back,
        KeyCode::Char('q' | 'Q') => InputEvent::Quit,
        KeyCode::Char('m' | 'M') => InputEvent::ToggleMusic,
        KeyCode::Char('n' | 'N') => InputEvent::ToggleSound,
        KeyCode::Char('+' | '=') => InputEvent::VolumeUp,
        KeyCode::Char('-' | '_') => InputEvent::VolumeDown,
        _ => return None,
    };
    Some(event)
}
