//! Terminal event classification.
//!
//! Turns crossterm events into what the console cares about: an editor
//! key, a quit request, or a plain redraw.

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use termx_kernel::Key;

/// Events the console loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// A key for the line editor (or to leave monitor mode).
    Key(Key),
    /// Ctrl-C or Ctrl-D.
    Quit,
    /// Resize, focus change, key release: just redraw.
    Redraw,
}

/// Classify one crossterm event.
pub fn classify(event: CrosstermEvent) -> AppEvent {
    match event {
        CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => classify_key(key),
        _ => AppEvent::Redraw,
    }
}

fn classify_key(key: KeyEvent) -> AppEvent {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'd') => AppEvent::Quit,
            _ => AppEvent::Key(Key::Other),
        };
    }
    AppEvent::Key(match key.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        _ => Key::Other,
    })
}
