//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::messages::RenderState;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Query input editing
    CharInput(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ClearQuery,

    // Submission
    Submit,

    // Result area
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI state.
///
/// Enter produces nothing while the submit control is disabled, so a second
/// query can never be dispatched while one is in flight.
pub fn key_to_ui_event(key: KeyEvent, state: &RenderState) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(UiEvent::Quit),
            KeyCode::Char('u') => Some(UiEvent::ClearQuery),
            KeyCode::Char('a') => Some(UiEvent::CursorHome),
            KeyCode::Char('e') => Some(UiEvent::CursorEnd),
            _ => None,
        };
    }

    if state.show_help {
        return Some(UiEvent::CloseHelp);
    }

    match key.code {
        KeyCode::Esc => Some(UiEvent::Quit),
        KeyCode::F(1) => Some(UiEvent::ToggleHelp),
        KeyCode::Char('?') if state.query_text.is_empty() => Some(UiEvent::ToggleHelp),
        KeyCode::Enter if state.can_submit() => Some(UiEvent::Submit),
        KeyCode::Enter => None,
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Delete => Some(UiEvent::Delete),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Home => Some(UiEvent::CursorHome),
        KeyCode::End => Some(UiEvent::CursorEnd),
        KeyCode::Up => Some(UiEvent::ScrollUp),
        KeyCode::Down => Some(UiEvent::ScrollDown),
        KeyCode::PageUp => Some(UiEvent::PageUp),
        KeyCode::PageDown => Some(UiEvent::PageDown),
        _ => None,
    }
}
