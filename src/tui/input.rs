//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::{InteractionState, Overlay};

/// Rows moved by PageUp/PageDown.
const PAGE_SCROLL: isize = 10;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
}

/// Handles key input and updates state.
///
/// `preset_count` bounds the layout digits.
pub fn handle_key(state: &mut InteractionState, key: KeyEvent, preset_count: usize) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }
    match state.overlay {
        Some(Overlay::Filter) => handle_filter_mode(state, key),
        _ => handle_normal_mode(state, key, preset_count),
    }
}

/// Handles keys outside the filter prompt, including while help or the
/// menu is open. Command letters match in either case.
fn handle_normal_mode(state: &mut InteractionState, key: KeyEvent, preset_count: usize) -> KeyAction {
    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    match code {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Char('p') => state.paused = !state.paused,
        KeyCode::Char('h') => state.toggle_overlay(Overlay::Help),
        KeyCode::Char('m') => state.toggle_overlay(Overlay::Menu),
        KeyCode::Char('f') => state.toggle_overlay(Overlay::Filter),
        KeyCode::Char('s') => state.sort_key = state.sort_key.toggled(),
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            if index < preset_count {
                state.selected_layout = index;
            }
        }
        KeyCode::Esc if state.overlay.is_some() => state.overlay = None,
        KeyCode::Up => state.scroll_by(-1),
        KeyCode::Down => state.scroll_by(1),
        KeyCode::PageUp => state.scroll_by(-PAGE_SCROLL),
        KeyCode::PageDown => state.scroll_by(PAGE_SCROLL),
        _ => {}
    }
    KeyAction::None
}

/// Handles keys while the filter prompt is open. Command letters are text.
fn handle_filter_mode(state: &mut InteractionState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter => state.commit_filter(),
        KeyCode::Esc => state.cancel_filter(),
        KeyCode::Backspace => {
            state.filter_buffer.pop();
        }
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            state.filter_buffer.push(c);
        }
        _ => {}
    }
    KeyAction::None
}
