//! Keyboard input handling
//!
//! Mirrors the keyboard bindings of the web keypad: digits, `.`, the four
//! operators, Enter/`=`, Backspace and Esc. The terminal adds theme toggling,
//! tape clearing and quit.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::Action;

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Feed an action to the calculator
    Calc(Action),
    /// Switch between light and dark theme
    ToggleTheme,
    /// Clear the tape of completed calculations
    ClearTape,
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                KeyCode::Char('l') => KeyAction::ClearTape,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char('t' | 'T') => KeyAction::ToggleTheme,
            KeyCode::Char(c) => Action::from_char(c).map_or(KeyAction::None, KeyAction::Calc),
            KeyCode::Enter => KeyAction::Calc(Action::Equals),
            KeyCode::Backspace => KeyAction::Calc(Action::Backspace),
            KeyCode::Esc => KeyAction::Calc(Action::Clear),
            _ => KeyAction::None,
        }
    }
}
