//! TUI application state

use ratatui::layout::Rect;
use tracing::{debug, info};

use super::input::KeyAction;
use super::keypad::{ButtonAction, Keypad};
use crate::config::{CalcConfig, Theme};
use crate::core::history::Tape;
use crate::core::{Action, CalculatorState};

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    /// The calculator itself
    state: CalculatorState,
    /// Completed calculations, newest last
    tape: Tape,
    /// On-screen keypad, kept in sync with the active operator
    keypad: Keypad,
    theme: Theme,
    /// Whether the app should quit
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates a new calculator app with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&CalcConfig::default())
    }

    /// Creates a calculator app using the theme and tape size of `config`
    #[must_use]
    pub fn from_config(config: &CalcConfig) -> Self {
        Self {
            state: CalculatorState::new(),
            tape: config.new_tape(),
            keypad: Keypad::new(),
            theme: config.theme,
            should_quit: false,
        }
    }

    /// Returns the calculator state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Returns the tape of completed calculations
    #[must_use]
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the current theme
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Text for the main display
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.state.display_text()
    }

    /// Text for the history line
    #[must_use]
    pub fn history_text(&self) -> &str {
        self.state.history_text()
    }

    /// Feeds an action to the calculator.
    ///
    /// A completed `=` is appended to the tape, including one that ended in
    /// `Error`.
    pub fn dispatch(&mut self, action: Action) {
        let had_pending = self.state.pending_operator().is_some();
        self.state.dispatch(action);

        if action == Action::Equals && had_pending && self.state.pending_operator().is_none() {
            self.tape
                .record(self.state.history_text(), self.state.display_text());
            debug!(entries = self.tape.len(), "tape updated");
        }

        self.keypad.highlight_operator(self.state.active_operator());
    }

    /// Switches between light and dark theme
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        info!(theme = ?self.theme, "theme changed");
    }

    /// Empties the tape without touching the calculator
    pub fn clear_tape(&mut self) {
        self.tape.clear();
        info!("tape cleared");
    }

    /// Applies a keyboard action
    pub fn handle_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Calc(action) => self.dispatch(action),
            KeyAction::ToggleTheme => self.toggle_theme(),
            KeyAction::ClearTape => self.clear_tape(),
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Activates the keypad button at `index`
    pub fn press_button(&mut self, index: usize) {
        let Some(action) = self.keypad.get_button(index).map(|b| b.action) else {
            return;
        };
        match action {
            ButtonAction::Calc(action) => self.dispatch(action),
            ButtonAction::ToggleTheme => self.toggle_theme(),
            ButtonAction::Quit => self.quit(),
        }
    }

    /// Handles a mouse click at (`x`, `y`) given where the keypad is drawn.
    ///
    /// Returns whether a button was hit.
    pub fn click(&mut self, keypad_area: Rect, x: u16, y: u16) -> bool {
        match self.keypad.hit_test(keypad_area, x, y) {
            Some(index) => {
                self.press_button(index);
                true
            }
            None => false,
        }
    }
}
