//! Unified calculator driver
//!
//! The same verification runs against the bare state machine, the terminal
//! app and the web page. Each driver feeds [`Action`]s in the way its
//! frontend receives them and reads back what its frontend shows.

use crate::core::{Action, CalculatorState, Operator};
use crate::web::WebCalculator;

/// Abstract driver for calculator interactions
pub trait CalculatorDriver {
    /// Feeds one action to the calculator
    fn press(&mut self, action: Action);

    /// Text currently on the display
    fn display_text(&self) -> String;

    /// Text currently on the history line
    fn history_text(&self) -> String;

    /// The operator shown as waiting for its second operand
    fn active_operator(&self) -> Option<Operator>;

    /// Feeds several actions in order
    fn press_all(&mut self, actions: &[Action]) {
        for action in actions {
            self.press(*action);
        }
    }

    /// Feeds a compact key string such as `"12+3="`.
    ///
    /// `C` clears, `<` is backspace, whitespace is skipped and anything else
    /// that is not a calculator key is ignored.
    fn press_keys(&mut self, keys: &str) {
        for c in keys.chars() {
            let action = match c {
                'C' => Some(Action::Clear),
                '<' => Some(Action::Backspace),
                _ => Action::from_char(c),
            };
            if let Some(action) = action {
                self.press(action);
            }
        }
    }
}

impl CalculatorDriver for CalculatorState {
    fn press(&mut self, action: Action) {
        self.dispatch(action);
    }

    fn display_text(&self) -> String {
        CalculatorState::display_text(self).to_string()
    }

    fn history_text(&self) -> String {
        CalculatorState::history_text(self).to_string()
    }

    fn active_operator(&self) -> Option<Operator> {
        CalculatorState::active_operator(self)
    }
}

/// TUI driver
#[cfg(feature = "tui")]
pub mod tui_driver {
    use super::CalculatorDriver;
    use crate::core::{Action, Operator};
    use crate::tui::CalculatorApp;

    /// Drives the terminal app through its on-screen keypad
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, action: Action) {
            match self.app.keypad().find_button_by_label(action.label()) {
                Some(index) => self.app.press_button(index),
                None => self.app.dispatch(action),
            }
        }

        fn display_text(&self) -> String {
            self.app.display_text().to_string()
        }

        fn history_text(&self) -> String {
            self.app.history_text().to_string()
        }

        fn active_operator(&self) -> Option<Operator> {
            self.app
                .keypad()
                .buttons_with_positions()
                .find(|(_, b)| b.pressed)
                .and_then(|(_, b)| b.operator_kind())
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

/// Drives the web page by clicking its buttons
#[derive(Debug, Default)]
pub struct WebDriver {
    page: WebCalculator,
}

impl WebDriver {
    /// Creates a driver on a freshly built page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the page
    #[must_use]
    pub fn page(&self) -> &WebCalculator {
        &self.page
    }
}

impl CalculatorDriver for WebDriver {
    fn press(&mut self, action: Action) {
        match self.page.button_for(action).map(str::to_string) {
            Some(id) => self.page.click(&id),
            None => self.page.key_down(&action.label().to_string()),
        }
    }

    fn display_text(&self) -> String {
        self.page.display_text().to_string()
    }

    fn history_text(&self) -> String {
        self.page.history_text().to_string()
    }

    fn active_operator(&self) -> Option<Operator> {
        self.page
            .active_buttons()
            .iter()
            .filter_map(|id| self.page.dom().get_element(id))
            .find_map(|b| match crate::web::button_action(b) {
                Some(Action::Operator(op)) => Some(op),
                _ => None,
            })
    }
}

// ===== Unified verification =====
// These run against ANY CalculatorDriver implementation

/// `5 + 3 =` shows `8` with history `5 + 3 =`
pub fn verify_addition<D: CalculatorDriver>(driver: &mut D) {
    driver.press(Action::Clear);
    driver.press_keys("5+3=");
    assert_eq!(driver.display_text(), "8");
    assert_eq!(driver.history_text(), "5 + 3 =");
    assert_eq!(driver.active_operator(), None);
}

/// Division by zero shows `Error` until cleared
pub fn verify_divide_by_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.press(Action::Clear);
    driver.press_keys("10/0=");
    assert_eq!(driver.display_text(), "Error");
    assert_eq!(driver.history_text(), "10 / 0 =");

    driver.press_keys("5+");
    assert_eq!(driver.display_text(), "Error");

    driver.press(Action::Clear);
    assert_eq!(driver.display_text(), "0");
    assert_eq!(driver.history_text(), "");
}

/// A second operator in a row replaces the first
pub fn verify_operator_substitution<D: CalculatorDriver>(driver: &mut D) {
    driver.press(Action::Clear);
    driver.press_keys("7+");
    assert_eq!(driver.active_operator(), Some(Operator::Add));
    driver.press_keys("-");
    assert_eq!(driver.active_operator(), Some(Operator::Subtract));
    driver.press_keys("2=");
    assert_eq!(driver.display_text(), "5");
    assert_eq!(driver.history_text(), "7 - 2 =");
}

/// Results are rounded to seven decimal places
pub fn verify_rounding<D: CalculatorDriver>(driver: &mut D) {
    driver.press(Action::Clear);
    driver.press_keys("0.1+0.2=");
    assert_eq!(driver.display_text(), "0.3");

    driver.press(Action::Clear);
    driver.press_keys("1/3=");
    assert_eq!(driver.display_text(), "0.3333333");
}

/// Operators fold left to right as they are typed
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) {
    driver.press(Action::Clear);
    driver.press_keys("2+3*");
    assert_eq!(driver.display_text(), "5");
    assert_eq!(driver.active_operator(), Some(Operator::Multiply));
    driver.press_keys("4=");
    assert_eq!(driver.display_text(), "20");
    assert_eq!(driver.history_text(), "5 * 4 =");
}

/// Backspace removes one character and bottoms out at `0`
pub fn verify_backspace<D: CalculatorDriver>(driver: &mut D) {
    driver.press(Action::Clear);
    driver.press_keys("123<");
    assert_eq!(driver.display_text(), "12");
    driver.press_keys("<<<");
    assert_eq!(driver.display_text(), "0");
}

/// Clear resets display, history and the pending operator
pub fn verify_clear<D: CalculatorDriver>(driver: &mut D) {
    driver.press(Action::Clear);
    driver.press_keys("12+");
    driver.press(Action::Clear);
    assert_eq!(driver.display_text(), "0");
    assert_eq!(driver.history_text(), "");
    assert_eq!(driver.active_operator(), None);
}

/// Complete verification suite
pub fn run_full_verification<D: CalculatorDriver>(driver: &mut D) {
    verify_addition(driver);
    verify_divide_by_zero(driver);
    verify_operator_substitution(driver);
    verify_rounding(driver);
    verify_chaining(driver);
    verify_backspace(driver);
    verify_clear(driver);
}
