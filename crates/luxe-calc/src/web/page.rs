//! The calculator web page, driven through a mock DOM
//!
//! Buttons carry class `btn` and describe themselves with `data-action`
//! (`operator`, `calculate`, `clear`, `backspace`) and `data-value`; a button
//! with only a `data-value` types that value. Operator buttons also carry
//! `btn-operator` and get the `active` class while their operator waits for a
//! second operand.

use tracing::debug;

use super::dom::{DomElement, DomEvent, MockDom};
use crate::core::{Action, CalculatorState, Operator};

/// ID of the main display element
pub const DISPLAY_ID: &str = "display";
/// ID of the history line element
pub const HISTORY_ID: &str = "history";
/// ID of the theme toggle button
pub const THEME_BUTTON_ID: &str = "theme-btn";
/// ID of the body element
pub const BODY_ID: &str = "body";
/// Class put on the body in dark mode
pub const DARK_THEME_CLASS: &str = "dark-theme";
/// Class marking the operator waiting for its second operand
pub const ACTIVE_CLASS: &str = "active";

/// Keypad rows as (id, label, data-action, data-value)
const BUTTONS: &[(&str, &str, Option<&str>, Option<&str>)] = &[
    ("btn-clear", "C", Some("clear"), None),
    ("btn-backspace", "⌫", Some("backspace"), None),
    ("btn-divide", "÷", Some("operator"), Some("/")),
    ("btn-multiply", "×", Some("operator"), Some("*")),
    ("btn-7", "7", None, Some("7")),
    ("btn-8", "8", None, Some("8")),
    ("btn-9", "9", None, Some("9")),
    ("btn-subtract", "−", Some("operator"), Some("-")),
    ("btn-4", "4", None, Some("4")),
    ("btn-5", "5", None, Some("5")),
    ("btn-6", "6", None, Some("6")),
    ("btn-add", "+", Some("operator"), Some("+")),
    ("btn-1", "1", None, Some("1")),
    ("btn-2", "2", None, Some("2")),
    ("btn-3", "3", None, Some("3")),
    ("btn-equals", "=", Some("calculate"), None),
    ("btn-0", "0", None, Some("0")),
    ("btn-decimal", ".", None, Some(".")),
];

/// Reads the calculator action a `.btn` element stands for
#[must_use]
pub fn button_action(element: &DomElement) -> Option<Action> {
    match element.data("action") {
        Some("operator") => element
            .data("value")
            .and_then(single_char)
            .and_then(Operator::from_symbol)
            .map(Action::Operator),
        Some("calculate") => Some(Action::Equals),
        Some("clear") => Some(Action::Clear),
        Some("backspace") => Some(Action::Backspace),
        Some(_) => None,
        None => element
            .data("value")
            .and_then(single_char)
            .and_then(Action::from_char),
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Calculator page: a document plus the calculator state behind it
#[derive(Debug)]
pub struct WebCalculator {
    dom: MockDom,
    state: CalculatorState,
}

impl Default for WebCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl WebCalculator {
    /// Builds the page and renders the initial state
    #[must_use]
    pub fn new() -> Self {
        let mut dom = MockDom::new();
        dom.register_element(DomElement::new("body").with_id(BODY_ID));
        dom.register_element(
            DomElement::new("button")
                .with_id(THEME_BUTTON_ID)
                .with_text("◐"),
        );
        dom.register_element(
            DomElement::new("div")
                .with_id(HISTORY_ID)
                .with_class("history"),
        );
        dom.register_element(
            DomElement::new("div")
                .with_id(DISPLAY_ID)
                .with_class("display"),
        );

        for (id, label, action, value) in BUTTONS {
            let mut button = DomElement::new("button")
                .with_id(id)
                .with_text(label)
                .with_class("btn");
            if let Some(action) = action {
                button = button.with_attr("data-action", action);
                if *action == "operator" {
                    button = button.with_class("btn-operator");
                }
            }
            if let Some(value) = value {
                button = button.with_attr("data-value", value);
            }
            dom.register_element(button);
        }

        let mut page = Self {
            dom,
            state: CalculatorState::new(),
        };
        page.update_ui();
        page
    }

    /// Returns the document
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Returns the calculator state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Text of the display element
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.dom.get_element_text(DISPLAY_ID).unwrap_or_default()
    }

    /// Text of the history element
    #[must_use]
    pub fn history_text(&self) -> &str {
        self.dom.get_element_text(HISTORY_ID).unwrap_or_default()
    }

    /// Whether the body carries the dark theme class
    #[must_use]
    pub fn is_dark_theme(&self) -> bool {
        self.dom
            .get_element(BODY_ID)
            .is_some_and(|body| body.has_class(DARK_THEME_CLASS))
    }

    /// Operator buttons currently marked active
    #[must_use]
    pub fn active_buttons(&self) -> Vec<String> {
        self.dom
            .query_by_class("btn-operator")
            .into_iter()
            .filter(|b| b.has_class(ACTIVE_CLASS))
            .map(|b| b.id.clone())
            .collect()
    }

    /// ID of the button that performs `action`, if the keypad has one
    #[must_use]
    pub fn button_for(&self, action: Action) -> Option<&str> {
        self.dom
            .query_by_class("btn")
            .into_iter()
            .find(|b| button_action(b) == Some(action))
            .map(|b| b.id.as_str())
    }

    /// Handles a DOM event
    pub fn dispatch(&mut self, event: DomEvent) {
        self.dom.record_event(event.clone());

        match event {
            DomEvent::Click { element_id } if element_id == THEME_BUTTON_ID => {
                if let Some(body) = self.dom.get_element_mut(BODY_ID) {
                    let dark = body.toggle_class(DARK_THEME_CLASS);
                    debug!(dark, "theme toggled");
                }
            }
            DomEvent::Click { element_id } => {
                let action = self
                    .dom
                    .get_element(&element_id)
                    .filter(|e| e.has_class("btn"))
                    .and_then(button_action);
                match action {
                    Some(action) => self.state.dispatch(action),
                    None => debug!(%element_id, "click on non-button ignored"),
                }
                self.update_ui();
            }
            DomEvent::KeyDown { key } => {
                match Action::from_key(&key) {
                    Some(action) => self.state.dispatch(action),
                    None => debug!(%key, "unmapped key ignored"),
                }
                self.update_ui();
            }
        }
    }

    /// Clicks the element with `id`
    pub fn click(&mut self, id: &str) {
        self.dispatch(DomEvent::click(id));
    }

    /// Presses a keyboard key
    pub fn key_down(&mut self, key: &str) {
        self.dispatch(DomEvent::key_down(key));
    }

    /// Writes the state into the document
    pub fn update_ui(&mut self) {
        let display = self.state.display_text().to_string();
        let history = self.state.history_text().to_string();
        self.dom.set_element_text(DISPLAY_ID, &display);
        self.dom.set_element_text(HISTORY_ID, &history);

        for id in self.dom.ids_with_class("btn-operator") {
            let active = self
                .dom
                .get_element(&id)
                .and_then(|b| b.data("value"))
                .and_then(single_char)
                .and_then(Operator::from_symbol)
                .is_some_and(|op| self.state.is_active_operator(op));
            if let Some(button) = self.dom.get_element_mut(&id) {
                button.set_class(ACTIVE_CLASS, active);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn click_all(page: &mut WebCalculator, ids: &[&str]) {
        for id in ids {
            page.click(id);
        }
    }

    #[test]
    fn test_page_structure() {
        let page = WebCalculator::new();
        let dom = page.dom();
        assert!(dom.get_element(DISPLAY_ID).is_some());
        assert!(dom.get_element(HISTORY_ID).is_some());
        assert!(dom.get_element(THEME_BUTTON_ID).is_some());
        assert!(dom.get_element(BODY_ID).is_some());
        assert_eq!(dom.query_by_class("btn").len(), 18);
        assert_eq!(dom.query_by_class("btn-operator").len(), 4);
    }

    #[test]
    fn test_initial_render() {
        let page = WebCalculator::default();
        assert_eq!(page.display_text(), "0");
        assert_eq!(page.history_text(), "");
        assert!(page.active_buttons().is_empty());
        assert!(!page.is_dark_theme());
    }

    #[test]
    fn test_button_action_mapping() {
        let page = WebCalculator::new();
        let action_of = |id: &str| button_action(page.dom().get_element(id).unwrap());
        assert_eq!(action_of("btn-7"), Some(Action::Digit(7)));
        assert_eq!(action_of("btn-decimal"), Some(Action::DecimalPoint));
        assert_eq!(action_of("btn-add"), Some(Action::Operator(Operator::Add)));
        assert_eq!(action_of("btn-equals"), Some(Action::Equals));
        assert_eq!(action_of("btn-clear"), Some(Action::Clear));
        assert_eq!(action_of("btn-backspace"), Some(Action::Backspace));
    }

    #[test]
    fn test_button_action_unknown() {
        let odd = DomElement::new("button").with_attr("data-action", "sqrt");
        assert_eq!(button_action(&odd), None);
        let multi = DomElement::new("button").with_attr("data-value", "12");
        assert_eq!(button_action(&multi), None);
    }

    #[test]
    fn test_button_for() {
        let page = WebCalculator::new();
        assert_eq!(page.button_for(Action::Digit(0)), Some("btn-0"));
        assert_eq!(
            page.button_for(Action::Operator(Operator::Divide)),
            Some("btn-divide")
        );
        assert_eq!(page.button_for(Action::Equals), Some("btn-equals"));
    }

    #[test]
    fn test_click_addition() {
        let mut page = WebCalculator::new();
        click_all(&mut page, &["btn-5", "btn-add", "btn-3", "btn-equals"]);
        assert_eq!(page.display_text(), "8");
        assert_eq!(page.history_text(), "5 + 3 =");
    }

    #[test]
    fn test_active_operator_class() {
        let mut page = WebCalculator::new();
        click_all(&mut page, &["btn-9", "btn-multiply"]);
        assert_eq!(page.active_buttons(), vec!["btn-multiply"]);

        page.click("btn-subtract");
        assert_eq!(page.active_buttons(), vec!["btn-subtract"]);

        page.click("btn-2");
        assert!(page.active_buttons().is_empty());
    }

    #[test]
    fn test_keyboard_input() {
        let mut page = WebCalculator::new();
        for key in ["1", "0", "/", "4", "Enter"] {
            page.key_down(key);
        }
        assert_eq!(page.display_text(), "2.5");
        assert_eq!(page.history_text(), "10 / 4 =");

        page.key_down("Backspace");
        assert_eq!(page.display_text(), "2.");

        page.key_down("Escape");
        assert_eq!(page.display_text(), "0");
        assert_eq!(page.history_text(), "");
    }

    #[test]
    fn test_unmapped_key_ignored() {
        let mut page = WebCalculator::new();
        page.key_down("7");
        page.key_down("Shift");
        page.key_down("%");
        assert_eq!(page.display_text(), "7");
        assert_eq!(page.dom().event_history().len(), 3);
    }

    #[test]
    fn test_divide_by_zero_shows_error() {
        let mut page = WebCalculator::new();
        click_all(&mut page, &["btn-1", "btn-divide", "btn-0", "btn-equals"]);
        assert_eq!(page.display_text(), "Error");
        assert_eq!(page.history_text(), "1 / 0 =");

        page.click("btn-clear");
        assert_eq!(page.display_text(), "0");
    }

    #[test]
    fn test_theme_toggle() {
        let mut page = WebCalculator::new();
        page.click(THEME_BUTTON_ID);
        assert!(page.is_dark_theme());
        page.click(THEME_BUTTON_ID);
        assert!(!page.is_dark_theme());
    }

    #[test]
    fn test_click_non_button_ignored() {
        let mut page = WebCalculator::new();
        page.click("btn-4");
        page.click(DISPLAY_ID);
        page.click("nowhere");
        assert_eq!(page.display_text(), "4");
    }
}
