//! Input state machine
//!
//! Tracks the entry being typed, the pending operator and the left operand
//! across a stream of keypad actions. Each action is an instantaneous
//! transition; frontends either mutate a [`CalculatorState`] in place through
//! [`CalculatorState::dispatch`] or thread it through [`transition`].
//!
//! Division by zero puts the machine into a faulted state whose display reads
//! `"Error"`. While faulted, only [`Action::Clear`] is accepted.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::format::{format_operand, parse_entry, round_to_display};
use crate::core::{apply, CalcError, Operator};

/// Entry shown after startup and after clear
const INITIAL_ENTRY: &str = "0";

/// A single user input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Action {
    /// Digit key 0-9
    Digit(u8),
    /// Decimal point key
    DecimalPoint,
    /// Operator key
    Operator(Operator),
    /// Equals key
    Equals,
    /// Clear key
    Clear,
    /// Backspace key
    Backspace,
}

impl Action {
    /// Maps a single typed character to an action
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => c.to_digit(10).map(|d| Self::Digit(d as u8)),
            '.' => Some(Self::DecimalPoint),
            '=' => Some(Self::Equals),
            _ => Operator::from_symbol(c).map(Self::Operator),
        }
    }

    /// Maps a keyboard key name (`"7"`, `"+"`, `"Enter"`, `"Escape"`...) to an action
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" => Some(Self::Equals),
            "Backspace" => Some(Self::Backspace),
            "Escape" => Some(Self::Clear),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_char(c),
                    _ => None,
                }
            }
        }
    }

    /// Keypad label for this action
    #[must_use]
    pub fn label(&self) -> char {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(*d), 10).unwrap_or('?'),
            Self::DecimalPoint => '.',
            Self::Operator(op) => op.symbol(),
            Self::Equals => '=',
            Self::Clear => 'C',
            Self::Backspace => '<',
        }
    }
}

/// Observable output of the calculator, suitable for serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Text on the main display
    pub display: String,
    /// Last completed expression, or empty
    pub history: String,
    /// Operator to highlight, if one is waiting for its second operand
    pub active_operator: Option<Operator>,
    /// Whether the calculator needs a clear before accepting input
    pub faulted: bool,
}

/// Calculator state for one session
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    current_entry: String,
    previous_operand: Option<f64>,
    pending_operator: Option<Operator>,
    awaiting_second_operand: bool,
    history: String,
    fault: Option<CalcError>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    /// Creates a calculator showing `0` with nothing pending
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_entry: INITIAL_ENTRY.to_string(),
            previous_operand: None,
            pending_operator: None,
            awaiting_second_operand: false,
            history: String::new(),
            fault: None,
        }
    }

    /// The operand currently typed or displayed
    #[must_use]
    pub fn current_entry(&self) -> &str {
        &self.current_entry
    }

    /// Left operand of the pending operation
    #[must_use]
    pub fn previous_operand(&self) -> Option<f64> {
        self.previous_operand
    }

    /// Operator waiting for its second operand
    #[must_use]
    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    /// True between choosing an operator and typing the next digit
    #[must_use]
    pub fn is_awaiting_second_operand(&self) -> bool {
        self.awaiting_second_operand
    }

    /// The fault that stopped the calculator, if any
    #[must_use]
    pub fn fault(&self) -> Option<CalcError> {
        self.fault
    }

    /// Returns true if a clear is needed before further input
    #[must_use]
    pub fn is_faulted(&self) -> bool {
        self.fault.is_some()
    }

    /// Text for the main display
    #[must_use]
    pub fn display_text(&self) -> &str {
        match &self.fault {
            Some(fault) => fault.display_text(),
            None => &self.current_entry,
        }
    }

    /// Last completed expression, formatted `"<prev> <op> <current> ="`
    #[must_use]
    pub fn history_text(&self) -> &str {
        &self.history
    }

    /// Whether `op` should be highlighted on the keypad
    #[must_use]
    pub fn is_active_operator(&self, op: Operator) -> bool {
        self.active_operator() == Some(op)
    }

    /// The operator to highlight, if any
    #[must_use]
    pub fn active_operator(&self) -> Option<Operator> {
        if self.awaiting_second_operand && self.fault.is_none() {
            self.pending_operator
        } else {
            None
        }
    }

    /// Captures the observable output
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display: self.display_text().to_string(),
            history: self.history.clone(),
            active_operator: self.active_operator(),
            faulted: self.is_faulted(),
        }
    }

    /// Applies one action in place
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Digit(d) => match char::from_digit(u32::from(d), 10) {
                Some(c) => self.append_digit(c),
                None => debug!(digit = d, "ignoring out-of-range digit"),
            },
            Action::DecimalPoint => self.append_digit('.'),
            Action::Operator(op) => self.choose_operator(op),
            Action::Equals => self.evaluate(),
            Action::Clear => self.clear(),
            Action::Backspace => self.backspace(),
        }
        trace!(
            ?action,
            display = self.display_text(),
            history = %self.history,
            "applied action"
        );
    }

    /// Types a digit or the decimal point into the entry
    pub fn append_digit(&mut self, digit: char) {
        if self.rejects_input("digit") {
            return;
        }
        if !(digit.is_ascii_digit() || digit == '.') {
            debug!(%digit, "ignoring non-digit input");
            return;
        }

        if self.awaiting_second_operand {
            self.current_entry = if digit == '.' {
                "0.".to_string()
            } else {
                digit.to_string()
            };
            self.awaiting_second_operand = false;
        } else if self.current_entry == INITIAL_ENTRY && digit != '.' {
            self.current_entry = digit.to_string();
        } else if digit == '.' && self.current_entry.contains('.') {
            trace!(entry = %self.current_entry, "entry already has a decimal point");
        } else {
            self.current_entry.push(digit);
        }
    }

    /// Chooses the next operator, folding any pending operation first
    pub fn choose_operator(&mut self, op: Operator) {
        if self.rejects_input("operator") {
            return;
        }

        if self.pending_operator.is_some() && self.awaiting_second_operand {
            debug!(from = ?self.pending_operator, to = ?op, "operator substituted");
            self.pending_operator = Some(op);
            return;
        }

        let input = parse_entry(&self.current_entry);
        match self.previous_operand {
            None => self.previous_operand = Some(input),
            Some(previous) => match apply(previous, input, self.pending_operator) {
                Ok(result) => {
                    self.current_entry = round_to_display(result);
                    self.previous_operand = Some(result);
                }
                Err(err) => {
                    self.enter_fault(err);
                    return;
                }
            },
        }

        self.pending_operator = Some(op);
        self.awaiting_second_operand = true;
    }

    /// Completes the pending operation ("=")
    pub fn evaluate(&mut self) {
        if self.rejects_input("equals") {
            return;
        }
        if self.awaiting_second_operand {
            trace!("equals ignored: no second operand yet");
            return;
        }
        let (Some(op), Some(previous)) = (self.pending_operator, self.previous_operand) else {
            trace!("equals ignored: nothing pending");
            return;
        };

        let input = parse_entry(&self.current_entry);
        self.history = format!(
            "{} {} {} =",
            format_operand(previous),
            op,
            self.current_entry
        );
        self.previous_operand = None;
        self.pending_operator = None;
        self.awaiting_second_operand = false;

        match op.apply(previous, input) {
            Ok(result) => {
                self.current_entry = round_to_display(result);
                debug!(history = %self.history, result = %self.current_entry, "evaluated");
            }
            Err(err) => self.enter_fault(err),
        }
    }

    /// Resets everything, history included
    pub fn clear(&mut self) {
        if let Some(fault) = self.fault {
            debug!(%fault, "fault cleared");
        }
        *self = Self::new();
    }

    /// Removes the last typed character
    pub fn backspace(&mut self) {
        if self.rejects_input("backspace") {
            return;
        }
        if self.current_entry.chars().count() > 1 {
            self.current_entry.pop();
            if self.current_entry.parse::<f64>().is_err() {
                self.current_entry = INITIAL_ENTRY.to_string();
            }
        } else {
            self.current_entry = INITIAL_ENTRY.to_string();
        }
    }

    fn rejects_input(&self, input: &str) -> bool {
        match self.fault {
            Some(fault) => {
                debug!(input, %fault, "input ignored until clear");
                true
            }
            None => false,
        }
    }

    fn enter_fault(&mut self, err: CalcError) {
        warn!(error = %err, "calculation failed");
        self.fault = Some(err);
        self.current_entry = INITIAL_ENTRY.to_string();
        self.previous_operand = None;
        self.pending_operator = None;
        self.awaiting_second_operand = false;
    }
}

/// Result of feeding one action through [`transition`]
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// State after the action
    pub state: CalculatorState,
    /// Display text after the action
    pub display_text: String,
    /// History text after the action
    pub history_text: String,
}

/// Pure form of [`CalculatorState::dispatch`] for host event loops
#[must_use]
pub fn transition(mut state: CalculatorState, action: Action) -> Transition {
    state.dispatch(action);
    let display_text = state.display_text().to_string();
    let history_text = state.history.clone();
    Transition {
        state,
        display_text,
        history_text,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn press(state: &mut CalculatorState, keys: &str) {
        for c in keys.chars().filter(|c| !c.is_whitespace()) {
            state.dispatch(Action::from_char(c).unwrap());
        }
    }

    fn after(keys: &str) -> CalculatorState {
        let mut state = CalculatorState::new();
        press(&mut state, keys);
        state
    }

    // ===== Initial state =====

    #[test]
    fn test_new_state() {
        let state = CalculatorState::new();
        assert_eq!(state.current_entry(), "0");
        assert_eq!(state.previous_operand(), None);
        assert_eq!(state.pending_operator(), None);
        assert!(!state.is_awaiting_second_operand());
        assert_eq!(state.display_text(), "0");
        assert_eq!(state.history_text(), "");
        assert!(!state.is_faulted());
    }

    #[test]
    fn test_default_matches_new() {
        assert_eq!(CalculatorState::default(), CalculatorState::new());
    }

    // ===== Action mapping =====

    #[test]
    fn test_action_from_char_digits() {
        for (i, c) in ('0'..='9').enumerate() {
            assert_eq!(Action::from_char(c), Some(Action::Digit(i as u8)));
        }
    }

    #[test]
    fn test_action_from_char_operators() {
        assert_eq!(Action::from_char('+'), Some(Action::Operator(Operator::Add)));
        assert_eq!(
            Action::from_char('/'),
            Some(Action::Operator(Operator::Divide))
        );
        assert_eq!(Action::from_char('='), Some(Action::Equals));
        assert_eq!(Action::from_char('x'), None);
    }

    #[test]
    fn test_action_from_key_names() {
        assert_eq!(Action::from_key("Enter"), Some(Action::Equals));
        assert_eq!(Action::from_key("="), Some(Action::Equals));
        assert_eq!(Action::from_key("Backspace"), Some(Action::Backspace));
        assert_eq!(Action::from_key("Escape"), Some(Action::Clear));
        assert_eq!(Action::from_key("."), Some(Action::DecimalPoint));
        assert_eq!(Action::from_key("7"), Some(Action::Digit(7)));
        assert_eq!(Action::from_key("Shift"), None);
        assert_eq!(Action::from_key(""), None);
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(Action::Digit(4).label(), '4');
        assert_eq!(Action::DecimalPoint.label(), '.');
        assert_eq!(Action::Operator(Operator::Multiply).label(), '*');
        assert_eq!(Action::Equals.label(), '=');
        assert_eq!(Action::Clear.label(), 'C');
        assert_eq!(Action::Backspace.label(), '<');
    }

    #[test]
    fn test_action_serde() {
        let json = serde_json::to_string(&Action::Operator(Operator::Add)).unwrap();
        assert_eq!(json, r#"{"type":"operator","value":"add"}"#);
        let back: Action = serde_json::from_str(r#"{"type":"digit","value":3}"#).unwrap();
        assert_eq!(back, Action::Digit(3));
    }

    // ===== append_digit =====

    #[test]
    fn test_leading_zero_replaced() {
        assert_eq!(after("7").current_entry(), "7");
    }

    #[test]
    fn test_digits_concatenate() {
        assert_eq!(after("1203").current_entry(), "1203");
    }

    #[test]
    fn test_zero_then_point_keeps_zero() {
        assert_eq!(after("0.5").current_entry(), "0.5");
    }

    #[test]
    fn test_repeated_zeros_collapse() {
        assert_eq!(after("0007").current_entry(), "7");
    }

    #[test]
    fn test_second_decimal_point_ignored() {
        assert_eq!(after("1.2.3").current_entry(), "1.23");
    }

    #[test]
    fn test_decimal_point_idempotent() {
        let mut state = after("3.");
        let before = state.clone();
        state.dispatch(Action::DecimalPoint);
        assert_eq!(state, before);
    }

    #[test]
    fn test_digit_replaces_entry_after_operator() {
        let state = after("12+3");
        assert_eq!(state.current_entry(), "3");
        assert!(!state.is_awaiting_second_operand());
    }

    #[test]
    fn test_point_after_operator_starts_fraction() {
        assert_eq!(after("12+.").current_entry(), "0.");
        assert_eq!(after("12+.5=").display_text(), "12.5");
    }

    #[test]
    fn test_non_digit_char_ignored() {
        let mut state = after("4");
        state.append_digit('x');
        assert_eq!(state.current_entry(), "4");
    }

    #[test]
    fn test_out_of_range_digit_ignored() {
        let mut state = after("4");
        state.dispatch(Action::Digit(12));
        assert_eq!(state.current_entry(), "4");
    }

    // ===== choose_operator =====

    #[test]
    fn test_first_operator_stores_operand() {
        let state = after("5+");
        assert_eq!(state.previous_operand(), Some(5.0));
        assert_eq!(state.pending_operator(), Some(Operator::Add));
        assert!(state.is_awaiting_second_operand());
        assert_eq!(state.display_text(), "5");
    }

    #[test]
    fn test_operator_substitution_does_not_compute() {
        let state = after("7+-");
        assert_eq!(state.previous_operand(), Some(7.0));
        assert_eq!(state.pending_operator(), Some(Operator::Subtract));
        assert_eq!(state.display_text(), "7");
    }

    #[test]
    fn test_chained_operator_folds_pending() {
        let state = after("2+3*");
        assert_eq!(state.display_text(), "5");
        assert_eq!(state.previous_operand(), Some(5.0));
        assert_eq!(state.pending_operator(), Some(Operator::Multiply));
    }

    #[test]
    fn test_chain_keeps_unrounded_operand() {
        let state = after("0.1+0.2+");
        assert_eq!(state.display_text(), "0.3");
        assert_eq!(state.previous_operand(), Some(0.1 + 0.2));
    }

    #[test]
    fn test_chain_without_precedence() {
        assert_eq!(after("2+3*4=").display_text(), "20");
    }

    // ===== evaluate =====

    #[test]
    fn test_evaluate_addition() {
        let state = after("5+3=");
        assert_eq!(state.display_text(), "8");
        assert_eq!(state.history_text(), "5 + 3 =");
        assert_eq!(state.previous_operand(), None);
        assert_eq!(state.pending_operator(), None);
        assert!(!state.is_awaiting_second_operand());
    }

    #[test]
    fn test_evaluate_rounding() {
        assert_eq!(after("0.1+0.2=").display_text(), "0.3");
    }

    #[test]
    fn test_evaluate_history_uses_typed_entry() {
        assert_eq!(after("6*1.50=").history_text(), "6 * 1.50 =");
    }

    #[test]
    fn test_evaluate_history_uses_unrounded_operand() {
        assert_eq!(
            after("0.1+0.2+1=").history_text(),
            "0.30000000000000004 + 1 ="
        );
    }

    #[test]
    fn test_evaluate_without_operator_is_noop() {
        let mut state = after("42");
        let before = state.clone();
        state.dispatch(Action::Equals);
        assert_eq!(state, before);
    }

    #[test]
    fn test_evaluate_while_awaiting_is_noop() {
        let mut state = after("42*");
        let before = state.clone();
        state.dispatch(Action::Equals);
        assert_eq!(state, before);
    }

    #[test]
    fn test_repeated_equals_is_noop() {
        let mut state = after("5+3=");
        state.dispatch(Action::Equals);
        assert_eq!(state.display_text(), "8");
        assert_eq!(state.history_text(), "5 + 3 =");
    }

    #[test]
    fn test_digit_after_result_appends() {
        assert_eq!(after("5+3=1").display_text(), "81");
    }

    #[test]
    fn test_operator_after_result_continues() {
        let state = after("5+3=*2=");
        assert_eq!(state.display_text(), "16");
        assert_eq!(state.history_text(), "8 * 2 =");
    }

    #[test]
    fn test_negative_result() {
        let state = after("3-5=");
        assert_eq!(state.display_text(), "-2");
        assert_eq!(after("3-5=*4=").display_text(), "-8");
    }

    // ===== divide by zero =====

    #[test]
    fn test_divide_by_zero_shows_error() {
        let state = after("10/0=");
        assert_eq!(state.display_text(), "Error");
        assert_eq!(state.history_text(), "10 / 0 =");
        assert_eq!(state.fault(), Some(CalcError::DivideByZero));
        assert_eq!(state.pending_operator(), None);
    }

    #[test]
    fn test_divide_by_zero_while_chaining() {
        let state = after("8/0+");
        assert_eq!(state.display_text(), "Error");
        assert_eq!(state.active_operator(), None);
    }

    #[test]
    fn test_faulted_state_ignores_input() {
        let mut state = after("10/0=");
        let before = state.clone();
        press(&mut state, "5+3=");
        state.dispatch(Action::Backspace);
        assert_eq!(state, before);
    }

    #[test]
    fn test_clear_recovers_from_fault() {
        let mut state = after("10/0=");
        state.dispatch(Action::Clear);
        assert_eq!(state, CalculatorState::new());
        press(&mut state, "2*4=");
        assert_eq!(state.display_text(), "8");
    }

    // ===== clear / backspace =====

    #[test]
    fn test_clear_resets_everything() {
        let mut state = after("5+3=9*");
        state.clear();
        assert_eq!(state, CalculatorState::new());
    }

    #[test]
    fn test_clear_idempotent() {
        let mut state = after("12+");
        state.clear();
        let once = state.clone();
        state.clear();
        assert_eq!(state, once);
    }

    #[test]
    fn test_backspace_drops_last_char() {
        let mut state = after("123");
        state.backspace();
        assert_eq!(state.current_entry(), "12");
    }

    #[test]
    fn test_backspace_single_char_yields_zero() {
        let mut state = after("7");
        state.backspace();
        assert_eq!(state.current_entry(), "0");
        state.backspace();
        assert_eq!(state.current_entry(), "0");
    }

    #[test]
    fn test_backspace_negative_sign_alone_yields_zero() {
        let mut state = after("3-5=");
        state.backspace();
        assert_eq!(state.current_entry(), "0");
    }

    #[test]
    fn test_backspace_keeps_trailing_point() {
        let mut state = after("2.5");
        state.backspace();
        assert_eq!(state.current_entry(), "2.");
    }

    // ===== active operator =====

    #[test]
    fn test_active_operator_while_awaiting() {
        let state = after("9*");
        assert!(state.is_active_operator(Operator::Multiply));
        assert!(!state.is_active_operator(Operator::Add));
    }

    #[test]
    fn test_active_operator_cleared_by_digit() {
        let state = after("9*2");
        assert_eq!(state.active_operator(), None);
        assert!(!state.is_active_operator(Operator::Multiply));
    }

    // ===== snapshot / transition =====

    #[test]
    fn test_snapshot() {
        let snap = after("4-").snapshot();
        assert_eq!(snap.display, "4");
        assert_eq!(snap.history, "");
        assert_eq!(snap.active_operator, Some(Operator::Subtract));
        assert!(!snap.faulted);
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = serde_json::to_string(&after("5+3=").snapshot()).unwrap();
        assert!(json.contains(r#""display":"8""#));
        assert!(json.contains(r#""history":"5 + 3 =""#));
    }

    #[test]
    fn test_transition_is_pure_fold() {
        let actions = [
            Action::Digit(5),
            Action::Operator(Operator::Add),
            Action::Digit(3),
            Action::Equals,
        ];
        let initial = CalculatorState::new();
        let step = actions
            .iter()
            .fold(transition(initial.clone(), Action::Clear), |t, &a| {
                transition(t.state, a)
            });
        assert_eq!(step.display_text, "8");
        assert_eq!(step.history_text, "5 + 3 =");
        assert_eq!(initial, CalculatorState::new());
    }
}
