//! On-screen keypad for the terminal calculator
//!
//! Buttons can be clicked with the mouse, and the operator waiting for its
//! second operand is drawn highlighted.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use super::ui::Palette;
use crate::core::{Action, Operator};

/// What a keypad button does when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Feed an action to the calculator
    Calc(Action),
    /// Switch theme
    ToggleTheme,
    /// Quit the application
    Quit,
}

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The character shown on the button
    pub label: char,
    /// Whether the button is drawn highlighted
    pub pressed: bool,
    /// The action this button performs
    pub action: ButtonAction,
}

impl KeypadButton {
    /// Creates a button feeding `action` to the calculator
    #[must_use]
    pub fn calc(action: Action) -> Self {
        Self {
            label: action.label(),
            pressed: false,
            action: ButtonAction::Calc(action),
        }
    }

    /// Creates a digit button
    #[must_use]
    pub fn digit(d: u8) -> Self {
        Self::calc(Action::Digit(d))
    }

    /// Creates an operator button
    #[must_use]
    pub fn operator(op: Operator) -> Self {
        Self::calc(Action::Operator(op))
    }

    /// Creates the theme toggle button
    #[must_use]
    pub fn theme() -> Self {
        Self {
            label: 'T',
            pressed: false,
            action: ButtonAction::ToggleTheme,
        }
    }

    /// Creates the quit button
    #[must_use]
    pub fn quit() -> Self {
        Self {
            label: 'Q',
            pressed: false,
            action: ButtonAction::Quit,
        }
    }

    /// Sets the pressed state
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    /// Returns the operator on this button, if it is an operator button
    #[must_use]
    pub fn operator_kind(&self) -> Option<Operator> {
        match self.action {
            ButtonAction::Calc(Action::Operator(op)) => Some(op),
            _ => None,
        }
    }
}

/// The keypad layout, a 5x4 grid of buttons
/// ```text
/// [ C ] [ < ] [ T ] [ / ]
/// [ 7 ] [ 8 ] [ 9 ] [ * ]
/// [ 4 ] [ 5 ] [ 6 ] [ - ]
/// [ 1 ] [ 2 ] [ 3 ] [ + ]
/// [ 0 ] [ . ] [ = ] [ Q ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Buttons in row-major order
    buttons: Vec<KeypadButton>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        let buttons = vec![
            KeypadButton::calc(Action::Clear),
            KeypadButton::calc(Action::Backspace),
            KeypadButton::theme(),
            KeypadButton::operator(Operator::Divide),
            KeypadButton::digit(7),
            KeypadButton::digit(8),
            KeypadButton::digit(9),
            KeypadButton::operator(Operator::Multiply),
            KeypadButton::digit(4),
            KeypadButton::digit(5),
            KeypadButton::digit(6),
            KeypadButton::operator(Operator::Subtract),
            KeypadButton::digit(1),
            KeypadButton::digit(2),
            KeypadButton::digit(3),
            KeypadButton::operator(Operator::Add),
            KeypadButton::digit(0),
            KeypadButton::calc(Action::DecimalPoint),
            KeypadButton::calc(Action::Equals),
            KeypadButton::quit(),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds a button by its label character
    #[must_use]
    pub fn find_button_by_label(&self, label: char) -> Option<usize> {
        self.buttons.iter().position(|b| b.label == label)
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.set_pressed(false);
        }
    }

    /// Highlights the button of the active operator, releasing all others
    pub fn highlight_operator(&mut self, active: Option<Operator>) {
        for btn in &mut self.buttons {
            let pressed = active.is_some() && btn.operator_kind() == active;
            btn.set_pressed(pressed);
        }
    }

    /// Returns an iterator over buttons with their (row, col) positions
    pub fn buttons_with_positions(&self) -> impl Iterator<Item = ((usize, usize), &KeypadButton)> {
        self.buttons.iter().enumerate().map(move |(i, btn)| {
            let row = i / self.cols;
            let col = i % self.cols;
            ((row, col), btn)
        })
    }

    /// Converts a click position inside the bordered `area` to a button index
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }

        let rel_x = x - area.x;
        let rel_y = y - area.y;

        // border is one cell on each side
        if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
            return None;
        }

        let btn_width = (area.width - 2) / self.cols as u16;
        let btn_height = (area.height - 2) / self.rows as u16;
        if btn_width == 0 || btn_height == 0 {
            return None;
        }

        let col = ((rel_x - 1) / btn_width) as usize;
        let row = ((rel_y - 1) / btn_height) as usize;

        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
    palette: Palette,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad, palette: Palette) -> Self {
        Self { keypad, palette }
    }

    fn button_style(&self, btn: &KeypadButton) -> Style {
        let p = &self.palette;
        if btn.pressed {
            return Style::default()
                .fg(p.background)
                .bg(p.active)
                .add_modifier(Modifier::BOLD);
        }
        match btn.action {
            ButtonAction::Calc(Action::Operator(_)) => Style::default().fg(p.operator),
            ButtonAction::Calc(Action::Equals) => Style::default().fg(p.accent),
            ButtonAction::Calc(Action::Clear) | ButtonAction::Quit => Style::default().fg(p.error),
            ButtonAction::Calc(_) => Style::default().fg(p.foreground),
            ButtonAction::ToggleTheme => Style::default().fg(p.muted),
        }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.palette.border))
            .render(area, buf);

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        let (rows, cols) = self.keypad.dimensions();
        if inner.width < cols as u16 || inner.height < rows as u16 {
            return;
        }

        let btn_width = inner.width / cols as u16;
        let btn_height = inner.height / rows as u16;

        for ((row, col), btn) in self.keypad.buttons_with_positions() {
            if btn_width < 3 {
                break;
            }
            let x = inner.x + (col as u16 * btn_width);
            let y = inner.y + (row as u16 * btn_height);

            let label = format!("[{}]", btn.label);
            let label_x = x + (btn_width.saturating_sub(label.len() as u16)) / 2;
            let label_y = y + btn_height / 2;

            if label_y < inner.y + inner.height && label_x < inner.x + inner.width {
                let span = Span::styled(label, self.button_style(btn));
                buf.set_span(label_x, label_y, &span, btn_width);
            }
        }
    }
}
