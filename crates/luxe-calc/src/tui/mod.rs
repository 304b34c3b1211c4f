//! Terminal frontend
//!
//! Keyboard and mouse input feed the same calculator state as every other
//! frontend; the keypad highlights the operator waiting for its operand.

mod app;
mod input;
mod keypad;
mod ui;

pub use app::CalculatorApp;
pub use input::{InputHandler, KeyAction};
pub use keypad::{ButtonAction, Keypad, KeypadButton, KeypadWidget};
pub use ui::{keypad_area, render, CalculatorUI, Palette};
