//! Web frontend
//!
//! The calculator page as a headless document: clicks and key presses go in,
//! display text, history text and CSS classes come out.

mod dom;
mod page;

pub use dom::{DomElement, DomEvent, MockDom};
pub use page::{
    button_action, WebCalculator, ACTIVE_CLASS, BODY_ID, DARK_THEME_CLASS, DISPLAY_ID,
    HISTORY_ID, THEME_BUTTON_ID,
};
