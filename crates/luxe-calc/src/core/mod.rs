//! Calculator core: operators, rounding, the input state machine and the tape
//!
//! Everything in here is UI-agnostic. Frontends own a [`CalculatorState`] and
//! feed it [`Action`]s one at a time.

pub mod format;
pub mod history;
mod operations;
pub mod state;

pub use operations::{apply, Operator};
pub use state::{transition, Action, CalculatorState, Snapshot, Transition};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Arithmetic failures surfaced by the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Divisor was zero
    #[error("Division by zero")]
    DivideByZero,
}

impl CalcError {
    /// Text shown on the display while the calculator is faulted
    #[must_use]
    pub const fn display_text(&self) -> &'static str {
        match self {
            Self::DivideByZero => "Error",
        }
    }
}
