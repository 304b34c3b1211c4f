//! Luxe Calc - four-function keypad calculator
//!
//! The calculator is an input state machine: digits build up an entry,
//! operators fold the entry into a running result left to right, `=` completes
//! the pending operation and writes a history line. Results are shown rounded
//! to seven decimal places, and dividing by zero shows `Error` until cleared.
//!
//! The same [`CalculatorState`](core::CalculatorState) sits behind every
//! frontend: a terminal app ([`tui`], feature `tui`), a headless web page
//! ([`web`]) and the `luxe-calc run` key replay.
//!
//! # Example
//!
//! ```rust
//! use luxe_calc::prelude::*;
//!
//! let mut calc = CalculatorState::new();
//! for action in [
//!     Action::Digit(5),
//!     Action::Operator(Operator::Add),
//!     Action::Digit(3),
//!     Action::Equals,
//! ] {
//!     calc.dispatch(action);
//! }
//! assert_eq!(calc.display_text(), "8");
//! assert_eq!(calc.history_text(), "5 + 3 =");
//!
//! // Or step the pure transition function
//! let step = transition(CalculatorState::new(), Action::Digit(7));
//! assert_eq!(step.display_text, "7");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod cli;
pub mod config;
pub mod core;
pub mod driver;
pub mod error;

#[cfg(feature = "tui")]
pub mod tui;

/// Headless web page frontend
pub mod web;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{CalcConfig, Theme, Verbosity};
    pub use crate::core::history::{Tape, TapeEntry};
    pub use crate::core::{
        apply, transition, Action, CalcError, CalcResult, CalculatorState, Operator, Snapshot,
        Transition,
    };
    pub use crate::driver::{run_full_verification, CalculatorDriver, WebDriver};
    pub use crate::error::{CliError, CliResult};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;

    pub use crate::web::{DomElement, DomEvent, MockDom, WebCalculator};
}
