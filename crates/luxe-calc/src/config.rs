//! Runtime configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::history::Tape;
use crate::error::{CliError, CliResult};

/// Color theme for the frontends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background
    #[default]
    Light,
    /// Dark background
    Dark,
}

impl Theme {
    /// Returns the other theme
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Check if dark
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Log verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Quiet - no logs
    Quiet,
    /// Normal - warnings only
    #[default]
    Normal,
    /// Verbose - info
    Verbose,
    /// Debug - every transition
    Debug,
    /// Trace - everything
    Trace,
}

impl Verbosity {
    /// Maps a `-v` count to a level
    #[must_use]
    pub const fn from_count(count: u8) -> Self {
        match count {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Default `tracing` filter directive for this level
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "off",
            Self::Normal => "luxe_calc=warn",
            Self::Verbose => "luxe_calc=info",
            Self::Debug => "luxe_calc=debug",
            Self::Trace => "luxe_calc=trace",
        }
    }
}

/// Calculator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Starting theme
    pub theme: Theme,
    /// Log verbosity
    pub verbosity: Verbosity,
    /// Number of completed calculations kept on the tape
    pub tape_capacity: usize,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            verbosity: Verbosity::Normal,
            tape_capacity: Tape::DEFAULT_MAX_ENTRIES,
        }
    }
}

impl CalcConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set theme
    #[must_use]
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set tape capacity
    #[must_use]
    pub const fn with_tape_capacity(mut self, capacity: usize) -> Self {
        self.tape_capacity = capacity;
        self
    }

    /// Parses a JSON configuration; missing fields take defaults
    pub fn from_json_str(json: &str) -> CliResult<Self> {
        serde_json::from_str(json).map_err(|e| CliError::config(e.to_string()))
    }

    /// Loads a JSON configuration file
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serializes to pretty JSON
    pub fn to_json_pretty(&self) -> CliResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Creates an empty tape sized from this configuration
    #[must_use]
    pub fn new_tape(&self) -> Tape {
        Tape::with_capacity(self.tape_capacity)
    }
}
