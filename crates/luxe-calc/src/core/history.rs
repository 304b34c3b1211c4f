//! Calculation tape
//!
//! The state machine only remembers the last completed expression. Frontends
//! that want to show more keep a [`Tape`]: a bounded queue of completed
//! calculations for the current session.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single completed calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapeEntry {
    /// History line, e.g. `"5 + 3 ="`
    pub expression: String,
    /// Display text produced by the calculation (`"8"`, `"Error"`)
    pub result: String,
}

impl TapeEntry {
    /// Creates a new tape entry
    #[must_use]
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
        }
    }

    /// Returns a formatted display string
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {}", self.expression, self.result)
    }
}

/// Bounded tape of completed calculations, oldest first
#[derive(Debug, Clone)]
pub struct Tape {
    entries: VecDeque<TapeEntry>,
    max_entries: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// Default maximum tape length
    pub const DEFAULT_MAX_ENTRIES: usize = 100;

    /// Creates a tape with default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_ENTRIES)
    }

    /// Creates a tape holding at most `max_entries` (minimum 1)
    #[must_use]
    pub fn with_capacity(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Adds an entry, evicting the oldest when full
    pub fn push(&mut self, entry: TapeEntry) {
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Records a completed calculation
    pub fn record(&mut self, expression: &str, result: &str) {
        self.push(TapeEntry::new(expression, result));
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the tape is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries
    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Removes all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates oldest first
    pub fn iter(&self) -> impl Iterator<Item = &TapeEntry> {
        self.entries.iter()
    }

    /// Iterates newest first
    pub fn iter_rev(&self) -> impl Iterator<Item = &TapeEntry> {
        self.entries.iter().rev()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&TapeEntry> {
        self.entries.back()
    }

    /// Returns the last n entries (newest first)
    #[must_use]
    pub fn last_n(&self, n: usize) -> Vec<&TapeEntry> {
        self.entries.iter().rev().take(n).collect()
    }

    /// Serializes the tape to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Deserializes a tape from JSON with default capacity
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<TapeEntry> = serde_json::from_str(json)?;
        let mut tape = Self::new();
        for entry in entries {
            tape.push(entry);
        }
        Ok(tape)
    }

    /// One line per entry, oldest first
    #[must_use]
    pub fn export_formatted(&self) -> String {
        self.entries
            .iter()
            .map(TapeEntry::display)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
