//! Counter flags.
//!
//! A counter flag takes no value: each bare `--flag` adds one. It also
//! accepts `--flag=N`, which sets the count outright. Occurrences are applied
//! in command-line order starting from the field's current value, so
//! `--flag=2 --flag` yields 3.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer field bound to a counter flag.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Counter(u64);

impl Counter {
    /// Creates a counter holding `value`.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Current count.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Applies one occurrence of the flag.
    #[must_use]
    pub const fn step(self, step: CounterStep) -> Self {
        match step {
            CounterStep::Increment => Self(self.0.saturating_add(1)),
            CounterStep::Set(value) => Self(value),
        }
    }
}

impl From<u64> for Counter {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Counter> for u64 {
    fn from(counter: Counter) -> Self {
        counter.0
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One occurrence of a counter flag on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterStep {
    /// Bare `--flag`.
    Increment,
    /// `--flag=N`.
    Set(u64),
}

impl From<Option<u64>> for CounterStep {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Self::Increment, Self::Set)
    }
}
