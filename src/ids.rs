//! Entity identifiers
//!
//! Ids are derived from the creation time in milliseconds, bumped when two
//! entities are created within the same millisecond (or the clock steps
//! back) so they stay unique within a collection.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Identifier of a stored entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(pub i64);

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Id {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Id)
    }
}

/// Hands out monotonic, time-derived ids
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start above every id already in use
    pub fn seeded<I>(existing: I) -> Self
    where
        I: IntoIterator<Item = Id>,
    {
        let last = existing.into_iter().map(|id| id.0).max().unwrap_or(0);
        Self { last }
    }

    /// Next id for an entity created at `now`
    pub fn next<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Id {
        let candidate = now.timestamp_millis();
        self.last = candidate.max(self.last + 1);
        Id(self.last)
    }

    /// Register an id minted elsewhere so it is never handed out again
    pub fn observe(&mut self, id: Id) {
        self.last = self.last.max(id.0);
    }
}
