//! Profile and history records.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::ClassificationResult;

/// Identifier of a profile. Timestamp-derived, stored as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProfileId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryId(String);

impl EntryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named child whose results are grouped together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// One classification attached to a profile. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: EntryId,
    pub profile_id: ProfileId,
    pub captured_at: DateTime<Utc>,
    /// Length of the classified clip
    pub duration: Duration,
    pub result: ClassificationResult,
}

/// Hands out strictly increasing millisecond identifiers.
///
/// Two requests in the same millisecond get consecutive values.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Start above every numeric id already in use.
    pub fn seeded<'a>(existing: impl IntoIterator<Item = &'a str>) -> Self {
        let last = existing
            .into_iter()
            .filter_map(|id| id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        Self { last }
    }

    pub fn next_at(&mut self, now: DateTime<Utc>) -> String {
        let next = now.timestamp_millis().max(self.last + 1);
        self.last = next;
        next.to_string()
    }

    pub fn next_profile_id(&mut self, now: DateTime<Utc>) -> ProfileId {
        ProfileId(self.next_at(now))
    }

    pub fn next_entry_id(&mut self, now: DateTime<Utc>) -> EntryId {
        EntryId(self.next_at(now))
    }
}
