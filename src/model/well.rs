//! Well identifiers and grid indices.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Canonical identifier of one well: row label followed by a 1-based column
/// number, e.g. `"C7"` or `"AB12"`.
///
/// Orders naturally across a plate (`A1 < A2 < A10 < B1`), which keeps derived
/// well lists and serialized maps in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WellId(String);

impl WellId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into the leading letter portion and trailing digit portion.
    /// Returns None unless the id is exactly `LETTERS DIGITS` with both parts non-empty.
    pub fn split(&self) -> Option<(&str, &str)> {
        let boundary = self.0.find(|c: char| !c.is_ascii_uppercase())?;
        let (row, col) = self.0.split_at(boundary);
        if row.is_empty() || col.is_empty() || !col.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        Some((row, col))
    }

    fn sort_key(&self) -> Option<(usize, &str, u64)> {
        let (row, col) = self.split()?;
        Some((row.len(), row, col.parse().ok()?))
    }
}

impl Ord for WellId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.sort_key(), other.sort_key()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            // Malformed ids sort after well-formed ones
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for WellId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for WellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WellId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for WellId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Zero-based grid position of a well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WellIndex {
    pub row: usize,
    pub col: usize,
}

impl WellIndex {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}
