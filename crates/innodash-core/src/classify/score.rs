//! # Completion Score
//!
//! A total order over statuses for "most advanced first" sorting.
//!
//! | Status | Score |
//! |--------|-------|
//! | auto solve | 5 |
//! | wip | 4.5 |
//! | hypothesis | 4 |
//! | understand | 3 |
//! | learn | 2 |
//! | unknown | 1 |
//! | anything else | 0 |
//!
//! Scores are stored as integer half-points so ordering stays exact.

use super::stage::{Stage, WIP_STATUS};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Reverse;

/// Sort key for an experiment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CompletionScore(u8);

impl CompletionScore {
    /// Score of an unrecognized status.
    pub const NONE: CompletionScore = CompletionScore(0);

    /// Create a score from half-points (`9` is 4.5).
    #[must_use]
    pub const fn from_half_points(half_points: u8) -> Self {
        Self(half_points)
    }

    /// Get the raw half-point value.
    #[must_use]
    pub const fn half_points(self) -> u8 {
        self.0
    }

    /// Get the score as a number for presentation.
    #[must_use]
    #[allow(clippy::float_arithmetic)]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl Serialize for CompletionScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for CompletionScore {
    #[allow(clippy::float_arithmetic)]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        let half_points = (value * 2.0).round().clamp(0.0, f64::from(u8::MAX));
        Ok(Self(half_points as u8))
    }
}

impl std::fmt::Display for CompletionScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_f64())
    }
}

/// Compute the completion score of a status (case-insensitive).
#[must_use]
pub fn completion_score(status: &str) -> CompletionScore {
    let normalized = status.to_lowercase();
    if normalized == WIP_STATUS {
        return CompletionScore(9);
    }
    match Stage::from_status(&normalized) {
        Some(Stage::AutoSolve) => CompletionScore(10),
        Some(Stage::Hypothesis) => CompletionScore(8),
        Some(Stage::Understand) => CompletionScore(6),
        Some(Stage::Learn) => CompletionScore(4),
        Some(Stage::Unknown) => CompletionScore(2),
        None => CompletionScore::NONE,
    }
}

/// Sort items most advanced first. The sort is stable: items with equal
/// scores keep their input order.
pub fn sort_by_completion<T>(items: &mut [T], status_of: impl Fn(&T) -> &str) {
    items.sort_by_key(|item| Reverse(completion_score(status_of(item))));
}

// =============================================================================
// TESTS
// =============================================================================
