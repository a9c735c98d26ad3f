//! # Stage Progression
//!
//! Maps a free-text experiment status onto the fixed progression used by the
//! pipeline ("pancake chart") table.
//!
//! ## Progression
//!
//! | Index | Stage | Status text |
//! |-------|-------|-------------|
//! | 0 | Unknown | `unknown` |
//! | 1 | Learn | `learn` |
//! | 2 | Understand | `understand` |
//! | 3 | Hypothesis | `hypothesis` |
//! | 4 | Auto Solve | `auto solve` |
//!
//! `wip` is not a stage. It marks an experiment whose work through
//! `hypothesis` is done and whose `auto solve` stage is in progress.
//!
//! Completion is monotonic: reaching stage N implies every earlier stage is
//! complete. An empty or unrecognized status reports `no` for every stage.

use serde::{Deserialize, Serialize};

// =============================================================================
// STAGE ENUM
// =============================================================================

/// The five canonical progression steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Index 0: the experiment is on the map of interest.
    Unknown,
    /// Index 1: learning about the problem.
    Learn,
    /// Index 2: the problem is understood and solved manually.
    Understand,
    /// Index 3: a hypothesis for an automatic trigger exists.
    Hypothesis,
    /// Index 4: triggered and solved automatically.
    AutoSolve,
}

/// The progression, in order. Index in this table is the stage index.
pub static STAGE_ORDER: [Stage; 5] = [
    Stage::Unknown,
    Stage::Learn,
    Stage::Understand,
    Stage::Hypothesis,
    Stage::AutoSolve,
];

/// Lower-case status marking "all stages through hypothesis done, final stage
/// in progress".
pub const WIP_STATUS: &str = "wip";

impl Stage {
    /// Get the status text that names this stage (lower case).
    #[must_use]
    pub fn status_name(&self) -> &'static str {
        match self {
            Stage::Unknown => "unknown",
            Stage::Learn => "learn",
            Stage::Understand => "understand",
            Stage::Hypothesis => "hypothesis",
            Stage::AutoSolve => "auto solve",
        }
    }

    /// Get the column label for this stage.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Unknown => "Unknown",
            Stage::Learn => "Learn",
            Stage::Understand => "Understand",
            Stage::Hypothesis => "Hypothesis",
            Stage::AutoSolve => "Auto Solve",
        }
    }

    /// Get the position of this stage in the progression.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Stage::Unknown => 0,
            Stage::Learn => 1,
            Stage::Understand => 2,
            Stage::Hypothesis => 3,
            Stage::AutoSolve => 4,
        }
    }

    /// Look a stage up by its status text (case-insensitive, exact).
    #[must_use]
    pub fn from_status(status: &str) -> Option<Stage> {
        let normalized = status.to_lowercase();
        STAGE_ORDER
            .iter()
            .copied()
            .find(|stage| stage.status_name() == normalized)
    }

    /// Get the next stage, if any.
    #[must_use]
    pub fn next(&self) -> Option<Stage> {
        STAGE_ORDER.get(self.index().saturating_add(1)).copied()
    }

    /// Check if this stage is terminal (Auto Solve).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::AutoSolve)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// STAGE STATUS
// =============================================================================

/// Completion state of one stage for one experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Yes,
    Wip,
    No,
}

impl StageStatus {
    /// Get the table cell text (`✓`, `WIP`, `✗`).
    #[must_use]
    pub fn cell(&self) -> &'static str {
        match self {
            StageStatus::Yes => "✓",
            StageStatus::Wip => "WIP",
            StageStatus::No => "✗",
        }
    }

    /// Get the marker used in the stage progression line.
    #[must_use]
    pub fn marker(&self) -> &'static str {
        match self {
            StageStatus::Yes => "✓",
            StageStatus::Wip => "🔵",
            StageStatus::No => "✗",
        }
    }
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Derive the completion state of `stage` for an experiment whose current
/// status is `status`.
///
/// Never fails: an empty or unrecognized status yields [`StageStatus::No`]
/// for every stage.
#[must_use]
pub fn stage_status(status: &str, stage: Stage) -> StageStatus {
    let normalized = status.to_lowercase();

    if normalized == WIP_STATUS {
        return if stage.index() <= Stage::Hypothesis.index() {
            StageStatus::Yes
        } else {
            StageStatus::Wip
        };
    }

    match Stage::from_status(&normalized) {
        Some(current) if stage.index() <= current.index() => StageStatus::Yes,
        _ => StageStatus::No,
    }
}

/// Derive the completion state of every stage, in progression order.
#[must_use]
pub fn stage_row(status: &str) -> [StageStatus; 5] {
    STAGE_ORDER.map(|stage| stage_status(status, stage))
}

/// Render the stage progression line used in the experiment detail view,
/// e.g. `✓ Unknown → ✓ Learn → ✗ Understand → ✗ Hypothesis → ✗ Auto Solve`.
#[must_use]
pub fn stage_progression(status: &str) -> String {
    STAGE_ORDER
        .iter()
        .map(|stage| format!("{} {}", stage_status(status, *stage).marker(), stage.label()))
        .collect::<Vec<_>>()
        .join(" → ")
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_ordering() {
        assert!(Stage::Unknown < Stage::Learn);
        assert!(Stage::Learn < Stage::Understand);
        assert!(Stage::Understand < Stage::Hypothesis);
        assert!(Stage::Hypothesis < Stage::AutoSolve);
    }

    #[test]
    fn index_matches_table_position() {
        for (i, stage) in STAGE_ORDER.iter().enumerate() {
            assert_eq!(stage.index(), i);
        }
    }

    #[test]
    fn from_status_ignores_case() {
        assert_eq!(Stage::from_status("Auto Solve"), Some(Stage::AutoSolve));
        assert_eq!(Stage::from_status("LEARN"), Some(Stage::Learn));
        assert_eq!(Stage::from_status("wip"), None);
        assert_eq!(Stage::from_status(" learn"), None);
    }

    #[test]
    fn next_and_terminal() {
        assert_eq!(Stage::Hypothesis.next(), Some(Stage::AutoSolve));
        assert_eq!(Stage::AutoSolve.next(), None);
        assert!(Stage::AutoSolve.is_terminal());
        assert!(!Stage::Unknown.is_terminal());
    }

    #[test]
    fn understand_row() {
        use StageStatus::{No, Yes};
        assert_eq!(stage_row("Understand"), [Yes, Yes, Yes, No, No]);
    }

    #[test]
    fn wip_row() {
        use StageStatus::{Wip, Yes};
        assert_eq!(stage_row("WIP"), [Yes, Yes, Yes, Yes, Wip]);
    }

    #[test]
    fn unknown_status_is_a_real_stage() {
        use StageStatus::{No, Yes};
        assert_eq!(stage_row("unknown"), [Yes, No, No, No, No]);
    }

    #[test]
    fn garbage_row_is_all_no() {
        assert_eq!(stage_row("blocked"), [StageStatus::No; 5]);
        assert_eq!(stage_row(""), [StageStatus::No; 5]);
    }

    #[test]
    fn progression_line() {
        assert_eq!(
            stage_progression("learn"),
            "✓ Unknown → ✓ Learn → ✗ Understand → ✗ Hypothesis → ✗ Auto Solve"
        );
        assert_eq!(
            stage_progression("wip"),
            "✓ Unknown → ✓ Learn → ✓ Understand → ✓ Hypothesis → 🔵 Auto Solve"
        );
    }

    #[test]
    fn stage_display() {
        assert_eq!(format!("{}", Stage::AutoSolve), "Auto Solve");
    }
}
