//! # Category Buckets
//!
//! The grouped "stack" view sorts experiments into five buckets. This is a
//! second classification over the status field, independent from the stage
//! progression: a stage row is a per-stage matrix, a category is a single
//! bucket.
//!
//! | Id | Label | Statuses |
//! |----|-------|----------|
//! | `mapOfInterest` | Map of Interest | unknown |
//! | `learning` | Learning | learn |
//! | `understandManualSolve` | Understand Manual Solve | understand |
//! | `autoTriggerManualSolve` | Auto Trigger Manual Solve | hypothesis |
//! | `autoTriggerAutoSolve` | Auto Trigger Auto Solve | auto solve, wip |
//!
//! An experiment whose status matches no bucket is left out of the stack.
//! It still shows in the pipeline table, as all `no`.

use crate::Experiment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// CATEGORY ENUM
// =============================================================================

/// Stack bucket. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    MapOfInterest,
    Learning,
    UnderstandManualSolve,
    AutoTriggerManualSolve,
    AutoTriggerAutoSolve,
}

impl Category {
    /// Get the stable identifier used by consumers.
    #[must_use]
    pub fn id(&self) -> &'static str {
        self.def().id
    }

    /// Get the display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.def().label
    }

    /// Get the lower-case statuses bound to this bucket.
    #[must_use]
    pub fn statuses(&self) -> &'static [&'static str] {
        self.def().statuses
    }

    fn def(&self) -> &'static CategoryDef {
        match self {
            Category::MapOfInterest => &CATEGORIES[0],
            Category::Learning => &CATEGORIES[1],
            Category::UnderstandManualSolve => &CATEGORIES[2],
            Category::AutoTriggerManualSolve => &CATEGORIES[3],
            Category::AutoTriggerAutoSolve => &CATEGORIES[4],
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// CATEGORY TABLE
// =============================================================================

/// One configured bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDef {
    pub category: Category,
    pub id: &'static str,
    pub label: &'static str,
    pub statuses: &'static [&'static str],
}

/// The ordered bucket table. Matching walks it front to back.
pub static CATEGORIES: [CategoryDef; 5] = [
    CategoryDef {
        category: Category::MapOfInterest,
        id: "mapOfInterest",
        label: "Map of Interest",
        statuses: &["unknown"],
    },
    CategoryDef {
        category: Category::Learning,
        id: "learning",
        label: "Learning",
        statuses: &["learn"],
    },
    CategoryDef {
        category: Category::UnderstandManualSolve,
        id: "understandManualSolve",
        label: "Understand Manual Solve",
        statuses: &["understand"],
    },
    CategoryDef {
        category: Category::AutoTriggerManualSolve,
        id: "autoTriggerManualSolve",
        label: "Auto Trigger Manual Solve",
        statuses: &["hypothesis"],
    },
    CategoryDef {
        category: Category::AutoTriggerAutoSolve,
        id: "autoTriggerAutoSolve",
        label: "Auto Trigger Auto Solve",
        statuses: &["auto solve", "wip"],
    },
];

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Find the bucket for a status (case-insensitive exact match, first match
/// wins). `None` for statuses no bucket lists.
#[must_use]
pub fn category(status: &str) -> Option<Category> {
    let normalized = status.to_lowercase();
    CATEGORIES
        .iter()
        .find(|def| def.statuses.iter().any(|s| *s == normalized))
        .map(|def| def.category)
}

/// Group experiments into buckets.
///
/// Every bucket is present in the result, possibly empty, so consumers can
/// iterate all five unconditionally. Input order is kept within a bucket.
/// Experiments without a bucket are omitted.
#[must_use]
pub fn group_by_category(experiments: &[Experiment]) -> BTreeMap<Category, Vec<&Experiment>> {
    let mut groups: BTreeMap<Category, Vec<&Experiment>> = CATEGORIES
        .iter()
        .map(|def| (def.category, Vec::new()))
        .collect();

    for experiment in experiments {
        if let Some(bucket) = category(&experiment.status).and_then(|c| groups.get_mut(&c)) {
            bucket.push(experiment);
        }
    }

    groups
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_enum_order() {
        for (i, def) in CATEGORIES.iter().enumerate() {
            assert_eq!(def.category.def(), &CATEGORIES[i]);
        }
        assert!(Category::MapOfInterest < Category::AutoTriggerAutoSolve);
    }

    #[test]
    fn category_lookup() {
        assert_eq!(category("unknown"), Some(Category::MapOfInterest));
        assert_eq!(category("Hypothesis"), Some(Category::AutoTriggerManualSolve));
        assert_eq!(category("AUTO SOLVE"), Some(Category::AutoTriggerAutoSolve));
        assert_eq!(category("Wip"), Some(Category::AutoTriggerAutoSolve));
        assert_eq!(category("blocked"), None);
        assert_eq!(category(""), None);
    }

    #[test]
    fn ids_and_labels() {
        assert_eq!(Category::UnderstandManualSolve.id(), "understandManualSolve");
        assert_eq!(Category::Learning.label(), "Learning");
        assert_eq!(Category::AutoTriggerAutoSolve.statuses(), &["auto solve", "wip"]);
    }

    #[test]
    fn serde_uses_ids() {
        let json = serde_json::to_string(&Category::AutoTriggerManualSolve).expect("json");
        assert_eq!(json, "\"autoTriggerManualSolve\"");
    }

    #[test]
    fn grouping_keeps_input_order() {
        let experiments = vec![
            Experiment::new("a", "wip"),
            Experiment::new("b", "learn"),
            Experiment::new("c", "auto solve"),
            Experiment::new("d", "stalled"),
        ];
        let groups = group_by_category(&experiments);

        let titles: Vec<&str> = groups[&Category::AutoTriggerAutoSolve]
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["a", "c"]);
        assert_eq!(groups[&Category::Learning].len(), 1);

        let grouped: usize = groups.values().map(Vec::len).sum();
        assert_eq!(grouped, 3);
    }
}
