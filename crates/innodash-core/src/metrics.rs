//! # Metric Cards
//!
//! Aggregate cards at the top of the dashboard, built from the metrics sheet
//! plus one card computed from the experiments.
//!
//! ## Number Semantics
//!
//! Metric cells are parsed with leading-integer semantics: leading
//! whitespace and an optional sign, then digits up to the first non-digit
//! (`"12 teams"` → 12, `"n/a"` → absent). A value of zero is treated as
//! "not set" for display, percentages and trends.
//!
//! All arithmetic is integer; percentages round half up.

use crate::usage::customer_use_count;
use crate::{Experiment, MetricRow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metric key of the weekly interactions card.
pub const WEEKLY_INTERACTIONS: &str = "weeklyInteractions";
/// Metric key of the experiments card.
pub const EXPERIMENTS: &str = "experiments";
/// Metric key of the made-to-product card.
pub const MADE_TO_PRODUCT: &str = "madeToProduct";
/// Metric key of the knowledge sharing card.
pub const KNOWLEDGE_SHARING: &str = "knowledgeSharing";

// =============================================================================
// NUMBER PARSING
// =============================================================================

/// Parse the leading integer of a cell. `None` when no digits lead the text.
#[must_use]
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(b - b'0'));
    }

    if !seen {
        return None;
    }
    Some(if negative { value.saturating_neg() } else { value })
}

/// Treat zero as "not set".
fn nonzero(value: Option<i64>) -> Option<i64> {
    value.filter(|v| *v != 0)
}

/// Display a metric value, `-` when not set.
#[must_use]
pub fn display_value(value: Option<i64>) -> String {
    nonzero(value)
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}

// =============================================================================
// METRIC SNAPSHOT
// =============================================================================

/// Parsed values of one metric row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub target: Option<i64>,
    pub current: Option<i64>,
    pub last_week: Option<i64>,
}

impl MetricSnapshot {
    /// Parse a metric row.
    #[must_use]
    pub fn from_row(row: &MetricRow) -> Self {
        Self {
            target: parse_leading_int(&row.target),
            current: parse_leading_int(&row.current),
            last_week: parse_leading_int(&row.last_week),
        }
    }

    /// Percent of the annual goal reached, rounded half up.
    ///
    /// `None` without a (non-zero) target; `Some(0)` without a current value.
    #[must_use]
    pub fn percent_of_goal(&self) -> Option<i64> {
        let target = nonzero(self.target)?;
        let Some(current) = nonzero(self.current) else {
            return Some(0);
        };
        Some(round_percent(current, target))
    }

    /// Change against last week, when both values are set.
    #[must_use]
    pub fn trend(&self) -> Option<Trend> {
        let current = nonzero(self.current)?;
        let last_week = nonzero(self.last_week)?;
        Some(Trend {
            up: current >= last_week,
            delta: current.abs_diff(last_week),
        })
    }
}

/// `round(current / target * 100)` in integer arithmetic, half rounding up.
fn round_percent(current: i64, target: i64) -> i64 {
    let (mut c, mut t) = (i128::from(current), i128::from(target));
    if t < 0 {
        c = -c;
        t = -t;
    }
    let rounded = (c * 200 + t).div_euclid(t * 2);
    i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX })
}

/// Week-over-week movement of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trend {
    /// Current value is at or above last week.
    pub up: bool,
    pub delta: u64,
}

impl Trend {
    /// Get the arrow shown next to the delta.
    #[must_use]
    pub fn arrow(&self) -> &'static str {
        if self.up { "▲" } else { "▼" }
    }
}

// =============================================================================
// METRIC TABLE
// =============================================================================

/// Metric rows keyed by metric name. A later row wins over an earlier one
/// with the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricTable {
    entries: BTreeMap<String, MetricSnapshot>,
}

impl MetricTable {
    /// Build the table from the metrics sheet.
    #[must_use]
    pub fn from_rows(rows: &[MetricRow]) -> Self {
        let entries = rows
            .iter()
            .map(|row| (row.metric.clone(), MetricSnapshot::from_row(row)))
            .collect();
        Self { entries }
    }

    /// Get a metric, or the empty snapshot when the sheet lacks it.
    #[must_use]
    pub fn get(&self, key: &str) -> MetricSnapshot {
        self.entries.get(key).copied().unwrap_or_default()
    }

    /// Knowledge sharing progress for the artifact feed header.
    #[must_use]
    pub fn knowledge_sharing(&self) -> KnowledgeSharing {
        let snapshot = self.get(KNOWLEDGE_SHARING);
        KnowledgeSharing {
            current: snapshot.current.unwrap_or(0),
            target: snapshot.target.unwrap_or(0),
        }
    }
}

/// Knowledge sharing progress (`current` of `target` artifacts).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeSharing {
    pub current: i64,
    pub target: i64,
}

// =============================================================================
// METRIC CARDS
// =============================================================================

/// One card of the metrics section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricCard {
    pub title: String,
    pub icon: String,
    /// Value shown large (`-` when not set).
    pub current: String,
    pub target: Option<i64>,
    pub percent_of_goal: Option<i64>,
    /// Last week's value, shown only on cards that track it.
    pub last_week: Option<String>,
    pub trend: Option<Trend>,
    /// Caption under the value, for computed cards.
    pub label: Option<String>,
}

impl MetricCard {
    fn goal(title: &str, icon: &str, snapshot: MetricSnapshot) -> Self {
        Self {
            title: title.to_string(),
            icon: icon.to_string(),
            current: display_value(snapshot.current),
            target: nonzero(snapshot.target),
            percent_of_goal: snapshot.percent_of_goal(),
            last_week: None,
            trend: None,
            label: None,
        }
    }

    fn weekly(title: &str, icon: &str, snapshot: MetricSnapshot) -> Self {
        Self {
            last_week: Some(display_value(snapshot.last_week)),
            trend: snapshot.trend(),
            ..Self::goal(title, icon, snapshot)
        }
    }

    fn count(title: &str, icon: &str, count: usize, label: &str) -> Self {
        Self {
            title: title.to_string(),
            icon: icon.to_string(),
            current: count.to_string(),
            target: None,
            percent_of_goal: None,
            last_week: None,
            trend: None,
            label: Some(label.to_string()),
        }
    }
}

/// Build the five metric cards, in display order.
#[must_use]
pub fn metric_cards(table: &MetricTable, experiments: &[Experiment]) -> Vec<MetricCard> {
    vec![
        MetricCard::weekly("Weekly Interactions", "📊", table.get(WEEKLY_INTERACTIONS)),
        MetricCard::goal("Experiments", "🧪", table.get(EXPERIMENTS)),
        MetricCard::count(
            "Customer Use",
            "👥",
            customer_use_count(experiments),
            "experiments with usage",
        ),
        MetricCard::goal("Made to Product", "🚀", table.get(MADE_TO_PRODUCT)),
        MetricCard::goal("Knowledge Sharing", "📚", table.get(KNOWLEDGE_SHARING)),
    ]
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_int_semantics() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  12 teams"), Some(12));
        assert_eq!(parse_leading_int("7.9"), Some(7));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("n/a"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn percent_rounds_half_up() {
        let snapshot = MetricSnapshot {
            target: Some(8),
            current: Some(1),
            last_week: None,
        };
        // 12.5 -> 13
        assert_eq!(snapshot.percent_of_goal(), Some(13));

        let third = MetricSnapshot {
            target: Some(3),
            current: Some(1),
            last_week: None,
        };
        assert_eq!(third.percent_of_goal(), Some(33));
    }

    #[test]
    fn percent_needs_target() {
        let no_target = MetricSnapshot {
            target: Some(0),
            current: Some(5),
            last_week: None,
        };
        assert_eq!(no_target.percent_of_goal(), None);

        let no_current = MetricSnapshot {
            target: Some(50),
            current: None,
            last_week: None,
        };
        assert_eq!(no_current.percent_of_goal(), Some(0));
    }

    #[test]
    fn trend_direction() {
        let down = MetricSnapshot {
            target: None,
            current: Some(10),
            last_week: Some(14),
        };
        let trend = down.trend().expect("trend");
        assert!(!trend.up);
        assert_eq!(trend.delta, 4);
        assert_eq!(trend.arrow(), "▼");

        let flat = MetricSnapshot {
            target: None,
            current: Some(10),
            last_week: Some(10),
        };
        assert!(flat.trend().expect("trend").up);

        let missing = MetricSnapshot {
            target: None,
            current: Some(10),
            last_week: None,
        };
        assert!(missing.trend().is_none());
    }

    #[test]
    fn later_row_wins() {
        let table = MetricTable::from_rows(&[
            MetricRow::new(EXPERIMENTS, "10", "2", ""),
            MetricRow::new(EXPERIMENTS, "10", "4", ""),
        ]);
        assert_eq!(table.get(EXPERIMENTS).current, Some(4));
        assert_eq!(table.get("missing"), MetricSnapshot::default());
    }

    #[test]
    fn knowledge_sharing_defaults_to_zero() {
        let empty = MetricTable::default();
        assert_eq!(empty.knowledge_sharing(), KnowledgeSharing::default());

        let table = MetricTable::from_rows(&[MetricRow::new(KNOWLEDGE_SHARING, "24", "6", "")]);
        assert_eq!(
            table.knowledge_sharing(),
            KnowledgeSharing {
                current: 6,
                target: 24
            }
        );
    }

    #[test]
    fn cards_in_display_order() {
        let table = MetricTable::from_rows(&[MetricRow::new(WEEKLY_INTERACTIONS, "500", "40", "35")]);
        let experiments = vec![
            Experiment::new("a", "learn").with_usage("2 teams"),
            Experiment::new("b", "learn").with_usage("0"),
        ];
        let cards = metric_cards(&table, &experiments);

        let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Weekly Interactions",
                "Experiments",
                "Customer Use",
                "Made to Product",
                "Knowledge Sharing"
            ]
        );
        assert_eq!(cards[0].percent_of_goal, Some(8));
        assert_eq!(cards[0].last_week.as_deref(), Some("35"));
        assert_eq!(cards[0].trend.map(|t| t.delta), Some(5));
        assert_eq!(cards[1].current, "-");
        assert_eq!(cards[1].percent_of_goal, None);
        assert_eq!(cards[2].current, "1");
    }
}
