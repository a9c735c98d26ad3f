//! # Status Badges
//!
//! Visual status badge used in the customer-use table and the experiment
//! detail view. Badge matching is looser than stage matching: any status
//! containing `auto solve` counts as a success.

use serde::{Deserialize, Serialize};

/// Badge style derived from a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    Success,
    Wip,
    No,
    Learn,
    Understand,
    Hypothesis,
    Unknown,
}

impl BadgeKind {
    /// Classify a status into a badge style.
    #[must_use]
    pub fn from_status(status: &str) -> Self {
        let lower = status.to_lowercase();
        if lower.contains("auto solve") || lower == "yes" {
            return BadgeKind::Success;
        }
        match lower.as_str() {
            "wip" => BadgeKind::Wip,
            "no" => BadgeKind::No,
            "learn" => BadgeKind::Learn,
            "understand" => BadgeKind::Understand,
            "hypothesis" => BadgeKind::Hypothesis,
            _ => BadgeKind::Unknown,
        }
    }

    /// Get the icon shown before the status text, if any.
    #[must_use]
    pub fn icon(&self) -> Option<&'static str> {
        match self {
            BadgeKind::Success => Some("✅"),
            BadgeKind::Wip => Some("🔵"),
            BadgeKind::No => Some("❌"),
            BadgeKind::Learn => Some("🔄"),
            BadgeKind::Understand => Some("📖"),
            BadgeKind::Hypothesis => Some("💡"),
            BadgeKind::Unknown => None,
        }
    }

    /// Get the CSS-style class name of the badge.
    #[must_use]
    pub fn class_name(&self) -> &'static str {
        match self {
            BadgeKind::Success => "status-success",
            BadgeKind::Wip => "status-wip",
            BadgeKind::No => "status-no",
            BadgeKind::Learn => "status-learn",
            BadgeKind::Understand => "status-understand",
            BadgeKind::Hypothesis => "status-hypothesis",
            BadgeKind::Unknown => "status-unknown",
        }
    }
}

/// A rendered badge: style plus display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBadge {
    pub kind: BadgeKind,
    pub text: String,
}

impl StatusBadge {
    /// Build the badge for a status.
    ///
    /// Recognized statuses read `<icon> <status>`; anything else shows the
    /// raw status, or `Unknown` when it is empty.
    #[must_use]
    pub fn from_status(status: &str) -> Self {
        let kind = BadgeKind::from_status(status);
        let text = match kind.icon() {
            Some(icon) => format!("{} {}", icon, status),
            None if status.is_empty() => "Unknown".to_string(),
            None => status.to_string(),
        };
        Self { kind, text }
    }
}

impl std::fmt::Display for StatusBadge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

// =============================================================================
// TESTS
// =============================================================================
