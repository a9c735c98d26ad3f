//! # Knowledge Artifacts
//!
//! The knowledge-sharing feed: one entry per artifact row, with a type icon,
//! a display date and an optional link.
//!
//! ## Dates
//!
//! Spreadsheet exports carry dates either as ISO text (`2025-04-01`) or as
//! Excel serial day numbers (`45748`, days since 1899-12-30). Both render as
//! `Apr 1, 2025`. Text that is neither is shown unchanged.

use crate::ArtifactRow;
use crate::metrics::parse_leading_int;
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Icon for artifact types the feed does not know.
pub const DEFAULT_ICON: &str = "📄";

const DISPLAY_FORMAT: &str = "%b %-d, %Y";

/// Get the icon for an artifact type (case-insensitive).
#[must_use]
pub fn type_icon(kind: &str) -> &'static str {
    match kind.to_lowercase().as_str() {
        "blog" => "📝",
        "briefing" => "🎤",
        "slack" => "💬",
        "email" => "📧",
        "video" => "🎬",
        "workshop" => "🛠️",
        _ => DEFAULT_ICON,
    }
}

/// Day zero of the Excel serial date system.
fn excel_epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
}

fn parse_iso(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

fn from_serial(serial: i64) -> Option<NaiveDate> {
    let epoch = excel_epoch()?;
    let days = Days::new(serial.unsigned_abs());
    if serial >= 0 {
        epoch.checked_add_days(days)
    } else {
        epoch.checked_sub_days(days)
    }
}

/// Render a date cell for display.
#[must_use]
pub fn format_date(cell: &str) -> String {
    if cell.is_empty() {
        return String::new();
    }

    let parsed = if cell.contains('-') {
        parse_iso(cell)
    } else {
        parse_leading_int(cell).and_then(from_serial)
    };

    parsed
        .map(|date| date.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| cell.to_string())
}

// =============================================================================
// FEED ENTRY
// =============================================================================

/// One entry of the knowledge feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactEntry {
    pub icon: String,
    pub kind: String,
    pub title: String,
    pub date: String,
    pub channel: String,
    pub link: Option<String>,
}

impl ArtifactEntry {
    /// Build a feed entry from an artifact row.
    #[must_use]
    pub fn from_row(row: &ArtifactRow) -> Self {
        Self {
            icon: type_icon(&row.kind).to_string(),
            kind: row.kind.clone(),
            title: row.title.clone(),
            date: format_date(&row.date),
            channel: row.channel.clone(),
            link: has_link(row).then(|| row.link.clone()),
        }
    }
}

/// Check whether an artifact row has a non-blank link.
#[must_use]
pub fn has_link(row: &ArtifactRow) -> bool {
    !row.link.trim().is_empty()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icons_by_type() {
        assert_eq!(type_icon("Blog"), "📝");
        assert_eq!(type_icon("SLACK"), "💬");
        assert_eq!(type_icon("workshop"), "🛠️");
        assert_eq!(type_icon("podcast"), DEFAULT_ICON);
        assert_eq!(type_icon(""), DEFAULT_ICON);
    }

    #[test]
    fn excel_serial_dates() {
        assert_eq!(format_date("45748"), "Apr 1, 2025");
        assert_eq!(format_date("1"), "Dec 31, 1899");
    }

    #[test]
    fn iso_dates() {
        assert_eq!(format_date("2025-04-01"), "Apr 1, 2025");
        assert_eq!(format_date("2024-12-25T10:00:00Z"), "Dec 25, 2024");
        assert_eq!(format_date("2024-02-30"), "2024-02-30");
    }

    #[test]
    fn passthrough_and_empty() {
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("Q3"), "Q3");
    }

    #[test]
    fn entry_link_requires_text() {
        let mut row = ArtifactRow {
            kind: "video".to_string(),
            title: "Demo".to_string(),
            date: "45748".to_string(),
            channel: "#innovation".to_string(),
            link: "   ".to_string(),
        };
        let entry = ArtifactEntry::from_row(&row);
        assert_eq!(entry.link, None);
        assert_eq!(entry.icon, "🎬");
        assert_eq!(entry.date, "Apr 1, 2025");

        row.link = "https://example.com/demo".to_string();
        assert_eq!(
            ArtifactEntry::from_row(&row).link.as_deref(),
            Some("https://example.com/demo")
        );
    }
}
