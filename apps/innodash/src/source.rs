//! # Source Loader
//!
//! Fetches the spreadsheet export the dashboard is built from.
//!
//! A source is either an `http(s)://` URL or a local JSON file. Two payload
//! layouts are understood:
//!
//! - **multi-sheet**: one document with `":type": "multi-sheet"` whose
//!   `metrics`, `experiments`, `opportunities` and `knowledgeArtifacts`
//!   members each carry a `data` array
//! - **single-sheet**: any other document. The four sheets are then fetched
//!   separately and concurrently (`<url>?sheet=<name>` over HTTP, the sibling
//!   file `<name>.json` on disk). A sheet that fails to load is empty.
//!
//! [`load_sheets`] never fails: a root fetch failure is logged and the empty
//! bundle is returned so the dashboard renders its empty state.
//! [`load_sheets_strict`] surfaces the error instead.

use innodash_core::{ArtifactRow, DashboardError, Experiment, MetricRow, OpportunityRow, SheetData};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Marker value of the `:type` member in a multi-sheet export.
pub const MULTI_SHEET_TYPE: &str = "multi-sheet";

/// Sheet names fetched in single-sheet mode, in bundle order.
pub const SHARED_SHEETS: [&str; 4] = [
    "shared-metrics",
    "shared-experiments",
    "shared-opportunities",
    "shared-knowledgeArtifacts",
];

/// Per-request timeout for HTTP sources.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum size of a local export file (50 MB).
const MAX_SOURCE_FILE_SIZE: u64 = 50 * 1024 * 1024;

// =============================================================================
// DATA SOURCE
// =============================================================================

/// Where the spreadsheet export lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// An `http://` or `https://` endpoint.
    Http(String),
    /// A JSON file on disk.
    File(PathBuf),
}

impl DataSource {
    /// Interpret a location string. URLs become [`DataSource::Http`],
    /// anything else is a file path.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DataSource::Http(trimmed.to_string())
        } else {
            DataSource::File(PathBuf::from(trimmed))
        }
    }

    /// Location of one named sheet in single-sheet mode.
    #[must_use]
    pub fn sheet(&self, name: &str) -> Self {
        match self {
            DataSource::Http(url) => {
                let separator = if url.contains('?') { '&' } else { '?' };
                DataSource::Http(format!("{url}{separator}sheet={name}"))
            }
            DataSource::File(path) => {
                let dir = path.parent().unwrap_or(Path::new("."));
                DataSource::File(dir.join(format!("{name}.json")))
            }
        }
    }

    /// Fetch and parse the JSON document at this location.
    pub async fn fetch_json(&self, client: &reqwest::Client) -> Result<Value, DashboardError> {
        match self {
            DataSource::Http(url) => {
                let response = client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| DashboardError::Source(format!("{url}: {e}")))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(DashboardError::Source(format!(
                        "Failed to fetch {url}: HTTP {}",
                        status.as_u16()
                    )));
                }

                response
                    .json::<Value>()
                    .await
                    .map_err(|e| DashboardError::Parse(format!("{url}: {e}")))
            }
            DataSource::File(path) => {
                let metadata = tokio::fs::metadata(path).await.map_err(|e| {
                    DashboardError::Io(format!("Cannot read '{}': {}", path.display(), e))
                })?;
                if metadata.len() > MAX_SOURCE_FILE_SIZE {
                    return Err(DashboardError::Io(format!(
                        "File size {} bytes exceeds maximum allowed {} bytes",
                        metadata.len(),
                        MAX_SOURCE_FILE_SIZE
                    )));
                }

                let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                    DashboardError::Io(format!("Cannot read '{}': {}", path.display(), e))
                })?;
                serde_json::from_str(&content)
                    .map_err(|e| DashboardError::Parse(format!("{}: {}", path.display(), e)))
            }
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Http(url) => f.write_str(url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// =============================================================================
// PAYLOAD PARSING
// =============================================================================

/// Check whether a document is a multi-sheet export.
#[must_use]
pub fn is_multi_sheet(document: &Value) -> bool {
    document.get(":type").and_then(Value::as_str) == Some(MULTI_SHEET_TYPE)
}

/// Read the `data` rows of one sheet document.
///
/// A missing `data` member yields no rows. A row that is not an object is
/// skipped with a warning; cell content never rejects a row.
fn sheet_rows<T: DeserializeOwned>(sheet: Option<&Value>, name: &str) -> Vec<T> {
    let Some(rows) = sheet.and_then(|s| s.get("data")).and_then(Value::as_array) else {
        return Vec::new();
    };

    rows.iter()
        .enumerate()
        .filter_map(|(i, row)| match serde_json::from_value::<T>(row.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(sheet = name, row = i, "Skipping malformed row: {}", e);
                None
            }
        })
        .collect()
}

/// Split a multi-sheet document into the four sheets.
#[must_use]
pub fn parse_multi_sheet(document: &Value) -> SheetData {
    SheetData {
        metrics: sheet_rows::<MetricRow>(document.get("metrics"), "metrics"),
        experiments: sheet_rows::<Experiment>(document.get("experiments"), "experiments"),
        opportunities: sheet_rows::<OpportunityRow>(document.get("opportunities"), "opportunities"),
        artifacts: sheet_rows::<ArtifactRow>(
            document.get("knowledgeArtifacts"),
            "knowledgeArtifacts",
        ),
    }
}

/// Fetch one sheet in single-sheet mode. Failures yield no rows.
async fn fetch_sheet<T: DeserializeOwned>(
    client: &reqwest::Client,
    source: &DataSource,
    name: &str,
) -> Vec<T> {
    let location = source.sheet(name);
    match location.fetch_json(client).await {
        Ok(document) => sheet_rows(Some(&document), name),
        Err(e) => {
            tracing::warn!(sheet = name, "Sheet unavailable, using no rows: {}", e);
            Vec::new()
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

fn http_client() -> Result<reqwest::Client, DashboardError> {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| DashboardError::Source(format!("Cannot build HTTP client: {e}")))
}

/// Load all four sheets, surfacing a root fetch failure as an error.
pub async fn load_sheets_strict(source: &DataSource) -> Result<SheetData, DashboardError> {
    let client = http_client()?;
    let document = source.fetch_json(&client).await?;

    if is_multi_sheet(&document) {
        tracing::debug!(source = %source, "Loaded multi-sheet export");
        return Ok(parse_multi_sheet(&document));
    }

    let [metrics_sheet, experiments_sheet, opportunities_sheet, artifacts_sheet] = SHARED_SHEETS;
    let (metrics, experiments, opportunities, artifacts) = tokio::join!(
        fetch_sheet::<MetricRow>(&client, source, metrics_sheet),
        fetch_sheet::<Experiment>(&client, source, experiments_sheet),
        fetch_sheet::<OpportunityRow>(&client, source, opportunities_sheet),
        fetch_sheet::<ArtifactRow>(&client, source, artifacts_sheet),
    );
    tracing::debug!(source = %source, "Loaded single-sheet export");

    Ok(SheetData {
        metrics,
        experiments,
        opportunities,
        artifacts,
    })
}

/// Load all four sheets. Any root failure is logged and yields the empty
/// bundle.
pub async fn load_sheets(source: &DataSource) -> SheetData {
    match load_sheets_strict(source).await {
        Ok(data) => {
            tracing::info!(
                source = %source,
                experiments = data.experiments.len(),
                metrics = data.metrics.len(),
                artifacts = data.artifacts.len(),
                "Sheet data loaded"
            );
            data
        }
        Err(e) => {
            tracing::error!(source = %source, "Error fetching sheet data: {}", e);
            SheetData::empty()
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
        path
    }

    #[test]
    fn parse_location() {
        assert_eq!(
            DataSource::parse("https://example.com/data.json"),
            DataSource::Http("https://example.com/data.json".to_string())
        );
        assert_eq!(
            DataSource::parse("./data.json"),
            DataSource::File(PathBuf::from("./data.json"))
        );
    }

    #[test]
    fn sheet_locations() {
        let http = DataSource::parse("https://example.com/data.json");
        assert_eq!(
            http.sheet("shared-metrics").to_string(),
            "https://example.com/data.json?sheet=shared-metrics"
        );

        let query = DataSource::parse("https://example.com/data.json?v=2");
        assert_eq!(
            query.sheet("shared-metrics").to_string(),
            "https://example.com/data.json?v=2&sheet=shared-metrics"
        );

        let file = DataSource::File(PathBuf::from("/srv/export/data.json"));
        assert_eq!(
            file.sheet("shared-experiments"),
            DataSource::File(PathBuf::from("/srv/export/shared-experiments.json"))
        );
    }

    #[test]
    fn multi_sheet_detection() {
        assert!(is_multi_sheet(&json!({":type": "multi-sheet"})));
        assert!(!is_multi_sheet(&json!({":type": "sheet", "data": []})));
        assert!(!is_multi_sheet(&json!([])));
    }

    #[test]
    fn multi_sheet_missing_members_are_empty() {
        let data = parse_multi_sheet(&json!({
            ":type": "multi-sheet",
            "experiments": {"data": [{"title": "Routing", "status": "learn"}]}
        }));
        assert_eq!(data.experiments.len(), 1);
        assert!(data.metrics.is_empty());
        assert!(data.artifacts.is_empty());
    }

    #[test]
    fn non_object_rows_are_skipped() {
        let rows: Vec<Experiment> = sheet_rows(
            Some(&json!({"data": [{"title": "A"}, 42, {"title": "B", "status": 3}]})),
            "experiments",
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].status, "3");
    }

    #[tokio::test]
    async fn load_multi_sheet_file() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "data.json",
            &json!({
                ":type": "multi-sheet",
                "metrics": {"data": [{"metric": "experiments", "target": "10", "current": "4"}]},
                "experiments": {"data": [{"title": "Routing", "status": "wip"}]},
                "opportunities": {"data": [{"name": "Returns", "size": 3}]},
                "knowledgeArtifacts": {"data": [{"type": "blog", "title": "Notes", "date": 45748}]}
            }),
        );

        let data = load_sheets_strict(&DataSource::File(path)).await.unwrap();
        assert_eq!(data.metrics.len(), 1);
        assert_eq!(data.experiments[0].status, "wip");
        assert_eq!(data.opportunities[0]["size"].as_str(), "3");
        assert_eq!(data.artifacts[0].date, "45748");
    }

    #[tokio::test]
    async fn load_single_sheet_files() {
        let dir = TempDir::new().unwrap();
        let root = write(&dir, "data.json", &json!({"data": []}));
        write(
            &dir,
            "shared-experiments.json",
            &json!({"data": [{"title": "A", "status": "learn"}, {"title": "B"}]}),
        );
        write(
            &dir,
            "shared-metrics.json",
            &json!({"data": [{"metric": "knowledgeSharing", "target": 12}]}),
        );

        let data = load_sheets_strict(&DataSource::File(root)).await.unwrap();
        assert_eq!(data.experiments.len(), 2);
        assert_eq!(data.metrics[0].target, "12");
        // Sheets without a sibling file are empty, not errors.
        assert!(data.opportunities.is_empty());
        assert!(data.artifacts.is_empty());
    }

    #[tokio::test]
    async fn missing_root_is_empty_or_error() {
        let dir = TempDir::new().unwrap();
        let source = DataSource::File(dir.path().join("absent.json"));

        assert!(load_sheets(&source).await.is_empty());
        assert!(matches!(
            load_sheets_strict(&source).await,
            Err(DashboardError::Io(_))
        ));
    }

    #[tokio::test]
    async fn invalid_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            load_sheets_strict(&DataSource::File(path)).await,
            Err(DashboardError::Parse(_))
        ));
    }
}
