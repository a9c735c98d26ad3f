//! # Configuration
//!
//! Settings are layered, later layers overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `innodash.toml` (or the file given with `--config`)
//! 3. Environment: `INNODASH_SOURCE`, `INNODASH_HOST`, `INNODASH_PORT`
//! 4. Command-line flags
//!
//! Server security settings (`INNODASH_CORS_ORIGINS`, `INNODASH_RATE_LIMIT`,
//! `INNODASH_API_KEY`) are read by the API module directly from the
//! environment.
//!
//! ```toml
//! source = "https://example.com/innovation.json"
//! host = "0.0.0.0"
//! port = 8080
//! strict = false
//! ```

use crate::source::DataSource;
use innodash_core::DashboardError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "innodash.toml";

/// Default bind host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8080;

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Location of the spreadsheet export (URL or file path).
    pub source: Option<String>,
    /// Host the HTTP server binds to.
    pub host: String,
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Fail instead of rendering the empty dashboard when the source is
    /// unavailable.
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            strict: false,
        }
    }
}

impl Config {
    /// Parse a TOML document.
    pub fn parse(content: &str) -> Result<Self, DashboardError> {
        toml::from_str(content).map_err(|e| DashboardError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, DashboardError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DashboardError::Io(format!("Cannot read '{}': {}", path.display(), e)))?;
        Self::parse(&content)
    }

    /// Load the file layer.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read when present and the defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, DashboardError> {
        match path {
            Some(path) => Self::from_path(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    tracing::debug!("Reading {}", DEFAULT_CONFIG_FILE);
                    Self::from_path(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply the environment layer from the process environment.
    pub fn with_env(self) -> Result<Self, DashboardError> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply the environment layer from a lookup function. Empty values are
    /// ignored.
    pub fn with_env_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, DashboardError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(source) = get("INNODASH_SOURCE") {
            self.source = Some(source);
        }
        if let Some(host) = get("INNODASH_HOST") {
            self.host = host;
        }
        if let Some(port) = get("INNODASH_PORT") {
            self.port = port.trim().parse().map_err(|_| {
                DashboardError::Config(format!("INNODASH_PORT is not a valid port: '{port}'"))
            })?;
        }
        Ok(self)
    }

    /// Apply the command-line layer. `None` keeps the current value.
    #[must_use]
    pub fn with_overrides(
        mut self,
        source: Option<String>,
        host: Option<String>,
        port: Option<u16>,
        strict: bool,
    ) -> Self {
        if source.is_some() {
            self.source = source;
        }
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self.strict |= strict;
        self
    }

    /// The configured data source, if any.
    #[must_use]
    pub fn data_source(&self) -> Option<DataSource> {
        self.source.as_deref().map(DataSource::parse)
    }

    /// The `host:port` bind address.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// TESTS
// =============================================================================
