//! Extraction records produced by the pipeline.

use thiserror::Error;

/// Version label used when no deprecation version could be recovered.
pub const UNKNOWN_VERSION: &str = "Unknown";

/// Failure to retrieve a single page.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("fetch failed for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("server returned {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("reading body failed for {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("worker stopped before processing {path}")]
    Aborted { path: String },
}

/// One row of the deprecated-list summary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Fully qualified dotted name, e.g. `org.bukkit.Bukkit.getOfflinePlayer(String)`.
    pub symbol_name: String,
    /// Detail page link relative to the documentation root.
    pub detail_path: String,
}

impl IndexEntry {
    pub fn new(symbol_name: impl Into<String>, detail_path: impl Into<String>) -> Self {
        Self {
            symbol_name: symbol_name.into(),
            detail_path: detail_path.into(),
        }
    }
}

/// Outcome for one discovered symbol.
///
/// `version` is `None` when the detail page carries no `since` value or the
/// page could not be fetched; `failure` holds the fetch error in the latter case.
#[derive(Debug)]
pub struct DeprecationRecord {
    pub symbol: String,
    pub version: Option<String>,
    pub failure: Option<FetchError>,
}

impl DeprecationRecord {
    pub fn found(symbol: impl Into<String>, version: Option<String>) -> Self {
        Self {
            symbol: symbol.into(),
            version,
            failure: None,
        }
    }

    pub fn failed(symbol: impl Into<String>, failure: FetchError) -> Self {
        Self {
            symbol: symbol.into(),
            version: None,
            failure: Some(failure),
        }
    }

    /// Version string for display, `"Unknown"` when absent.
    pub fn version_label(&self) -> &str {
        self.version.as_deref().unwrap_or(UNKNOWN_VERSION)
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}
