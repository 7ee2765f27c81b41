//! JSON snapshot of a full extraction run.
//!
//! The snapshot is written once per fresh run and fully replaced each time;
//! there is no partial update. On startup it is replayed instead of hitting
//! the network when it is younger than the configured max age.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use javadep_core::{DeprecationRecord, Report, UNKNOWN_VERSION, UNKNOWN_VERSION_GROUP};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::CacheError;

/// Cache filename used inside the output directory.
pub const DEFAULT_CACHE_FILE: &str = "deprecations.json";

/// Snapshots older than this are re-fetched.
pub const DEFAULT_MAX_AGE_HOURS: i64 = 24;

/// One version bucket of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub version: String,
    /// Older snapshots call this list `items`.
    #[serde(alias = "items", default)]
    pub symbols: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

/// Persisted results of one extraction run, one entry per version.
///
/// A symbol appears in at most one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    #[serde(default)]
    pub entries: Vec<CacheEntry>,
}

impl CacheSnapshot {
    /// Load a snapshot from disk.
    ///
    /// A missing file is an empty snapshot, not an error. Any other read or
    /// decode failure is returned.
    pub fn load(path: &Path) -> Result<Self, CacheError> {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no cache file, starting empty");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(CacheError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let snapshot: Self = serde_json::from_slice(&data).map_err(|source| CacheError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            path = %path.display(),
            entries = snapshot.entries.len(),
            symbols = snapshot.symbol_count(),
            "loaded cache"
        );
        Ok(snapshot)
    }

    /// Write the snapshot as indented JSON, replacing any existing file.
    ///
    /// The JSON goes to a temporary file next to `path` which is then renamed
    /// over it, so readers never see a half-written snapshot. The temporary
    /// file is removed if anything fails before the rename.
    pub fn save(&self, path: &Path) -> Result<(), CacheError> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let write_err = |source| CacheError::Write {
            path: path.to_path_buf(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        serde_json::to_writer_pretty(&mut tmp, self)?;
        tmp.write_all(b"\n").map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;

        info!(
            path = %path.display(),
            entries = self.entries.len(),
            symbols = self.symbol_count(),
            "saved cache"
        );
        Ok(())
    }

    /// Build a snapshot from a finished report, one entry per version group.
    ///
    /// Every entry carries the report's timestamp. A symbol already placed in
    /// an earlier group is not repeated.
    pub fn from_report(report: &Report) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut entries = Vec::with_capacity(report.groups.len());

        for group in &report.groups {
            let symbols: Vec<String> = group
                .symbols()
                .filter(|s| seen.insert(*s))
                .map(str::to_string)
                .collect();
            if symbols.is_empty() {
                continue;
            }
            entries.push(CacheEntry {
                version: group.version.clone(),
                symbols,
                last_updated: report.last_updated,
            });
        }

        Self { entries }
    }

    /// Replay the snapshot as extraction records.
    ///
    /// The unknown bucket comes back with no version. Fetch failures are not
    /// persisted, so replayed records never carry one.
    pub fn records(&self) -> Vec<DeprecationRecord> {
        self.entries
            .iter()
            .flat_map(|entry| {
                let version = match entry.version.as_str() {
                    UNKNOWN_VERSION_GROUP | UNKNOWN_VERSION => None,
                    v => Some(v.to_string()),
                };
                entry
                    .symbols
                    .iter()
                    .map(move |s| DeprecationRecord::found(s.clone(), version.clone()))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn symbol_count(&self) -> usize {
        self.entries.iter().map(|e| e.symbols.len()).sum()
    }

    /// Most recent `last_updated` across all entries.
    pub fn newest(&self) -> Option<DateTime<Utc>> {
        self.entries.iter().map(|e| e.last_updated).max()
    }

    /// Whether the snapshot may be replayed at `now`.
    ///
    /// Fresh means the newest entry is strictly younger than `max_age`; an
    /// entry exactly `max_age` old is stale. An empty snapshot is never fresh.
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.newest()
            .is_some_and(|newest| now.signed_duration_since(newest) < max_age)
    }
}
