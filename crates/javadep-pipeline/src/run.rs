//! One extraction run: cache replay or index fetch → dispatch → report → persist.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use javadep_core::{DeprecationRecord, DocumentationConfig, FetchError, IndexEntry, Report};
use javadep_fetch::PageSource;
use javadep_parser::{Extractor, ParseError};
use javadep_store::{CacheError, CacheSnapshot, DEFAULT_CACHE_FILE, DEFAULT_MAX_AGE_HOURS};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::dispatch::{DEFAULT_WORKERS, Dispatcher};

/// Deprecated-list page relative to the documentation root.
pub const DEFAULT_INDEX_PATH: &str = "/deprecated-list.html";

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("fetching deprecated list: {0}")]
    IndexFetch(#[source] FetchError),
    #[error("parsing deprecated list: {0}")]
    IndexParse(#[from] ParseError),
    #[error("loading cache: {0}")]
    Cache(#[from] CacheError),
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub cache_path: PathBuf,
    pub max_age: Duration,
    pub workers: usize,
    pub index_path: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            cache_path: PathBuf::from(DEFAULT_CACHE_FILE),
            max_age: Duration::hours(DEFAULT_MAX_AGE_HOURS),
            workers: DEFAULT_WORKERS,
            index_path: DEFAULT_INDEX_PATH.to_string(),
        }
    }
}

/// Result of a run.
///
/// `cache_error` is set when a fresh run could not persist its snapshot; the
/// records and report are still complete.
#[derive(Debug)]
pub struct RunOutput {
    pub records: Vec<DeprecationRecord>,
    pub report: Report,
    pub from_cache: bool,
    pub cache_error: Option<CacheError>,
}

pub struct Pipeline {
    config: Arc<DocumentationConfig>,
    source: Arc<dyn PageSource>,
    extractor: Arc<dyn Extractor>,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(
        config: Arc<DocumentationConfig>,
        source: Arc<dyn PageSource>,
        extractor: Arc<dyn Extractor>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            config,
            source,
            extractor,
            options,
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub async fn run(&self) -> Result<RunOutput, PipelineError> {
        self.run_at(Utc::now()).await
    }

    /// Run with an explicit clock, used for cache freshness and the report timestamp.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<RunOutput, PipelineError> {
        if self.config.use_cache {
            if let Some(output) = self.replay_cache(now)? {
                return Ok(output);
            }
            info!("cache invalid or missing, fetching new data");
        }

        info!(
            base_url = %self.config.base_url,
            version = %self.config.version,
            "fetching deprecated list"
        );
        let index = self
            .source
            .fetch(&self.options.index_path)
            .await
            .map_err(PipelineError::IndexFetch)?;
        let entries = self.extractor.extract_index(&index)?;
        info!(count = entries.len(), "found deprecated items");

        let records = self.dispatch(entries).await;
        for record in &records {
            match &record.failure {
                Some(e) => warn!(symbol = %record.symbol, error = %e, "error processing item"),
                None => info!(
                    symbol = %record.symbol,
                    version = record.version_label(),
                    "deprecated since"
                ),
            }
        }

        let report = Report::from_records(&records, now);
        let cache_error = match CacheSnapshot::from_report(&report).save(&self.options.cache_path) {
            Ok(()) => None,
            Err(e) => {
                error!(path = %self.options.cache_path.display(), error = %e, "saving cache failed");
                Some(e)
            }
        };

        Ok(RunOutput {
            records,
            report,
            from_cache: false,
            cache_error,
        })
    }

    fn replay_cache(&self, now: DateTime<Utc>) -> Result<Option<RunOutput>, PipelineError> {
        let snapshot = CacheSnapshot::load(&self.options.cache_path)?;
        let Some(last_updated) = snapshot.newest() else {
            return Ok(None);
        };
        if !snapshot.is_fresh(now, self.options.max_age) {
            info!(last_updated = %last_updated, "cache is stale");
            return Ok(None);
        }

        info!(symbols = snapshot.symbol_count(), "using cached data");
        let records = snapshot.records();
        let report = Report::from_records(&records, last_updated);
        Ok(Some(RunOutput {
            records,
            report,
            from_cache: true,
            cache_error: None,
        }))
    }

    async fn dispatch(&self, entries: Vec<IndexEntry>) -> Vec<DeprecationRecord> {
        let source = Arc::clone(&self.source);
        let extractor = Arc::clone(&self.extractor);
        Dispatcher::new(self.options.workers)
            .dispatch(entries, move |entry| {
                let source = Arc::clone(&source);
                let extractor = Arc::clone(&extractor);
                async move { process_entry(source.as_ref(), extractor.as_ref(), entry).await }
            })
            .await
    }
}

/// Fetch one detail page and extract its deprecation version.
///
/// A fetch failure becomes a record carrying the error; a page without a
/// `since` value becomes a record with no version.
pub async fn process_entry(
    source: &dyn PageSource,
    extractor: &dyn Extractor,
    entry: IndexEntry,
) -> DeprecationRecord {
    info!(symbol = %entry.symbol_name, "processing item");
    match source.fetch(&entry.detail_path).await {
        Ok(markup) => {
            let version = extractor.extract_version(&markup, &entry.symbol_name);
            DeprecationRecord::found(entry.symbol_name, version)
        }
        Err(e) => DeprecationRecord::failed(entry.symbol_name, e),
    }
}
