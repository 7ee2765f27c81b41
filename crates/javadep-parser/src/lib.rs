//! Markup extraction: deprecated-list index rows and per-symbol `since` versions.
//!
//! Both depend on the exact HTML shape the Javadoc tool emits, so the rules
//! sit behind [`Extractor`] and can be swapped without touching dispatch or
//! caching.

mod javadoc;
mod legacy;

use javadep_core::IndexEntry;
use thiserror::Error;

pub use javadoc::JavadocExtractor;
pub use legacy::LegacyRegexExtractor;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("summary row {row}: link has no href")]
    MissingLink { row: usize },
    #[error("summary row {row}: link has no label")]
    MissingLabel { row: usize },
}

/// Matching rules for one documentation generator's markup.
pub trait Extractor: Send + Sync {
    /// Summary rows of the deprecated-list page, in document order.
    ///
    /// Zero rows is not an error. A malformed row fails the whole index.
    fn extract_index(&self, markup: &str) -> Result<Vec<IndexEntry>, ParseError>;

    /// The `since` value of the symbol's `@Deprecated` annotation, if present.
    fn extract_version(&self, markup: &str, symbol: &str) -> Option<String>;
}
