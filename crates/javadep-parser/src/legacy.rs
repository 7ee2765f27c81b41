//! Regex-only extractor for older documentation snapshots.
//!
//! Matches raw markup without building a tree and takes the first `since`
//! value anywhere on the page, ignoring which symbol it belongs to. Kept for
//! pages the tree walk cannot handle; it is never used as a fallback for
//! [`JavadocExtractor`](crate::JavadocExtractor).

use std::sync::LazyLock;

use javadep_core::IndexEntry;
use regex::Regex;
use tracing::debug;

use crate::javadoc::clean_value;
use crate::{Extractor, ParseError};

static INDEX_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div class="col-summary-item-name[^"]*"><a href="([^"]*)">(.*?)</a></div>"#)
        .expect("valid regex")
});
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static ANNOTATION_SINCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@Deprecated\([^)]*since="([^"]+)""#).expect("valid regex")
});
static LINKED_SINCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href="[^"]*Deprecated\.html#since[^"]*"[^>]*>[^<]*</a>="([^"]+)""#)
        .expect("valid regex")
});

#[derive(Debug, Default, Clone, Copy)]
pub struct LegacyRegexExtractor;

impl LegacyRegexExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for LegacyRegexExtractor {
    fn extract_index(&self, markup: &str) -> Result<Vec<IndexEntry>, ParseError> {
        let mut entries = Vec::new();

        for (row, caps) in INDEX_ROW.captures_iter(markup).enumerate() {
            let href = caps[1].trim();
            if href.is_empty() {
                return Err(ParseError::MissingLink { row });
            }
            let label = TAG.replace_all(&caps[2], "");
            let label = label.trim();
            if label.is_empty() {
                return Err(ParseError::MissingLabel { row });
            }
            entries.push(IndexEntry::new(label, href));
        }

        debug!(count = entries.len(), "extracted index entries (regex)");
        Ok(entries)
    }

    fn extract_version(&self, markup: &str, symbol: &str) -> Option<String> {
        let version = ANNOTATION_SINCE
            .captures(markup)
            .or_else(|| LINKED_SINCE.captures(markup))
            .and_then(|caps| clean_value(&caps[1]));
        debug!(symbol, version = ?version, "extracted deprecation version (regex)");
        version
    }
}
