//! Tree-walking extractor for modern Javadoc output.
//!
//! Index rows look like
//! `<div class="col-summary-item-name"><a href="a/B.html#m()">a.B.<wbr>m()</a></div>`.
//!
//! Member details look like
//! `<section class="detail" id="m()"> ... <span class="annotations">`
//! `<a href="...Deprecated.html">@Deprecated</a>(<a href="...Deprecated.html#since()">since</a>="1.20.1")`.

use std::sync::LazyLock;

use javadep_core::{IndexEntry, local_name};
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

use crate::{Extractor, ParseError};

static SUMMARY_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".col-summary-item-name").expect("valid selector"));
static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid selector"));
static SECTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("section[id]").expect("valid selector"));
static ANNOTATIONS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".annotations").expect("valid selector"));

/// Canonical extractor: parses the page and walks the annotation nodes.
#[derive(Debug, Default, Clone, Copy)]
pub struct JavadocExtractor;

impl JavadocExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for JavadocExtractor {
    fn extract_index(&self, markup: &str) -> Result<Vec<IndexEntry>, ParseError> {
        let document = Html::parse_document(markup);
        let mut entries = Vec::new();

        for (row, cell) in document.select(&SUMMARY_CELL).enumerate() {
            let Some(link) = cell.select(&LINK).next() else {
                // Header cells share the class but carry no link.
                debug!(row, "summary cell without link");
                continue;
            };

            let href = link.value().attr("href").map(str::trim).unwrap_or_default();
            if href.is_empty() {
                return Err(ParseError::MissingLink { row });
            }

            // Text fragments on either side of <wbr> soft-wrap markers.
            let label: String = link.text().collect();
            let label = label.trim();
            if label.is_empty() {
                return Err(ParseError::MissingLabel { row });
            }

            entries.push(IndexEntry::new(label, href));
        }

        debug!(count = entries.len(), "extracted index entries");
        Ok(entries)
    }

    fn extract_version(&self, markup: &str, symbol: &str) -> Option<String> {
        let local = local_name(symbol);
        let document = Html::parse_document(markup);

        let Some(section) = find_section(&document, local) else {
            debug!(symbol, local, "no detail section");
            return None;
        };
        let Some(annotations) = section.select(&ANNOTATIONS).next() else {
            debug!(symbol, "no annotations in detail section");
            return None;
        };

        let version = since_value(annotations);
        debug!(symbol, version = ?version, "extracted deprecation version");
        version
    }
}

/// Section whose id is exactly `local`, else the first whose name part matches.
///
/// Overloads share a name part, so `m(int)` may resolve to the `m(String)`
/// section when the ids differ in how parameters are qualified.
fn find_section<'a>(document: &'a Html, local: &str) -> Option<ElementRef<'a>> {
    let wanted = name_part(local);
    let mut fallback = None;

    for section in document.select(&SECTION) {
        let Some(id) = section.value().attr("id") else {
            continue;
        };
        if id == local {
            return Some(section);
        }
        if fallback.is_none() && name_part(id) == wanted {
            fallback = Some(section);
        }
    }
    fallback
}

fn name_part(id: &str) -> &str {
    id.split('(').next().unwrap_or(id)
}

/// Scan the annotation span's direct children for `since</a>="..."`.
fn since_value(annotations: ElementRef<'_>) -> Option<String> {
    let mut after_since = false;

    for child in annotations.children() {
        match child.value() {
            Node::Element(el) if !after_since => {
                if el.name() == "a" && el.attr("href").is_some_and(is_since_link) {
                    after_since = true;
                }
            }
            Node::Text(text) if after_since => {
                if let Some((_, value)) = text.split_once('=') {
                    return clean_value(value);
                }
            }
            _ => {}
        }
    }
    None
}

fn is_since_link(href: &str) -> bool {
    href.rsplit_once('#')
        .is_some_and(|(_, fragment)| fragment.starts_with("since"))
}

/// `"1.20.1")` or `"1.20.1", ` → `1.20.1`
pub(crate) fn clean_value(raw: &str) -> Option<String> {
    let value = raw
        .trim()
        .trim_end_matches(|c: char| c == ')' || c == ',' || c.is_whitespace())
        .trim_matches(|c: char| c == '"' || c == '\'')
        .trim();
    (!value.is_empty()).then(|| value.to_string())
}
