//! Version-grouped report handed to the rendering layer.
//!
//! Records arrive in whatever order the workers finished, so everything here
//! is re-sorted: versions newest first (numeric segment order), the
//! "Unknown Version" group last, classes by name, items by full path.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::record::{DeprecationRecord, UNKNOWN_VERSION};
use crate::symbol::{class_path, local_name};
use crate::version::compare_versions;

/// Group label for records without a recoverable version (including failures).
pub const UNKNOWN_VERSION_GROUP: &str = "Unknown Version";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeprecatedItem {
    pub full_path: String,
    pub name: String,
    /// Fetch error message, if the detail page could not be retrieved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassGroup {
    pub class_name: String,
    pub items: Vec<DeprecatedItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionGroup {
    pub version: String,
    pub classes: Vec<ClassGroup>,
}

impl VersionGroup {
    pub fn is_unknown(&self) -> bool {
        self.version == UNKNOWN_VERSION_GROUP
    }

    pub fn item_count(&self) -> usize {
        self.classes.iter().map(|c| c.items.len()).sum()
    }

    /// All item full paths in report order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.classes
            .iter()
            .flat_map(|c| c.items.iter().map(|i| i.full_path.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub groups: Vec<VersionGroup>,
    pub last_updated: DateTime<Utc>,
}

type ClassMap = BTreeMap<String, Vec<DeprecatedItem>>;

impl Report {
    /// Group records by version, then by class path.
    pub fn from_records(records: &[DeprecationRecord], last_updated: DateTime<Utc>) -> Self {
        let mut known: BTreeMap<&str, ClassMap> = BTreeMap::new();
        let mut unknown: ClassMap = BTreeMap::new();

        for record in records {
            let item = DeprecatedItem {
                full_path: record.symbol.clone(),
                name: local_name(&record.symbol).to_string(),
                failure: record.failure.as_ref().map(|e| e.to_string()),
            };
            let class = class_path(&record.symbol).to_string();

            let bucket = match record.version.as_deref() {
                Some(v) if record.failure.is_none() && v != UNKNOWN_VERSION => {
                    known.entry(v).or_default()
                }
                _ => &mut unknown,
            };
            bucket.entry(class).or_default().push(item);
        }

        let mut versions: Vec<(&str, ClassMap)> = known.into_iter().collect();
        versions.sort_by(|(a, _), (b, _)| compare_versions(b, a));

        let mut groups: Vec<VersionGroup> = versions
            .into_iter()
            .map(|(version, classes)| VersionGroup {
                version: version.to_string(),
                classes: class_groups(classes),
            })
            .collect();

        if !unknown.is_empty() {
            groups.push(VersionGroup {
                version: UNKNOWN_VERSION_GROUP.to_string(),
                classes: class_groups(unknown),
            });
        }

        Self {
            groups,
            last_updated,
        }
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|g| g.item_count()).sum()
    }

    pub fn failure_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| g.classes.iter())
            .flat_map(|c| c.items.iter())
            .filter(|i| i.failure.is_some())
            .count()
    }
}

fn class_groups(classes: ClassMap) -> Vec<ClassGroup> {
    // BTreeMap iteration already yields class names in order.
    classes
        .into_iter()
        .map(|(class_name, mut items)| {
            items.sort_by(|a, b| a.full_path.cmp(&b.full_path));
            ClassGroup { class_name, items }
        })
        .collect()
}
