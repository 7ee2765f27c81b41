pub mod config;
pub mod record;
pub mod report;
pub mod symbol;
pub mod version;

pub use config::DocumentationConfig;
pub use record::{DeprecationRecord, FetchError, IndexEntry, UNKNOWN_VERSION};
pub use report::{ClassGroup, DeprecatedItem, Report, UNKNOWN_VERSION_GROUP, VersionGroup};
pub use symbol::{class_path, local_name, split_symbol};
pub use version::compare_versions;
