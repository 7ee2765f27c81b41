//! Documentation site configuration shared by the fetcher and the dispatcher.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where the documentation lives and whether a cached snapshot may be replayed.
///
/// Built once per run and shared read-only (behind an `Arc`) by every worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationConfig {
    /// e.g. `https://jd.papermc.io/paper` (stored without a trailing slash).
    pub base_url: String,
    /// e.g. `1.21.3`
    pub version: String,
    pub use_cache: bool,
}

impl DocumentationConfig {
    pub fn new(base_url: impl Into<String>, version: impl Into<String>, use_cache: bool) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            version: version.into(),
            use_cache,
        }
    }

    /// Resolve a page path against `{base_url}/{version}`.
    ///
    /// A missing leading slash on `path` is added, so `deprecated-list.html`
    /// and `/deprecated-list.html` resolve to the same URL.
    pub fn full_url(&self, path: &str) -> String {
        let url = if path.starts_with('/') {
            format!("{}/{}{}", self.base_url, self.version, path)
        } else {
            format!("{}/{}/{}", self.base_url, self.version, path)
        };
        debug!(url = %url, "constructed URL");
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DocumentationConfig {
        DocumentationConfig::new("https://jd.papermc.io/paper", "1.21.3", false)
    }

    #[test]
    fn trims_trailing_slashes() {
        let cfg = DocumentationConfig::new("https://jd.papermc.io/paper//", "1.21.3", true);
        assert_eq!(cfg.base_url, "https://jd.papermc.io/paper");
        assert!(cfg.use_cache);
    }

    #[test]
    fn full_url_with_leading_slash() {
        assert_eq!(
            config().full_url("/deprecated-list.html"),
            "https://jd.papermc.io/paper/1.21.3/deprecated-list.html"
        );
    }

    #[test]
    fn full_url_adds_missing_slash() {
        assert_eq!(
            config().full_url("org/bukkit/Bukkit.html#getServer()"),
            "https://jd.papermc.io/paper/1.21.3/org/bukkit/Bukkit.html#getServer()"
        );
    }
}
