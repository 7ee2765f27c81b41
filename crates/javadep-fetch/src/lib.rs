//! Fetch layer: the `PageSource` capability and its reqwest-backed implementation.

pub mod http;

use async_trait::async_trait;
use javadep_core::FetchError;

pub use http::HttpFetcher;

/// Retrieves raw markup for a path relative to the documentation root.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<String, FetchError>;
}
