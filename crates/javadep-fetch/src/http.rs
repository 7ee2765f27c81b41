//! HTTP page fetcher for a versioned documentation site.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use javadep_core::{DocumentationConfig, FetchError};
use tracing::info;

use crate::PageSource;

/// Fetches documentation pages over HTTP.
///
/// One GET per call, no retry. Without [`with_timeout`](Self::with_timeout)
/// a stalled server blocks the caller indefinitely.
pub struct HttpFetcher {
    client: reqwest::Client,
    config: Arc<DocumentationConfig>,
}

impl HttpFetcher {
    pub fn new(config: Arc<DocumentationConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Build a fetcher whose requests fail after `timeout`.
    pub fn with_timeout(
        config: Arc<DocumentationConfig>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &DocumentationConfig {
        &self.config
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let url = self.config.full_url(path);

        info!(url = %url, "fetching page");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.clone(),
                source: Box::new(e),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(|e| FetchError::Body {
            url: url.clone(),
            source: Box::new(e),
        })?;
        info!(url = %url, bytes = body.len(), "fetched page");
        Ok(body)
    }
}
