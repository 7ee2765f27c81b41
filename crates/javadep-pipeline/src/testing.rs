//! In-memory page source for pipeline tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use javadep_core::FetchError;
use javadep_fetch::PageSource;

/// Serves canned markup by path; unknown paths answer 404.
#[derive(Default)]
pub struct MemorySource {
    pages: HashMap<String, Result<String, u16>>,
    fetches: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, path: &str, markup: &str) -> Self {
        self.pages.insert(path.to_string(), Ok(markup.to_string()));
        self
    }

    pub fn with_status(mut self, path: &str, status: u16) -> Self {
        self.pages.insert(path.to_string(), Err(status));
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for MemorySource {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(path.to_string());
        match self.pages.get(path) {
            Some(Ok(markup)) => Ok(markup.clone()),
            Some(Err(status)) => Err(FetchError::Status {
                url: path.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                url: path.to_string(),
                status: 404,
            }),
        }
    }
}
