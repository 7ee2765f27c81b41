//! Snapshot cache: persisted extraction results replayed to skip re-fetching.

mod cache;
mod error;

pub use cache::{CacheEntry, CacheSnapshot, DEFAULT_CACHE_FILE, DEFAULT_MAX_AGE_HOURS};
pub use error::CacheError;
