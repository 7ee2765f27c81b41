//! Extraction pipeline: index fetch, worker-pool dispatch, report, and cache persistence.

mod dispatch;
mod run;

#[cfg(test)]
mod testing;

pub use dispatch::{DEFAULT_WORKERS, Dispatcher};
pub use run::{DEFAULT_INDEX_PATH, Pipeline, PipelineError, PipelineOptions, RunOutput, process_entry};
