//! Fixed-size worker pool over the index entries.
//!
//! The entry list is cut into contiguous chunks, one per worker. Each worker
//! walks its chunk sequentially and sends one record per entry down a shared
//! channel. There is no cancellation: a failed entry becomes a record and the
//! worker moves on, and a stalled entry stalls the rest of its chunk.

use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use javadep_core::{DeprecationRecord, FetchError, IndexEntry};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Worker count when none is configured.
pub const DEFAULT_WORKERS: usize = 8;

#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    workers: usize,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS)
    }
}

impl Dispatcher {
    /// `workers` is clamped to at least one.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `process` over every entry and collect exactly one record per entry.
    ///
    /// Records come back in completion order, not input order. If a worker
    /// task dies, every entry it had not reported yet gets a
    /// [`FetchError::Aborted`] record instead.
    pub async fn dispatch<F, Fut>(
        &self,
        entries: Vec<IndexEntry>,
        process: F,
    ) -> Vec<DeprecationRecord>
    where
        F: Fn(IndexEntry) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = DeprecationRecord> + Send + 'static,
    {
        let total = entries.len();
        if total == 0 {
            return Vec::new();
        }

        let chunk_size = total.div_ceil(self.workers);
        let indexed: Vec<(usize, IndexEntry)> = entries.iter().cloned().enumerate().collect();
        let process = Arc::new(process);
        let (tx, mut rx) = mpsc::unbounded_channel::<(usize, DeprecationRecord)>();

        let mut handles = Vec::with_capacity(self.workers);
        for (worker, chunk) in indexed.chunks(chunk_size).enumerate() {
            let chunk = chunk.to_vec();
            let tx = tx.clone();
            let process = Arc::clone(&process);
            handles.push(tokio::spawn(async move {
                for (i, entry) in chunk {
                    debug!(worker, item = i + 1, total, symbol = %entry.symbol_name, "processing entry");
                    let record = process(entry).await;
                    if tx.send((i, record)).is_err() {
                        break;
                    }
                }
            }));
        }
        drop(tx);
        info!(total, workers = handles.len(), chunk_size, "dispatched entries");

        let mut received = vec![false; total];
        let mut records = Vec::with_capacity(total);
        while let Some((i, record)) = rx.recv().await {
            received[i] = true;
            records.push(record);
        }

        for (worker, result) in join_all(handles).await.into_iter().enumerate() {
            if let Err(e) = result {
                error!(worker, error = %e, "worker stopped early");
            }
        }

        for (entry, _) in entries
            .into_iter()
            .zip(received)
            .filter(|(_, seen)| !seen)
        {
            records.push(DeprecationRecord::failed(
                entry.symbol_name,
                FetchError::Aborted {
                    path: entry.detail_path,
                },
            ));
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::time::Duration;

    fn entries(n: usize) -> Vec<IndexEntry> {
        (0..n)
            .map(|i| IndexEntry::new(format!("p.C{i}.m()"), format!("p/C{i}.html#m()")))
            .collect()
    }

    fn symbols(records: &[DeprecationRecord]) -> HashSet<&str> {
        records.iter().map(|r| r.symbol.as_str()).collect()
    }

    #[tokio::test]
    async fn empty_input_empty_output() {
        let records = Dispatcher::default()
            .dispatch(Vec::new(), |e: IndexEntry| async move {
                DeprecationRecord::found(e.symbol_name, None)
            })
            .await;
        assert!(records.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn one_record_per_entry_any_worker_count() {
        for workers in [1, 3, 8, 20] {
            for n in [1, 7, 50] {
                let records = Dispatcher::new(workers)
                    .dispatch(entries(n), |e: IndexEntry| async move {
                        DeprecationRecord::found(e.symbol_name, Some("1.0".into()))
                    })
                    .await;
                assert_eq!(records.len(), n, "workers={workers} n={n}");
                assert_eq!(symbols(&records).len(), n, "workers={workers} n={n}");
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn failures_do_not_stop_siblings() {
        let records = Dispatcher::new(2)
            .dispatch(entries(6), |e: IndexEntry| async move {
                if e.symbol_name.starts_with("p.C1.") || e.symbol_name.starts_with("p.C4.") {
                    DeprecationRecord::failed(
                        e.symbol_name,
                        FetchError::Status {
                            url: e.detail_path,
                            status: 503,
                        },
                    )
                } else {
                    DeprecationRecord::found(e.symbol_name, Some("1.0".into()))
                }
            })
            .await;
        assert_eq!(records.len(), 6);
        assert_eq!(records.iter().filter(|r| r.is_failure()).count(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn completion_order_not_input_order() {
        // Earlier entries sleep longer, so later chunks finish first.
        let records = Dispatcher::new(4)
            .dispatch(entries(4), |e: IndexEntry| async move {
                let i: u64 = e.symbol_name[3..4].parse().unwrap();
                tokio::time::sleep(Duration::from_millis((4 - i) * 40)).await;
                DeprecationRecord::found(e.symbol_name, None)
            })
            .await;
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].symbol, "p.C3.m()");
    }

    #[tokio::test]
    async fn dead_worker_entries_become_aborted_records() {
        // Two workers, chunks [0, 1] and [2, 3]; the first panics on entry 0.
        let records = Dispatcher::new(2)
            .dispatch(entries(4), |e: IndexEntry| async move {
                if e.symbol_name == "p.C0.m()" {
                    panic!("extractor blew up");
                }
                DeprecationRecord::found(e.symbol_name, Some("1.0".into()))
            })
            .await;

        assert_eq!(records.len(), 4);
        let aborted: HashSet<&str> = records
            .iter()
            .filter(|r| matches!(r.failure, Some(FetchError::Aborted { .. })))
            .map(|r| r.symbol.as_str())
            .collect();
        assert_eq!(aborted, HashSet::from(["p.C0.m()", "p.C1.m()"]));
    }

    #[test]
    fn workers_clamped_to_one() {
        assert_eq!(Dispatcher::new(0).workers(), 1);
        assert_eq!(Dispatcher::default().workers(), DEFAULT_WORKERS);
    }
}
