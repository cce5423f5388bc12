//! Bounded worker pool for per-volume extraction.
//!
//! Extraction is CPU-bound, so each volume runs on a blocking task, with a
//! semaphore bounding how many run at once. Results arrive on a channel in
//! completion order; consumers must not depend on submission order. Failures
//! (including worker panics) surface as typed `VolumeFailure` results, so a
//! bad volume never takes down the batch.

use crate::corpus::CorpusError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

/// A per-volume extraction failure, surfaced as data rather than a panic.
#[derive(Debug)]
pub struct VolumeFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// A pool of at most `workers` concurrent extraction tasks.
pub struct WorkerPool {
    permits: Arc<Semaphore>,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Run `extract` over every path, bounded by the pool's worker count.
    ///
    /// Returns a receiver yielding one result per path in completion order.
    /// Dropping the receiver cancels outstanding work.
    pub fn map_unordered<T, F>(
        &self,
        paths: Vec<PathBuf>,
        extract: F,
    ) -> mpsc::Receiver<Result<T, VolumeFailure>>
    where
        T: Send + 'static,
        F: Fn(&Path) -> Result<T, CorpusError> + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::channel(paths.len().max(1));
        let permits = self.permits.clone();
        let extract = Arc::new(extract);

        tokio::spawn(async move {
            let mut tasks: JoinSet<Result<T, VolumeFailure>> = JoinSet::new();

            for path in paths {
                let permit = match permits.clone().acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => break, // semaphore closed, shutting down
                };
                let extract = extract.clone();

                tasks.spawn(async move {
                    let job_path = path.clone();
                    let joined =
                        tokio::task::spawn_blocking(move || extract(&job_path)).await;
                    drop(permit);
                    match joined {
                        Ok(Ok(value)) => Ok(value),
                        Ok(Err(e)) => Err(VolumeFailure {
                            path,
                            reason: e.to_string(),
                        }),
                        Err(e) => Err(VolumeFailure {
                            path,
                            reason: format!("worker panicked: {}", e),
                        }),
                    }
                });
            }

            while let Some(joined) = tasks.join_next().await {
                let result = match joined {
                    Ok(result) => result,
                    // join_next only fails if the wrapper task itself
                    // panicked; there is no path to attribute it to.
                    Err(e) => Err(VolumeFailure {
                        path: PathBuf::new(),
                        reason: format!("worker panicked: {}", e),
                    }),
                };
                if tx.send(result).await.is_err() {
                    break; // receiver dropped
                }
            }
        });

        rx
    }
}
