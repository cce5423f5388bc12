//! Parallel aggregation pipeline: worker pool, accumulators, indexing engine

mod accumulator;
mod engine;
mod pool;
mod whitelist;

pub use accumulator::{AnchoredPage, CountPage};
pub use engine::{IndexStats, Indexer};
pub use pool::{VolumeFailure, WorkerPool};
pub use whitelist::Whitelist;

use crate::corpus::CorpusError;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can occur during an indexing run
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("corpus error: {0}")]
    Corpus(#[from] CorpusError),
}

/// Result type for indexing operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Tuning knobs for an indexing run.
///
/// Defaults match the workload this was built for: CPU-bound extraction
/// across 12 workers, flushing the accumulator every 1000 volumes.
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Maximum concurrent extraction workers
    pub workers: usize,
    /// Volumes per batch; one flush per full batch
    pub batch_size: usize,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            workers: 12,
            batch_size: 1000,
        }
    }
}

impl IndexOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Fail fast before any work begins.
    pub(crate) fn validate(&self) -> IndexResult<()> {
        if self.workers == 0 {
            return Err(IndexError::Config("worker count must be positive".into()));
        }
        if self.batch_size == 0 {
            return Err(IndexError::Config("batch size must be positive".into()));
        }
        Ok(())
    }
}
