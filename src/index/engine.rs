//! Indexing engine: fan out extraction, merge completions, flush per batch.
//!
//! The engine drives both count pipelines. For each path group it fans
//! extraction out over the worker pool, merges results into the live
//! accumulator page as they complete, and flushes once the whole group has
//! been merged. Merge, flush, and commit all run on the single driving
//! task; workers never see the accumulator or the store.
//!
//! Per-volume failures are skipped and logged, and surface in the returned
//! stats — one bad volume must not void a long-running indexing job. A
//! storage failure is fatal for the current flush and propagates with the
//! accumulator page intact, so the caller can retry the flush.

use super::accumulator::{AnchoredPage, CountPage};
use super::pool::WorkerPool;
use super::{IndexError, IndexOptions, IndexResult, Whitelist};
use crate::corpus::{Corpus, Volume};
use crate::storage::CountStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of an indexing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Volumes successfully extracted and merged
    pub volumes: usize,
    /// Volumes skipped due to extraction failures
    pub skipped: usize,
    /// Whitelisted rows committed across all flushes
    pub rows_flushed: usize,
}

/// The indexing engine.
///
/// Owns the store handle, the whitelist, and the run options; scoped to one
/// indexing run rather than held in module-level state.
pub struct Indexer {
    store: Arc<dyn CountStore>,
    whitelist: Whitelist,
    options: IndexOptions,
}

impl Indexer {
    /// Create an engine, failing fast on invalid configuration.
    pub fn new(
        store: Arc<dyn CountStore>,
        whitelist: Whitelist,
        options: IndexOptions,
    ) -> IndexResult<Self> {
        options.validate()?;
        if whitelist.is_empty() {
            return Err(IndexError::Config("token whitelist is empty".into()));
        }
        Ok(Self {
            store,
            whitelist,
            options,
        })
    }

    /// Index per-year token counts for the whole corpus.
    pub async fn index_counts(&self, corpus: &Corpus) -> IndexResult<IndexStats> {
        let pool = WorkerPool::new(self.options.workers);
        let mut stats = IndexStats::default();
        let mut page = CountPage::new();

        for group in corpus.path_groups(self.options.batch_size) {
            let mut rx = pool.map_unordered(group, |path| {
                let vol = Volume::from_path(path)?;
                Ok((vol.year(), vol.token_counts()))
            });

            while let Some(result) = rx.recv().await {
                match result {
                    Ok((year, counts)) => {
                        page.merge(year, counts);
                        stats.volumes += 1;
                    }
                    Err(failure) => {
                        warn!(
                            path = %failure.path.display(),
                            reason = %failure.reason,
                            "skipping volume"
                        );
                        stats.skipped += 1;
                    }
                }
            }

            let rows = page.rows(&self.whitelist);
            self.store.apply_counts(&rows)?;
            page.clear();
            stats.rows_flushed += rows.len();

            info!(
                volumes = stats.volumes,
                skipped = stats.skipped,
                rows = rows.len(),
                "batch committed"
            );
        }

        Ok(stats)
    }

    /// Index anchored token counts for the whole corpus: counts of tokens
    /// co-occurring with `anchor`, bucketed by the anchor's per-page count.
    pub async fn index_anchored(&self, corpus: &Corpus, anchor: &str) -> IndexResult<IndexStats> {
        let pool = WorkerPool::new(self.options.workers);
        let mut stats = IndexStats::default();
        let mut page = AnchoredPage::new();
        let anchor = anchor.to_string();

        for group in corpus.path_groups(self.options.batch_size) {
            let anchor = anchor.clone();
            let mut rx = pool.map_unordered(group, move |path| {
                let vol = Volume::from_path(path)?;
                Ok((vol.year(), vol.anchored_token_counts(&anchor)))
            });

            while let Some(result) = rx.recv().await {
                match result {
                    Ok((year, buckets)) => {
                        page.merge(year, buckets);
                        stats.volumes += 1;
                    }
                    Err(failure) => {
                        warn!(
                            path = %failure.path.display(),
                            reason = %failure.reason,
                            "skipping volume"
                        );
                        stats.skipped += 1;
                    }
                }
            }

            let rows = page.rows(&self.whitelist);
            self.store.apply_anchored(&rows)?;
            page.clear();
            stats.rows_flushed += rows.len();

            info!(
                volumes = stats.volumes,
                skipped = stats.skipped,
                rows = rows.len(),
                "batch committed"
            );
        }

        Ok(stats)
    }
}
