//! Corpus-wide co-occurrence graph assembly.
//!
//! Shares the worker pool with the count pipelines: per-volume graphs are
//! extracted in parallel and merged by pairwise weight addition, so the
//! result is independent of completion order.

use super::TermGraph;
use crate::corpus::{Corpus, Volume};
use crate::index::{IndexError, IndexResult, WorkerPool};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

fn check_workers(workers: usize) -> IndexResult<()> {
    if workers == 0 {
        return Err(IndexError::Config("worker count must be positive".into()));
    }
    Ok(())
}

/// Build the corpus-wide co-occurrence graph for pages containing `query`.
pub async fn build_token_graph(
    corpus: &Corpus,
    query: &str,
    workers: usize,
) -> IndexResult<TermGraph> {
    check_workers(workers)?;

    let pool = WorkerPool::new(workers);
    let paths: Vec<PathBuf> = corpus.paths().collect();
    let query = query.to_string();

    let mut rx = pool.map_unordered(paths, move |path| {
        let vol = Volume::from_path(path)?;
        Ok(vol.token_graph(&query))
    });

    let mut graph = TermGraph::new();
    let mut skipped = 0usize;
    while let Some(result) = rx.recv().await {
        match result {
            Ok(volume_graph) => graph.merge(volume_graph),
            Err(failure) => {
                warn!(
                    path = %failure.path.display(),
                    reason = %failure.reason,
                    "skipping volume"
                );
                skipped += 1;
            }
        }
    }

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        skipped,
        "token graph built"
    );
    Ok(graph)
}

/// Build one co-occurrence graph per publication year, suitable for
/// persisting through [`super::YearGraphs`].
pub async fn build_year_token_graphs(
    corpus: &Corpus,
    query: &str,
    workers: usize,
) -> IndexResult<HashMap<i32, TermGraph>> {
    check_workers(workers)?;

    let pool = WorkerPool::new(workers);
    let paths: Vec<PathBuf> = corpus.paths().collect();
    let query = query.to_string();

    let mut rx = pool.map_unordered(paths, move |path| {
        let vol = Volume::from_path(path)?;
        Ok((vol.year(), vol.token_graph(&query)))
    });

    let mut graphs: HashMap<i32, TermGraph> = HashMap::new();
    let mut skipped = 0usize;
    while let Some(result) = rx.recv().await {
        match result {
            Ok((year, volume_graph)) => {
                if !volume_graph.is_empty() {
                    graphs.entry(year).or_default().merge(volume_graph);
                }
            }
            Err(failure) => {
                warn!(
                    path = %failure.path.display(),
                    reason = %failure.reason,
                    "skipping volume"
                );
                skipped += 1;
            }
        }
    }

    info!(years = graphs.len(), skipped, "per-year token graphs built");
    Ok(graphs)
}
