//! Lexigraph: per-year token frequency indexing for digitized corpora
//!
//! Builds token-frequency statistics over a corpus of digitized volumes,
//! each volume a sequence of pages with per-token occurrence counts.
//!
//! # Core Concepts
//!
//! - **Counts**: per-year token totals, committed with additive upserts
//! - **Anchored counts**: co-occurring token totals bucketed by how often a
//!   designated anchor token appears on the same page
//! - **Term graphs**: weighted undirected co-occurrence graphs restricted to
//!   pages containing a query token
//!
//! Extraction fans out across a bounded worker pool; merging and committing
//! stay on a single task, so final counts are exactly the sum of all
//! per-page contributions regardless of completion order.
//!
//! # Example
//!
//! ```no_run
//! use lexigraph::{Corpus, IndexOptions, Indexer, OpenStore, SqliteStore, Whitelist};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(SqliteStore::open("counts.db")?);
//! let whitelist = Whitelist::from_path("tokens.txt")?;
//! let indexer = Indexer::new(store, whitelist, IndexOptions::default())?;
//!
//! let stats = indexer.index_counts(&Corpus::new("corpus/")).await?;
//! println!("{} volumes indexed", stats.volumes);
//! # Ok(())
//! # }
//! ```

pub mod corpus;
pub mod graph;
pub mod index;
pub mod storage;

pub use corpus::{Corpus, CorpusError, Page, Volume};
pub use graph::{
    build_token_graph, build_year_token_graphs, GraphError, TermGraph, YearGraphs,
};
pub use index::{
    IndexError, IndexOptions, IndexStats, Indexer, VolumeFailure, Whitelist, WorkerPool,
};
pub use storage::{
    AnchoredRow, CountRow, CountStore, OpenStore, SqliteStore, StorageError, StorageResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
