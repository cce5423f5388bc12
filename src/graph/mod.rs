//! Co-occurrence term graphs and their per-year persistence

mod builder;
mod term_graph;
mod year_graphs;

pub use builder::{build_token_graph, build_year_token_graphs};
pub use term_graph::TermGraph;
pub use year_graphs::YearGraphs;

use thiserror::Error;

/// Errors that can occur during graph persistence
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no graph stored for year {0}")]
    NotFound(i32),
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;
