//! Per-year graph persistence.
//!
//! Each year's graph is stored as `<root>/<year>.json`. Years are enumerated
//! from the directory listing, parsing file stems and skipping anything
//! non-numeric rather than assuming every entry is a year.

use super::{GraphError, GraphResult, TermGraph};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A directory of per-year term graphs.
#[derive(Debug, Clone)]
pub struct YearGraphs {
    root: PathBuf,
}

impl YearGraphs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn graph_path(&self, year: i32) -> PathBuf {
        self.root.join(format!("{}.json", year))
    }

    /// Persist the graph for a year, replacing any previous one.
    pub fn save(&self, year: i32, graph: &TermGraph) -> GraphResult<()> {
        std::fs::create_dir_all(&self.root)?;
        let file = File::create(self.graph_path(year))?;
        serde_json::to_writer(BufWriter::new(file), graph)?;
        Ok(())
    }

    /// Hydrate the graph for a year.
    pub fn graph_by_year(&self, year: i32) -> GraphResult<TermGraph> {
        let path = self.graph_path(year);
        if !path.exists() {
            return Err(GraphError::NotFound(year));
        }
        let file = File::open(path)?;
        let graph = serde_json::from_reader(BufReader::new(file))?;
        Ok(graph)
    }

    /// All years with a stored graph, ascending.
    pub fn years(&self) -> GraphResult<Vec<i32>> {
        let mut years = Vec::new();
        if !self.root.exists() {
            return Ok(years);
        }
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            let stem = path.file_stem().and_then(|s| s.to_str());
            match stem.and_then(|s| s.parse::<i32>().ok()) {
                Some(year) => years.push(year),
                None => debug!(path = %path.display(), "skipping non-year entry"),
            }
        }
        years.sort_unstable();
        Ok(years)
    }

    /// Union of node sets across all stored per-year graphs.
    pub fn all_tokens(&self) -> GraphResult<HashSet<String>> {
        let mut tokens = HashSet::new();
        for year in self.years()? {
            let graph = self.graph_by_year(year)?;
            tokens.extend(graph.nodes().map(str::to_string));
        }
        Ok(tokens)
    }
}
