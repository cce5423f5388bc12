//! Weighted undirected token co-occurrence graph.
//!
//! Graphs form a commutative monoid under `merge` (pairwise edge-weight
//! addition), which is what makes per-volume graphs combinable into a
//! corpus-wide graph in any order.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// An undirected graph over tokens with accumulated co-occurrence weights.
///
/// Edges are keyed by the canonical (lexicographically ordered) token pair,
/// so `weight(a, b) == weight(b, a)` by construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "GraphFile", into = "GraphFile")]
pub struct TermGraph {
    nodes: HashSet<String>,
    edges: HashMap<(String, String), u64>,
}

impl TermGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical unordered key for a token pair.
    fn key(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }

    /// Add `weight` to the edge between `a` and `b`, registering both nodes.
    /// Self-pairs register the node but carry no edge.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: u64) {
        self.nodes.insert(a.to_string());
        self.nodes.insert(b.to_string());
        if a == b {
            return;
        }
        *self.edges.entry(Self::key(a, b)).or_insert(0) += weight;
    }

    /// Accumulated weight between two tokens; 0 when no edge exists.
    pub fn weight(&self, a: &str, b: &str) -> u64 {
        self.edges.get(&Self::key(a, b)).copied().unwrap_or(0)
    }

    /// Combine another graph into this one by pairwise weight addition.
    pub fn merge(&mut self, other: TermGraph) {
        self.nodes.extend(other.nodes);
        for ((a, b), weight) in other.edges {
            *self.edges.entry((a, b)).or_insert(0) += weight;
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.nodes.contains(token)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|s| s.as_str())
    }

    /// Iterate edges as (a, b, weight) with a <= b.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, u64)> {
        self.edges
            .iter()
            .map(|((a, b), w)| (a.as_str(), b.as_str(), *w))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// === Serialized form ===
//
// Tuple-keyed maps are not representable in JSON, so graphs serialize as a
// flat node list plus (source, target, weight) records.

#[derive(Serialize, Deserialize)]
struct GraphFile {
    nodes: Vec<String>,
    edges: Vec<GraphEdge>,
}

#[derive(Serialize, Deserialize)]
struct GraphEdge {
    source: String,
    target: String,
    weight: u64,
}

impl From<TermGraph> for GraphFile {
    fn from(graph: TermGraph) -> Self {
        let mut nodes: Vec<String> = graph.nodes.into_iter().collect();
        nodes.sort();
        let mut edges: Vec<GraphEdge> = graph
            .edges
            .into_iter()
            .map(|((source, target), weight)| GraphEdge {
                source,
                target,
                weight,
            })
            .collect();
        edges.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));
        Self { nodes, edges }
    }
}

impl From<GraphFile> for TermGraph {
    fn from(file: GraphFile) -> Self {
        let mut graph = TermGraph::new();
        graph.nodes.extend(file.nodes);
        for edge in file.edges {
            graph.add_edge(&edge.source, &edge.target, edge.weight);
        }
        graph
    }
}
