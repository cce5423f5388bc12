//! Volume and Page value types plus the per-volume extraction step.
//!
//! A volume is one digitized document: a publication year and an ordered
//! sequence of pages, each page mapping raw token strings to per-POS-tag
//! occurrence counts. Raw volumes arrive as JSON documents shaped like the
//! extracted-features format:
//!
//! ```json
//! {
//!   "id": "loc.ark+=13960=t0ms3t21f",
//!   "metadata": { "pubDate": "1901" },
//!   "features": {
//!     "pages": [
//!       { "body": { "tokenPosCount": { "the": { "DT": 12 } } } }
//!     ]
//!   }
//! }
//! ```
//!
//! Parsing validates the shape up front: anything missing or mistyped is a
//! `CorpusError::MalformedVolume` naming the offending path, so callers can
//! apply a uniform skip-and-log policy.

use super::{CorpusError, CorpusResult};
use crate::graph::TermGraph;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Normalize a raw token: case-fold, then keep only plain lowercase words.
///
/// Tokens that contain anything outside `a-z` after lowercasing (digits,
/// punctuation, accented letters) are excluded from every counting operation.
fn normalize(raw: &str) -> Option<String> {
    let token = raw.to_lowercase();
    if !token.is_empty() && token.chars().all(|c| c.is_ascii_lowercase()) {
        Some(token)
    } else {
        None
    }
}

/// One page of a volume: raw token -> POS tag -> occurrence count.
#[derive(Debug, Clone)]
pub struct Page {
    token_pos_counts: HashMap<String, HashMap<String, u64>>,
}

impl Page {
    pub fn new(token_pos_counts: HashMap<String, HashMap<String, u64>>) -> Self {
        Self { token_pos_counts }
    }

    /// Total occurrences of each normalized token on this page,
    /// summed across POS tags.
    pub fn token_counts(&self) -> HashMap<String, u64> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for (raw, pos_counts) in &self.token_pos_counts {
            if let Some(token) = normalize(raw) {
                *counts.entry(token).or_insert(0) += pos_counts.values().sum::<u64>();
            }
        }
        counts
    }
}

/// A validated volume: identifier, publication year, pages.
#[derive(Debug, Clone)]
pub struct Volume {
    id: String,
    year: i32,
    pages: Vec<Page>,
}

impl Volume {
    pub fn new(id: impl Into<String>, year: i32, pages: Vec<Page>) -> Self {
        Self {
            id: id.into(),
            year,
            pages,
        }
    }

    /// Read and validate a raw volume file.
    pub fn from_path(path: &Path) -> CorpusResult<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(path, &data)
    }

    /// Parse a raw volume document, validating the expected shape.
    pub fn from_json(path: &Path, data: &str) -> CorpusResult<Self> {
        let malformed = |reason: &str| CorpusError::MalformedVolume {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let raw: RawVolume = serde_json::from_str(data)
            .map_err(|e| malformed(&format!("invalid JSON: {}", e)))?;

        let id = raw
            .id
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let year = raw
            .metadata
            .ok_or_else(|| malformed("missing metadata"))?
            .pub_date
            .ok_or_else(|| malformed("missing metadata.pubDate"))?
            .as_year()
            .ok_or_else(|| malformed("metadata.pubDate is not a year"))?;

        let raw_pages = raw
            .features
            .ok_or_else(|| malformed("missing features"))?
            .pages
            .ok_or_else(|| malformed("missing features.pages"))?;

        let mut pages = Vec::with_capacity(raw_pages.len());
        for (i, raw_page) in raw_pages.into_iter().enumerate() {
            let body = raw_page
                .body
                .ok_or_else(|| malformed(&format!("page {} missing body", i)))?;
            let counts = body
                .token_pos_count
                .ok_or_else(|| malformed(&format!("page {} missing body.tokenPosCount", i)))?;
            pages.push(Page::new(counts));
        }

        Ok(Self { id, year, pages })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Total occurrences of each normalized token across all pages.
    pub fn token_counts(&self) -> HashMap<String, u64> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for page in &self.pages {
            for (token, count) in page.token_counts() {
                *counts.entry(token).or_insert(0) += count;
            }
        }
        counts
    }

    /// Token counts for pages where `anchor` appears, bucketed by the
    /// anchor's per-page occurrence count ("level").
    ///
    /// Pages where the anchor does not occur contribute to no bucket.
    /// The same level observed on multiple pages sums; the anchor token
    /// itself is counted like any other token.
    pub fn anchored_token_counts(&self, anchor: &str) -> HashMap<u64, HashMap<String, u64>> {
        let mut buckets: HashMap<u64, HashMap<String, u64>> = HashMap::new();
        for page in &self.pages {
            let counts = page.token_counts();
            let level = match counts.get(anchor) {
                Some(&level) if level > 0 => level,
                _ => continue,
            };
            let bucket = buckets.entry(level).or_default();
            for (token, count) in counts {
                *bucket.entry(token).or_insert(0) += count;
            }
        }
        buckets
    }

    /// Co-occurrence graph over pages that contain `query`.
    ///
    /// Every unordered pair of normalized tokens on a qualifying page adds
    /// the product of the two tokens' page counts to the pair's edge weight.
    pub fn token_graph(&self, query: &str) -> TermGraph {
        let mut graph = TermGraph::new();
        for page in &self.pages {
            let counts = page.token_counts();
            if !counts.contains_key(query) {
                continue;
            }
            let mut tokens: Vec<&String> = counts.keys().collect();
            tokens.sort();
            for i in 0..tokens.len() {
                for j in (i + 1)..tokens.len() {
                    let weight = counts[tokens[i]] * counts[tokens[j]];
                    graph.add_edge(tokens[i], tokens[j], weight);
                }
            }
        }
        graph
    }
}

// === Raw JSON shape ===

#[derive(Deserialize)]
struct RawVolume {
    id: Option<String>,
    metadata: Option<RawMetadata>,
    features: Option<RawFeatures>,
}

#[derive(Deserialize)]
struct RawMetadata {
    #[serde(rename = "pubDate")]
    pub_date: Option<YearField>,
}

/// `pubDate` appears as both a JSON string and a bare integer in the wild.
#[derive(Deserialize)]
#[serde(untagged)]
enum YearField {
    Number(i32),
    Text(String),
}

impl YearField {
    fn as_year(&self) -> Option<i32> {
        match self {
            YearField::Number(n) => Some(*n),
            YearField::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Deserialize)]
struct RawFeatures {
    pages: Option<Vec<RawPage>>,
}

#[derive(Deserialize)]
struct RawPage {
    body: Option<RawBody>,
}

#[derive(Deserialize)]
struct RawBody {
    #[serde(rename = "tokenPosCount")]
    token_pos_count: Option<HashMap<String, HashMap<String, u64>>>,
}
