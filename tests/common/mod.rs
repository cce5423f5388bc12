//! Shared test fixtures: scratch corpora of raw volume JSON files.

use lexigraph::Corpus;
use serde_json::{json, Value};
use tempfile::TempDir;

/// One page body: token -> occurrence count under a single POS tag.
pub fn page(counts: &[(&str, u64)]) -> Value {
    let mut tokens = serde_json::Map::new();
    for (token, count) in counts {
        tokens.insert(token.to_string(), json!({ "POS": count }));
    }
    json!({ "body": { "tokenPosCount": tokens } })
}

/// A temporary on-disk corpus of raw volume files.
pub struct TestCorpus {
    dir: TempDir,
    next: usize,
}

impl TestCorpus {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create corpus dir"),
            next: 0,
        }
    }

    /// Write a well-formed volume with the given year and pages.
    pub fn add_volume(&mut self, year: i32, pages: Vec<Value>) {
        let id = format!("vol-{:04}", self.next);
        let doc = json!({
            "id": id,
            "metadata": { "pubDate": year.to_string() },
            "features": { "pages": pages }
        });
        self.add_raw(&doc.to_string());
    }

    /// Write an arbitrary (possibly malformed) volume document.
    pub fn add_raw(&mut self, data: &str) {
        let path = self.dir.path().join(format!("vol-{:04}.json", self.next));
        std::fs::write(path, data).expect("write volume");
        self.next += 1;
    }

    pub fn corpus(&self) -> Corpus {
        Corpus::new(self.dir.path())
    }
}
