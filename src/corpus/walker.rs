//! Corpus enumerator: lazy volume path listing and fixed-size batching.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A corpus rooted at a directory of raw volume files.
///
/// Enumeration is a lazy single pass over the tree; ordering is whatever the
/// filesystem yields and is not stable across runs. Unreadable directory
/// entries are skipped.
#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
}

impl Corpus {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Generate volume file paths.
    pub fn paths(&self) -> impl Iterator<Item = PathBuf> {
        WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
    }

    /// Generate fixed-size groups of volume paths; the last group may be
    /// short. Used to bound in-flight work and accumulator memory.
    pub fn path_groups(&self, batch_size: usize) -> impl Iterator<Item = Vec<PathBuf>> {
        PathGroups {
            inner: self.paths(),
            batch_size: batch_size.max(1),
        }
    }

    /// Total number of volumes. Requires a full pass; used for progress
    /// reporting, never for correctness.
    pub fn count(&self) -> usize {
        self.paths().count()
    }
}

struct PathGroups<I> {
    inner: I,
    batch_size: usize,
}

impl<I: Iterator<Item = PathBuf>> Iterator for PathGroups<I> {
    type Item = Vec<PathBuf>;

    fn next(&mut self) -> Option<Vec<PathBuf>> {
        let mut group = Vec::with_capacity(self.batch_size);
        while group.len() < self.batch_size {
            match self.inner.next() {
                Some(path) => group.push(path),
                None => break,
            }
        }
        if group.is_empty() {
            None
        } else {
            Some(group)
        }
    }
}
