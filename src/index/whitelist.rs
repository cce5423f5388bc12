//! Token whitelist vocabulary.
//!
//! The whitelist is consulted when an accumulator page is flattened into
//! rows for commit — not during extraction — so accumulators may transiently
//! hold tokens that are never persisted.

use std::collections::HashSet;
use std::io;
use std::path::Path;

/// The set of tokens eligible for persistence.
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    tokens: HashSet<String>,
}

impl Whitelist {
    /// Load a whitelist from a file with one token per line.
    /// Blank lines and `#` comments are ignored.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(data
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Whitelist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_from_iterator() {
        let whitelist: Whitelist = ["one", "two"].into_iter().collect();
        assert!(whitelist.contains("one"));
        assert!(!whitelist.contains("three"));
        assert_eq!(whitelist.len(), 2);
    }

    #[test]
    fn loads_lines_skipping_blanks_and_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.txt");
        std::fs::write(&path, "one\n\n# vocabulary\n  two  \n").unwrap();

        let whitelist = Whitelist::from_path(&path).unwrap();
        assert_eq!(whitelist.len(), 2);
        assert!(whitelist.contains("two"));
    }
}
