//! In-memory accumulator pages.
//!
//! A page holds the running counts for one batch of volumes. Merging is a
//! commutative, associative addition, so the final totals are independent of
//! worker count, batch partitioning, and completion order. Pages are owned
//! and mutated only by the indexing engine, and cleared only after a
//! successful commit.

use super::Whitelist;
use crate::storage::{AnchoredRow, CountRow};
use std::collections::HashMap;

/// Accumulator for per-year token counts: year -> token -> running count.
#[derive(Debug, Default)]
pub struct CountPage {
    years: HashMap<i32, HashMap<String, u64>>,
}

impl CountPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one volume's token counts into the page.
    pub fn merge(&mut self, year: i32, counts: HashMap<String, u64>) {
        let tokens = self.years.entry(year).or_default();
        for (token, count) in counts {
            *tokens.entry(token).or_insert(0) += count;
        }
    }

    /// Flatten to commit rows, dropping tokens outside the whitelist.
    pub fn rows(&self, whitelist: &Whitelist) -> Vec<CountRow> {
        let mut rows = Vec::new();
        for (&year, tokens) in &self.years {
            for (token, &count) in tokens {
                if whitelist.contains(token) {
                    rows.push(CountRow {
                        token: token.clone(),
                        year,
                        count,
                    });
                }
            }
        }
        rows
    }

    /// Running count for a key, whitelist not applied. Test support.
    pub fn count(&self, token: &str, year: i32) -> u64 {
        self.years
            .get(&year)
            .and_then(|tokens| tokens.get(token))
            .copied()
            .unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.years.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// Accumulator for anchored counts: year -> level -> token -> running count.
#[derive(Debug, Default)]
pub struct AnchoredPage {
    years: HashMap<i32, HashMap<u64, HashMap<String, u64>>>,
}

impl AnchoredPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one volume's level-bucketed counts into the page.
    pub fn merge(&mut self, year: i32, buckets: HashMap<u64, HashMap<String, u64>>) {
        let levels = self.years.entry(year).or_default();
        for (level, counts) in buckets {
            let tokens = levels.entry(level).or_default();
            for (token, count) in counts {
                *tokens.entry(token).or_insert(0) += count;
            }
        }
    }

    /// Flatten to commit rows, dropping tokens outside the whitelist.
    pub fn rows(&self, whitelist: &Whitelist) -> Vec<AnchoredRow> {
        let mut rows = Vec::new();
        for (&year, levels) in &self.years {
            for (&level, tokens) in levels {
                for (token, &count) in tokens {
                    if whitelist.contains(token) {
                        rows.push(AnchoredRow {
                            token: token.clone(),
                            year,
                            level,
                            count,
                        });
                    }
                }
            }
        }
        rows
    }

    pub fn clear(&mut self) {
        self.years.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(entries: &[(&str, u64)]) -> HashMap<String, u64> {
        entries
            .iter()
            .map(|(token, count)| (token.to_string(), *count))
            .collect()
    }

    #[test]
    fn merge_sums_within_a_year() {
        let mut page = CountPage::new();
        page.merge(1901, counts(&[("one", 1), ("two", 2)]));
        page.merge(1901, counts(&[("one", 11), ("two", 12)]));
        page.merge(1902, counts(&[("one", 5)]));

        assert_eq!(page.count("one", 1901), 12);
        assert_eq!(page.count("two", 1901), 14);
        assert_eq!(page.count("one", 1902), 5);
    }

    #[test]
    fn merge_is_commutative() {
        let a = counts(&[("one", 1), ("two", 2)]);
        let b = counts(&[("two", 3), ("three", 4)]);

        let mut left = CountPage::new();
        left.merge(1901, a.clone());
        left.merge(1901, b.clone());

        let mut right = CountPage::new();
        right.merge(1901, b);
        right.merge(1901, a);

        for token in ["one", "two", "three"] {
            assert_eq!(left.count(token, 1901), right.count(token, 1901));
        }
    }

    #[test]
    fn rows_apply_the_whitelist() {
        let mut page = CountPage::new();
        page.merge(1901, counts(&[("kept", 3), ("dropped", 9)]));

        let whitelist: Whitelist = ["kept"].into_iter().collect();
        let rows = page.rows(&whitelist);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].token, "kept");
        assert_eq!(rows[0].count, 3);
        // The accumulator itself still holds the dropped token
        assert_eq!(page.count("dropped", 1901), 9);
    }

    #[test]
    fn clear_empties_the_page() {
        let mut page = CountPage::new();
        page.merge(1901, counts(&[("one", 1)]));
        assert!(!page.is_empty());

        page.clear();
        assert!(page.is_empty());
    }

    #[test]
    fn anchored_merge_keeps_levels_separate() {
        let mut page = AnchoredPage::new();
        let mut buckets = HashMap::new();
        buckets.insert(1, counts(&[("aaa", 1)]));
        buckets.insert(2, counts(&[("aaa", 5)]));
        page.merge(1901, buckets);

        let mut more = HashMap::new();
        more.insert(2, counts(&[("aaa", 2)]));
        page.merge(1901, more);

        let whitelist: Whitelist = ["aaa"].into_iter().collect();
        let mut rows = page.rows(&whitelist);
        rows.sort_by_key(|row| row.level);

        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].level, rows[0].count), (1, 1));
        assert_eq!((rows[1].level, rows[1].count), (2, 7));
    }
}
