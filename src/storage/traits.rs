//! Storage trait definitions

use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// One flushed per-year token count. Key: (token, year).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRow {
    pub token: String,
    pub year: i32,
    pub count: u64,
}

/// One flushed anchored count. Key: (token, year, level), where `level` is
/// the anchor token's per-page occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchoredRow {
    pub token: String,
    pub year: i32,
    pub level: u64,
    pub count: u64,
}

/// Trait for count storage backends
///
/// Implementations must be thread-safe (Send + Sync). Each `apply_*` call is
/// committed as a single transaction, and every row within it is an atomic
/// additive upsert: `count = existing_count_or_0 + delta`. Counts therefore
/// accumulate across calls and across runs; they are never overwritten.
///
/// The indexing pipeline serializes all commits through a single caller, but
/// the upsert itself is atomic in the store, so correctness does not depend
/// on that single-writer discipline.
pub trait CountStore: Send + Sync {
    // === Commit Operations ===

    /// Additively upsert a page of per-year counts in one transaction.
    fn apply_counts(&self, rows: &[CountRow]) -> StorageResult<()>;

    /// Additively upsert a page of anchored counts in one transaction.
    fn apply_anchored(&self, rows: &[AnchoredRow]) -> StorageResult<()>;

    // === Query Operations ===

    /// Stored count for a token in a year; 0 when absent.
    fn token_year_count(&self, token: &str, year: i32) -> StorageResult<u64>;

    /// Stored anchored count for a (token, year, level) key; 0 when absent.
    fn token_year_level_count(&self, token: &str, year: i32, level: u64) -> StorageResult<u64>;

    /// All years represented in the index, ascending. Maintained as an
    /// explicit index at commit time, never inferred from key scans.
    fn years(&self) -> StorageResult<Vec<i32>>;

    /// Per-year counts for a token over the whole years index, zero-filled
    /// for years where the token does not appear.
    fn time_series(&self, token: &str) -> StorageResult<Vec<(i32, u64)>>;
}

/// Extension trait for opening stores from paths
pub trait OpenStore: CountStore + Sized {
    /// Open or create a store at the given path
    fn open(path: impl AsRef<Path>) -> StorageResult<Self>;

    /// Create an in-memory store (useful for testing)
    fn open_in_memory() -> StorageResult<Self>;
}
