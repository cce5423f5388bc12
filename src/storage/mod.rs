//! Persistent count storage

mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{AnchoredRow, CountRow, CountStore, OpenStore, StorageError, StorageResult};
