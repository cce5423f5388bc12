//! Corpus enumeration and volume parsing

mod volume;
mod walker;

pub use volume::{Page, Volume};
pub use walker::Corpus;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading corpus assets
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed volume {}: {reason}", path.display())]
    MalformedVolume { path: PathBuf, reason: String },
}

/// Result type for corpus operations
pub type CorpusResult<T> = Result<T, CorpusError>;
