//! Output writer traits and error types
//!
//! This module defines the trait interface for dataset writers and the
//! outcome/error types they report.

use crate::record::ItemRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting or loading the dataset
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to commit dataset to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// What a write call did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The dataset at `path` was replaced with `rows` records
    Written { rows: usize, path: PathBuf },

    /// There was nothing to write; any existing dataset was left as it was
    SkippedEmpty,
}

impl WriteOutcome {
    /// Number of rows committed
    pub fn rows(&self) -> usize {
        match self {
            Self::Written { rows, .. } => *rows,
            Self::SkippedEmpty => 0,
        }
    }
}

/// Trait for dataset writers
///
/// A writer commits the whole record set at once. Implementations must
/// either replace the destination completely or leave it untouched.
pub trait DatasetWriter: Send + Sync {
    /// Writes all items, in order
    ///
    /// An empty slice is not an error: the writer skips the write and
    /// returns [`WriteOutcome::SkippedEmpty`].
    fn write(&self, items: &[ItemRecord]) -> OutputResult<WriteOutcome>;
}
