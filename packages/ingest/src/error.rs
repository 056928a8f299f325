//! Error types for ingestion.

use std::path::PathBuf;

use alexandria_splitter::SplitterError;
use thiserror::Error;

/// Answer of a failed content store call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The record already exists. Benign for book creation.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// The store refused the request.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The store could not be reached.
    #[error("unavailable: {0}")]
    Unavailable(String),
}

/// Main error type for ingestion.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Discovery or profile failure.
    #[error(transparent)]
    Splitter(#[from] SplitterError),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A store call failed; remaining chapters were not uploaded.
    #[error("{operation} failed for '{book}': {source}")]
    Store {
        operation: &'static str,
        book: String,
        #[source]
        source: StoreError,
    },
}

/// Result type alias for ingestion.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = IngestError::Store {
            operation: "set_chapter_content",
            book: "The Odyssey".to_string(),
            source: StoreError::Rejected("index out of range".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "set_chapter_content failed for 'The Odyssey': rejected: index out of range"
        );
    }

    #[test]
    fn test_splitter_error_is_transparent() {
        let err = IngestError::from(SplitterError::UnknownProfile("x".to_string()));
        assert_eq!(err.to_string(), "Unknown book profile: 'x'");
    }
}
