//! Error types for antenna map operations.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Main error type for antenna map operations.
#[derive(Error, Debug)]
pub enum GridError {
    /// A map file could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// An argument was outside its accepted domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A vertex index does not address an existing vertex.
    #[error("Vertex index {index} out of range (vertex count {len})")]
    VertexOutOfRange {
        /// Requested index.
        index: usize,
        /// Current vertex count.
        len: usize,
    },

    /// The character cannot be used as an antenna frequency.
    #[error("Invalid frequency {0:?}")]
    InvalidFrequency(char),

    /// The requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The operation needs at least one element.
    #[error("Empty data set")]
    Empty,
}

impl GridError {
    /// Wraps an I/O error together with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        GridError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        GridError::InvalidArgument(msg.into())
    }
}

/// Result type alias for antenna map operations.
pub type Result<T> = std::result::Result<T, GridError>;
