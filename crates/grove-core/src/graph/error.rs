//! Graph store and indexer error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while indexing into the graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Invalid caller input, rejected before any store I/O.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Database connection or query error.
    #[error("Database error: {0}")]
    Database(String),

    /// Graph schema has not been initialized.
    #[error("Graph not initialized. Run 'grove init' first.")]
    NotInitialized,

    /// IO error.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for GraphError {
    fn from(err: std::io::Error) -> Self {
        GraphError::Io {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<surrealdb::Error> for GraphError {
    fn from(err: surrealdb::Error) -> Self {
        GraphError::Database(err.to_string())
    }
}
