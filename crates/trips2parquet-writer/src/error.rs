//! Error types for the partitioned writer

use thiserror::Error;

/// Errors raised while building operators or committing partitions
#[derive(Debug, Error)]
pub enum WriterError {
    /// Storage configuration cannot produce an operator
    #[error("invalid writer configuration: {0}")]
    InvalidConfig(String),

    /// Encoding a partition's rows into Parquet failed
    #[error("failed to encode partition '{path}'")]
    Encode {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// The storage commit for one partition failed
    #[error("write failed for partition '{path}'")]
    Commit {
        path: String,
        #[source]
        source: opendal::Error,
    },

    /// Operator construction failed
    #[error("storage operator init failed")]
    Storage(#[from] opendal::Error),
}

/// Result type alias for WriterError
pub type Result<T> = std::result::Result<T, WriterError>;
