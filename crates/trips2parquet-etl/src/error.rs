//! Job-level error taxonomy
//!
//! Three recoverable classes: configuration (before any read), source
//! read, and write commit. Transformation precondition violations are
//! programming errors guarded by debug assertions in the core crate, not
//! runtime variants here.

use thiserror::Error;
use trips2parquet_config::ConfigError;
use trips2parquet_writer::WriterError;

/// Pipeline stages, named in logs and error context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    Reading,
    Validating,
    Enriching,
    WritingDetail,
    Aggregating,
    WritingRollup,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::Reading => "reading",
            Stage::Validating => "validating",
            Stage::Enriching => "enriching",
            Stage::WritingDetail => "writing detail",
            Stage::Aggregating => "aggregating",
            Stage::WritingRollup => "writing rollup",
        };
        f.write_str(name)
    }
}

/// Errors that abort a pipeline run
#[derive(Debug, Error)]
pub enum EtlError {
    /// A run parameter or storage configuration is unusable; raised
    /// before any read occurs.
    #[error("configuration error: {0}")]
    Config(anyhow::Error),

    /// The catalog or source location could not be read.
    #[error("source read failed while {stage}")]
    SourceRead {
        stage: Stage,
        #[source]
        source: anyhow::Error,
    },

    /// A partitioned commit failed.
    #[error("commit failed while {stage}")]
    WriteCommit {
        stage: Stage,
        #[source]
        source: WriterError,
    },
}

impl From<ConfigError> for EtlError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.into())
    }
}
