// Initialization utilities for the ETL job
//
// Tracing setup and storage context construction. The run owns its
// operators; nothing storage-related is ambient global state.

use trips2parquet_config::{JobParams, LogFormat, RuntimeConfig};
use trips2parquet_writer::build_operator;

use crate::error::EtlError;

/// The storage handles one run needs: where trips come from and where
/// the two datasets go.
pub struct JobContext {
    pub source: opendal::Operator,
    pub target: opendal::Operator,
}

/// Build the run's storage context. Failures here are configuration
/// errors: nothing has been read yet.
pub fn build_context(config: &RuntimeConfig, params: &JobParams) -> Result<JobContext, EtlError> {
    let source = build_operator(&config.storage, &params.source)
        .map_err(|e| EtlError::Config(e.into()))?;
    let target = build_operator(&config.storage, &params.target)
        .map_err(|e| EtlError::Config(e.into()))?;

    Ok(JobContext { source, target })
}

/// Initialize tracing/logging once, from config plus CLI override.
pub fn init_tracing(level: &str, format: LogFormat) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Json => {
            registry.with(fmt::layer().json()).init();
        }
        LogFormat::Text => {
            registry.with(fmt::layer()).init();
        }
    }
}
