//! trips2parquet ETL job
//!
//! Reads the raw trip table from a catalog-addressable source location,
//! filters and enriches the records, rolls them up by hour, and commits
//! the detail and hourly datasets to partitioned Parquet at the target
//! location. Reruns are safe: each run replaces exactly the partitions it
//! produces.

pub mod catalog;
pub mod error;
pub mod init;
pub mod job;

pub use catalog::{StorageCatalog, TripCatalog, TRIPS_TABLE};
pub use error::{EtlError, Stage};
pub use init::{build_context, init_tracing, JobContext};
pub use job::{EtlJob, RunSummary};

use trips2parquet_config::{JobParams, RuntimeConfig};

/// Validate inputs, build the run context and execute one pipeline run.
pub async fn run_with(params: JobParams, config: RuntimeConfig) -> Result<RunSummary, EtlError> {
    params.validate()?;
    config.validate()?;

    let ctx = build_context(&config, &params)?;
    let catalog = StorageCatalog::new(params.database.clone(), ctx.source.clone());

    EtlJob::new(params, ctx).run(&catalog).await
}
