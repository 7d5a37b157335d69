//! Storage operator construction
//!
//! Builds one OpenDAL operator per named location and hands it to the
//! caller. Nothing here is process-global: the job context owns its
//! operators and drops them with the run.

use opendal::Operator;
use trips2parquet_config::{StorageBackend, StorageConfig};

use crate::error::{Result, WriterError};

/// Build an operator rooted at `location` under the configured backend.
///
/// Filesystem: `location` is a subdirectory of the configured base path.
/// S3: `location` names the bucket; region/endpoint come from config.
pub fn build_operator(storage: &StorageConfig, location: &str) -> Result<Operator> {
    match storage.backend {
        StorageBackend::Fs => {
            let fs = storage.fs.as_ref().ok_or_else(|| {
                WriterError::InvalidConfig("fs config required for filesystem backend".to_string())
            })?;

            let root = format!("{}/{}", fs.path.trim_end_matches('/'), location);
            let builder = opendal::services::Fs::default().root(&root);
            Ok(Operator::new(builder)?.finish())
        }
        StorageBackend::S3 => {
            let s3 = storage.s3.as_ref().ok_or_else(|| {
                WriterError::InvalidConfig("s3 config required for S3 backend".to_string())
            })?;

            let mut builder = opendal::services::S3::default()
                .bucket(location)
                .region(&s3.region);

            if let Some(endpoint) = &s3.endpoint {
                builder = builder.endpoint(endpoint);
            }

            Ok(Operator::new(builder)?.finish())
        }
    }
}
