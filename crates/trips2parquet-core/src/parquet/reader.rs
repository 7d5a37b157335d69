// Parquet decode for catalog reads

use anyhow::{Context, Result};
use arrow::array::RecordBatch;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

/// Decode every RecordBatch from one Parquet object.
pub fn read_record_batches(bytes: Bytes) -> Result<Vec<RecordBatch>> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(bytes)
        .context("not a readable Parquet object")?
        .build()
        .context("failed to open Parquet row groups")?;

    reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("failed to decode Parquet record batch")
}
