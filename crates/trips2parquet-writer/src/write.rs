//! Overwrite-by-partition commit
//!
//! Groups rows by partition key, encodes one Parquet object per
//! partition, and replaces that partition's previous contents before
//! writing. A partition is a single object, which is what makes the
//! per-partition replacement observable as one step; partitions not
//! produced by the current run are never touched, so stale (year, month)
//! directories from earlier runs survive a shrinking input.

use std::collections::BTreeMap;

use opendal::Operator;
use trips2parquet_core::parquet::write_parquet_into;
use trips2parquet_core::{PartitionKey, PartitionedDataset};

use crate::error::{Result, WriterError};
use crate::partition::{data_file_name, partition_dir};

/// One committed partition
#[derive(Debug, Clone)]
pub struct PartitionWrite {
    pub key: PartitionKey,
    pub path: String,
    pub rows: usize,
    pub bytes: u64,
}

/// Commit a dataset with overwrite-by-partition semantics.
///
/// Empty input commits nothing and returns an empty list; that is a
/// successful run, not an error.
pub async fn write_partitioned<T: PartitionedDataset>(
    op: &Operator,
    rows: &[T],
) -> Result<Vec<PartitionWrite>> {
    let mut groups: BTreeMap<PartitionKey, Vec<&T>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.partition_key()).or_default().push(row);
    }

    let mut written = Vec::with_capacity(groups.len());
    for (key, members) in groups {
        let dir = partition_dir(T::DATASET, key);

        let batch = T::to_record_batch(&members).map_err(|e| WriterError::Encode {
            path: dir.clone(),
            source: e,
        })?;
        let mut buf = Vec::new();
        write_parquet_into(&batch, &mut buf).map_err(|e| WriterError::Encode {
            path: dir.clone(),
            source: e,
        })?;

        let path = format!("{}{}", dir, data_file_name(&buf));
        let bytes = buf.len() as u64;

        // Replace whatever a previous run left at this partition.
        op.remove_all(&dir).await.map_err(|e| WriterError::Commit {
            path: dir.clone(),
            source: e,
        })?;
        op.write(&path, buf).await.map_err(|e| WriterError::Commit {
            path: path.clone(),
            source: e,
        })?;

        tracing::info!(
            dataset = T::DATASET,
            rows = members.len(),
            bytes,
            path = %path,
            "committed partition"
        );

        written.push(PartitionWrite {
            key,
            path,
            rows: members.len(),
            bytes,
        });
    }

    Ok(written)
}
