//! Record ⇄ Arrow conversion for the source and output tables

mod from_arrow;
mod to_arrow;

pub use from_arrow::trips_from_batch;
pub use to_arrow::raw_trips_to_batch;

use anyhow::Result;
use arrow::array::RecordBatch;

use crate::types::PartitionKey;

/// Row types the partitioned writer can commit.
///
/// A dataset names its location under the target root, maps each row to a
/// physical partition, and encodes one partition's rows as a RecordBatch.
pub trait PartitionedDataset: Sized {
    /// Dataset directory name under the target root.
    const DATASET: &'static str;

    fn partition_key(&self) -> PartitionKey;

    /// Encode one partition's rows into a RecordBatch.
    fn to_record_batch(rows: &[&Self]) -> Result<RecordBatch>;
}
