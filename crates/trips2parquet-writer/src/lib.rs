//! Partitioned Parquet writer for the trip pipeline
//!
//! Commits a dataset to its target location one partition at a time,
//! replacing exactly the partitions the current run produced. Partitions
//! absent from the run are left untouched; cross-partition atomicity is
//! out of contract and belongs to the orchestrator's rerun policy.

mod error;
mod partition;
mod storage;
mod write;

pub use error::{Result, WriterError};
pub use partition::{data_file_name, partition_dir};
pub use storage::build_operator;
pub use write::{write_partitioned, PartitionWrite};
