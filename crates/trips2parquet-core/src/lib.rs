//! Core transform logic for trips2parquet
//!
//! Pure record-level processing: the validity filter, derived-field
//! enrichment, the hourly group-and-reduce, Arrow schemas for the two
//! output tables, and Parquet encode/decode helpers. No storage I/O lives
//! here; the writer and job crates own that.

pub mod aggregate;
pub mod convert;
pub mod enrich;
pub mod parquet;
pub mod schema;
pub mod types;
pub mod validate;

pub use aggregate::{
    aggregate_hourly, aggregate_shard, finish_buckets, merge_partials, HourlyAccumulator,
    PartialAggregate,
};
pub use convert::{raw_trips_to_batch, trips_from_batch, PartitionedDataset};
pub use enrich::enrich;
pub use types::{
    AggregateBucket, EnrichedRecord, HourKey, PartitionKey, StoreAndFwdFlag, TripRecord,
};
pub use validate::{filter_valid, is_valid, FilterCounts};
