//! Arrow schemas for the source table and both output tables

mod hourly;
mod trips;

pub use hourly::{hourly_stats_schema, hourly_stats_schema_arc};
pub use trips::{detail_schema, detail_schema_arc, raw_trips_schema, raw_trips_schema_arc};
