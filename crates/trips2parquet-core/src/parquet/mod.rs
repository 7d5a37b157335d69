//! Parquet encode/decode helpers shared by the writer and the catalog

mod reader;
mod writer;

pub use reader::read_record_batches;
pub use writer::{write_parquet, write_parquet_into, writer_properties};
