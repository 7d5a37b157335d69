//! Hive-style partition paths for the output datasets
//!
//! Layout: `{dataset}/pickup_year={year}/pickup_month={month}/part-{hash16}.parquet`

use trips2parquet_core::PartitionKey;

/// Directory prefix for one physical partition. Always ends with `/`.
pub fn partition_dir(dataset: &str, key: PartitionKey) -> String {
    format!(
        "{}/pickup_year={}/pickup_month={:02}/",
        dataset, key.year, key.month
    )
}

/// Data file name derived from the file contents, so a rerun over
/// identical input lands identical partition contents.
pub fn data_file_name(contents: &[u8]) -> String {
    let hash = blake3::hash(contents);
    let hex = hash.to_hex();
    format!("part-{}.parquet", &hex.as_str()[..16])
}
