// Arrow schema for the hourly rollup output

use arrow::datatypes::{DataType, Field, Schema};
use std::sync::{Arc, OnceLock};

/// Returns the Arrow schema of the hourly rollup output.
pub fn hourly_stats_schema() -> Schema {
    hourly_stats_schema_arc().as_ref().clone()
}

/// Returns a cached `Arc<Schema>` for the hourly rollup output.
pub fn hourly_stats_schema_arc() -> Arc<Schema> {
    static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
    Arc::clone(SCHEMA.get_or_init(|| {
        Arc::new(Schema::new(vec![
            Field::new("pickup_year", DataType::Int32, false),
            Field::new("pickup_month", DataType::Int32, false),
            Field::new("pickup_day", DataType::Int32, false),
            Field::new("pickup_hour", DataType::Int32, false),
            Field::new("avg_distance", DataType::Float64, false),
            Field::new("avg_fare", DataType::Float64, false),
            Field::new("total_revenue", DataType::Float64, false),
            Field::new("total_passengers", DataType::Int64, false),
            Field::new("trip_count", DataType::Int64, false),
        ]))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollup_shape() {
        let schema = hourly_stats_schema();
        assert_eq!(schema.fields().len(), 9);
        assert_eq!(schema.field(0).name(), "pickup_year");
        assert_eq!(schema.field(8).name(), "trip_count");
        assert_eq!(schema.field(8).data_type(), &DataType::Int64);
    }
}
