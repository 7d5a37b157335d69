// Arrow schemas for raw and enriched trip records
//
// The raw schema mirrors the source table; every non-timestamp column is
// nullable because the input contract promises shape, not cleanliness.
// The detail schema appends the derived columns and is fully non-null:
// enrichment only ever sees validated records.

use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use std::sync::{Arc, OnceLock};

// Stored representation, no timezone: calendar decomposition must read the
// timestamp exactly as written.
fn timestamp_type() -> DataType {
    DataType::Timestamp(TimeUnit::Microsecond, None)
}

fn trip_fields(nullable: bool) -> Vec<Field> {
    vec![
        Field::new("vendor_id", DataType::Int32, nullable),
        Field::new("pickup_datetime", timestamp_type(), false),
        Field::new("dropoff_datetime", timestamp_type(), false),
        Field::new("passenger_count", DataType::Int64, nullable),
        Field::new("trip_distance", DataType::Float64, nullable),
        Field::new("rate_code_id", DataType::Int32, nullable),
        Field::new("store_and_fwd_flag", DataType::Utf8, nullable),
        Field::new("pu_location_id", DataType::Int32, nullable),
        Field::new("do_location_id", DataType::Int32, nullable),
        Field::new("payment_type", DataType::Int32, nullable),
        Field::new("fare_amount", DataType::Float64, nullable),
        Field::new("extra", DataType::Float64, nullable),
        Field::new("mta_tax", DataType::Float64, nullable),
        Field::new("tip_amount", DataType::Float64, nullable),
        Field::new("tolls_amount", DataType::Float64, nullable),
        Field::new("improvement_surcharge", DataType::Float64, nullable),
        Field::new("congestion_surcharge", DataType::Float64, nullable),
        Field::new("airport_fee", DataType::Float64, nullable),
        Field::new("total_amount", DataType::Float64, nullable),
    ]
}

/// Returns the Arrow schema of the raw source table.
pub fn raw_trips_schema() -> Schema {
    raw_trips_schema_arc().as_ref().clone()
}

/// Returns a cached `Arc<Schema>` for the raw source table.
pub fn raw_trips_schema_arc() -> Arc<Schema> {
    static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
    Arc::clone(SCHEMA.get_or_init(|| Arc::new(Schema::new(trip_fields(true)))))
}

/// Returns the Arrow schema of the enriched detail output.
pub fn detail_schema() -> Schema {
    detail_schema_arc().as_ref().clone()
}

/// Returns a cached `Arc<Schema>` for the enriched detail output.
pub fn detail_schema_arc() -> Arc<Schema> {
    static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
    Arc::clone(SCHEMA.get_or_init(|| {
        let mut fields = trip_fields(false);
        fields.extend([
            Field::new("pickup_year", DataType::Int32, false),
            Field::new("pickup_month", DataType::Int32, false),
            Field::new("pickup_day", DataType::Int32, false),
            Field::new("pickup_hour", DataType::Int32, false),
            Field::new("fare_per_mile", DataType::Float64, false),
            Field::new("tip_percentage", DataType::Float64, false),
        ]);
        Arc::new(Schema::new(fields))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_extends_raw() {
        let raw = raw_trips_schema();
        let detail = detail_schema();
        assert_eq!(raw.fields().len(), 19);
        assert_eq!(detail.fields().len(), 25);

        for (i, field) in raw.fields().iter().enumerate() {
            assert_eq!(detail.field(i).name(), field.name());
        }
        assert_eq!(detail.field(19).name(), "pickup_year");
        assert_eq!(detail.field(24).name(), "tip_percentage");
    }

    #[test]
    fn timestamps_carry_no_timezone() {
        let schema = raw_trips_schema();
        assert_eq!(
            schema.field(1).data_type(),
            &DataType::Timestamp(TimeUnit::Microsecond, None)
        );
    }
}
