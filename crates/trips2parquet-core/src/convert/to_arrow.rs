// Encode typed rows into Arrow RecordBatches
//
// One flat column per struct field; column order follows the schema
// modules exactly.

use anyhow::Result;
use arrow::array::{
    ArrayRef, Float64Array, Int32Array, Int64Array, RecordBatch, StringArray,
    TimestampMicrosecondArray,
};
use std::sync::Arc;

use crate::schema::{detail_schema_arc, hourly_stats_schema_arc, raw_trips_schema_arc};
use crate::types::{AggregateBucket, EnrichedRecord, PartitionKey, TripRecord};

use super::PartitionedDataset;

fn trip_columns<'a>(trips: impl Iterator<Item = &'a TripRecord> + Clone) -> Vec<ArrayRef> {
    vec![
        Arc::new(Int32Array::from_iter_values(
            trips.clone().map(|t| t.vendor_id),
        )),
        Arc::new(TimestampMicrosecondArray::from_iter_values(
            trips
                .clone()
                .map(|t| t.pickup_datetime.and_utc().timestamp_micros()),
        )),
        Arc::new(TimestampMicrosecondArray::from_iter_values(
            trips
                .clone()
                .map(|t| t.dropoff_datetime.and_utc().timestamp_micros()),
        )),
        Arc::new(Int64Array::from_iter_values(
            trips.clone().map(|t| t.passenger_count),
        )),
        Arc::new(Float64Array::from_iter_values(
            trips.clone().map(|t| t.trip_distance),
        )),
        Arc::new(Int32Array::from_iter_values(
            trips.clone().map(|t| t.rate_code_id),
        )),
        Arc::new(StringArray::from_iter_values(
            trips.clone().map(|t| t.store_and_fwd_flag.as_str()),
        )),
        Arc::new(Int32Array::from_iter_values(
            trips.clone().map(|t| t.pu_location_id),
        )),
        Arc::new(Int32Array::from_iter_values(
            trips.clone().map(|t| t.do_location_id),
        )),
        Arc::new(Int32Array::from_iter_values(
            trips.clone().map(|t| t.payment_type),
        )),
        Arc::new(Float64Array::from_iter_values(
            trips.clone().map(|t| t.fare_amount),
        )),
        Arc::new(Float64Array::from_iter_values(
            trips.clone().map(|t| t.extra),
        )),
        Arc::new(Float64Array::from_iter_values(
            trips.clone().map(|t| t.mta_tax),
        )),
        Arc::new(Float64Array::from_iter_values(
            trips.clone().map(|t| t.tip_amount),
        )),
        Arc::new(Float64Array::from_iter_values(
            trips.clone().map(|t| t.tolls_amount),
        )),
        Arc::new(Float64Array::from_iter_values(
            trips.clone().map(|t| t.improvement_surcharge),
        )),
        Arc::new(Float64Array::from_iter_values(
            trips.clone().map(|t| t.congestion_surcharge),
        )),
        Arc::new(Float64Array::from_iter_values(
            trips.clone().map(|t| t.airport_fee),
        )),
        Arc::new(Float64Array::from_iter_values(
            trips.map(|t| t.total_amount),
        )),
    ]
}

/// Encode raw trip records against the source-table schema. Used by test
/// fixtures and the sample-data generator.
pub fn raw_trips_to_batch(trips: &[TripRecord]) -> Result<RecordBatch> {
    let columns = trip_columns(trips.iter());
    RecordBatch::try_new(raw_trips_schema_arc(), columns).map_err(Into::into)
}

impl PartitionedDataset for EnrichedRecord {
    const DATASET: &'static str = "detail";

    fn partition_key(&self) -> PartitionKey {
        PartitionKey {
            year: self.pickup_year,
            month: self.pickup_month,
        }
    }

    fn to_record_batch(rows: &[&Self]) -> Result<RecordBatch> {
        let mut columns = trip_columns(rows.iter().map(|r| &r.trip));
        columns.extend([
            Arc::new(Int32Array::from_iter_values(
                rows.iter().map(|r| r.pickup_year),
            )) as ArrayRef,
            Arc::new(Int32Array::from_iter_values(
                rows.iter().map(|r| r.pickup_month as i32),
            )),
            Arc::new(Int32Array::from_iter_values(
                rows.iter().map(|r| r.pickup_day as i32),
            )),
            Arc::new(Int32Array::from_iter_values(
                rows.iter().map(|r| r.pickup_hour as i32),
            )),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|r| r.fare_per_mile),
            )),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|r| r.tip_percentage),
            )),
        ]);
        RecordBatch::try_new(detail_schema_arc(), columns).map_err(Into::into)
    }
}

impl PartitionedDataset for AggregateBucket {
    const DATASET: &'static str = "hourly_stats";

    fn partition_key(&self) -> PartitionKey {
        self.key.partition_key()
    }

    fn to_record_batch(rows: &[&Self]) -> Result<RecordBatch> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|b| b.key.year))),
            Arc::new(Int32Array::from_iter_values(
                rows.iter().map(|b| b.key.month as i32),
            )),
            Arc::new(Int32Array::from_iter_values(
                rows.iter().map(|b| b.key.day as i32),
            )),
            Arc::new(Int32Array::from_iter_values(
                rows.iter().map(|b| b.key.hour as i32),
            )),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|b| b.avg_distance),
            )),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|b| b.avg_fare),
            )),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|b| b.total_revenue),
            )),
            Arc::new(Int64Array::from_iter_values(
                rows.iter().map(|b| b.total_passengers),
            )),
            Arc::new(Int64Array::from_iter_values(
                rows.iter().map(|b| b.trip_count),
            )),
        ];
        RecordBatch::try_new(hourly_stats_schema_arc(), columns).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::enrich;
    use crate::types::{HourKey, StoreAndFwdFlag};
    use chrono::NaiveDate;

    fn trip() -> TripRecord {
        TripRecord {
            vendor_id: 1,
            pickup_datetime: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(5, 0, 0)
                .unwrap(),
            dropoff_datetime: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(5, 12, 0)
                .unwrap(),
            passenger_count: 1,
            trip_distance: 2.0,
            rate_code_id: 1,
            store_and_fwd_flag: StoreAndFwdFlag::No,
            pu_location_id: 5,
            do_location_id: 6,
            payment_type: 1,
            fare_amount: 10.0,
            extra: 0.0,
            mta_tax: 0.5,
            tip_amount: 1.0,
            tolls_amount: 0.0,
            improvement_surcharge: 0.3,
            congestion_surcharge: 0.0,
            airport_fee: 0.0,
            total_amount: 12.0,
        }
    }

    #[test]
    fn detail_batch_matches_schema() {
        let enriched = enrich(trip());
        let batch = EnrichedRecord::to_record_batch(&[&enriched]).unwrap();
        assert_eq!(batch.schema(), detail_schema_arc());
        assert_eq!(batch.num_rows(), 1);

        let fare_per_mile = batch
            .column_by_name("fare_per_mile")
            .unwrap()
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(fare_per_mile.value(0), 5.0);
    }

    #[test]
    fn rollup_batch_matches_schema() {
        let bucket = AggregateBucket {
            key: HourKey {
                year: 2024,
                month: 1,
                day: 1,
                hour: 5,
            },
            avg_distance: 3.0,
            avg_fare: 15.0,
            total_revenue: 37.0,
            total_passengers: 3,
            trip_count: 2,
        };
        let batch = AggregateBucket::to_record_batch(&[&bucket]).unwrap();
        assert_eq!(batch.schema(), hourly_stats_schema_arc());

        let revenue = batch
            .column_by_name("total_revenue")
            .unwrap()
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(revenue.value(0), 37.0);
    }

    #[test]
    fn partition_keys_follow_the_pickup_calendar() {
        let enriched = enrich(trip());
        assert_eq!(
            enriched.partition_key(),
            PartitionKey {
                year: 2024,
                month: 1
            }
        );
        assert_eq!(EnrichedRecord::DATASET, "detail");
        assert_eq!(AggregateBucket::DATASET, "hourly_stats");
    }
}
