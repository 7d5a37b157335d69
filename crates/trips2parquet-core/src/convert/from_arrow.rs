// Decode source RecordBatches into typed trip records
//
// Columns are looked up by name so the source may carry them in any
// order. Null numeric cells read as zero; the validator drops the rows
// where that matters. A missing column or a mistyped column is a shape
// violation and fails the whole read.

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, Float64Array, Int32Array, Int64Array, RecordBatch, StringArray,
    TimestampMicrosecondArray,
};
use chrono::DateTime;

use crate::types::{StoreAndFwdFlag, TripRecord};

fn column<'a, T: Array + 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T> {
    let col = batch
        .column_by_name(name)
        .with_context(|| format!("source batch is missing column '{name}'"))?;
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("column '{name}' has unexpected type {:?}", col.data_type()))
}

fn f64_at(arr: &Float64Array, row: usize) -> f64 {
    if arr.is_null(row) {
        0.0
    } else {
        arr.value(row)
    }
}

fn i32_at(arr: &Int32Array, row: usize) -> i32 {
    if arr.is_null(row) {
        0
    } else {
        arr.value(row)
    }
}

fn i64_at(arr: &Int64Array, row: usize) -> i64 {
    if arr.is_null(row) {
        0
    } else {
        arr.value(row)
    }
}

/// Decode one source batch into trip records.
pub fn trips_from_batch(batch: &RecordBatch) -> Result<Vec<TripRecord>> {
    let vendor_id = column::<Int32Array>(batch, "vendor_id")?;
    let pickup = column::<TimestampMicrosecondArray>(batch, "pickup_datetime")?;
    let dropoff = column::<TimestampMicrosecondArray>(batch, "dropoff_datetime")?;
    let passenger_count = column::<Int64Array>(batch, "passenger_count")?;
    let trip_distance = column::<Float64Array>(batch, "trip_distance")?;
    let rate_code_id = column::<Int32Array>(batch, "rate_code_id")?;
    let store_and_fwd_flag = column::<StringArray>(batch, "store_and_fwd_flag")?;
    let pu_location_id = column::<Int32Array>(batch, "pu_location_id")?;
    let do_location_id = column::<Int32Array>(batch, "do_location_id")?;
    let payment_type = column::<Int32Array>(batch, "payment_type")?;
    let fare_amount = column::<Float64Array>(batch, "fare_amount")?;
    let extra = column::<Float64Array>(batch, "extra")?;
    let mta_tax = column::<Float64Array>(batch, "mta_tax")?;
    let tip_amount = column::<Float64Array>(batch, "tip_amount")?;
    let tolls_amount = column::<Float64Array>(batch, "tolls_amount")?;
    let improvement_surcharge = column::<Float64Array>(batch, "improvement_surcharge")?;
    let congestion_surcharge = column::<Float64Array>(batch, "congestion_surcharge")?;
    let airport_fee = column::<Float64Array>(batch, "airport_fee")?;
    let total_amount = column::<Float64Array>(batch, "total_amount")?;

    let timestamp_at = |arr: &TimestampMicrosecondArray, row: usize, name: &str| {
        if arr.is_null(row) {
            bail!("column '{name}' is null at row {row}");
        }
        DateTime::from_timestamp_micros(arr.value(row))
            .map(|dt| dt.naive_utc())
            .with_context(|| format!("column '{name}' is out of range at row {row}"))
    };

    let mut trips = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let flag = if store_and_fwd_flag.is_null(row) {
            StoreAndFwdFlag::No
        } else {
            StoreAndFwdFlag::from_wire(store_and_fwd_flag.value(row))
        };

        trips.push(TripRecord {
            vendor_id: i32_at(vendor_id, row),
            pickup_datetime: timestamp_at(pickup, row, "pickup_datetime")?,
            dropoff_datetime: timestamp_at(dropoff, row, "dropoff_datetime")?,
            passenger_count: i64_at(passenger_count, row),
            trip_distance: f64_at(trip_distance, row),
            rate_code_id: i32_at(rate_code_id, row),
            store_and_fwd_flag: flag,
            pu_location_id: i32_at(pu_location_id, row),
            do_location_id: i32_at(do_location_id, row),
            payment_type: i32_at(payment_type, row),
            fare_amount: f64_at(fare_amount, row),
            extra: f64_at(extra, row),
            mta_tax: f64_at(mta_tax, row),
            tip_amount: f64_at(tip_amount, row),
            tolls_amount: f64_at(tolls_amount, row),
            improvement_surcharge: f64_at(improvement_surcharge, row),
            congestion_surcharge: f64_at(congestion_surcharge, row),
            airport_fee: f64_at(airport_fee, row),
            total_amount: f64_at(total_amount, row),
        });
    }
    Ok(trips)
}
