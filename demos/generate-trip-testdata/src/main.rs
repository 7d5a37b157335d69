//! Generate sample raw trip Parquet files for local pipeline runs
//!
//! Values are derived from the row index, so the output is reproducible
//! run to run. A small fraction of rows is deliberately invalid (zero
//! distance, zero passengers) to exercise the validity filter.
//!
//! Run with: cd demos/generate-trip-testdata && cargo run -- [count] [out_dir]

use chrono::{Duration, NaiveDate};
use std::fs;
use std::path::PathBuf;
use trips2parquet_core::parquet::write_parquet;
use trips2parquet_core::{raw_trips_to_batch, StoreAndFwdFlag, TripRecord};

const PASSENGERS: [i64; 10] = [1, 1, 1, 1, 1, 2, 2, 2, 3, 4];
const RATE_CODES: [i32; 8] = [1, 1, 1, 1, 1, 1, 2, 5];
const PAYMENT_TYPES: [i32; 10] = [1, 1, 1, 1, 1, 1, 1, 2, 2, 3];
const TOLLS: [f64; 10] = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 5.76, 8.50];

fn sample_trip(i: usize) -> TripRecord {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let pickup = start + Duration::minutes((i * 37 % (30 * 24 * 60)) as i64);
    let dropoff = pickup + Duration::minutes(5 + (i * 13 % 55) as i64);

    // Every 50th row gets a zero distance, every 97th zero passengers,
    // so the filter path always has something to drop.
    let trip_distance = if i % 50 == 49 {
        0.0
    } else {
        0.4 + (i * 7 % 120) as f64 * 0.25
    };
    let passenger_count = if i % 97 == 96 {
        0
    } else {
        PASSENGERS[i % PASSENGERS.len()]
    };

    let fare_amount = 5.0 + (i * 11 % 450) as f64 * 0.1;
    let extra = [0.0, 0.5, 1.0][i % 3];
    let mta_tax = 0.5;
    let tip_amount = (i * 17 % 100) as f64 * 0.1;
    let tolls_amount = TOLLS[i % TOLLS.len()];
    let improvement_surcharge = 0.3;
    let congestion_surcharge = if i % 10 < 7 { 2.5 } else { 0.0 };
    let airport_fee = if i % 10 == 0 { 1.25 } else { 0.0 };

    let total_amount = fare_amount
        + extra
        + mta_tax
        + tip_amount
        + tolls_amount
        + improvement_surcharge
        + congestion_surcharge
        + airport_fee;

    TripRecord {
        vendor_id: 1 + (i % 2) as i32,
        pickup_datetime: pickup,
        dropoff_datetime: dropoff,
        passenger_count,
        trip_distance,
        rate_code_id: RATE_CODES[i % RATE_CODES.len()],
        store_and_fwd_flag: if i % 20 == 0 {
            StoreAndFwdFlag::Yes
        } else {
            StoreAndFwdFlag::No
        },
        pu_location_id: 1 + (i * 3 % 264) as i32,
        do_location_id: 1 + (i * 5 % 264) as i32,
        payment_type: PAYMENT_TYPES[i % PAYMENT_TYPES.len()],
        fare_amount,
        extra,
        mta_tax,
        tip_amount,
        tolls_amount,
        improvement_surcharge,
        congestion_surcharge,
        airport_fee,
        total_amount,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let count: usize = args.next().map(|c| c.parse()).transpose()?.unwrap_or(10_000);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "sample_data/trips".to_string()));

    println!("Generating {count} sample trip records...");

    let trips: Vec<TripRecord> = (0..count).map(sample_trip).collect();
    let bytes = write_parquet(&raw_trips_to_batch(&trips)?)?;

    fs::create_dir_all(&out_dir)?;
    let out_path = out_dir.join("part-0.parquet");
    fs::write(&out_path, bytes)?;

    println!("Saved Parquet to: {}", out_path.display());
    let invalid = trips
        .iter()
        .filter(|t| t.trip_distance <= 0.0 || t.passenger_count <= 0)
        .count();
    println!("Total records: {count} ({invalid} intentionally invalid)");
    Ok(())
}
