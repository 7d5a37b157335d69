// Integration test for the pure transform chain
//
// Exercises filter → enrich → aggregate end to end, without storage.

use chrono::{NaiveDate, NaiveDateTime};
use trips2parquet_core::{
    aggregate_hourly, enrich, filter_valid, EnrichedRecord, StoreAndFwdFlag, TripRecord,
};

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn trip(
    pickup: NaiveDateTime,
    distance: f64,
    fare: f64,
    tip: f64,
    passengers: i64,
    total: f64,
) -> TripRecord {
    TripRecord {
        vendor_id: 2,
        pickup_datetime: pickup,
        dropoff_datetime: pickup + chrono::Duration::minutes(12),
        passenger_count: passengers,
        trip_distance: distance,
        rate_code_id: 1,
        store_and_fwd_flag: StoreAndFwdFlag::No,
        pu_location_id: 33,
        do_location_id: 44,
        payment_type: 1,
        fare_amount: fare,
        extra: 0.0,
        mta_tax: 0.5,
        tip_amount: tip,
        tolls_amount: 0.0,
        improvement_surcharge: 0.3,
        congestion_surcharge: 0.0,
        airport_fee: 0.0,
        total_amount: total,
    }
}

#[test]
fn three_record_scenario() {
    let raw = vec![
        trip(at(5, 0), 2.0, 10.0, 1.0, 1, 12.0),
        trip(at(6, 0), 0.0, 10.0, 1.0, 1, 12.0), // invalid: distance 0
        trip(at(5, 30), 4.0, 20.0, 2.0, 2, 25.0),
    ];

    let (valid, counts) = filter_valid(raw);
    assert_eq!(counts.input, 3);
    assert_eq!(counts.survivors, 2);

    let enriched: Vec<EnrichedRecord> = valid.into_iter().map(enrich).collect();
    assert!(enriched
        .iter()
        .all(|r| (r.pickup_year, r.pickup_month, r.pickup_day, r.pickup_hour) == (2024, 1, 1, 5)));

    let buckets = aggregate_hourly(&enriched);
    assert_eq!(buckets.len(), 1);

    let bucket = &buckets[0];
    assert_eq!(bucket.trip_count, 2);
    assert_eq!(bucket.total_passengers, 3);
    assert_eq!(bucket.total_revenue, 37.0);
    assert_eq!(bucket.avg_distance, 3.0);
    assert_eq!(bucket.avg_fare, 15.0);
}

#[test]
fn derived_fields_for_the_survivors() {
    let (valid, _) = filter_valid(vec![trip(at(5, 0), 4.0, 10.0, 2.5, 1, 13.3)]);
    let enriched = enrich(valid.into_iter().next().unwrap());

    assert_eq!(enriched.fare_per_mile, 2.50);
    assert_eq!(enriched.tip_percentage, 25.0);
}
