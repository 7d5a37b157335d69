//! Derived-field computation over validated records
//!
//! Enrichment is a total function over the validated domain: the filter
//! guarantees `trip_distance > 0` and `fare_amount > 0`, so both ratio
//! denominators are nonzero. Calling this on an unvalidated record is a
//! programming error, not a runtime condition.

use chrono::{Datelike, Timelike};

use crate::types::{EnrichedRecord, TripRecord};

/// Round to two decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derive calendar parts and ratio metrics for one validated trip.
pub fn enrich(trip: TripRecord) -> EnrichedRecord {
    debug_assert!(
        trip.trip_distance > 0.0 && trip.fare_amount > 0.0,
        "enrich requires a validated record"
    );

    let pickup = trip.pickup_datetime;
    let fare_per_mile = round2(trip.fare_amount / trip.trip_distance);
    let tip_percentage = round2(trip.tip_amount / trip.fare_amount * 100.0);

    EnrichedRecord {
        pickup_year: pickup.year(),
        pickup_month: pickup.month(),
        pickup_day: pickup.day(),
        pickup_hour: pickup.hour(),
        fare_per_mile,
        tip_percentage,
        trip,
    }
}
