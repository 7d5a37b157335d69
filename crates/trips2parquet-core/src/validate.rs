//! Permissive validity filter over raw trip records
//!
//! Records that fail any predicate are dropped, never repaired. Dropping
//! is a filtering policy, not an error: the only observable effect is the
//! survivor count.

use crate::types::TripRecord;

/// Input/survivor counts for one filtered shard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCounts {
    pub input: usize,
    pub survivors: usize,
}

impl FilterCounts {
    pub fn dropped(&self) -> usize {
        self.input - self.survivors
    }

    pub fn merge(&mut self, other: FilterCounts) {
        self.input += other.input;
        self.survivors += other.survivors;
    }
}

/// A record survives iff every domain predicate holds.
pub fn is_valid(trip: &TripRecord) -> bool {
    trip.passenger_count > 0
        && trip.trip_distance > 0.0
        && trip.fare_amount > 0.0
        && trip.total_amount > 0.0
}

/// Filter one shard down to its valid records.
pub fn filter_valid(trips: Vec<TripRecord>) -> (Vec<TripRecord>, FilterCounts) {
    let input = trips.len();
    let survivors: Vec<TripRecord> = trips.into_iter().filter(is_valid).collect();
    let counts = FilterCounts {
        input,
        survivors: survivors.len(),
    };
    (survivors, counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::types::StoreAndFwdFlag;

    fn trip() -> TripRecord {
        TripRecord {
            vendor_id: 1,
            pickup_datetime: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(5, 0, 0)
                .unwrap(),
            dropoff_datetime: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(5, 20, 0)
                .unwrap(),
            passenger_count: 1,
            trip_distance: 2.0,
            rate_code_id: 1,
            store_and_fwd_flag: StoreAndFwdFlag::No,
            pu_location_id: 41,
            do_location_id: 152,
            payment_type: 1,
            fare_amount: 10.0,
            extra: 0.5,
            mta_tax: 0.5,
            tip_amount: 1.0,
            tolls_amount: 0.0,
            improvement_surcharge: 0.3,
            congestion_surcharge: 2.5,
            airport_fee: 0.0,
            total_amount: 12.0,
        }
    }

    #[test]
    fn valid_record_survives() {
        assert!(is_valid(&trip()));
    }

    #[test]
    fn zero_distance_is_dropped_regardless_of_other_fields() {
        let mut t = trip();
        t.trip_distance = 0.0;
        assert!(!is_valid(&t));
    }

    #[test]
    fn each_predicate_is_enforced() {
        for mutate in [
            (|t: &mut TripRecord| t.passenger_count = 0) as fn(&mut TripRecord),
            |t| t.trip_distance = -1.5,
            |t| t.fare_amount = 0.0,
            |t| t.total_amount = -0.01,
        ] {
            let mut t = trip();
            mutate(&mut t);
            assert!(!is_valid(&t));
        }
    }

    #[test]
    fn nan_amounts_are_dropped() {
        // NaN fails every ordered comparison, so these fall out with the
        // rest of the invalid records rather than poisoning aggregates.
        let mut t = trip();
        t.fare_amount = f64::NAN;
        assert!(!is_valid(&t));
    }

    #[test]
    fn filter_counts_both_sides() {
        let mut bad = trip();
        bad.total_amount = 0.0;
        let (survivors, counts) = filter_valid(vec![trip(), bad, trip()]);
        assert_eq!(survivors.len(), 2);
        assert_eq!(counts.input, 3);
        assert_eq!(counts.survivors, 2);
        assert_eq!(counts.dropped(), 1);
    }
}
