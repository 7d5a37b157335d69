//! Hourly group-and-reduce over enriched records
//!
//! Aggregation is expressed as an accumulator whose `merge` is associative
//! and commutative: shard-local partial maps combined in any order produce
//! the same buckets as a single pass over the whole record set. Means are
//! carried as (sum, count) and divided once at finish.

use std::collections::HashMap;

use crate::types::{AggregateBucket, EnrichedRecord, HourKey};

/// Partial aggregate state for one hour bucket
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HourlyAccumulator {
    pub trip_count: i64,
    pub sum_distance: f64,
    pub sum_fare: f64,
    pub sum_revenue: f64,
    pub sum_passengers: i64,
}

impl HourlyAccumulator {
    /// Fold one record into the accumulator.
    pub fn observe(&mut self, record: &EnrichedRecord) {
        self.trip_count += 1;
        self.sum_distance += record.trip.trip_distance;
        self.sum_fare += record.trip.fare_amount;
        self.sum_revenue += record.trip.total_amount;
        self.sum_passengers += record.trip.passenger_count;
    }

    /// Combine two partial states. Associative and commutative.
    pub fn merge(&mut self, other: &HourlyAccumulator) {
        self.trip_count += other.trip_count;
        self.sum_distance += other.sum_distance;
        self.sum_fare += other.sum_fare;
        self.sum_revenue += other.sum_revenue;
        self.sum_passengers += other.sum_passengers;
    }

    /// Finalize into a rollup row. Only ever called on accumulators that
    /// observed at least one record; keys are derived from data, never
    /// enumerated a priori.
    pub fn finish(&self, key: HourKey) -> AggregateBucket {
        debug_assert!(self.trip_count > 0, "bucket with zero members");
        let n = self.trip_count as f64;
        AggregateBucket {
            key,
            avg_distance: self.sum_distance / n,
            avg_fare: self.sum_fare / n,
            total_revenue: self.sum_revenue,
            total_passengers: self.sum_passengers,
            trip_count: self.trip_count,
        }
    }
}

/// Shard-local partial aggregation state
pub type PartialAggregate = HashMap<HourKey, HourlyAccumulator>;

/// Aggregate one shard into a partial map.
pub fn aggregate_shard(records: &[EnrichedRecord]) -> PartialAggregate {
    let mut partial = PartialAggregate::new();
    for record in records {
        partial
            .entry(record.hour_key())
            .or_default()
            .observe(record);
    }
    partial
}

/// Merge two shard partials; the pipeline's single synchronization point.
pub fn merge_partials(mut left: PartialAggregate, right: PartialAggregate) -> PartialAggregate {
    for (key, acc) in right {
        left.entry(key).or_default().merge(&acc);
    }
    left
}

/// Finalize a partial map into rollup rows. Emission order is unspecified.
pub fn finish_buckets(partials: PartialAggregate) -> Vec<AggregateBucket> {
    partials
        .into_iter()
        .map(|(key, acc)| acc.finish(key))
        .collect()
}

/// Single-pass aggregation over a full record set.
pub fn aggregate_hourly(records: &[EnrichedRecord]) -> Vec<AggregateBucket> {
    finish_buckets(aggregate_shard(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::enrich;
    use crate::types::{StoreAndFwdFlag, TripRecord};
    use chrono::{NaiveDate, NaiveDateTime};

    fn pickup(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn record(day: u32, hour: u32, minute: u32, distance: f64, fare: f64) -> EnrichedRecord {
        enrich(TripRecord {
            vendor_id: 1,
            pickup_datetime: pickup(day, hour, minute),
            dropoff_datetime: pickup(day, hour, minute) + chrono::Duration::minutes(10),
            passenger_count: 2,
            trip_distance: distance,
            rate_code_id: 1,
            store_and_fwd_flag: StoreAndFwdFlag::No,
            pu_location_id: 1,
            do_location_id: 2,
            payment_type: 1,
            fare_amount: fare,
            extra: 0.0,
            mta_tax: 0.5,
            tip_amount: 1.0,
            tolls_amount: 0.0,
            improvement_surcharge: 0.3,
            congestion_surcharge: 0.0,
            airport_fee: 0.0,
            total_amount: fare + 1.8,
        })
    }

    #[test]
    fn one_bucket_per_distinct_hour() {
        let records = vec![
            record(1, 5, 0, 2.0, 10.0),
            record(1, 5, 30, 4.0, 20.0),
            record(1, 6, 0, 1.0, 5.0),
            record(2, 5, 0, 1.0, 5.0),
        ];
        let buckets = aggregate_hourly(&records);
        assert_eq!(buckets.len(), 3);

        let mut keys: Vec<HourKey> = buckets.iter().map(|b| b.key).collect();
        keys.sort_by_key(|k| (k.year, k.month, k.day, k.hour));
        keys.dedup();
        assert_eq!(keys.len(), 3, "bucket keys must be unique");
    }

    #[test]
    fn bucket_statistics() {
        let records = vec![record(1, 5, 0, 2.0, 10.0), record(1, 5, 30, 4.0, 20.0)];
        let buckets = aggregate_hourly(&records);
        assert_eq!(buckets.len(), 1);

        let bucket = &buckets[0];
        assert_eq!(bucket.trip_count, 2);
        assert_eq!(bucket.total_passengers, 4);
        assert_eq!(bucket.avg_distance, 3.0);
        assert_eq!(bucket.avg_fare, 15.0);
        assert!((bucket.total_revenue - 33.6).abs() < 1e-9);
    }

    #[test]
    fn sharded_aggregation_matches_single_pass() {
        let records: Vec<EnrichedRecord> = (0..60)
            .map(|i| {
                record(
                    1 + (i % 3),
                    (i % 7) as u32,
                    (i % 60) as u32,
                    0.5 + i as f64 * 0.25,
                    5.0 + i as f64,
                )
            })
            .collect();

        let single = aggregate_shard(&records);

        // Any partitioning of the record set must reduce to the same map.
        for shard_size in [1, 7, 13, 60] {
            let merged = records
                .chunks(shard_size)
                .map(aggregate_shard)
                .fold(PartialAggregate::new(), merge_partials);

            assert_eq!(merged.len(), single.len());
            for (key, acc) in &single {
                let m = &merged[key];
                assert_eq!(m.trip_count, acc.trip_count);
                assert_eq!(m.sum_passengers, acc.sum_passengers);
                assert!((m.sum_distance - acc.sum_distance).abs() < 1e-9);
                assert!((m.sum_fare - acc.sum_fare).abs() < 1e-9);
                assert!((m.sum_revenue - acc.sum_revenue).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn merge_is_commutative() {
        let a = aggregate_shard(&[record(1, 5, 0, 2.0, 10.0)]);
        let b = aggregate_shard(&[record(1, 5, 1, 4.0, 20.0), record(1, 6, 0, 1.0, 5.0)]);

        let ab = merge_partials(a.clone(), b.clone());
        let ba = merge_partials(b, a);
        assert_eq!(ab.len(), ba.len());
        for (key, acc) in ab {
            assert_eq!(ba[&key], acc);
        }
    }

    #[test]
    fn no_bucket_for_empty_input() {
        assert!(aggregate_hourly(&[]).is_empty());
    }
}
