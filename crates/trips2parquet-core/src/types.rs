//! Shared row types used across the pipeline crates

use chrono::NaiveDateTime;

/// Store-and-forward flag carried on raw trip records ("Y"/"N" on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAndFwdFlag {
    Yes,
    No,
}

impl StoreAndFwdFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Y",
            Self::No => "N",
        }
    }

    /// Anything other than `"Y"` reads as `No`.
    pub fn from_wire(value: &str) -> Self {
        if value.eq_ignore_ascii_case("y") {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// One raw trip record as read from the source table.
///
/// Timestamps are kept in their stored representation; no timezone
/// conversion happens anywhere in the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub vendor_id: i32,
    pub pickup_datetime: NaiveDateTime,
    pub dropoff_datetime: NaiveDateTime,
    pub passenger_count: i64,
    pub trip_distance: f64,
    pub rate_code_id: i32,
    pub store_and_fwd_flag: StoreAndFwdFlag,
    pub pu_location_id: i32,
    pub do_location_id: i32,
    pub payment_type: i32,
    pub fare_amount: f64,
    pub extra: f64,
    pub mta_tax: f64,
    pub tip_amount: f64,
    pub tolls_amount: f64,
    pub improvement_surcharge: f64,
    pub congestion_surcharge: f64,
    pub airport_fee: f64,
    pub total_amount: f64,
}

/// A validated trip plus its derived calendar and ratio fields
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub trip: TripRecord,
    pub pickup_year: i32,
    pub pickup_month: u32,
    pub pickup_day: u32,
    pub pickup_hour: u32,
    pub fare_per_mile: f64,
    pub tip_percentage: f64,
}

impl EnrichedRecord {
    pub fn hour_key(&self) -> HourKey {
        HourKey {
            year: self.pickup_year,
            month: self.pickup_month,
            day: self.pickup_day,
            hour: self.pickup_hour,
        }
    }
}

/// Grouping key for the hourly rollup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HourKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
}

impl HourKey {
    pub fn partition_key(&self) -> PartitionKey {
        PartitionKey {
            year: self.year,
            month: self.month,
        }
    }
}

/// One hourly rollup row. At most one exists per [`HourKey`] per run.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateBucket {
    pub key: HourKey,
    pub avg_distance: f64,
    pub avg_fare: f64,
    pub total_revenue: f64,
    pub total_passengers: i64,
    pub trip_count: i64,
}

/// Physical partition key shared by both output datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartitionKey {
    pub year: i32,
    pub month: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wire_roundtrip() {
        assert_eq!(StoreAndFwdFlag::from_wire("Y"), StoreAndFwdFlag::Yes);
        assert_eq!(StoreAndFwdFlag::from_wire("y"), StoreAndFwdFlag::Yes);
        assert_eq!(StoreAndFwdFlag::from_wire("N"), StoreAndFwdFlag::No);
        assert_eq!(StoreAndFwdFlag::from_wire(""), StoreAndFwdFlag::No);
        assert_eq!(StoreAndFwdFlag::Yes.as_str(), "Y");
    }
}
