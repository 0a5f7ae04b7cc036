use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Current on-disk layout of [`CachedPrice`].
pub const CACHE_RECORD_VERSION: u32 = 1;

/// How far in the future `captured_at` may sit before the record is distrusted.
pub const CLOCK_SKEW_TOLERANCE_SECS: i64 = 300;

/// The single persisted record: last validated 24K / 10 g price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedPrice {
    pub version: u32,
    pub price: u64,
    pub captured_at: DateTime<Utc>,
}

impl CachedPrice {
    pub fn new(price: u64, captured_at: DateTime<Utc>) -> Self {
        Self {
            version: CACHE_RECORD_VERSION,
            price,
            captured_at,
        }
    }

    /// A record written by a different layout, or carrying a zero price, is
    /// never trusted.
    pub fn is_well_formed(&self) -> bool {
        self.version == CACHE_RECORD_VERSION && self.price > 0
    }

    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.captured_at
    }

    /// A timestamp further ahead than the skew tolerance was written by a
    /// bad clock and says nothing about the record's real age.
    pub fn is_from_future_at(&self, now: DateTime<Utc>) -> bool {
        self.age_at(now) < -Duration::seconds(CLOCK_SKEW_TOLERANCE_SECS)
    }

    /// Servable without `ignore_expiry`: younger than the window.
    pub fn is_fresh_at(&self, now: DateTime<Utc>, freshness_window: Duration) -> bool {
        !self.is_from_future_at(now) && self.age_at(now) < freshness_window
    }

    /// Due for a refresh: older than the window.
    ///
    /// At exactly `age == window` a record is neither fresh nor stale; it is
    /// held back from `load(false)` and the next request triggers the refresh.
    pub fn is_stale_at(&self, now: DateTime<Utc>, freshness_window: Duration) -> bool {
        self.is_from_future_at(now) || self.age_at(now) > freshness_window
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionPrice {
    pub name: String,
    pub p24: i64,
    pub p22: i64,
    pub p24_1g: i64,
    pub p22_1g: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charts {
    pub weekly: ChartSeries,
    pub monthly: ChartSeries,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMeta {
    pub latency: String,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullDataResponse {
    pub status: String,
    pub timestamp: String,
    pub base_price: u64,
    pub states: Vec<RegionPrice>,
    pub charts: Charts,
    pub meta: ResponseMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub cached_price: Option<u64>,
    pub cache_file_exists: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freshness_boundary() {
        let now = Utc::now();
        let window = Duration::seconds(3600);

        let young = CachedPrice::new(168_000, now - Duration::seconds(3599));
        assert!(young.is_fresh_at(now, window));
        assert!(!young.is_stale_at(now, window));

        let exact = CachedPrice::new(168_000, now - Duration::seconds(3600));
        assert!(!exact.is_fresh_at(now, window));
        assert!(!exact.is_stale_at(now, window));

        let old = CachedPrice::new(168_000, now - Duration::seconds(3600) - Duration::nanoseconds(1));
        assert!(!old.is_fresh_at(now, window));
        assert!(old.is_stale_at(now, window));
    }

    #[test]
    fn test_future_timestamp_is_stale() {
        let now = Utc::now();
        let window = Duration::seconds(3600);

        let skewed = CachedPrice::new(168_000, now + Duration::seconds(60));
        assert!(skewed.is_fresh_at(now, window));
        assert!(!skewed.is_stale_at(now, window));

        let future = CachedPrice::new(168_000, now + Duration::days(2));
        assert!(future.is_from_future_at(now));
        assert!(!future.is_fresh_at(now, window));
        assert!(future.is_stale_at(now, window));
    }

    #[test]
    fn test_record_shape() {
        let record = CachedPrice::new(168_000, Utc::now());
        assert!(record.is_well_formed());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["price"], 168_000);
        assert!(json["captured_at"].is_string());

        let zero = CachedPrice::new(0, Utc::now());
        assert!(!zero.is_well_formed());
    }
}
