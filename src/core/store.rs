use crate::domain::model::CachedPrice;
use crate::domain::ports::Storage;
use chrono::Utc;
use std::time::Duration;

/// Disk-backed home of the last validated price.
///
/// Nothing here returns an error: a record that cannot be read or decoded is
/// reported as absent, and a failed write is logged and dropped.
pub struct PriceStore<S: Storage> {
    storage: S,
    file_name: String,
    freshness_window: chrono::Duration,
}

impl<S: Storage> PriceStore<S> {
    pub fn new(storage: S, file_name: impl Into<String>, freshness_window: Duration) -> Self {
        let freshness_window =
            chrono::Duration::from_std(freshness_window).unwrap_or(chrono::Duration::MAX);
        Self {
            storage,
            file_name: file_name.into(),
            freshness_window,
        }
    }

    pub fn freshness_window(&self) -> chrono::Duration {
        self.freshness_window
    }

    /// Returns whether the record reached storage. Failures are already
    /// logged here; the flag only tells the caller what to report.
    pub async fn save(&self, price: u64) -> bool {
        let record = CachedPrice::new(price, Utc::now());
        let bytes = match serde_json::to_vec_pretty(&record) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("❌ Failed to encode cache record: {}", e);
                return false;
            }
        };

        match self.storage.write_file(&self.file_name, &bytes).await {
            Ok(()) => {
                tracing::info!("💾 Cache updated: {}", price);
                true
            }
            Err(e) => {
                tracing::error!("❌ Failed to write cache: {}", e);
                false
            }
        }
    }

    /// Stored price, provided it is fresh or `ignore_expiry` is set.
    pub async fn load(&self, ignore_expiry: bool) -> Option<u64> {
        let record = self.snapshot().await?;
        if ignore_expiry || record.is_fresh_at(Utc::now(), self.freshness_window) {
            Some(record.price)
        } else {
            None
        }
    }

    pub async fn is_stale(&self) -> bool {
        match self.snapshot().await {
            Some(record) => record.is_stale_at(Utc::now(), self.freshness_window),
            None => true,
        }
    }

    pub async fn exists(&self) -> bool {
        self.storage.exists(&self.file_name).await
    }

    /// Reads and decodes the record once. Missing, unreadable or malformed
    /// records all come back as `None`.
    pub async fn snapshot(&self) -> Option<CachedPrice> {
        if !self.storage.exists(&self.file_name).await {
            return None;
        }

        let bytes = match self.storage.read_file(&self.file_name).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("❌ Failed to read cache: {}", e);
                return None;
            }
        };

        match serde_json::from_slice::<CachedPrice>(&bytes) {
            Ok(record) if record.is_well_formed() => Some(record),
            Ok(record) => {
                tracing::error!(
                    "❌ Ignoring cache record (version {}, price {})",
                    record.version,
                    record.price
                );
                None
            }
            Err(e) => {
                tracing::error!("❌ Failed to decode cache: {}", e);
                None
            }
        }
    }
}
