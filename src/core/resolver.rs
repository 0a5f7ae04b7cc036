use crate::core::orchestrator::ScrapeOrchestrator;
use crate::core::store::PriceStore;
use crate::domain::ports::{PageFetcher, Storage};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceOrigin {
    Cache,
    Anchor,
}

/// Result of one resolution. `refresh` is the background task dispatched by
/// this call, if any; request handlers drop it, tests may await it.
#[derive(Debug)]
pub struct Resolution {
    pub price: u64,
    pub origin: PriceOrigin,
    pub stale: bool,
    pub refresh: Option<JoinHandle<()>>,
}

/// Clears the in-flight flag when the refresh task ends, however it ends.
struct RefreshGuard(Arc<AtomicBool>);

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Request-time price decision.
///
/// Always answers from what is on disk (or the fail-safe anchor) and never
/// waits on upstream; a stale or missing record kicks off at most one
/// background scrape whose result serves later requests.
pub struct PriceResolver<S: Storage, F: PageFetcher> {
    store: Arc<PriceStore<S>>,
    orchestrator: Arc<ScrapeOrchestrator<S, F>>,
    failsafe_anchor: u64,
    refresh_in_flight: Arc<AtomicBool>,
}

impl<S, F> PriceResolver<S, F>
where
    S: Storage + 'static,
    F: PageFetcher + 'static,
{
    pub fn new(
        store: Arc<PriceStore<S>>,
        orchestrator: Arc<ScrapeOrchestrator<S, F>>,
        failsafe_anchor: u64,
    ) -> Self {
        Self {
            store,
            orchestrator,
            failsafe_anchor,
            refresh_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn store(&self) -> &Arc<PriceStore<S>> {
        &self.store
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh_in_flight.load(Ordering::Acquire)
    }

    pub async fn resolve(&self) -> u64 {
        self.resolve_detailed().await.price
    }

    pub async fn resolve_detailed(&self) -> Resolution {
        // 單次讀取，同時得到價格與是否過期
        let record = self.store.snapshot().await;
        let stale = record
            .as_ref()
            .map_or(true, |r| r.is_stale_at(Utc::now(), self.store.freshness_window()));

        let refresh = if stale {
            tracing::info!("⏳ Cache stale. Triggering background update...");
            self.dispatch_refresh()
        } else {
            None
        };

        match record {
            Some(record) => Resolution {
                price: record.price,
                origin: PriceOrigin::Cache,
                stale,
                refresh,
            },
            None => {
                tracing::warn!(
                    "⚠️ No cached price, serving fail-safe anchor {}",
                    self.failsafe_anchor
                );
                Resolution {
                    price: self.failsafe_anchor,
                    origin: PriceOrigin::Anchor,
                    stale,
                    refresh,
                }
            }
        }
    }

    fn dispatch_refresh(&self) -> Option<JoinHandle<()>> {
        if self
            .refresh_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Refresh already in flight, not dispatching another");
            return None;
        }

        let guard = RefreshGuard(self.refresh_in_flight.clone());
        let orchestrator = self.orchestrator.clone();
        Some(tokio::spawn(async move {
            let _guard = guard;
            let outcome = orchestrator.refresh_and_persist().await;
            tracing::debug!("Background refresh finished: {:?}", outcome);
        }))
    }
}
