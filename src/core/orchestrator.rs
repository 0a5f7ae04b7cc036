use crate::core::extractor::PriceExtractor;
use crate::core::store::PriceStore;
use crate::domain::ports::{PageFetcher, Storage};
use std::sync::Arc;

/// How a single source attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceAttempt {
    TransportFailure,
    Miss,
    Rejected(u64),
    Accepted(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeOutcome {
    Persisted { source: String, price: u64 },
    /// A valid price was found but the store refused it; nothing changed on disk.
    Unsaved { source: String, price: u64 },
    Exhausted,
}

/// Walks the ordered source list until one page yields a price inside the
/// plausible band, then persists it.
pub struct ScrapeOrchestrator<S: Storage, F: PageFetcher> {
    fetcher: F,
    extractor: PriceExtractor,
    store: Arc<PriceStore<S>>,
    sources: Vec<String>,
}

impl<S: Storage, F: PageFetcher> ScrapeOrchestrator<S, F> {
    pub fn new(
        fetcher: F,
        extractor: PriceExtractor,
        store: Arc<PriceStore<S>>,
        sources: Vec<String>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            store,
            sources,
        }
    }

    #[cfg(test)]
    pub(crate) fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub async fn refresh_and_persist(&self) -> ScrapeOutcome {
        for url in &self.sources {
            tracing::info!("🔍 Attempting to scrape: {}", url);

            if let SourceAttempt::Accepted(price) = self.try_source(url).await {
                let source = url.clone();
                if self.store.save(price).await {
                    tracing::info!("✅ Price {} accepted from {}", price, url);
                    return ScrapeOutcome::Persisted { source, price };
                }
                tracing::warn!("⚠️ Price {} from {} could not be persisted", price, url);
                return ScrapeOutcome::Unsaved { source, price };
            }
        }

        tracing::warn!(
            "⚠️ All {} sources exhausted without a valid price",
            self.sources.len()
        );
        ScrapeOutcome::Exhausted
    }

    async fn try_source(&self, url: &str) -> SourceAttempt {
        let markup = match self.fetcher.fetch(url).await {
            Ok(markup) => markup,
            Err(e) => {
                tracing::error!("❌ Error scraping {}: {}", url, e);
                return SourceAttempt::TransportFailure;
            }
        };

        let Some(price) = self.extractor.extract(&markup) else {
            tracing::debug!("No price table found at {}", url);
            return SourceAttempt::Miss;
        };

        if self.extractor.validate(price) {
            SourceAttempt::Accepted(price)
        } else {
            SourceAttempt::Rejected(price)
        }
    }
}
