use crate::adapters::{HttpFetcher, LocalStorage};
use crate::config::ServiceConfig;
use crate::core::{
    PageFetcher, PriceBand, PriceExtractor, PriceResolver, PriceStore, ScrapeOrchestrator, Storage,
};
use crate::utils::error::Result;
use std::sync::Arc;

pub const ENGINE_NAME: &str = "GoldPrime Live Engine";

pub struct AppState<S: Storage, F: PageFetcher> {
    pub resolver: PriceResolver<S, F>,
}

impl<S, F> AppState<S, F>
where
    S: Storage + 'static,
    F: PageFetcher + 'static,
{
    pub fn new(resolver: PriceResolver<S, F>) -> Self {
        Self { resolver }
    }

    pub fn store(&self) -> &PriceStore<S> {
        self.resolver.store()
    }
}

pub type LiveState = AppState<LocalStorage, HttpFetcher>;

/// Wires store, fetcher, extractor, orchestrator and resolver from config.
pub fn build_state(config: &ServiceConfig) -> Result<Arc<LiveState>> {
    let fetcher = HttpFetcher::new(config.request_timeout(), config.scraper.user_agents.clone())?;
    build_state_with(config, fetcher)
}

pub fn build_state_with<F: PageFetcher + 'static>(
    config: &ServiceConfig,
    fetcher: F,
) -> Result<Arc<AppState<LocalStorage, F>>> {
    let (cache_dir, cache_file) = config.cache_location();
    let store = Arc::new(PriceStore::new(
        LocalStorage::new(cache_dir),
        cache_file,
        config.freshness_window(),
    ));

    let extractor = PriceExtractor::new(PriceBand::new(
        config.pricing.min_valid_price,
        config.pricing.max_valid_price,
    ));
    let orchestrator = Arc::new(ScrapeOrchestrator::new(
        fetcher,
        extractor,
        store.clone(),
        config.scraper.sources.clone(),
    ));

    let resolver = PriceResolver::new(store, orchestrator, config.pricing.failsafe_anchor_price);
    Ok(Arc::new(AppState::new(resolver)))
}
