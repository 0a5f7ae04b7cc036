pub mod charts;
pub mod extractor;
pub mod orchestrator;
pub mod regions;
pub mod resolver;
pub mod store;

pub use crate::domain::model::{CachedPrice, Charts, RegionPrice};
pub use crate::domain::ports::{PageFetcher, Storage};
pub use crate::utils::error::Result;
pub use extractor::{PriceBand, PriceExtractor};
pub use orchestrator::{ScrapeOrchestrator, ScrapeOutcome};
pub use resolver::{PriceOrigin, PriceResolver, Resolution};
pub use store::PriceStore;
