pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{HttpFetcher, LocalStorage};
pub use app::{app_router, build_state, AppState};
pub use config::{CliArgs, ServiceConfig};
pub use crate::core::{PriceExtractor, PriceResolver, PriceStore, ScrapeOrchestrator};
pub use utils::error::{PriceError, Result};
