pub mod cli;
pub mod toml_config;

pub use cli::CliArgs;
pub use toml_config::{
    CacheConfig, LoggingConfig, PricingConfig, ScraperConfig, ServerConfig, ServiceConfig,
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}
