use crate::config::LogFormat;
use crate::utils::error::{PriceError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SOURCES: &[&str] = &[
    "https://www.policybazaar.com/gold-rate/",
    "https://www.goodreturns.in/gold-rates/",
    "https://www.tanishq.co.in/gold-rate.html?lang=en_IN",
];

pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0.3 Safari/605.1.15",
    "Mozilla/5.0 (Linux; Android 10; SM-G981B) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/80.0.3987.162 Mobile Safari/537.36",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub cache: CacheConfig,
    pub scraper: ScraperConfig,
    pub pricing: PricingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub cors_allow_origins: Vec<String>,
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5000".to_string(),
            cors_allow_origins: vec!["*".to_string()],
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub path: String,
    pub freshness_window_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: "gold_cache.json".to_string(),
            freshness_window_seconds: 3600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub timeout_seconds: u64,
    pub sources: Vec<String>,
    pub user_agents: Vec<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 5,
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Plausible retail band for 10 g of 24K gold, in whole rupees.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub min_valid_price: u64,
    pub max_valid_price: u64,
    pub failsafe_anchor_price: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            min_valid_price: 140_000,
            max_valid_price: 180_000,
            failsafe_anchor_price: 156_000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub file: Option<String>,
}

impl ServiceConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PriceError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Loads the file when present, otherwise the built-in defaults.
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PriceError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GOLD_CACHE_PATH})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        result.to_string()
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.server
            .listen_addr
            .parse()
            .map_err(|e| PriceError::InvalidConfigValueError {
                field: "server.listen_addr".to_string(),
                value: self.server.listen_addr.clone(),
                reason: format!("{}", e),
            })
    }

    pub fn freshness_window(&self) -> Duration {
        Duration::from_secs(self.cache.freshness_window_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.scraper.timeout_seconds)
    }

    /// Splits `cache.path` into the storage root and the record's file name.
    pub fn cache_location(&self) -> (PathBuf, String) {
        let path = Path::new(&self.cache.path);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "gold_cache.json".to_string());
        (dir, file_name)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        self.listen_addr()?;
        for origin in &self.server.cors_allow_origins {
            if origin != "*" {
                validation::validate_url("server.cors_allow_origins", origin)?;
            }
        }

        validation::validate_path("cache.path", &self.cache.path)?;
        validation::validate_positive_number(
            "cache.freshness_window_seconds",
            self.cache.freshness_window_seconds,
            1,
        )?;

        validation::validate_range(
            "scraper.timeout_seconds",
            self.scraper.timeout_seconds,
            1,
            120,
        )?;
        validation::validate_non_empty_list("scraper.sources", &self.scraper.sources)?;
        validation::validate_unique("scraper.sources", &self.scraper.sources)?;
        for source in &self.scraper.sources {
            validation::validate_url("scraper.sources", source)?;
        }
        validation::validate_non_empty_list("scraper.user_agents", &self.scraper.user_agents)?;
        for agent in &self.scraper.user_agents {
            validation::validate_non_empty_string("scraper.user_agents", agent)?;
        }

        let pricing = &self.pricing;
        // 報價會再加上地區差與圖表波動，上限避免整數溢位
        validation::validate_range(
            "pricing.failsafe_anchor_price",
            pricing.failsafe_anchor_price,
            1,
            pricing.max_valid_price.saturating_mul(10),
        )?;
        // 上下限為開區間，至少要容得下一個整數
        if pricing.min_valid_price.saturating_add(1) >= pricing.max_valid_price {
            return Err(PriceError::InvalidConfigValueError {
                field: "pricing.max_valid_price".to_string(),
                value: pricing.max_valid_price.to_string(),
                reason: format!(
                    "Must exceed pricing.min_valid_price ({}) by at least 2",
                    pricing.min_valid_price
                ),
            });
        }

        if let Some(file) = &self.logging.file {
            validation::validate_path("logging.file", file)?;
        }

        Ok(())
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
