use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Upstream {url} answered with status {status}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PriceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PriceError::HttpError(_) | PriceError::UpstreamStatus { .. } => ErrorCategory::Network,
            PriceError::IoError(_) => ErrorCategory::Storage,
            PriceError::SerializationError(_) => ErrorCategory::Data,
            PriceError::ConfigError { .. }
            | PriceError::InvalidConfigValueError { .. }
            | PriceError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    /// 上游失敗只影響單一來源，設定錯誤則無法啟動
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Low,
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PriceError::HttpError(_) => "Check network connectivity; the next source will be tried",
            PriceError::UpstreamStatus { .. } => {
                "The upstream page may be blocking requests or has moved"
            }
            PriceError::IoError(_) => "Check that the cache directory exists and is writable",
            PriceError::SerializationError(_) => {
                "Delete the cache file; it will be recreated on the next refresh"
            }
            PriceError::ConfigError { .. }
            | PriceError::InvalidConfigValueError { .. }
            | PriceError::MissingConfigError { .. } => {
                "Review the TOML configuration file and command line flags"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PriceError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            PriceError::MissingConfigError { field } => {
                format!("Setting '{}' is required", field)
            }
            PriceError::ConfigError { message } => format!("Configuration problem: {}", message),
            PriceError::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PriceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_critical() {
        let err = PriceError::MissingConfigError {
            field: "scraper.sources".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(
            err.user_friendly_message(),
            "Setting 'scraper.sources' is required"
        );
    }

    #[test]
    fn test_upstream_status_is_low_severity() {
        let err = PriceError::UpstreamStatus {
            url: "https://example.com".to_string(),
            status: 503,
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.to_string().contains("503"));
    }
}
