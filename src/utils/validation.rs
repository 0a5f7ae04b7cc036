use crate::utils::error::{PriceError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PriceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PriceError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PriceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PriceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PriceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(PriceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_list<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(PriceError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PriceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Rejects a list that names the same entry twice; sources are tried in order
/// so a duplicate would only waste a request.
pub fn validate_unique(field_name: &str, values: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value.as_str()) {
            return Err(PriceError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: "Duplicate entry".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(PriceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("scraper.sources", "https://example.com").is_ok());
        assert!(validate_url("scraper.sources", "http://example.com").is_ok());
        assert!(validate_url("scraper.sources", "").is_err());
        assert!(validate_url("scraper.sources", "invalid-url").is_err());
        assert!(validate_url("scraper.sources", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("scraper.timeout_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("scraper.timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_unique() {
        let sources = vec!["https://a.test".to_string(), "https://b.test".to_string()];
        assert!(validate_unique("scraper.sources", &sources).is_ok());

        let duplicated = vec!["https://a.test".to_string(), "https://a.test".to_string()];
        assert!(validate_unique("scraper.sources", &duplicated).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("pricing.failsafe_anchor_price", 150_000, 1, 200_000).is_ok());
        assert!(validate_range("pricing.failsafe_anchor_price", 0, 1, 200_000).is_err());
    }

    #[test]
    fn test_validate_non_empty() {
        let empty: Vec<String> = vec![];
        assert!(validate_non_empty_list("scraper.user_agents", &empty).is_err());
        assert!(validate_non_empty_string("scraper.user_agents", "   ").is_err());
        assert!(validate_path("cache.path", "gold_cache.json").is_ok());
        assert!(validate_path("cache.path", "").is_err());
    }
}
