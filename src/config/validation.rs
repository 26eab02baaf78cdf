use crate::config::types::{CacheConfig, Config, CrawlerConfig, SourceConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_crawler_config(&config.crawler)?;
    validate_cache_config(&config.cache)?;
    Ok(())
}

/// Validates source configuration
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    // http is allowed so local test servers can stand in for the real site
    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::Validation(format!(
            "base_url must use http or https scheme, got '{}'",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url has no host: '{}'",
            config.base_url
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.search_budget_ms < 1 {
        return Err(ConfigError::Validation(format!(
            "search_budget_ms must be >= 1ms, got {}ms",
            config.search_budget_ms
        )));
    }

    if config.listing_timeout_ms < 1 {
        return Err(ConfigError::Validation(format!(
            "listing_timeout_ms must be >= 1ms, got {}ms",
            config.listing_timeout_ms
        )));
    }

    if config.detail_timeout_ms < 1 {
        return Err(ConfigError::Validation(format!(
            "detail_timeout_ms must be >= 1ms, got {}ms",
            config.detail_timeout_ms
        )));
    }

    // page_delay_ms, page_jitter_ms, retry_backoff_ms, and chunk_delay_ms
    // may be zero; tests rely on that to run without real pauses

    Ok(())
}

/// Validates cache configuration
fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.ttl_hours < 1 {
        return Err(ConfigError::Validation(format!(
            "ttl_hours must be >= 1, got {}",
            config.ttl_hours
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_source_config() {
        let mut source = SourceConfig::default();
        assert!(validate_source_config(&source).is_ok());

        source.base_url = "http://127.0.0.1:8080".to_string();
        assert!(validate_source_config(&source).is_ok());

        source.base_url = "ftp://example.com".to_string();
        assert!(validate_source_config(&source).is_err());

        source.base_url = "not a url".to_string();
        assert!(validate_source_config(&source).is_err());
    }

    #[test]
    fn test_validate_crawler_config() {
        let mut crawler = CrawlerConfig::default();
        assert!(validate_crawler_config(&crawler).is_ok());

        crawler.page_delay_ms = 0;
        crawler.page_jitter_ms = 0;
        crawler.retry_backoff_ms = 0;
        crawler.chunk_delay_ms = 0;
        assert!(validate_crawler_config(&crawler).is_ok());

        crawler.search_budget_ms = 0;
        assert!(validate_crawler_config(&crawler).is_err());
    }

    #[test]
    fn test_validate_cache_config() {
        let mut cache = CacheConfig::default();
        assert!(validate_cache_config(&cache).is_ok());

        cache.ttl_hours = 0;
        assert!(validate_cache_config(&cache).is_err());
    }
}
