use serde::Deserialize;

/// Main configuration structure for Jobsift
///
/// Every table is optional; missing tables and fields fall back to the
/// built-in defaults, so `Config::default()` is a complete configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub crawler: CrawlerConfig,
    pub cache: CacheConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: SourceConfig::default(),
            crawler: CrawlerConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

/// Job source configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the job site's guest endpoints
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            base_url: "https://www.linkedin.com".to_string(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Wall-clock budget for one whole search crawl (milliseconds)
    #[serde(rename = "search-budget-ms")]
    pub search_budget_ms: u64,

    /// Per-request timeout for listing page fetches (milliseconds)
    #[serde(rename = "listing-timeout-ms")]
    pub listing_timeout_ms: u64,

    /// Per-request timeout for detail page fetches (milliseconds)
    #[serde(rename = "detail-timeout-ms")]
    pub detail_timeout_ms: u64,

    /// Fixed pause between successive listing pages (milliseconds)
    #[serde(rename = "page-delay-ms")]
    pub page_delay_ms: u64,

    /// Random extra pause added on top of the fixed one (milliseconds)
    #[serde(rename = "page-jitter-ms")]
    pub page_jitter_ms: u64,

    /// Base unit for the exponential pause after a failed page (milliseconds)
    #[serde(rename = "retry-backoff-ms")]
    pub retry_backoff_ms: u64,

    /// Pause between bulk crawl chunks (milliseconds)
    #[serde(rename = "chunk-delay-ms")]
    pub chunk_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        CrawlerConfig {
            search_budget_ms: 8000,
            listing_timeout_ms: 5000,
            detail_timeout_ms: 10000,
            page_delay_ms: 1000,
            page_jitter_ms: 500,
            retry_backoff_ms: 1000,
            chunk_delay_ms: 2000,
        }
    }
}

/// Search result cache configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a cached search result stays fresh (hours)
    #[serde(rename = "ttl-hours")]
    pub ttl_hours: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig { ttl_hours: 24 }
    }
}
