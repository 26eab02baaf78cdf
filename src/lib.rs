//! Jobsift: a job-listing acquisition engine
//!
//! This crate turns structured job searches into guest-endpoint crawls,
//! extracting listing summaries and full job details while honoring block
//! signals, retry backoff, and a bounded execution budget.

pub mod cache;
pub mod config;
pub mod crawler;
pub mod jobs;
pub mod query;

use thiserror::Error;

/// Main error type for Jobsift operations
#[derive(Debug, Error)]
pub enum JobsiftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Crawl error: {0}")]
    Crawl(#[from] CrawlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while fetching or interpreting remote pages
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Challenge page served for {url}")]
    SoftBlock { url: String },

    #[error("Access denied ({status}) for {url}")]
    Blocked { status: u16, url: String },

    #[error("Unexpected status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("URL parse error: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl CrawlError {
    /// Whether a retry of the same request could plausibly succeed.
    ///
    /// Block responses and malformed input never clear on their own;
    /// timeouts, connection failures, and transient statuses might.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CrawlError::Status { .. } | CrawlError::Timeout { .. } | CrawlError::Network { .. }
        )
    }
}

/// Result type alias for Jobsift operations
pub type Result<T> = std::result::Result<T, JobsiftError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for crawl operations
pub type CrawlResult<T> = std::result::Result<T, CrawlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::SearchEngine;
pub use jobs::{BulkCrawlReport, BulkJobOutcome, JobDetail, JobSummary};
pub use query::SearchQuery;
