//! Configuration module for Jobsift
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every table and field is optional; anything missing falls back to built-in
//! defaults, so running without a config file is fully supported.
//!
//! # Example
//!
//! ```no_run
//! use jobsift::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawling {} with a {}ms budget",
//!     config.source.base_url, config.crawler.search_budget_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CacheConfig, Config, CrawlerConfig, SourceConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
