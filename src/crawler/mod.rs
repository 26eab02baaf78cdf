//! Crawler module for job-site fetching and extraction
//!
//! This module contains the crawl machinery, including:
//! - HTTP client construction and browser-shaped request identity
//! - Single-page fetching with block classification
//! - Listing-card and posting-detail extraction
//! - Search, detail, and bulk crawl orchestration

mod bulk;
mod client;
mod detail;
mod engine;
mod fetcher;
mod listings;

pub use bulk::{validate_bulk_request, CHUNK_SIZE, MAX_BULK_JOBS};
pub use client::{build_http_clients, detail_headers, listing_headers, HttpClients};
pub use detail::{
    is_native_posting, parse_external_detail, parse_native_detail, same_site, NativeDetail,
};
pub use engine::SearchEngine;
pub use fetcher::{fetch_page, BLOCK_MARKER};
pub use listings::parse_job_list;
