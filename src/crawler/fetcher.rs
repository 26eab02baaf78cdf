//! Single-page fetching and response classification
//!
//! This module turns raw HTTP outcomes into the crawl error taxonomy:
//! - 429 and 403 are hard blocks; the site has cut us off
//! - a successful response whose body carries the challenge marker is a
//!   soft block; the markup is an interstitial, not results
//! - other non-success statuses, timeouts, and connection failures are
//!   transient and worth retrying

use crate::crawler::client::random_user_agent;
use crate::{CrawlError, CrawlResult};
use reqwest::header::{HeaderMap, USER_AGENT};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Marker string that identifies a challenge interstitial
pub const BLOCK_MARKER: &str = "captcha";

/// Fetches one page and classifies the outcome
///
/// A fresh user agent is drawn from the pool for every request.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `headers` - Request headers for this endpoint family
/// * `timeout` - Per-request timeout
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(CrawlError)` - The classified failure
pub async fn fetch_page(
    client: &Client,
    url: &Url,
    headers: HeaderMap,
    timeout: Duration,
) -> CrawlResult<String> {
    let response = client
        .get(url.clone())
        .headers(headers)
        .header(USER_AGENT, random_user_agent())
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| classify_request_error(e, url))?;

    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::FORBIDDEN {
        return Err(CrawlError::Blocked {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    if !status.is_success() {
        return Err(CrawlError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| classify_request_error(e, url))?;

    if body.contains(BLOCK_MARKER) {
        return Err(CrawlError::SoftBlock {
            url: url.to_string(),
        });
    }

    Ok(body)
}

/// Maps a transport-level failure onto the error taxonomy
fn classify_request_error(error: reqwest::Error, url: &Url) -> CrawlError {
    if error.is_timeout() {
        CrawlError::Timeout {
            url: url.to_string(),
        }
    } else {
        CrawlError::Network {
            url: url.to_string(),
            source: error,
        }
    }
}
