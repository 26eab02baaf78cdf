//! HTTP client construction and request identity
//!
//! The guest endpoints serve browsers, not crawlers, so requests are shaped
//! accordingly: a rotating pool of real browser user agents, and the header
//! sets a browser would send for XHR listing calls and top-level page loads.

use rand::Rng;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, ORIGIN, PRAGMA,
    REFERER,
};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Browser user agents rotated across requests
const USER_AGENTS: [&str; 6] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36 Edg/119.0.0.0",
];

/// The pair of HTTP clients the engine works with
///
/// Redirects are followed for page fetches and apply-link probes; the bare
/// client exists so a redirect response itself can be inspected when the
/// probe fails partway.
pub struct HttpClients {
    /// Follows up to five redirects
    pub redirecting: Client,

    /// Never follows redirects
    pub bare: Client,
}

/// Builds the engine's HTTP clients
///
/// Per-request timeouts are set at call sites, so the clients themselves
/// only carry a connect timeout.
///
/// # Returns
///
/// * `Ok(HttpClients)` - Successfully built clients
/// * `Err(reqwest::Error)` - Failed to build a client
pub fn build_http_clients() -> Result<HttpClients, reqwest::Error> {
    let redirecting = Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(5))
        .gzip(true)
        .brotli(true)
        .build()?;

    let bare = Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(HttpClients { redirecting, bare })
}

/// Picks a user agent from the pool at random
pub fn random_user_agent() -> &'static str {
    let index = rand::thread_rng().gen_range(0..USER_AGENTS.len());
    USER_AGENTS[index]
}

/// Headers for listing-endpoint requests, shaped like the site's own XHR calls
pub fn listing_headers(base: &Url) -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    if let Ok(referer) = base.join("/jobs/search") {
        insert_str(&mut headers, REFERER, referer.as_str());
    }
    insert_str(&mut headers, ORIGIN, &base.origin().ascii_serialization());
    headers.insert(
        HeaderName::from_static("x-requested-with"),
        HeaderValue::from_static("XMLHttpRequest"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("empty"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("cors"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("same-origin"),
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(HeaderName::from_static("dnt"), HeaderValue::from_static("1"));
    headers.insert(
        HeaderName::from_static("upgrade-insecure-requests"),
        HeaderValue::from_static("1"),
    );

    headers
}

/// Headers for posting-page requests, shaped like a top-level navigation
pub fn detail_headers(base: &Url) -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    if let Ok(referer) = base.join("/jobs/") {
        insert_str(&mut headers, REFERER, referer.as_str());
    }
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("document"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("navigate"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("none"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-user"),
        HeaderValue::from_static("?1"),
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers.insert(
        HeaderName::from_static("upgrade-insecure-requests"),
        HeaderValue::from_static("1"),
    );

    headers
}

/// Inserts a header whose value is built at runtime, dropping it if invalid
fn insert_str(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_clients() {
        let clients = build_http_clients();
        assert!(clients.is_ok());
    }

    #[test]
    fn test_random_user_agent_comes_from_pool() {
        for _ in 0..20 {
            let agent = random_user_agent();
            assert!(USER_AGENTS.contains(&agent));
            assert!(agent.starts_with("Mozilla/5.0"));
        }
    }

    #[test]
    fn test_listing_headers_follow_base() {
        let base = Url::parse("http://127.0.0.1:9999").unwrap();
        let headers = listing_headers(&base);

        assert_eq!(
            headers.get(REFERER).unwrap(),
            "http://127.0.0.1:9999/jobs/search"
        );
        assert_eq!(headers.get(ORIGIN).unwrap(), "http://127.0.0.1:9999");
        assert_eq!(headers.get("x-requested-with").unwrap(), "XMLHttpRequest");
        assert_eq!(headers.get("sec-fetch-mode").unwrap(), "cors");
    }

    #[test]
    fn test_detail_headers_look_like_navigation() {
        let base = Url::parse("https://www.linkedin.com").unwrap();
        let headers = detail_headers(&base);

        assert_eq!(
            headers.get(REFERER).unwrap(),
            "https://www.linkedin.com/jobs/"
        );
        assert_eq!(headers.get("sec-fetch-dest").unwrap(), "document");
        assert_eq!(headers.get("sec-fetch-mode").unwrap(), "navigate");
        assert!(headers.get(ACCEPT).unwrap().to_str().unwrap().starts_with("text/html"));
    }
}
