//! Search and crawl orchestration
//!
//! [`SearchEngine`] owns the HTTP clients and the result cache and drives
//! the crawl loops built from the lower-level pieces:
//!
//! - paginated listing search with retry backoff and a wall-clock budget
//! - single-posting detail crawls with apply-link resolution
//! - chunked bulk crawls over several postings

use crate::cache::SearchCache;
use crate::config::Config;
use crate::crawler::client::{self, HttpClients};
use crate::crawler::{bulk, detail, fetcher, listings};
use crate::jobs::{BulkCrawlReport, JobDetail, JobSummary};
use crate::query::{SearchQuery, PAGE_SIZE};
use crate::{ConfigError, CrawlError, CrawlResult};
use rand::Rng;
use reqwest::header::{LOCATION, USER_AGENT};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// Retryable failures in a row before a search gives up
const MAX_CONSECUTIVE_ERRORS: u32 = 3;

/// Job search and detail crawl engine
///
/// All methods take `&self`; the engine is safe to share across tasks
/// behind an `Arc`.
pub struct SearchEngine {
    config: Config,
    base: Url,
    clients: HttpClients,
    cache: Mutex<SearchCache>,
}

impl SearchEngine {
    /// Creates an engine from a configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Engine configuration; `Config::default()` works
    ///
    /// # Returns
    ///
    /// * `Ok(SearchEngine)` - Ready-to-use engine
    /// * `Err(JobsiftError)` - The base URL is unusable or a client failed
    ///   to build
    pub fn new(config: Config) -> crate::Result<Self> {
        let base = Url::parse(&config.source.base_url).map_err(|e| {
            ConfigError::InvalidUrl(format!(
                "Invalid base-url '{}': {}",
                config.source.base_url, e
            ))
        })?;
        let clients = client::build_http_clients()?;
        let ttl = chrono::Duration::hours(config.cache.ttl_hours as i64);

        Ok(SearchEngine {
            base,
            clients,
            cache: Mutex::new(SearchCache::with_ttl(ttl)),
            config,
        })
    }

    /// Runs a job search, crawling listing pages until done
    ///
    /// The crawl walks the result stream page by page until the limit is
    /// reached, a page comes back empty, the time budget runs out, or
    /// retryable failures pile up. Whatever was collected by then is the
    /// result; only block signals abort with an error.
    ///
    /// Finished results are cached under the search's canonical URL and
    /// replayed for repeat searches until they expire.
    ///
    /// # Arguments
    ///
    /// * `query` - The search to run
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<JobSummary>)` - Collected records, at most `query.limit()`
    /// * `Err(JobsiftError)` - The site blocked the crawl or a URL was
    ///   unbuildable
    pub async fn search(&self, query: &SearchQuery) -> crate::Result<Vec<JobSummary>> {
        let key = query.cache_key(&self.base).map_err(CrawlError::from)?;

        if let Some(cached) = self.cache.lock().unwrap().get(&key) {
            info!("Returning {} cached jobs for this search", cached.len());
            return Ok(cached);
        }

        info!(
            "Starting search crawl (keyword '{}', limit {})",
            query.keyword(),
            query.limit()
        );

        let started = Instant::now();
        let budget = Duration::from_millis(self.config.crawler.search_budget_ms);
        let mut jobs: Vec<JobSummary> = Vec::new();
        let mut start: u32 = 0;
        let mut consecutive_errors: u32 = 0;

        loop {
            let page_url = query
                .build_url(&self.base, start)
                .map_err(CrawlError::from)?;
            debug!("Fetching listing page at start={}", start);

            match self.fetch_listing_page(&page_url).await {
                Ok(body) => {
                    let batch = listings::parse_job_list(&body);
                    if batch.is_empty() {
                        debug!("Empty page at start={}, result stream exhausted", start);
                        break;
                    }

                    jobs.extend(batch);

                    if jobs.len() >= query.limit() {
                        jobs.truncate(query.limit());
                        break;
                    }

                    consecutive_errors = 0;
                    start += PAGE_SIZE;

                    if started.elapsed() > budget {
                        info!("Search budget spent, stopping with {} jobs", jobs.len());
                        break;
                    }

                    let jitter = rand::thread_rng().gen_range(0..=self.config.crawler.page_jitter_ms);
                    tokio::time::sleep(Duration::from_millis(
                        self.config.crawler.page_delay_ms + jitter,
                    ))
                    .await;
                }
                Err(e) if e.is_retryable() => {
                    consecutive_errors += 1;
                    warn!(
                        "Listing fetch failed ({} in a row): {}",
                        consecutive_errors, e
                    );

                    if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                        warn!("Giving up after {} consecutive failures", consecutive_errors);
                        break;
                    }

                    let backoff =
                        self.config.crawler.retry_backoff_ms * 2u64.pow(consecutive_errors);
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                }
                Err(e) => return Err(e.into()),
            }
        }

        if !jobs.is_empty() {
            self.cache.lock().unwrap().set(&key, jobs.clone());
        }

        info!("Search crawl finished with {} jobs", jobs.len());
        Ok(jobs)
    }

    /// Crawls the full detail record for one posting
    ///
    /// Native postings go through the guest posting endpoint and get their
    /// apply link resolved; everything else is scraped directly from the
    /// posting page.
    ///
    /// # Arguments
    ///
    /// * `job_id` - Numeric posting id; may be empty if the URL carries one
    /// * `job_url` - Absolute URL of the posting
    pub async fn crawl_job_details(&self, job_id: &str, job_url: &str) -> crate::Result<JobDetail> {
        Ok(self.fetch_job_detail(job_id, job_url).await?)
    }

    /// Crawls detail records for several postings in chunks
    ///
    /// # Arguments
    ///
    /// * `jobs` - `(job_id, job_url)` pairs, at most [`bulk::MAX_BULK_JOBS`]
    ///
    /// # Returns
    ///
    /// * `Ok(BulkCrawlReport)` - Per-job outcomes in request order
    /// * `Err(JobsiftError)` - The request itself was empty or oversized
    pub async fn crawl_multiple_jobs(
        &self,
        jobs: &[(String, String)],
    ) -> crate::Result<BulkCrawlReport> {
        bulk::validate_bulk_request(jobs)?;

        info!("Starting bulk crawl of {} jobs", jobs.len());
        let chunk_delay = Duration::from_millis(self.config.crawler.chunk_delay_ms);
        let outcomes = bulk::crawl_in_chunks(self, jobs, chunk_delay).await;
        let report = BulkCrawlReport::from_outcomes(outcomes);

        info!(
            "Bulk crawl finished: {}/{} succeeded",
            report.succeeded, report.total
        );
        Ok(report)
    }

    /// Evicts expired search results, returning how many were dropped
    pub fn sweep_cache(&self) -> usize {
        let evicted = self.cache.lock().unwrap().sweep();
        if evicted > 0 {
            info!("Evicted {} stale cached searches", evicted);
        }
        evicted
    }

    /// Number of cached search results, fresh or not
    pub fn cache_size(&self) -> usize {
        self.cache.lock().unwrap().len()
    }

    /// Detail crawl with the crawl-level error type, for bulk outcomes
    pub(crate) async fn fetch_job_detail(
        &self,
        job_id: &str,
        job_url: &str,
    ) -> CrawlResult<JobDetail> {
        let url = Url::parse(job_url)?;
        let timeout = Duration::from_millis(self.config.crawler.detail_timeout_ms);
        let headers = client::detail_headers(&self.base);

        if detail::is_native_posting(&self.base, &url) {
            let posting_url = self.native_posting_url(job_id, &url)?;
            debug!("Crawling native posting via {}", posting_url);

            let body =
                fetcher::fetch_page(&self.clients.redirecting, &posting_url, headers, timeout)
                    .await?;
            let parsed = detail::parse_native_detail(&body);
            let mut job_detail = parsed.detail;

            if let Some(href) = parsed.apply_href {
                if let Some(resolved) = self.resolve_apply_redirect(&href).await {
                    info!("Posting applies off-site at {}", resolved);
                    job_detail.apply_url = Some(resolved);
                    job_detail.is_external_posting = true;
                }
            }

            Ok(job_detail)
        } else {
            debug!("Crawling external posting {}", url);

            let body =
                fetcher::fetch_page(&self.clients.redirecting, &url, headers, timeout).await?;
            Ok(detail::parse_external_detail(&body, url.as_str()))
        }
    }

    async fn fetch_listing_page(&self, url: &Url) -> CrawlResult<String> {
        fetcher::fetch_page(
            &self.clients.redirecting,
            url,
            client::listing_headers(&self.base),
            Duration::from_millis(self.config.crawler.listing_timeout_ms),
        )
        .await
    }

    /// Guest posting endpoint URL for a native job
    ///
    /// Prefers the caller-supplied id and falls back to the one embedded
    /// in the posting URL.
    fn native_posting_url(&self, job_id: &str, job_url: &Url) -> CrawlResult<Url> {
        let id = if job_id.is_empty() {
            listings::job_id_from_url(job_url.as_str()).ok_or_else(|| {
                CrawlError::Validation(format!("No job id recoverable from {}", job_url))
            })?
        } else {
            job_id.to_string()
        };

        Ok(self
            .base
            .join(&format!("/jobs-guest/jobs/api/jobPosting/{}", id))?)
    }

    /// Follows an apply link and reports where it lands, if off-site
    ///
    /// Returns None when the link stays on the job site, cannot be parsed,
    /// or its destination cannot be determined.
    async fn resolve_apply_redirect(&self, href: &str) -> Option<String> {
        let apply_url = match Url::parse(href) {
            Ok(url) => url,
            Err(e) => {
                debug!("Unusable apply link '{}': {}", href, e);
                return None;
            }
        };
        let timeout = Duration::from_millis(self.config.crawler.detail_timeout_ms);

        match self
            .clients
            .redirecting
            .get(apply_url.clone())
            .header(USER_AGENT, client::random_user_agent())
            .timeout(timeout)
            .send()
            .await
        {
            Ok(response) => {
                // Any status will do; only the final URL matters
                let final_url = response.url();
                if !detail::same_site(&self.base, final_url) {
                    Some(final_url.to_string())
                } else {
                    None
                }
            }
            Err(e) => {
                warn!("Apply-link probe failed, checking redirect header: {}", e);
                self.recover_redirect_target(&apply_url, timeout).await
            }
        }
    }

    /// Reads the Location header directly when the full probe fell over
    async fn recover_redirect_target(&self, apply_url: &Url, timeout: Duration) -> Option<String> {
        let response = self
            .clients
            .bare
            .get(apply_url.clone())
            .header(USER_AGENT, client::random_user_agent())
            .timeout(timeout)
            .send()
            .await
            .ok()?;

        let location = response.headers().get(LOCATION)?.to_str().ok()?;
        let target = apply_url.join(location).ok()?;

        if !detail::same_site(&self.base, &target) {
            Some(target.to_string())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_default_config() {
        let engine = SearchEngine::new(Config::default());
        assert!(engine.is_ok());
    }

    #[test]
    fn test_new_rejects_unparseable_base_url() {
        let mut config = Config::default();
        config.source.base_url = "not a url".to_string();

        assert!(SearchEngine::new(config).is_err());
    }

    #[test]
    fn test_fresh_engine_has_empty_cache() {
        let engine = SearchEngine::new(Config::default()).unwrap();

        assert_eq!(engine.cache_size(), 0);
        assert_eq!(engine.sweep_cache(), 0);
    }

    #[test]
    fn test_native_posting_url_prefers_given_id() {
        let engine = SearchEngine::new(Config::default()).unwrap();
        let job_url =
            Url::parse("https://www.linkedin.com/jobs/view/rust-engineer-4012345678").unwrap();

        let posting_url = engine.native_posting_url("9999", &job_url).unwrap();
        assert_eq!(
            posting_url.as_str(),
            "https://www.linkedin.com/jobs-guest/jobs/api/jobPosting/9999"
        );
    }

    #[test]
    fn test_native_posting_url_recovers_id_from_url() {
        let engine = SearchEngine::new(Config::default()).unwrap();
        let job_url =
            Url::parse("https://www.linkedin.com/jobs/view/rust-engineer-4012345678").unwrap();

        let posting_url = engine.native_posting_url("", &job_url).unwrap();
        assert_eq!(
            posting_url.as_str(),
            "https://www.linkedin.com/jobs-guest/jobs/api/jobPosting/4012345678"
        );
    }

    #[test]
    fn test_native_posting_url_requires_some_id() {
        let engine = SearchEngine::new(Config::default()).unwrap();
        let job_url = Url::parse("https://www.linkedin.com/jobs/view/no-digits-here").unwrap();

        assert!(matches!(
            engine.native_posting_url("", &job_url),
            Err(CrawlError::Validation(_))
        ));
    }

    // Search, detail, and bulk crawls run against live endpoints and are
    // exercised end to end by the wiremock integration tests.
}
