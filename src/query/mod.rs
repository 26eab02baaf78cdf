//! Search query construction and endpoint URL translation.
//!
//! This module turns a caller's search intent into the guest search
//! endpoint's URL format:
//!
//! - Filter words map to endpoint codes through fixed tables
//! - Parameters appear in a fixed order, so URL building is deterministic
//! - Unrecognized or empty filter values are omitted entirely

mod params;

use url::Url;

/// Listings returned per page by the guest search endpoint
pub const PAGE_SIZE: u32 = 25;

/// Path of the guest search endpoint, relative to the site base
const SEARCH_ENDPOINT: &str = "/jobs-guest/jobs/api/seeMoreJobPostings/search";

/// A structured job search
///
/// All filters are optional. Filter words are translated case-insensitively;
/// anything the endpoint has no code for is silently dropped from the URL.
///
/// # Example
///
/// ```
/// use jobsift::query::SearchQuery;
///
/// let query = SearchQuery::new("rust engineer")
///     .with_location("Berlin")
///     .with_date_since_posted("past week")
///     .with_limit(50);
///
/// assert_eq!(query.keyword(), "rust engineer");
/// assert_eq!(query.limit(), 50);
/// ```
#[derive(Debug, Clone)]
pub struct SearchQuery {
    keyword: String,
    location: String,
    date_since_posted: String,
    job_type: String,
    remote_filter: String,
    salary: String,
    experience_level: String,
    sort_by: String,
    page: u32,
    limit: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        SearchQuery {
            keyword: String::new(),
            location: String::new(),
            date_since_posted: String::new(),
            job_type: String::new(),
            remote_filter: String::new(),
            salary: String::new(),
            experience_level: String::new(),
            sort_by: String::new(),
            page: 0,
            limit: 25,
        }
    }
}

impl SearchQuery {
    /// Creates a query for a keyword, with no filters, page 0, limit 25
    ///
    /// Runs of whitespace in the keyword collapse to single spaces. An
    /// empty keyword is allowed and searches everything.
    pub fn new(keyword: &str) -> Self {
        SearchQuery {
            keyword: normalize_phrase(keyword),
            ..Self::default()
        }
    }

    /// Sets the location filter; runs of whitespace collapse to single spaces
    pub fn with_location(mut self, location: &str) -> Self {
        self.location = normalize_phrase(location);
        self
    }

    /// Sets the posting-age filter ("past month", "past week", "24hr")
    pub fn with_date_since_posted(mut self, value: &str) -> Self {
        self.date_since_posted = value.to_string();
        self
    }

    /// Sets the job-type filter ("full time", "contract", ...)
    pub fn with_job_type(mut self, value: &str) -> Self {
        self.job_type = value.to_string();
        self
    }

    /// Sets the work-arrangement filter ("on-site", "remote", "hybrid")
    pub fn with_remote_filter(mut self, value: &str) -> Self {
        self.remote_filter = value.to_string();
        self
    }

    /// Sets the minimum-salary filter ("40000" through "120000")
    pub fn with_salary(mut self, value: &str) -> Self {
        self.salary = value.to_string();
        self
    }

    /// Sets the experience-level filter ("internship" through "executive")
    pub fn with_experience_level(mut self, value: &str) -> Self {
        self.experience_level = value.to_string();
        self
    }

    /// Sets the result ordering ("recent" or "relevant")
    pub fn with_sort_by(mut self, value: &str) -> Self {
        self.sort_by = value.to_string();
        self
    }

    /// Sets the page offset; page N skips the first N * 25 results
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the maximum number of results to return, clamped to 1..=100
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.clamp(1, 100);
        self
    }

    /// The search keyword, possibly empty
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// The location filter, possibly empty
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Maximum number of results this search will return
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Page offset applied on top of the crawl position
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Builds the endpoint URL for one page of this search
    ///
    /// # Arguments
    ///
    /// * `base` - Base URL of the job site
    /// * `start` - Crawl position within the result stream (0, 25, 50, ...)
    ///
    /// # Returns
    ///
    /// The fully encoded search URL. Parameters appear in a fixed order and
    /// the `start` parameter is offset by the query's page.
    pub fn build_url(&self, base: &Url, start: u32) -> Result<Url, url::ParseError> {
        let mut url = base.join(SEARCH_ENDPOINT)?;

        {
            let mut pairs = url.query_pairs_mut();

            if !self.keyword.is_empty() {
                pairs.append_pair("keywords", &self.keyword);
            }
            if !self.location.is_empty() {
                pairs.append_pair("location", &self.location);
            }
            if let Some(code) = params::date_since_posted(&self.date_since_posted) {
                pairs.append_pair("f_TPR", code);
            }
            if let Some(code) = params::salary_floor(&self.salary) {
                pairs.append_pair("f_SB2", code);
            }
            if let Some(code) = params::experience_level(&self.experience_level) {
                pairs.append_pair("f_E", code);
            }
            if let Some(code) = params::remote_filter(&self.remote_filter) {
                pairs.append_pair("f_WT", code);
            }
            if let Some(code) = params::job_type(&self.job_type) {
                pairs.append_pair("f_JT", code);
            }
            let offset = u64::from(start) + u64::from(self.page) * u64::from(PAGE_SIZE);
            pairs.append_pair("start", &offset.to_string());
            if let Some(code) = params::sort_by(&self.sort_by) {
                pairs.append_pair("sortBy", code);
            }
        }

        Ok(url)
    }

    /// Stable identity of this search for result caching
    ///
    /// The crawl position is pinned to zero, so every page fetched for one
    /// search shares a single key. Distinct filters (including the page
    /// offset) produce distinct keys.
    pub fn cache_key(&self, base: &Url) -> Result<String, url::ParseError> {
        Ok(self.build_url(base, 0)?.into())
    }
}

/// Trims a phrase and collapses internal whitespace runs to single spaces
fn normalize_phrase(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
