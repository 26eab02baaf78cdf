//! Job record types produced by the crawl engine.
//!
//! `JobSummary` comes out of listing pages, `JobDetail` out of individual
//! posting pages. Bulk crawls wrap per-job results in `BulkJobOutcome` so
//! one bad posting never hides the others.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One job as it appears on a listing page
///
/// Listing markup only carries the card-level fields; the description and
/// classification fields hold placeholder defaults until a detail crawl
/// fills them in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    /// Numeric posting id, recovered from the job URL
    pub id: String,
    pub title: String,
    pub company_name: String,
    /// Company profile URL; empty when the card has no company link
    pub company_url: String,
    /// Company slug from the profile URL; empty when unknown
    pub company_id: String,
    pub location: String,
    pub job_url: String,
    /// Machine-readable posting date from the card's `datetime` attribute
    pub published_at: String,
    /// Human-readable posting age ("3 days ago")
    pub posted_time: String,
    pub salary: String,
    pub applications_count: String,
    pub description: String,
    pub description_html: String,
    pub contract_type: String,
    pub experience_level: String,
    pub work_type: String,
    pub sector: String,
    pub apply_url: String,
    pub apply_type: String,
    pub benefits: String,
}

/// Full detail for one posting, from either extraction profile
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    pub description: String,
    pub description_html: String,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub employment_type: String,
    pub seniority_level: String,
    pub industries: Vec<String>,
    pub applicant_count: String,
    pub company_size: String,
    pub job_function: String,
    /// Off-site posting URL, when the posting lives elsewhere
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    /// Resolved application URL, when one was discovered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_url: Option<String>,
    pub is_external_posting: bool,
    pub crawled_at: DateTime<Utc>,
}

/// Result of crawling one job within a bulk request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkJobOutcome {
    pub job_id: String,
    pub job_url: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<JobDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BulkJobOutcome {
    /// Builds the outcome for a job whose detail crawl succeeded
    pub fn succeeded(job_id: &str, job_url: &str, detail: JobDetail) -> Self {
        BulkJobOutcome {
            job_id: job_id.to_string(),
            job_url: job_url.to_string(),
            success: true,
            detail: Some(detail),
            error: None,
        }
    }

    /// Builds the outcome for a job whose detail crawl failed
    pub fn failed(job_id: &str, job_url: &str, error: String) -> Self {
        BulkJobOutcome {
            job_id: job_id.to_string(),
            job_url: job_url.to_string(),
            success: false,
            detail: None,
            error: Some(error),
        }
    }
}

/// Aggregate result of a bulk crawl, outcomes in request order
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCrawlReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub outcomes: Vec<BulkJobOutcome>,
}

impl BulkCrawlReport {
    /// Wraps per-job outcomes and tallies the counts
    pub fn from_outcomes(outcomes: Vec<BulkJobOutcome>) -> Self {
        let total = outcomes.len();
        let succeeded = outcomes.iter().filter(|o| o.success).count();
        BulkCrawlReport {
            total,
            succeeded,
            failed: total - succeeded,
            outcomes,
        }
    }
}
