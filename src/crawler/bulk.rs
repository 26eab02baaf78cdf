//! Bulk detail crawling
//!
//! Requests are validated up front, then worked through in fixed-size
//! chunks with a pause between chunks. A failed job turns into a failed
//! outcome without touching its neighbors.

use crate::crawler::engine::SearchEngine;
use crate::jobs::BulkJobOutcome;
use crate::{CrawlError, CrawlResult};
use std::time::Duration;
use tracing::{debug, warn};

/// Most jobs accepted in a single bulk request
pub const MAX_BULK_JOBS: usize = 10;

/// Jobs crawled concurrently within a chunk
pub const CHUNK_SIZE: usize = 3;

/// Rejects empty and oversized bulk requests
pub fn validate_bulk_request(jobs: &[(String, String)]) -> CrawlResult<()> {
    if jobs.is_empty() {
        return Err(CrawlError::Validation(
            "Bulk request must name at least one job".to_string(),
        ));
    }

    if jobs.len() > MAX_BULK_JOBS {
        return Err(CrawlError::Validation(format!(
            "Bulk request holds {} jobs, maximum is {}",
            jobs.len(),
            MAX_BULK_JOBS
        )));
    }

    Ok(())
}

/// Crawls every `(job_id, job_url)` pair in chunks of [`CHUNK_SIZE`]
///
/// Outcomes come back in request order. The delay runs between chunks,
/// not after the last one.
pub(crate) async fn crawl_in_chunks(
    engine: &SearchEngine,
    jobs: &[(String, String)],
    chunk_delay: Duration,
) -> Vec<BulkJobOutcome> {
    let mut outcomes = Vec::with_capacity(jobs.len());
    let chunk_count = (jobs.len() + CHUNK_SIZE - 1) / CHUNK_SIZE;

    for (index, chunk) in jobs.chunks(CHUNK_SIZE).enumerate() {
        debug!(
            "Crawling chunk {}/{} ({} jobs)",
            index + 1,
            chunk_count,
            chunk.len()
        );

        let fetches = chunk
            .iter()
            .map(|(job_id, job_url)| engine.fetch_job_detail(job_id, job_url));
        let results = futures::future::join_all(fetches).await;

        for ((job_id, job_url), result) in chunk.iter().zip(results) {
            match result {
                Ok(detail) => {
                    outcomes.push(BulkJobOutcome::succeeded(job_id, job_url, detail));
                }
                Err(e) => {
                    warn!("Bulk crawl of job {} failed: {}", job_id, e);
                    outcomes.push(BulkJobOutcome::failed(job_id, job_url, e.to_string()));
                }
            }
        }

        if index + 1 < chunk_count {
            tokio::time::sleep(chunk_delay).await;
        }
    }

    outcomes
}
