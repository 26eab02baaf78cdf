//! Listing-page record extraction
//!
//! A listing page is a flat run of `li` job cards. Extraction is
//! best-effort per card: a card missing its title, company, or job link is
//! skipped, and one bad card never takes down the page.

use crate::jobs::JobSummary;
use scraper::{ElementRef, Html, Selector};

/// Extracts job records from a listing page body
///
/// # Arguments
///
/// * `html` - The listing page markup
///
/// # Returns
///
/// Every card that yielded a usable record, in page order. An empty vector
/// means the page carried no (parsable) results.
pub fn parse_job_list(html: &str) -> Vec<JobSummary> {
    let document = Html::parse_document(html);
    let mut jobs = Vec::new();

    let card_selector = match Selector::parse("li") {
        Ok(s) => s,
        Err(_) => return jobs,
    };

    for card in document.select(&card_selector) {
        match extract_job_card(card) {
            Some(job) => jobs.push(job),
            None => {
                tracing::debug!("Skipping listing card without title, company, or job link");
            }
        }
    }

    jobs
}

/// Builds one record from a job card element
///
/// Returns None when the card lacks a title, company name, or job URL.
fn extract_job_card(card: ElementRef) -> Option<JobSummary> {
    let title = select_text(card, ".base-search-card__title");
    let company_name = select_text(card, ".base-search-card__subtitle");
    let location = select_text(card, ".job-search-card__location");
    let company_url = select_attr(card, ".base-search-card__subtitle a", "href");
    let job_url = select_attr(card, ".base-card__full-link", "href");
    let posted_time = select_text(card, ".job-search-card__listdate");
    let salary = collapse_whitespace(&select_text(card, ".job-search-card__salary-info"));
    let published_at = select_attr(card, "time", "datetime");
    let applications_count = select_text(card, ".job-search-card__applicant-count");

    if title.is_empty() || company_name.is_empty() || job_url.is_empty() {
        return None;
    }

    let id = job_id_from_url(&job_url)
        .or_else(|| job_id_from_urn(card))
        .unwrap_or_default();
    let company_id = company_id_from_url(&company_url);

    Some(JobSummary {
        id,
        title,
        company_name,
        company_url,
        company_id,
        location,
        published_at,
        posted_time,
        salary,
        applications_count,
        // Detail-level fields are unknown at listing time
        description: String::new(),
        description_html: String::new(),
        contract_type: "Full-time".to_string(),
        experience_level: "Not specified".to_string(),
        work_type: "Not specified".to_string(),
        sector: "Not specified".to_string(),
        apply_url: job_url.clone(),
        apply_type: "EXTERNAL".to_string(),
        benefits: String::new(),
        job_url,
    })
}

/// First matching element's text, trimmed; empty when nothing matches
fn select_text(card: ElementRef, selector: &str) -> String {
    match Selector::parse(selector) {
        Ok(sel) => card
            .select(&sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

/// First matching element's attribute value; empty when nothing matches
fn select_attr(card: ElementRef, selector: &str, attr: &str) -> String {
    match Selector::parse(selector) {
        Ok(sel) => card
            .select(&sel)
            .next()
            .and_then(|el| el.value().attr(attr))
            .map(|v| v.to_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

/// Collapses whitespace runs into single spaces
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pulls the numeric posting id out of a job URL
///
/// Job URLs end their `view/` segment with `<slug>-<digits>`; the digits
/// are the id. A bare numeric segment also qualifies.
pub(crate) fn job_id_from_url(job_url: &str) -> Option<String> {
    let after_view = job_url.split("view/").nth(1)?;
    let slug = after_view.split('?').next().unwrap_or(after_view);
    let tail = slug.trim_end_matches('/').rsplit('-').next()?;

    if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) {
        Some(tail.to_string())
    } else {
        None
    }
}

/// Recovers the posting id from the card's entity URN attribute
fn job_id_from_urn(card: ElementRef) -> Option<String> {
    let urn = match card.value().attr("data-entity-urn") {
        Some(urn) => urn.to_string(),
        None => {
            let sel = Selector::parse("[data-entity-urn]").ok()?;
            card.select(&sel)
                .next()?
                .value()
                .attr("data-entity-urn")?
                .to_string()
        }
    };

    let tail = urn.rsplit(':').next()?;
    if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) {
        Some(tail.to_string())
    } else {
        None
    }
}

/// Extracts the company slug from a company profile URL
fn company_id_from_url(company_url: &str) -> String {
    company_url
        .split("company/")
        .nth(1)
        .map(|rest| {
            rest.split('?')
                .next()
                .unwrap_or(rest)
                .trim_end_matches('/')
                .to_string()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CARD: &str = r#"
        <li>
            <div class="base-card" data-entity-urn="urn:li:jobPosting:4012345678">
                <a class="base-card__full-link"
                   href="https://www.linkedin.com/jobs/view/senior-rust-engineer-4012345678?position=1">
                    Senior Rust Engineer
                </a>
                <div class="base-search-card__info">
                    <h3 class="base-search-card__title">Senior Rust Engineer</h3>
                    <h4 class="base-search-card__subtitle">
                        <a href="https://www.linkedin.com/company/acme-corp?trk=public">Acme Corp</a>
                    </h4>
                    <div class="job-search-card__location">Berlin, Germany</div>
                    <div class="job-search-card__salary-info">
                        €90,000
                        -   €110,000
                    </div>
                    <time class="job-search-card__listdate" datetime="2024-05-01">2 weeks ago</time>
                    <span class="job-search-card__applicant-count">57 applicants</span>
                </div>
            </div>
        </li>
    "#;

    #[test]
    fn test_extract_full_card() {
        let html = format!("<html><body><ul>{}</ul></body></html>", FULL_CARD);
        let jobs = parse_job_list(&html);

        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.id, "4012345678");
        assert_eq!(job.title, "Senior Rust Engineer");
        assert_eq!(job.company_name, "Acme Corp");
        assert_eq!(
            job.company_url,
            "https://www.linkedin.com/company/acme-corp?trk=public"
        );
        assert_eq!(job.company_id, "acme-corp");
        assert_eq!(job.location, "Berlin, Germany");
        assert_eq!(
            job.job_url,
            "https://www.linkedin.com/jobs/view/senior-rust-engineer-4012345678?position=1"
        );
        assert_eq!(job.published_at, "2024-05-01");
        assert_eq!(job.posted_time, "2 weeks ago");
        assert_eq!(job.salary, "€90,000 - €110,000");
        assert_eq!(job.applications_count, "57 applicants");
    }

    #[test]
    fn test_detail_fields_start_as_placeholders() {
        let html = format!("<html><body><ul>{}</ul></body></html>", FULL_CARD);
        let jobs = parse_job_list(&html);

        let job = &jobs[0];
        assert_eq!(job.description, "");
        assert_eq!(job.contract_type, "Full-time");
        assert_eq!(job.experience_level, "Not specified");
        assert_eq!(job.apply_url, job.job_url);
        assert_eq!(job.apply_type, "EXTERNAL");
    }

    #[test]
    fn test_incomplete_cards_are_dropped() {
        let html = r#"
            <html><body><ul>
                <li>
                    <a class="base-card__full-link" href="https://example.com/jobs/view/one-111"></a>
                    <h4 class="base-search-card__subtitle">No Title Inc</h4>
                </li>
                <li>
                    <a class="base-card__full-link" href="https://example.com/jobs/view/two-222"></a>
                    <h3 class="base-search-card__title">No Company</h3>
                </li>
                <li>
                    <h3 class="base-search-card__title">No Link</h3>
                    <h4 class="base-search-card__subtitle">Linkless Ltd</h4>
                </li>
            </ul></body></html>
        "#;

        assert!(parse_job_list(html).is_empty());
    }

    #[test]
    fn test_good_cards_survive_bad_neighbors() {
        let html = format!(
            r#"<html><body><ul>
                <li><div class="totally-unrelated">advert</div></li>
                {}
                <li><h3 class="base-search-card__title">Orphan</h3></li>
            </ul></body></html>"#,
            FULL_CARD
        );

        let jobs = parse_job_list(&html);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "4012345678");
    }

    #[test]
    fn test_id_falls_back_to_entity_urn() {
        let html = r#"
            <html><body><ul><li>
                <div class="base-card" data-entity-urn="urn:li:jobPosting:987654321">
                    <a class="base-card__full-link" href="https://www.linkedin.com/jobs/view/untagged-posting"></a>
                    <h3 class="base-search-card__title">Data Engineer</h3>
                    <h4 class="base-search-card__subtitle">Globex</h4>
                </div>
            </li></ul></body></html>
        "#;

        let jobs = parse_job_list(html);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "987654321");
    }

    #[test]
    fn test_record_kept_when_id_unrecoverable() {
        let html = r#"
            <html><body><ul><li>
                <a class="base-card__full-link" href="https://www.linkedin.com/jobs/view/mystery-job"></a>
                <h3 class="base-search-card__title">Mystery Job</h3>
                <h4 class="base-search-card__subtitle">Initech</h4>
            </li></ul></body></html>
        "#;

        let jobs = parse_job_list(html);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "");
    }

    #[test]
    fn test_missing_salary_is_empty() {
        let html = r#"
            <html><body><ul><li>
                <a class="base-card__full-link" href="https://www.linkedin.com/jobs/view/role-42"></a>
                <h3 class="base-search-card__title">Role</h3>
                <h4 class="base-search-card__subtitle">Hooli</h4>
            </li></ul></body></html>
        "#;

        let jobs = parse_job_list(html);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].salary, "");
        assert_eq!(jobs[0].applications_count, "");
    }

    #[test]
    fn test_pages_without_cards_yield_nothing() {
        assert!(parse_job_list("").is_empty());
        assert!(parse_job_list("<html><body><p>No results</p></body></html>").is_empty());
    }

    #[test]
    fn test_job_id_from_url_variants() {
        assert_eq!(
            job_id_from_url("https://x.test/jobs/view/rust-dev-123?refId=a"),
            Some("123".to_string())
        );
        assert_eq!(
            job_id_from_url("https://x.test/jobs/view/rust-dev-123/"),
            Some("123".to_string())
        );
        assert_eq!(
            job_id_from_url("https://x.test/jobs/view/456"),
            Some("456".to_string())
        );
        assert_eq!(job_id_from_url("https://x.test/jobs/view/rust-dev"), None);
        assert_eq!(job_id_from_url("https://x.test/jobs/browse/rust-dev-123"), None);
    }

    #[test]
    fn test_company_id_from_url_variants() {
        assert_eq!(
            company_id_from_url("https://x.test/company/acme-corp?trk=x"),
            "acme-corp"
        );
        assert_eq!(company_id_from_url("https://x.test/company/globex/"), "globex");
        assert_eq!(company_id_from_url(""), "");
        assert_eq!(company_id_from_url("https://x.test/people/jane"), "");
    }
}
