//! Posting detail extraction
//!
//! Two extraction profiles cover the detail side:
//! - **native**: postings hosted on the job site itself, served by the
//!   guest posting endpoint with structured criteria markup
//! - **external**: anything else, scraped with ordered selector guesses
//!   and keyword heuristics
//!
//! Parsing here is pure; fetching and the apply-link probe live in the
//! engine.

use crate::jobs::JobDetail;
use chrono::Utc;
use scraper::{Html, Selector};
use url::Url;

/// Description containers tried in order on external pages
const DESCRIPTION_SELECTORS: [&str; 7] = [
    ".job-description",
    "#job-description",
    "[data-testid=\"jobDescription\"]",
    ".description",
    "article",
    ".posting-body",
    "main",
];

/// List items mentioning one of these count as requirements on external pages
const REQUIREMENT_KEYWORDS: [&str; 4] = ["require", "qualif", "skill", "experience"];

/// Parsed native posting plus the raw apply link, when the page had one
///
/// The apply link still needs resolving; until then the detail's
/// `apply_url` stays unset.
#[derive(Debug)]
pub struct NativeDetail {
    pub detail: JobDetail,
    pub apply_href: Option<String>,
}

/// Whether a URL points at the same site as the given base
///
/// The base's `www.` prefix is ignored and subdomains count as the same
/// site. An explicit port on the base must be matched exactly.
pub fn same_site(base: &Url, candidate: &Url) -> bool {
    let base_host = match base.host_str() {
        Some(host) => host.strip_prefix("www.").unwrap_or(host),
        None => return false,
    };
    let candidate_host = match candidate.host_str() {
        Some(host) => host,
        None => return false,
    };

    if let Some(port) = base.port() {
        if candidate.port() != Some(port) {
            return false;
        }
    }

    candidate_host == base_host || candidate_host.ends_with(&format!(".{}", base_host))
}

/// Whether a posting URL should use the native extraction profile
pub fn is_native_posting(base: &Url, job_url: &Url) -> bool {
    same_site(base, job_url) && job_url.path().contains("/jobs")
}

/// Extracts a detail record from a native posting fragment
pub fn parse_native_detail(html: &str) -> NativeDetail {
    let document = Html::parse_document(html);

    let mut description = String::new();
    let mut description_html = String::new();
    let mut requirements = Vec::new();

    if let Ok(sel) = Selector::parse(".description__text") {
        if let Some(element) = document.select(&sel).next() {
            description = element.text().collect::<String>().trim().to_string();
            description_html = element.inner_html();

            if let Ok(item_sel) = Selector::parse("ul li") {
                requirements = element
                    .select(&item_sel)
                    .map(|li| li.text().collect::<String>().trim().to_string())
                    .filter(|text| !text.is_empty())
                    .collect();
            }
        }
    }

    let seniority_level = criteria_value(&document, "Seniority level");
    let employment_type = criteria_value(&document, "Employment type");
    let job_function = criteria_value(&document, "Job function");
    let industries: Vec<String> = criteria_value(&document, "Industries")
        .split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect();

    let company_size = first_text(&document, ".top-card-layout__card .company-size");
    let applicant_count = first_text(&document, ".num-applicants__caption");
    let benefits = item_texts(&document, ".benefits__list li");

    let apply_href = first_attr(
        &document,
        ".jobs-apply-button, .jobs-unified-top-card__apply-button",
        "href",
    );

    NativeDetail {
        detail: JobDetail {
            description,
            description_html,
            requirements,
            benefits,
            employment_type,
            seniority_level,
            industries,
            applicant_count,
            company_size,
            job_function,
            external_url: None,
            apply_url: None,
            is_external_posting: false,
            crawled_at: Utc::now(),
        },
        apply_href,
    }
}

/// Extracts a detail record from an arbitrary external posting page
///
/// # Arguments
///
/// * `html` - The page markup
/// * `url` - The posting URL, echoed into the record
pub fn parse_external_detail(html: &str, url: &str) -> JobDetail {
    let document = Html::parse_document(html);

    let mut description = String::new();
    let mut description_html = String::new();

    for selector in DESCRIPTION_SELECTORS {
        if let Ok(sel) = Selector::parse(selector) {
            if let Some(element) = document.select(&sel).next() {
                description = element.text().collect::<String>().trim().to_string();
                description_html = element.inner_html();
                break;
            }
        }
    }

    if description.is_empty() {
        description = "Description not found".to_string();
    }

    let requirements = item_texts(&document, "ul li, ol li")
        .into_iter()
        .filter(|text| {
            let lowered = text.to_lowercase();
            REQUIREMENT_KEYWORDS
                .iter()
                .any(|keyword| lowered.contains(keyword))
        })
        .collect();

    JobDetail {
        description,
        description_html,
        requirements,
        benefits: Vec::new(),
        employment_type: "Not specified".to_string(),
        seniority_level: "Not specified".to_string(),
        industries: Vec::new(),
        applicant_count: "Unknown".to_string(),
        company_size: "Not specified".to_string(),
        job_function: "Not specified".to_string(),
        external_url: Some(url.to_string()),
        apply_url: Some(url.to_string()),
        is_external_posting: true,
        crawled_at: Utc::now(),
    }
}

/// Value of the criteria item whose label contains the given text
fn criteria_value(document: &Html, label: &str) -> String {
    if let (Ok(item_sel), Ok(value_sel)) = (
        Selector::parse(".job-criteria__list .job-criteria__item"),
        Selector::parse(".job-criteria__text"),
    ) {
        for item in document.select(&item_sel) {
            let item_text = item.text().collect::<String>();
            if item_text.contains(label) {
                if let Some(value) = item.select(&value_sel).next() {
                    return value.text().collect::<String>().trim().to_string();
                }
            }
        }
    }

    String::new()
}

/// First match's trimmed text; empty when nothing matches
fn first_text(document: &Html, selector: &str) -> String {
    match Selector::parse(selector) {
        Ok(sel) => document
            .select(&sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

/// First match's attribute value, when present
fn first_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .next()?
        .value()
        .attr(attr)
        .map(|v| v.to_string())
}

/// Trimmed non-empty texts of every match
fn item_texts(document: &Html, selector: &str) -> Vec<String> {
    match Selector::parse(selector) {
        Ok(sel) => document
            .select(&sel)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
            .collect(),
        Err(_) => Vec::new(),
    }
}
