//! Translation tables from human filter words to guest-endpoint codes.
//!
//! Lookups are case-insensitive and ignore surrounding whitespace. A value
//! with no table entry yields `None`, and the caller omits the parameter.

/// Maps a posting-age phrase to an `f_TPR` code (seconds window).
pub fn date_since_posted(value: &str) -> Option<&'static str> {
    match value.trim().to_lowercase().as_str() {
        "past month" => Some("r2592000"),
        "past week" => Some("r604800"),
        "24hr" => Some("r86400"),
        _ => None,
    }
}

/// Maps an experience-level phrase to an `f_E` code.
pub fn experience_level(value: &str) -> Option<&'static str> {
    match value.trim().to_lowercase().as_str() {
        "internship" => Some("1"),
        "entry level" => Some("2"),
        "associate" => Some("3"),
        "senior" => Some("4"),
        "director" => Some("5"),
        "executive" => Some("6"),
        _ => None,
    }
}

/// Maps a job-type phrase to an `f_JT` code.
pub fn job_type(value: &str) -> Option<&'static str> {
    match value.trim().to_lowercase().as_str() {
        "full time" | "full-time" => Some("F"),
        "part time" | "part-time" => Some("P"),
        "contract" => Some("C"),
        "temporary" => Some("T"),
        "volunteer" => Some("V"),
        "internship" => Some("I"),
        _ => None,
    }
}

/// Maps a work-arrangement phrase to an `f_WT` code.
pub fn remote_filter(value: &str) -> Option<&'static str> {
    match value.trim().to_lowercase().as_str() {
        "on-site" | "on site" => Some("1"),
        "remote" => Some("2"),
        "hybrid" => Some("3"),
        _ => None,
    }
}

/// Maps a minimum-salary figure to an `f_SB2` bucket code.
pub fn salary_floor(value: &str) -> Option<&'static str> {
    match value.trim() {
        "40000" => Some("1"),
        "60000" => Some("2"),
        "80000" => Some("3"),
        "100000" => Some("4"),
        "120000" => Some("5"),
        _ => None,
    }
}

/// Maps a sort preference to a `sortBy` code.
pub fn sort_by(value: &str) -> Option<&'static str> {
    match value.trim().to_lowercase().as_str() {
        "recent" => Some("DD"),
        "relevant" => Some("R"),
        _ => None,
    }
}
