//! Jobsift main entry point
//!
//! This is the command-line interface for the Jobsift job-listing crawler.

use clap::{Args, Parser, Subcommand};
use jobsift::config::load_config_with_hash;
use jobsift::{Config, SearchEngine, SearchQuery};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Jobsift: a job-listing crawl engine
///
/// Jobsift turns structured searches into guest-endpoint crawls, caching
/// finished searches and extracting full posting details on demand.
/// Results are printed as JSON on stdout.
#[derive(Parser, Debug)]
#[command(name = "jobsift")]
#[command(version = "1.0.0")]
#[command(about = "A job-listing crawl engine", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search job listings
    Search(SearchArgs),

    /// Crawl full details for one posting
    Job(JobArgs),

    /// Crawl details for several postings in one run
    Bulk(BulkArgs),
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Search keyword
    #[arg(short, long, default_value = "")]
    keyword: String,

    /// Location filter
    #[arg(short, long, default_value = "")]
    location: String,

    /// Posting-age filter: "past month", "past week", or "24hr"
    #[arg(long, value_name = "WHEN")]
    date_since_posted: Option<String>,

    /// Job-type filter: "full time", "part time", "contract", ...
    #[arg(long, value_name = "TYPE")]
    job_type: Option<String>,

    /// Work-arrangement filter: "on-site", "remote", or "hybrid"
    #[arg(long, value_name = "MODE")]
    remote_filter: Option<String>,

    /// Minimum-salary filter: 40000, 60000, 80000, 100000, or 120000
    #[arg(long, value_name = "FLOOR")]
    salary: Option<String>,

    /// Experience-level filter: "internship" through "executive"
    #[arg(long, value_name = "LEVEL")]
    experience_level: Option<String>,

    /// Result ordering: "recent" or "relevant"
    #[arg(long, value_name = "ORDER")]
    sort_by: Option<String>,

    /// Page offset within the result stream
    #[arg(long, default_value_t = 0)]
    page: u32,

    /// Maximum number of results (1-100)
    #[arg(long, default_value_t = 25)]
    limit: usize,
}

#[derive(Args, Debug)]
struct JobArgs {
    /// Absolute URL of the posting
    #[arg(value_name = "URL")]
    url: String,

    /// Numeric posting id (recovered from the URL when omitted)
    #[arg(long, value_name = "ID", default_value = "")]
    id: String,
}

#[derive(Args, Debug)]
struct BulkArgs {
    /// Jobs to crawl, each given as "<job-id>=<job-url>"
    #[arg(value_name = "JOB", required = true)]
    jobs: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    let engine = SearchEngine::new(config)?;

    match cli.command {
        Command::Search(args) => handle_search(&engine, args).await?,
        Command::Job(args) => handle_job(&engine, args).await?,
        Command::Bulk(args) => handle_bulk(&engine, args).await?,
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("jobsift=info,warn"),
            1 => EnvFilter::new("jobsift=debug,info"),
            2 => EnvFilter::new("jobsift=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the search subcommand: crawls listings and prints them
async fn handle_search(engine: &SearchEngine, args: SearchArgs) -> anyhow::Result<()> {
    let mut query = SearchQuery::new(&args.keyword)
        .with_location(&args.location)
        .with_page(args.page)
        .with_limit(args.limit);

    if let Some(value) = &args.date_since_posted {
        query = query.with_date_since_posted(value);
    }
    if let Some(value) = &args.job_type {
        query = query.with_job_type(value);
    }
    if let Some(value) = &args.remote_filter {
        query = query.with_remote_filter(value);
    }
    if let Some(value) = &args.salary {
        query = query.with_salary(value);
    }
    if let Some(value) = &args.experience_level {
        query = query.with_experience_level(value);
    }
    if let Some(value) = &args.sort_by {
        query = query.with_sort_by(value);
    }

    let jobs = engine.search(&query).await?;
    tracing::info!("Search returned {} jobs", jobs.len());

    println!("{}", serde_json::to_string_pretty(&jobs)?);
    Ok(())
}

/// Handles the job subcommand: crawls one posting's details
async fn handle_job(engine: &SearchEngine, args: JobArgs) -> anyhow::Result<()> {
    let detail = engine.crawl_job_details(&args.id, &args.url).await?;

    println!("{}", serde_json::to_string_pretty(&detail)?);
    Ok(())
}

/// Handles the bulk subcommand: crawls several postings and prints the report
async fn handle_bulk(engine: &SearchEngine, args: BulkArgs) -> anyhow::Result<()> {
    let mut jobs = Vec::with_capacity(args.jobs.len());
    for entry in &args.jobs {
        match entry.split_once('=') {
            Some((id, url)) if !id.is_empty() && !url.is_empty() => {
                jobs.push((id.to_string(), url.to_string()));
            }
            _ => anyhow::bail!("Expected <job-id>=<job-url>, got '{}'", entry),
        }
    }

    let report = engine.crawl_multiple_jobs(&jobs).await?;
    tracing::info!(
        "Bulk crawl done: {}/{} succeeded",
        report.succeeded,
        report.total
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
