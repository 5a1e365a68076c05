//! listing-filter CLI
//!
//! Loads a listing feed, applies criteria given on the command line and
//! prints the matching listings as JSON on stdout. Logs go to stderr.

mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, FeedArgs, FindArgs, SearchArgs};
use config::Config;
use listing_filter::{source, Criterion, FilterError, ListingFilter};
use std::path::PathBuf;
use tracing::{debug, info};

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    match run(cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let config = match &cli.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };
    debug!("Using config {:?}", config);

    match cli.command {
        Commands::Search(args) => execute_search(args, &config),
        Commands::Find(args) => execute_find(args, &config),
        Commands::Criteria => Ok(describe_criteria()),
    }
}

/// Build a filter over the feed named on the command line or in the config
fn open_filter(feed: &FeedArgs, config: &Config) -> Result<ListingFilter> {
    let path: PathBuf = feed
        .listings
        .clone()
        .or_else(|| config.listings_path.clone())
        .context("No listing feed given. Use --listings or set listings_path in the config")?;

    let listings = source::load_listings(&path)
        .with_context(|| format!("Failed to load listings from {}", path.display()))?;

    Ok(ListingFilter::new(listings))
}

fn execute_search(args: SearchArgs, config: &Config) -> Result<String> {
    let mut filter = open_filter(&args.feed, config)?;

    for (name, value) in &args.criteria {
        filter.set(name, value.clone())?;
    }
    if !args.neighborhoods.is_empty() {
        filter.neighborhood(args.neighborhoods.clone())?;
    }
    if !args.amenities.is_empty() {
        filter.amenities(&args.amenities);
    }

    let limit = args.limit.unwrap_or(config.default_limit);
    filter.search(args.offset, limit);

    let page = filter.get_listings_from(args.page_offset, args.page_limit);
    info!(
        "{} of {} listings matched",
        filter.get_listings().len(),
        filter.get_all_listings().len()
    );

    if args.count {
        return Ok(page.len().to_string());
    }

    Ok(serde_json::to_string_pretty(&page)?)
}

fn execute_find(args: FindArgs, config: &Config) -> Result<String> {
    let mut filter = open_filter(&args.feed, config)?;

    let listing = filter
        .find(&args.id)
        .ok_or_else(|| anyhow::anyhow!("Listing not found: {}", args.id))?;

    Ok(serde_json::to_string_pretty(listing)?)
}

fn describe_criteria() -> String {
    Criterion::ALL
        .iter()
        .map(|c| format!("{:<20} {}", c.name(), c.kind().as_str()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Map errors to exit codes
fn get_exit_code(err: &anyhow::Error) -> i32 {
    if let Some(filter_err) = err.downcast_ref::<FilterError>() {
        return match filter_err {
            FilterError::UndefinedOperation(_) | FilterError::InvalidArgument { .. } => 1,
            FilterError::Parse(_) | FilterError::MissingListings(_) | FilterError::Io(_) => 5,
        };
    }

    let err_str = err.to_string().to_lowercase();

    if err_str.contains("no listing feed") || err_str.contains("usage") {
        1 // Invalid arguments or usage error
    } else if err_str.contains("not found") {
        3 // Not found error
    } else {
        5 // Other application errors
    }
}
