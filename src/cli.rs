//! CLI definition
//!
//! Command-line front end over the listing filter

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

/// listing-filter CLI
#[derive(Parser, Debug)]
#[command(name = "listing-filter")]
#[command(about = "Filter real-estate listing feeds by named criteria", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter listings and print the matches as JSON
    Search(SearchArgs),
    /// Print the listing with the given id
    Find(FindArgs),
    /// List the criteria that can be filtered on
    Criteria,
}

/// Feed selection shared by commands that read listings
#[derive(Args, Debug, Clone)]
pub struct FeedArgs {
    /// JSON listing feed (array of listings or object with a `listing` key)
    #[arg(short = 'f', long, env = "LISTING_FILTER_LISTINGS")]
    pub listings: Option<PathBuf>,
}

/// Search command arguments
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub feed: FeedArgs,

    /// Criterion as NAME=VALUE; VALUE is read as JSON when it parses, else as text
    #[arg(short = 'c', long = "criterion", value_name = "NAME=VALUE", value_parser = parse_criterion)]
    pub criteria: Vec<(String, Value)>,

    /// Neighborhood to match (repeatable)
    #[arg(short = 'n', long = "neighborhood")]
    pub neighborhoods: Vec<String>,

    /// Required amenity phrase (repeatable, all must match)
    #[arg(short = 'a', long = "amenity")]
    pub amenities: Vec<String>,

    /// 1-based rank of the first match to keep during the scan
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub offset: i64,

    /// Maximum matches kept during the scan (0 keeps all; defaults to config)
    #[arg(short = 'l', long, allow_hyphen_values = true)]
    pub limit: Option<i64>,

    /// 1-based position of the first result to print
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub page_offset: i64,

    /// Maximum results to print (0 prints all)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub page_limit: i64,

    /// Print only the number of matches
    #[arg(long)]
    pub count: bool,
}

/// Find command arguments
#[derive(Args, Debug, Clone)]
pub struct FindArgs {
    #[command(flatten)]
    pub feed: FeedArgs,

    /// Listing id
    pub id: String,
}

/// Parse a `NAME=VALUE` criterion argument
pub fn parse_criterion(arg: &str) -> Result<(String, Value), String> {
    let (name, raw) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{}`", arg))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing criterion name in `{}`", arg));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_criterion_json_and_text() {
        assert_eq!(
            parse_criterion("min_bedroom_count=5").unwrap(),
            ("min_bedroom_count".to_string(), json!(5))
        );
        assert_eq!(
            parse_criterion("borough=Manhattan").unwrap(),
            ("borough".to_string(), json!("Manhattan"))
        );
        assert_eq!(
            parse_criterion(r#"neighborhood=["Soho","Tribeca"]"#).unwrap(),
            ("neighborhood".to_string(), json!(["Soho", "Tribeca"]))
        );
        assert_eq!(
            parse_criterion("type=").unwrap(),
            ("type".to_string(), json!(""))
        );
    }

    #[test]
    fn test_parse_criterion_rejects_malformed() {
        assert!(parse_criterion("min_price").is_err());
        assert!(parse_criterion("=5").is_err());
    }

    #[test]
    fn test_search_args_parse() {
        let cli = Cli::try_parse_from([
            "listing-filter",
            "search",
            "--listings",
            "feed.json",
            "-c",
            "min_bedroom_count=5",
            "--neighborhood",
            "East Village",
            "--amenity",
            "doorman",
            "--offset",
            "3",
            "--limit",
            "2",
        ])
        .unwrap();

        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.feed.listings, Some(PathBuf::from("feed.json")));
                assert_eq!(args.criteria, vec![("min_bedroom_count".to_string(), json!(5))]);
                assert_eq!(args.neighborhoods, vec!["East Village"]);
                assert_eq!(args.amenities, vec!["doorman"]);
                assert_eq!(args.offset, 3);
                assert_eq!(args.limit, Some(2));
                assert!(!args.count);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_find_args_parse() {
        let cli = Cli::try_parse_from(["listing-filter", "-v", "find", "48213"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Find(args) => assert_eq!(args.id, "48213"),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
