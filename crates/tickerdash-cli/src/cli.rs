//! CLI argument definitions for tickerdash.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `stocks` | Browse, search, or filter rating records page by page |
//! | `show` | Fetch one record by id with its ticker history |
//! | `ticker` | Fetch the rating history of a ticker |
//! | `latest` | Fetch the most recent records |
//! | `metadata` | List known actions and ratings |
//! | `recommendations` | Fetch scored recommendations |
//! | `sync` | Trigger an upstream sync |
//! | `dashboard` | Load metadata, recommendations, and the first page together |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--base-url` | `$TICKERDASH_API_BASE_URL` | API base URL |
//! | `--timeout-ms` | `10000` | Request timeout in ms |
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |

use clap::{Args, Parser, Subcommand, ValueEnum};
use tickerdash_core::api::{LATEST_LIMIT, PAGE_LIMIT, RECOMMENDATION_LIMIT};
use tickerdash_core::{SortField, SortOrder, DEFAULT_TIMEOUT_MS};

/// Browse analyst stock rating changes from a tickerdash API.
#[derive(Debug, Parser)]
#[command(name = "tickerdash", author, version, about = "Analyst stock rating browser")]
pub struct Cli {
    /// API base URL. Overrides TICKERDASH_API_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds (sync always runs unbounded).
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse rating records.
    ///
    /// A non-empty --query switches to search mode (single page); --action or
    /// --rating switch to filter mode; otherwise records are listed by --sort.
    ///
    ///   tickerdash stocks --sort ticker --order asc --page 2
    ///   tickerdash stocks --query AAPL
    ///   tickerdash stocks --action "upgraded by" --rating Buy
    Stocks(StocksArgs),

    /// Fetch a single record by id, then its ticker history.
    Show(ShowArgs),

    /// Fetch every rating change recorded for a ticker.
    Ticker(TickerArgs),

    /// Fetch the most recent records.
    Latest(LatestArgs),

    /// List the distinct actions and ratings known to the API.
    Metadata,

    /// Fetch scored buy recommendations.
    Recommendations(RecommendationsArgs),

    /// Trigger an upstream sync. Waits without timeout.
    Sync,

    /// Load metadata, recommendations, and the first page of records concurrently.
    Dashboard,
}

#[derive(Debug, Args)]
pub struct StocksArgs {
    /// Free-text search over ticker and company.
    #[arg(long)]
    pub query: Option<String>,

    /// Filter by action (e.g. "upgraded by").
    #[arg(long)]
    pub action: Option<String>,

    /// Filter by target rating (e.g. "Buy").
    #[arg(long)]
    pub rating: Option<String>,

    /// Sort field for list mode.
    #[arg(long, default_value = "time")]
    pub sort: SortField,

    /// Sort order for list mode (asc or desc).
    #[arg(long, default_value = "desc")]
    pub order: SortOrder,

    /// Page size, clamped to 1..=200.
    #[arg(long, default_value = "20", value_parser = parse_page_limit)]
    pub limit: u32,

    /// 1-based page to show. Stops at the last available page.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub page: u64,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Record id.
    pub id: String,
}

#[derive(Debug, Args)]
pub struct TickerArgs {
    /// Ticker symbol (e.g. BRK/B).
    pub ticker: String,
}

#[derive(Debug, Args)]
pub struct LatestArgs {
    /// Number of records, clamped to 1..=100 (default 20).
    #[arg(long, value_parser = parse_latest_limit)]
    pub limit: Option<u32>,
}

#[derive(Debug, Args)]
pub struct RecommendationsArgs {
    /// Number of recommendations, clamped to 1..=50 (default 10).
    #[arg(long, value_parser = parse_recommendation_limit)]
    pub limit: Option<u32>,
}

fn parse_page_limit(raw: &str) -> Result<u32, String> {
    Ok(PAGE_LIMIT.parse(raw))
}

fn parse_latest_limit(raw: &str) -> Result<u32, String> {
    Ok(LATEST_LIMIT.parse(raw))
}

fn parse_recommendation_limit(raw: &str) -> Result<u32, String> {
    Ok(RECOMMENDATION_LIMIT.parse(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_clamped_instead_of_rejected() {
        let cli = Cli::try_parse_from(["tickerdash", "stocks", "--limit", "999"]).expect("parses");
        let Command::Stocks(args) = cli.command else {
            panic!("expected stocks command");
        };
        assert_eq!(args.limit, 200);

        let cli = Cli::try_parse_from(["tickerdash", "latest", "--limit", "abc"]).expect("parses");
        let Command::Latest(args) = cli.command else {
            panic!("expected latest command");
        };
        assert_eq!(args.limit, Some(1));
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        let result = Cli::try_parse_from(["tickerdash", "stocks", "--sort", "price"]);
        assert!(result.is_err());
    }

    #[test]
    fn page_zero_is_rejected() {
        let result = Cli::try_parse_from(["tickerdash", "stocks", "--page", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_apply_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tickerdash",
            "metadata",
            "--base-url",
            "http://ratings.test/api/v1",
            "--format",
            "table",
        ])
        .expect("parses");

        assert_eq!(cli.base_url.as_deref(), Some("http://ratings.test/api/v1"));
        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.timeout_ms, DEFAULT_TIMEOUT_MS);
    }
}
