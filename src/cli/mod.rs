//! Command-line parsing for the rate watcher.
//!
//! The goal of this module is to keep **argument parsing** separate from
//! the feed parsing and query code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ratewatch", version, about = "Historical interest-rate lookups and change alerts")]
pub struct Cli {
    /// Rates-history XML feed (overrides RATES_FEED_PATH).
    #[arg(long, global = true, value_name = "XML")]
    pub feed: Option<PathBuf>,

    /// Catalog JSON (overrides RATES_CATALOG_PATH; built-in GIC catalog if neither is set).
    #[arg(long, global = true, value_name = "JSON")]
    pub catalog: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace (overrides RATES_LOG).
    #[arg(long, global = true)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a product's identity and full rate history.
    Product(CodeArgs),
    /// Print the rate in force for a product on a day.
    Rate(CodeDayArgs),
    /// Print whether a product's rate changed on a day.
    Changed(CodeDayArgs),
    /// Print a category's change flag and member rates on a day.
    Category(CategoryArgs),
    /// Post a summary if any product in the category changed on the day.
    Publish(PublishArgs),
}

#[derive(Debug, Args, Clone)]
pub struct CodeArgs {
    /// Product code from the catalog (e.g. gic1yr).
    #[arg(short, long)]
    pub code: String,
}

#[derive(Debug, Args, Clone)]
pub struct CodeDayArgs {
    /// Product code from the catalog (e.g. gic1yr).
    #[arg(short, long)]
    pub code: String,

    /// Day to query (YYYY-MM-DD). Defaults to today.
    #[arg(short, long, value_parser = parse_day)]
    pub day: Option<NaiveDate>,
}

#[derive(Debug, Args, Clone)]
pub struct CategoryArgs {
    /// Category name from the catalog (e.g. GIC).
    #[arg(short, long)]
    pub name: String,

    /// Day to query (YYYY-MM-DD). Defaults to today.
    #[arg(short, long, value_parser = parse_day)]
    pub day: Option<NaiveDate>,
}

#[derive(Debug, Args, Clone)]
pub struct PublishArgs {
    /// Category to report on.
    #[arg(short, long, default_value = crate::domain::GIC_CATEGORY)]
    pub category: String,

    /// Day to check (YYYY-MM-DD). Defaults to today.
    #[arg(short, long, value_parser = parse_day)]
    pub day: Option<NaiveDate>,

    /// Print the posts instead of sending them.
    #[arg(long)]
    pub dry_run: bool,

    /// Webhook URL (overrides RATES_WEBHOOK_URL).
    #[arg(long)]
    pub webhook: Option<String>,
}

/// Parse a `YYYY-MM-DD` day argument.
pub fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid day '{raw}'. Expected YYYY-MM-DD."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rate_command() {
        let cli = Cli::parse_from([
            "ratewatch", "--feed", "feed.xml", "rate", "--code", "gic1yr", "--day", "2020-04-02",
        ]);
        assert_eq!(cli.feed, Some(PathBuf::from("feed.xml")));
        match cli.command {
            Command::Rate(args) => {
                assert_eq!(args.code, "gic1yr");
                assert_eq!(args.day, NaiveDate::from_ymd_opt(2020, 4, 2));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn publish_defaults_to_gic() {
        let cli = Cli::parse_from(["ratewatch", "publish", "--dry-run"]);
        match cli.command {
            Command::Publish(args) => {
                assert_eq!(args.category, "GIC");
                assert!(args.dry_run);
                assert!(args.day.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn log_level_is_a_global_flag() {
        let cli = Cli::parse_from(["ratewatch", "changed", "-c", "gic1yr", "--log", "debug"]);
        assert_eq!(cli.log.as_deref(), Some("debug"));
        let cli = Cli::parse_from(["ratewatch", "product", "-c", "gic1yr"]);
        assert!(cli.log.is_none());
    }

    #[test]
    fn rejects_bad_day() {
        assert!(parse_day("04/02/2020").is_err());
        assert!(Cli::try_parse_from(["ratewatch", "changed", "-c", "gic1yr", "-d", "yesterday"]).is_err());
    }
}
