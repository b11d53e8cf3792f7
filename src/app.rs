//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and merges them with environment settings
//! - sets up logging
//! - loads the catalog and the rate feed
//! - runs the requested query and prints the result
//! - posts change summaries for `publish`

use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::Level;

use crate::cli::{CategoryArgs, Cli, CodeArgs, CodeDayArgs, Command, PublishArgs};
use crate::config::{Settings, parse_log_level};
use crate::error::{AppError, EXIT_CONFIG};
use crate::notify::{NotificationSink, StdoutSink, WebhookSink};

pub mod pipeline;

use pipeline::{Loaded, PublishOutcome};

/// Entry point for the `ratewatch` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut settings = Settings::from_env();
    apply_overrides(&mut settings, &cli);
    init_logging(settings.log_level.as_deref())?;

    let feed = settings.require_feed_path()?;
    let loaded = pipeline::load(&feed, settings.catalog_path.as_deref())?;

    match cli.command {
        Command::Product(args) => handle_product(&loaded, args),
        Command::Rate(args) => handle_rate(&loaded, args),
        Command::Changed(args) => handle_changed(&loaded, args),
        Command::Category(args) => handle_category(&loaded, args),
        Command::Publish(args) => handle_publish(&loaded, &settings, args),
    }
}

fn apply_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(feed) = &cli.feed {
        settings.feed_path = Some(feed.clone());
    }
    if let Some(catalog) = &cli.catalog {
        settings.catalog_path = Some(catalog.clone());
    }
    if let Some(log) = &cli.log {
        settings.log_level = Some(log.clone());
    }
    if let Command::Publish(args) = &cli.command {
        if let Some(url) = &args.webhook {
            settings.webhook_url = Some(url.clone());
        }
    }
}

fn init_logging(level: Option<&str>) -> Result<(), AppError> {
    let level = match level {
        Some(raw) => parse_log_level(raw)?,
        None => Level::WARN,
    };
    // Logs go to stderr so stdout stays clean for query output.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn handle_product(loaded: &Loaded, args: CodeArgs) -> Result<(), AppError> {
    let record = loaded.query().lookup(&args.code)?;
    print!("{}", crate::report::format_product(&args.code, record));
    Ok(())
}

fn handle_rate(loaded: &Loaded, args: CodeDayArgs) -> Result<(), AppError> {
    let day = args.day.unwrap_or_else(today);
    let rate = loaded.query().rate_as_of(&args.code, day)?;
    println!("{rate}%");
    Ok(())
}

fn handle_changed(loaded: &Loaded, args: CodeDayArgs) -> Result<(), AppError> {
    let day = args.day.unwrap_or_else(today);
    let changed = loaded.query().changed_on(&args.code, day)?;
    println!("{changed}");
    Ok(())
}

fn handle_category(loaded: &Loaded, args: CategoryArgs) -> Result<(), AppError> {
    let day = args.day.unwrap_or_else(today);
    let query = loaded.query();
    let changed = query.category_changed_on(&args.name, day)?;
    let details = query.category_details_on(&args.name, day)?;
    print!(
        "{}",
        crate::report::format_category(&args.name, day, changed, &details)
    );
    Ok(())
}

fn handle_publish(loaded: &Loaded, settings: &Settings, args: PublishArgs) -> Result<(), AppError> {
    let day = args.day.unwrap_or_else(today);
    let mut sink: Box<dyn NotificationSink> = if args.dry_run {
        Box::new(StdoutSink::default())
    } else {
        let url = settings.webhook_url.clone().ok_or_else(|| {
            AppError::new(
                EXIT_CONFIG,
                "No webhook configured: pass --webhook, set RATES_WEBHOOK_URL, or use --dry-run.",
            )
        })?;
        Box::new(WebhookSink::new(url, settings.webhook_token.clone())?)
    };

    match pipeline::publish_category(&loaded.query(), sink.as_mut(), &args.category, day)? {
        PublishOutcome::Unchanged => println!("No {} rate changes on {day}.", args.category),
        PublishOutcome::Posted { details, .. } => {
            println!("Posted {} rate changes on {day} ({details}).", args.category)
        }
    }
    Ok(())
}
