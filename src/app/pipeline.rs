//! Shared load and publish workflow.
//!
//! feed file -> index, catalog file -> catalog, then (for `publish`)
//! change check -> details -> headline post -> details reply.

use std::path::Path;

use chrono::NaiveDate;

use crate::domain::Catalog;
use crate::error::AppError;
use crate::index::{ProductIndex, RateQuery};
use crate::notify::{NotificationSink, PostHandle};

/// Everything a query needs, loaded once per run.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub index: ProductIndex,
    pub catalog: Catalog,
}

impl Loaded {
    pub fn query(&self) -> RateQuery<'_> {
        RateQuery::new(&self.index, &self.catalog)
    }
}

pub fn load(feed: &Path, catalog: Option<&Path>) -> Result<Loaded, AppError> {
    let catalog = crate::io::load_catalog(catalog)?;
    tracing::debug!(
        codes = catalog.codes.len(),
        categories = ?catalog.category_names(),
        "catalog loaded"
    );

    let index = crate::io::load_feed(feed)?;
    tracing::info!(products = index.len(), feed = %feed.display(), "rate feed loaded");
    if index.is_empty() {
        tracing::warn!(feed = %feed.display(), "rate feed contains no products");
    }
    for key in index.replaced() {
        tracing::warn!(%key, "duplicate product in feed; keeping the last one");
    }

    Ok(Loaded { index, catalog })
}

/// Outcome of a publish run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Nothing in the category changed that day; nothing was posted.
    Unchanged,
    /// Headline and details reply were posted.
    Posted {
        headline: PostHandle,
        details: PostHandle,
    },
}

/// Post a change summary for `category` if any member changed on `day`.
///
/// Details are resolved before anything is posted, so a query failure never
/// leaves a headline without its reply.
pub fn publish_category(
    query: &RateQuery<'_>,
    sink: &mut dyn NotificationSink,
    category: &str,
    day: NaiveDate,
) -> Result<PublishOutcome, AppError> {
    if !query.category_changed_on(category, day)? {
        tracing::info!(category, %day, "no rate change; nothing to publish");
        return Ok(PublishOutcome::Unchanged);
    }

    let details = query.category_details_on(category, day)?;
    let headline_text = crate::report::format_change_headline(category, day);
    let details_text = crate::report::format_details_message(&details);

    let headline = sink.post(&headline_text, None)?;
    tracing::info!(category, %day, handle = %headline, "posted change headline");
    let details = sink.post(&details_text, Some(&headline))?;
    tracing::info!(category, %day, handle = %details, "posted change details");

    Ok(PublishOutcome::Posted { headline, details })
}
