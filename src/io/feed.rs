//! Rate feed parsing.
//!
//! Turns the rates-history XML document into a `ProductIndex`:
//!
//! ```xml
//! <product type="3500" terms="1" currency="CAD">
//!   <rate>
//!     <date>04/02/2020</date>
//!     <value en="2.30%" fr="2,30 %"/>
//!   </rate>
//! </product>
//! ```
//!
//! Parsing is strict: a missing attribute, element, or an unparseable date or
//! rate anywhere aborts the load. There is no partial index.
//!
//! The feed lists rates newest-first, but the parser does not rely on it:
//! every series is sorted by effective-date when it is built.

use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{ProductKey, ProductRecord, RateEntry, RateSeries};
use crate::error::{AppError, EXIT_FEED, FeedError};
use crate::index::ProductIndex;
use crate::io::xml::{Document, Element};

const DATE_FORMAT: &str = "%m/%d/%Y";

/// Read, parse and index a feed file.
pub fn load_feed(path: &Path) -> Result<ProductIndex, AppError> {
    let xml = std::fs::read_to_string(path).map_err(|e| {
        AppError::new(
            EXIT_FEED,
            format!("Failed to read rate feed '{}': {e}", path.display()),
        )
    })?;
    let document = Document::parse(&xml)?;
    Ok(parse_feed(&document)?)
}

/// Parse every `<product>` element of the document into an index.
///
/// Products sharing a key: the last one wins, and the key is recorded in
/// `ProductIndex::replaced`.
pub fn parse_feed(document: &Document) -> Result<ProductIndex, FeedError> {
    let mut index = ProductIndex::default();
    for el in document.elements_named("product") {
        index.insert(parse_product(el)?);
    }
    Ok(index)
}

pub fn parse_product(el: &Element) -> Result<ProductRecord, FeedError> {
    let product_type = el.required_attribute("type")?.to_string();
    let currency = el.required_attribute("currency")?.to_string();
    let terms = el.required_attribute("terms")?.to_string();

    let rates = parse_rate_series(el)?;

    Ok(ProductRecord {
        product_type,
        currency,
        terms,
        rates,
    })
}

pub fn parse_rate_series(el: &Element) -> Result<RateSeries, FeedError> {
    let mut entries = Vec::new();
    for rate in el.descendants("rate") {
        let effective = parse_date(&rate.first_descendant("date")?.text())?;
        let raw = rate.first_descendant("value")?.required_attribute("en")?;
        entries.push(RateEntry::new(effective, parse_rate(raw)?));
    }

    RateSeries::new(entries).ok_or_else(|| FeedError::EmptySeries {
        key: ProductKey::new(
            el.attribute("type").unwrap_or_default(),
            el.attribute("terms").unwrap_or_default(),
            el.attribute("currency").unwrap_or_default(),
        ),
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, FeedError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| FeedError::InvalidDate {
        value: raw.to_string(),
    })
}

/// Parse a percentage such as `2.30%` exactly. The `%` suffix is optional.
fn parse_rate(raw: &str) -> Result<Decimal, FeedError> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    Decimal::from_str_exact(number).map_err(|e| FeedError::InvalidRate {
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
