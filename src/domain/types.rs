//! Shared domain types.
//!
//! A product is identified by its composite natural key (`ProductKey`) and
//! carries a `RateSeries`: its rate history, newest effective-date first.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Composite identity of a product in the feed: (type, terms, currency).
///
/// All three codes are kept verbatim as they appear in the feed, so `"1"` and
/// `"1.0"` terms are different products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductKey {
    #[serde(rename = "type")]
    pub product_type: String,
    pub terms: String,
    pub currency: String,
}

impl ProductKey {
    pub fn new(
        product_type: impl Into<String>,
        terms: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            product_type: product_type.into(),
            terms: terms.into(),
            currency: currency.into(),
        }
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.product_type, self.terms, self.currency)
    }
}

/// One rate change: `rate` (a percentage) applies from `effective` onwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateEntry {
    pub effective: NaiveDate,
    pub rate: Decimal,
}

impl RateEntry {
    pub fn new(effective: NaiveDate, rate: Decimal) -> Self {
        Self { effective, rate }
    }
}

/// Rate history for one product.
///
/// Invariants (enforced by `RateSeries::new`):
/// - never empty
/// - effective-dates are unique
/// - entries are ordered by effective-date, most recent first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateSeries {
    entries: Vec<RateEntry>,
}

impl RateSeries {
    /// Build a series from entries in any order.
    ///
    /// If the same effective-date appears twice, the later entry wins.
    /// Returns `None` for an empty input.
    pub fn new(entries: impl IntoIterator<Item = RateEntry>) -> Option<Self> {
        let by_date: BTreeMap<NaiveDate, Decimal> = entries
            .into_iter()
            .map(|e| (e.effective, e.rate))
            .collect();
        if by_date.is_empty() {
            return None;
        }

        let entries = by_date
            .into_iter()
            .rev()
            .map(|(effective, rate)| RateEntry { effective, rate })
            .collect();
        Some(Self { entries })
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[RateEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> &RateEntry {
        &self.entries[0]
    }

    pub fn earliest(&self) -> &RateEntry {
        &self.entries[self.entries.len() - 1]
    }

    /// The entry in force on `day`: the newest one with `effective <= day`.
    ///
    /// `None` when `day` precedes the whole history.
    pub fn in_force_on(&self, day: NaiveDate) -> Option<&RateEntry> {
        // Descending order: every entry newer than `day` sits in a prefix.
        let idx = self.entries.partition_point(|e| e.effective > day);
        self.entries.get(idx)
    }

    /// True iff a rate change took effect exactly on `day`.
    pub fn changed_on(&self, day: NaiveDate) -> bool {
        self.entries
            .binary_search_by(|e| day.cmp(&e.effective))
            .is_ok()
    }
}

/// A parsed product from the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub product_type: String,
    pub currency: String,
    pub terms: String,
    pub rates: RateSeries,
}

impl ProductRecord {
    pub fn key(&self) -> ProductKey {
        ProductKey::new(&self.product_type, &self.terms, &self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample() -> RateSeries {
        RateSeries::new([
            RateEntry::new(d(2020, 4, 2), dec("2.30")),
            RateEntry::new(d(2020, 3, 28), dec("2.80")),
            RateEntry::new(d(2007, 5, 25), dec("4.20")),
        ])
        .unwrap()
    }

    #[test]
    fn empty_series_is_rejected() {
        assert!(RateSeries::new(Vec::new()).is_none());
    }

    #[test]
    fn entries_are_sorted_newest_first() {
        let series = RateSeries::new([
            RateEntry::new(d(2007, 5, 25), dec("4.20")),
            RateEntry::new(d(2020, 4, 2), dec("2.30")),
            RateEntry::new(d(2020, 3, 28), dec("2.80")),
        ])
        .unwrap();
        let dates: Vec<_> = series.entries().iter().map(|e| e.effective).collect();
        assert_eq!(dates, vec![d(2020, 4, 2), d(2020, 3, 28), d(2007, 5, 25)]);
        assert_eq!(series.latest().rate, dec("2.3"));
        assert_eq!(series.earliest().rate, dec("4.2"));
    }

    #[test]
    fn duplicate_effective_date_keeps_last() {
        let series = RateSeries::new([
            RateEntry::new(d(2020, 4, 2), dec("2.30")),
            RateEntry::new(d(2020, 4, 2), dec("2.40")),
        ])
        .unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.latest().rate, dec("2.40"));
    }

    #[test]
    fn in_force_on_picks_most_recent_applicable() {
        let series = sample();
        assert_eq!(series.in_force_on(d(2020, 4, 3)).unwrap().rate, dec("2.3"));
        assert_eq!(series.in_force_on(d(2020, 4, 2)).unwrap().rate, dec("2.3"));
        assert_eq!(series.in_force_on(d(2020, 4, 1)).unwrap().rate, dec("2.8"));
        assert_eq!(series.in_force_on(d(2010, 1, 1)).unwrap().rate, dec("4.2"));
        assert_eq!(series.in_force_on(d(2007, 5, 25)).unwrap().rate, dec("4.2"));
        assert!(series.in_force_on(d(2007, 5, 24)).is_none());
    }

    #[test]
    fn changed_on_is_exact_match() {
        let series = sample();
        assert!(series.changed_on(d(2020, 4, 2)));
        assert!(series.changed_on(d(2007, 5, 25)));
        assert!(!series.changed_on(d(2020, 4, 1)));
        assert!(!series.changed_on(d(1999, 1, 1)));
        assert!(!series.changed_on(d(2030, 1, 1)));
    }

    #[test]
    fn key_display() {
        let key = ProductKey::new("3500", "1", "CAD");
        assert_eq!(key.to_string(), "(3500, 1, CAD)");
    }
}
