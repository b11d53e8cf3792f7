//! Property tests for the as-of and exact-change laws.

use std::collections::{BTreeMap, HashMap};

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rate_watch::domain::{Catalog, CatalogEntry, ProductKey, ProductRecord, RateEntry, RateSeries};
use rate_watch::error::QueryError;
use rate_watch::index::{ProductIndex, RateQuery};
use rust_decimal::Decimal;

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
}

fn day(offset: u64) -> NaiveDate {
    epoch().checked_add_days(Days::new(offset)).unwrap()
}

/// Distinct day offsets mapped to rates in basis points.
fn history() -> impl Strategy<Value = BTreeMap<u64, i64>> {
    prop::collection::btree_map(0u64..5_000, 0i64..1_500, 1..40)
}

fn setup(history: &BTreeMap<u64, i64>, shuffle_seed: usize) -> (ProductIndex, Catalog) {
    let mut entries: Vec<RateEntry> = history
        .iter()
        .map(|(offset, bp)| RateEntry::new(day(*offset), Decimal::new(*bp, 2)))
        .collect();
    // Feed order must not matter.
    let len = entries.len();
    entries.rotate_left(shuffle_seed % len);

    let record = ProductRecord {
        product_type: "3500".to_string(),
        currency: "CAD".to_string(),
        terms: "1".to_string(),
        rates: RateSeries::new(entries).unwrap(),
    };
    let index: ProductIndex = std::iter::once(record).collect();

    let catalog = Catalog {
        codes: HashMap::from([(
            "p".to_string(),
            CatalogEntry {
                key: ProductKey::new("3500", "1", "CAD"),
                name: "P".to_string(),
            },
        )]),
        categories: HashMap::from([("C".to_string(), vec!["p".to_string()])]),
    };
    (index, catalog)
}

proptest! {
    #[test]
    fn as_of_is_most_recent_applicable(
        history in history(),
        shuffle in 0usize..64,
        query in 0u64..5_200,
    ) {
        let (index, catalog) = setup(&history, shuffle);
        let q = RateQuery::new(&index, &catalog);
        let target = day(query);

        match history.range(..=query).next_back() {
            Some((_, bp)) => {
                prop_assert_eq!(q.rate_as_of("p", target).unwrap(), Decimal::new(*bp, 2));
            }
            None => {
                let is_no_history = matches!(
                    q.rate_as_of("p", target),
                    Err(QueryError::NoHistoricalRate { .. })
                );
                prop_assert!(is_no_history);
            }
        }
    }

    #[test]
    fn changed_on_matches_effective_dates(
        history in history(),
        query in 0u64..5_200,
    ) {
        let (index, catalog) = setup(&history, 0);
        let q = RateQuery::new(&index, &catalog);
        let target = day(query);

        let changed = q.changed_on("p", target).unwrap();
        prop_assert_eq!(changed, history.contains_key(&query));
        prop_assert_eq!(q.category_changed_on("C", target).unwrap(), changed);
        if changed {
            prop_assert!(q.rate_as_of("p", target).is_ok());
        }
    }

    #[test]
    fn queries_are_repeatable(
        history in history(),
        query in 0u64..5_200,
    ) {
        let (index, catalog) = setup(&history, 0);
        let q = RateQuery::new(&index, &catalog);
        let target = day(query);
        prop_assert_eq!(q.rate_as_of("p", target), q.rate_as_of("p", target));
        prop_assert_eq!(q.category_details_on("C", target), q.category_details_on("C", target));
    }

    #[test]
    fn oldest_day_is_the_boundary(history in history()) {
        let (index, catalog) = setup(&history, 0);
        let q = RateQuery::new(&index, &catalog);
        let (&oldest, &bp) = history.iter().next().unwrap();

        prop_assert_eq!(q.rate_as_of("p", day(oldest)).unwrap(), Decimal::new(bp, 2));
        if oldest > 0 {
            prop_assert!(q.rate_as_of("p", day(oldest - 1)).is_err());
        }
    }
}
