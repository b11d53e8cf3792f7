//! Point-in-time rate queries.
//!
//! Callers speak in human codes (`gic1yr`) and categories (`GIC`); the catalog
//! translates codes into product keys, and the index answers from the rate
//! series. Nothing here mutates state or logs.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{Catalog, CatalogEntry, ProductRecord};
use crate::error::QueryError;
use crate::index::ProductIndex;

/// One line of a category report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDetail {
    pub name: String,
    pub rate: Decimal,
}

/// Read-only query engine over an index, using a catalog for code lookup.
#[derive(Debug, Clone, Copy)]
pub struct RateQuery<'a> {
    index: &'a ProductIndex,
    catalog: &'a Catalog,
}

impl<'a> RateQuery<'a> {
    pub fn new(index: &'a ProductIndex, catalog: &'a Catalog) -> Self {
        Self { index, catalog }
    }

    fn entry(&self, code: &str) -> Result<&'a CatalogEntry, QueryError> {
        self.catalog
            .entry(code)
            .ok_or_else(|| QueryError::UnknownCode {
                code: code.to_string(),
            })
    }

    fn members(&self, category: &str) -> Result<&'a [String], QueryError> {
        self.catalog
            .category(category)
            .ok_or_else(|| QueryError::UnknownCategory {
                category: category.to_string(),
            })
    }

    /// Resolve a human code to the product parsed from the feed.
    pub fn lookup(&self, code: &str) -> Result<&'a ProductRecord, QueryError> {
        let entry = self.entry(code)?;
        self.index
            .get(&entry.key)
            .ok_or_else(|| QueryError::NoSuchProduct {
                code: code.to_string(),
                key: entry.key.clone(),
            })
    }

    /// The rate in force on `day`: the most recent change on or before it.
    ///
    /// A day older than the whole history is an error, not a default.
    pub fn rate_as_of(&self, code: &str, day: NaiveDate) -> Result<Decimal, QueryError> {
        let series = &self.lookup(code)?.rates;
        series
            .in_force_on(day)
            .map(|e| e.rate)
            .ok_or_else(|| QueryError::NoHistoricalRate {
                code: code.to_string(),
                day,
                earliest: series.earliest().effective,
            })
    }

    /// True iff the product's rate changed exactly on `day`.
    pub fn changed_on(&self, code: &str, day: NaiveDate) -> Result<bool, QueryError> {
        Ok(self.lookup(code)?.rates.changed_on(day))
    }

    /// True iff any member of the category changed exactly on `day`.
    pub fn category_changed_on(&self, category: &str, day: NaiveDate) -> Result<bool, QueryError> {
        for code in self.members(category)? {
            if self.changed_on(code, day)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Display name and as-of rate for every member, in category order.
    ///
    /// The first member that cannot be resolved fails the whole call.
    pub fn category_details_on(
        &self,
        category: &str,
        day: NaiveDate,
    ) -> Result<Vec<CategoryDetail>, QueryError> {
        self.members(category)?
            .iter()
            .map(|code| {
                let name = self.entry(code)?.name.clone();
                let rate = self.rate_as_of(code, day)?;
                Ok(CategoryDetail { name, rate })
            })
            .collect()
    }
}
