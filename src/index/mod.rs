//! Product index and the as-of query engine.
//!
//! - `ProductIndex`: every product parsed from one feed load, keyed by `ProductKey`
//! - `RateQuery`: catalog-aware point-in-time queries over an index

use std::collections::HashMap;

use crate::domain::{ProductKey, ProductRecord};

pub mod query;

pub use query::*;

/// Products from one feed load. Built once by the feed parser, then only read.
#[derive(Debug, Clone, Default)]
pub struct ProductIndex {
    products: HashMap<ProductKey, ProductRecord>,
    replaced: Vec<ProductKey>,
}

impl ProductIndex {
    /// Insert a record. A record with the same key is replaced.
    pub(crate) fn insert(&mut self, record: ProductRecord) {
        let key = record.key();
        if self.products.insert(key.clone(), record).is_some() {
            self.replaced.push(key);
        }
    }

    pub fn get(&self, key: &ProductKey) -> Option<&ProductRecord> {
        self.products.get(key)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Keys that appeared more than once in the feed (once per extra occurrence).
    pub fn replaced(&self) -> &[ProductKey] {
        &self.replaced
    }
}

impl FromIterator<ProductRecord> for ProductIndex {
    fn from_iter<I: IntoIterator<Item = ProductRecord>>(iter: I) -> Self {
        let mut index = ProductIndex::default();
        for record in iter {
            index.insert(record);
        }
        index
    }
}
