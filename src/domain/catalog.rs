//! Product catalog: stable human codes, display names and categories.
//!
//! The catalog is plain configuration data. It is loaded once at startup
//! (see `io::catalog`) and handed to the query layer by reference.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::ProductKey;

/// What a human code (e.g. `gic1yr`) stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub key: ProductKey,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub codes: HashMap<String, CatalogEntry>,
    /// Category name -> member codes. Member order is report order.
    #[serde(default)]
    pub categories: HashMap<String, Vec<String>>,
}

/// The GIC catalog: `(code, type, terms, name)` in report order.
const GIC_PRODUCTS: [(&str, &str, &str, &str); 9] = [
    ("shorttermgic90days", "3504", "90", "90 Day GIC"),
    ("shorttermgic180days", "3504", "180", "180 Day GIC"),
    ("shorttermgic270days", "3504", "270", "270 Day GIC"),
    ("gic1yr", "3500", "1", "1 Year GIC"),
    ("gic18month", "3500", "1.5", "1.5 Year GIC"),
    ("gic2yr", "3500", "2", "2 Year GIC"),
    ("gic3yr", "3500", "3", "3 Year GIC"),
    ("gic4yr", "3500", "4", "4 Year GIC"),
    ("gic5yr", "3500", "5", "5 Year GIC"),
];

pub const GIC_CATEGORY: &str = "GIC";

impl Catalog {
    /// Catalog used when no catalog file is configured.
    pub fn builtin() -> Self {
        let mut catalog = Catalog::default();
        let mut members = Vec::with_capacity(GIC_PRODUCTS.len());
        for (code, product_type, terms, name) in GIC_PRODUCTS {
            catalog.codes.insert(
                code.to_string(),
                CatalogEntry {
                    key: ProductKey::new(product_type, terms, "CAD"),
                    name: name.to_string(),
                },
            );
            members.push(code.to_string());
        }
        catalog.categories.insert(GIC_CATEGORY.to_string(), members);
        catalog
    }

    pub fn entry(&self, code: &str) -> Option<&CatalogEntry> {
        self.codes.get(code)
    }

    pub fn category(&self, name: &str) -> Option<&[String]> {
        self.categories.get(name).map(Vec::as_slice)
    }

    /// Category names, sorted for stable output.
    pub fn category_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.categories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
