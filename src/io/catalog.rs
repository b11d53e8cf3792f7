//! Read catalog JSON files.
//!
//! ```json
//! {
//!   "codes": {
//!     "gic1yr": { "key": { "type": "3500", "terms": "1", "currency": "CAD" }, "name": "1 Year GIC" }
//!   },
//!   "categories": { "GIC": ["gic1yr"] }
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::domain::Catalog;
use crate::error::{AppError, EXIT_CONFIG};

pub fn read_catalog_json(path: &Path) -> Result<Catalog, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            EXIT_CONFIG,
            format!("Failed to open catalog JSON '{}': {e}", path.display()),
        )
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        AppError::new(
            EXIT_CONFIG,
            format!("Invalid catalog JSON '{}': {e}", path.display()),
        )
    })
}

/// Load the configured catalog, or the built-in one.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, AppError> {
    match path {
        Some(path) => read_catalog_json(path),
        None => Ok(Catalog::builtin()),
    }
}
