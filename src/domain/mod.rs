//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - product identity and rate history (`ProductKey`, `RateSeries`, `ProductRecord`)
//! - the static product catalog (`Catalog`)

pub mod catalog;
pub mod types;

pub use catalog::*;
pub use types::*;
