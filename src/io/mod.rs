//! Input helpers.
//!
//! - XML element tree (`xml`)
//! - rate feed parsing into a `ProductIndex` (`feed`)
//! - catalog JSON loading (`catalog`)

pub mod catalog;
pub mod feed;
pub mod xml;

pub use catalog::*;
pub use feed::*;
