//! Reporting utilities: terminal summaries and notification text.

pub mod format;

pub use format::*;
