//! Error types.
//!
//! Library code returns typed errors (`FeedError`, `QueryError`) so callers can
//! tell a broken feed from a catalog mismatch from a day with no history.
//! The binary collapses everything into `AppError`, which carries the process
//! exit code.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::ProductKey;

/// Exit code for usage, configuration and catalog problems.
pub const EXIT_CONFIG: u8 = 2;
/// Exit code for a feed that could not be read or parsed.
pub const EXIT_FEED: u8 = 3;
/// Exit code for a failed query.
pub const EXIT_QUERY: u8 = 4;
/// Exit code for a failed notification post.
pub const EXIT_NOTIFY: u8 = 5;

/// A malformed rate feed. Any of these aborts the whole load.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    #[error("XML syntax error: {0}")]
    Xml(String),

    #[error("Unexpected closing tag </{0}>")]
    UnbalancedTag(String),

    #[error("Document has no root element")]
    EmptyDocument,

    #[error("<{parent}> is missing required element <{element}>")]
    MissingElement { parent: String, element: String },

    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    #[error("Invalid date '{value}', expected MM/DD/YYYY")]
    InvalidDate { value: String },

    #[error("Invalid rate '{value}': {reason}")]
    InvalidRate { value: String, reason: String },

    #[error("Product {key} has no rate entries")]
    EmptySeries { key: ProductKey },
}

impl From<quick_xml::Error> for FeedError {
    fn from(err: quick_xml::Error) -> Self {
        FeedError::Xml(err.to_string())
    }
}

/// A query against the product index that could not be answered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The catalog has no such human code.
    #[error("Unknown product code '{code}'")]
    UnknownCode { code: String },

    /// The catalog has no such category.
    #[error("Unknown category '{category}'")]
    UnknownCategory { category: String },

    /// The catalog resolves the code, but the feed never contained the product.
    #[error("No product {key} in the feed (code '{code}')")]
    NoSuchProduct { code: String, key: ProductKey },

    /// The day precedes every recorded effective-date for the product.
    #[error("No historical rate for '{code}' on {day} (history starts {earliest})")]
    NoHistoricalRate {
        code: String,
        day: NaiveDate,
        earliest: NaiveDate,
    },
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<FeedError> for AppError {
    fn from(err: FeedError) -> Self {
        AppError::new(EXIT_FEED, format!("Malformed rate feed: {err}"))
    }
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        AppError::new(EXIT_QUERY, err.to_string())
    }
}
