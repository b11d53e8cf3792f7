//! `rate-watch` library crate.
//!
//! The binary (`ratewatch`) is a thin wrapper around this library so that:
//!
//! - feed parsing and rate queries are testable without spawning processes
//! - the query engine can be reused without the CLI or the notification side

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod index;
pub mod io;
pub mod notify;
pub mod report;
