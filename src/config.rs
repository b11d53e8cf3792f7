//! Runtime settings from the environment (and `.env`).
//!
//! | variable              | meaning                                   |
//! |-----------------------|-------------------------------------------|
//! | `RATES_FEED_PATH`     | rates-history XML feed                    |
//! | `RATES_CATALOG_PATH`  | catalog JSON (built-in GIC catalog if unset) |
//! | `RATES_WEBHOOK_URL`   | notification webhook for `publish`        |
//! | `RATES_WEBHOOK_TOKEN` | bearer token for the webhook (optional)   |
//! | `RATES_LOG`           | log level (`error` .. `trace`)            |
//!
//! CLI flags take precedence over these.

use std::path::PathBuf;

use tracing::Level;

use crate::error::{AppError, EXIT_CONFIG};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub feed_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub webhook_url: Option<String>,
    pub webhook_token: Option<String>,
    pub log_level: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any variable source; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            feed_path: get("RATES_FEED_PATH").map(PathBuf::from),
            catalog_path: get("RATES_CATALOG_PATH").map(PathBuf::from),
            webhook_url: get("RATES_WEBHOOK_URL"),
            webhook_token: get("RATES_WEBHOOK_TOKEN"),
            log_level: get("RATES_LOG"),
        }
    }

    pub fn require_feed_path(&self) -> Result<PathBuf, AppError> {
        self.feed_path.clone().ok_or_else(|| {
            AppError::new(
                EXIT_CONFIG,
                "No rate feed configured: pass --feed or set RATES_FEED_PATH.",
            )
        })
    }
}

pub fn parse_log_level(raw: &str) -> Result<Level, AppError> {
    raw.parse::<Level>()
        .map_err(|_| AppError::new(EXIT_CONFIG, format!("Invalid log level '{raw}'.")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn reads_variables_and_ignores_blanks() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("RATES_FEED_PATH", "data/RatesHistory.xml"),
            ("RATES_WEBHOOK_URL", "  "),
            ("RATES_LOG", "debug"),
        ]);
        let settings = Settings::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(settings.feed_path, Some(PathBuf::from("data/RatesHistory.xml")));
        assert_eq!(settings.webhook_url, None);
        assert_eq!(settings.catalog_path, None);
        assert_eq!(settings.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn missing_feed_is_a_config_error() {
        let err = Settings::default().require_feed_path().unwrap_err();
        assert_eq!(err.exit_code(), EXIT_CONFIG);
    }

    #[test]
    fn log_levels() {
        assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("WARN").unwrap(), Level::WARN);
        assert!(parse_log_level("loud").is_err());
    }
}
