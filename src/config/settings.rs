//! Application settings loaded from environment variables.
//!
//! Values are read after `.env` has been loaded, so they can come from either
//! the file or the process environment. Every setting has a default.

use crate::errors::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Default `SQLite` database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/service_booking.sqlite?mode=rwc";
/// Default catalog file location
pub const DEFAULT_CATALOG_PATH: &str = "catalog.toml";
/// Default simulated submission delay in milliseconds
pub const DEFAULT_SUBMISSION_DELAY_MS: u64 = 1500;

/// Runtime settings for the booking service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Where the wizard state snapshot is stored (`DATABASE_URL`)
    pub database_url: String,
    /// Catalog override file (`CATALOG_PATH`)
    pub catalog_path: PathBuf,
    /// Delay of the simulated submission call (`SUBMISSION_DELAY_MS`)
    pub submission_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            submission_delay: Duration::from_millis(DEFAULT_SUBMISSION_DELAY_MS),
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from an arbitrary variable lookup, falling back to
    /// defaults for anything unset.
    ///
    /// # Errors
    /// Returns `Error::Config` if `SUBMISSION_DELAY_MS` is not a whole number.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let submission_delay = match lookup("SUBMISSION_DELAY_MS") {
            Some(raw) => {
                let millis = raw.trim().parse::<u64>().map_err(|e| Error::Config {
                    message: format!("SUBMISSION_DELAY_MS must be a whole number of milliseconds: {e}"),
                })?;
                Duration::from_millis(millis)
            }
            None => defaults.submission_delay,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            catalog_path: lookup("CATALOG_PATH").map_or(defaults.catalog_path, PathBuf::from),
            submission_delay,
        })
    }
}
