use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_HOLIDAY_API_URL: &str = "https://api-colombia.com/api/v1/holiday/year";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicesConfig {
    /// Holiday endpoint; the year is appended as the last path segment
    pub holiday_api_url: String,
    pub holiday_fetch_timeout: Duration,
    pub expiry_sweep_interval: Duration,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            holiday_api_url: DEFAULT_HOLIDAY_API_URL.to_string(),
            holiday_fetch_timeout: Duration::from_secs(10),
            expiry_sweep_interval: Duration::from_secs(60),
        }
    }
}

impl ServicesConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key/value source, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            holiday_api_url: lookup("HOLIDAY_API_URL")
                .unwrap_or_else(|| DEFAULT_HOLIDAY_API_URL.to_string()),
            holiday_fetch_timeout: Duration::from_secs(
                lookup("HOLIDAY_FETCH_TIMEOUT_SECS")
                    .unwrap_or_else(|| "10".to_string())
                    .parse()
                    .context("HOLIDAY_FETCH_TIMEOUT_SECS must be a valid number")?,
            ),
            expiry_sweep_interval: Duration::from_secs(
                lookup("EXPIRY_SWEEP_INTERVAL_SECS")
                    .unwrap_or_else(|| "60".to_string())
                    .parse()
                    .context("EXPIRY_SWEEP_INTERVAL_SECS must be a valid number")?,
            ),
        })
    }
}
