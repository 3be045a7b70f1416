use std::time::Duration;

use async_trait::async_trait;
use shared::Holiday;
use thiserror::Error;

/// Holiday fetch failure
#[derive(Debug, Error)]
pub enum HolidayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("holiday service answered with status {0}")]
    Status(u16),

    #[error("invalid holiday payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can list the public holidays of a year
#[async_trait]
pub trait HolidaySource: Send + Sync {
    async fn fetch_year(&self, year: i32) -> Result<Vec<Holiday>, HolidayError>;
}

/// Reads holidays from the public HTTP API
#[derive(Debug, Clone)]
pub struct HttpHolidaySource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpHolidaySource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, HolidayError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn year_url(&self, year: i32) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), year)
    }
}

#[async_trait]
impl HolidaySource for HttpHolidaySource {
    async fn fetch_year(&self, year: i32) -> Result<Vec<Holiday>, HolidayError> {
        let url = self.year_url(year);
        tracing::debug!("Fetching holidays from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HolidayError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_holidays(&body)
    }
}

/// Decode the service's JSON array, reading only `date` and `name`.
pub fn parse_holidays(body: &str) -> Result<Vec<Holiday>, HolidayError> {
    Ok(serde_json::from_str(body)?)
}
