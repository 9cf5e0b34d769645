//! Day-ahead price records from the Energi Data Service dataset API.
//!
//! Requests the fixed look-ahead window for both zones. A failed request or a
//! body that is not the expected JSON object (the API sometimes serves an HTML
//! error page) is retried a bounded number of times with a fixed pause.

use super::provider::{FeedError, RawRecord, Transport};
use crate::config::RunConfig;
use crate::domain::Zone;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_MARKET_DATA_URL: &str = "https://api.energidataservice.dk/dataset/DayAheadPrices";

#[derive(Debug, Deserialize)]
struct DatasetResponse {
    #[serde(default)]
    records: Option<Vec<RawRecord>>,
}

pub struct MarketDataFetcher {
    transport: Arc<dyn Transport>,
    base_url: String,
    max_attempts: u32,
    backoff: Duration,
}

impl MarketDataFetcher {
    pub fn new(transport: Arc<dyn Transport>, base_url: impl Into<String>, config: &RunConfig) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            max_attempts: config.max_attempts.max(1),
            backoff: config.retry_backoff,
        }
    }

    /// Build the dataset query URL for the configured window and both zones.
    pub fn request_url(&self, config: &RunConfig) -> Result<String, FeedError> {
        let codes: Vec<&str> = Zone::ALL.iter().map(|z| z.code()).collect();
        let filter = serde_json::json!({ "PriceArea": codes }).to_string();

        let url = reqwest::Url::parse_with_params(
            &self.base_url,
            &[
                ("start", config.window_start.to_query_param()),
                ("end", config.window_end.to_query_param()),
                ("filter", filter),
                ("limit", config.row_limit.to_string()),
            ],
        )
        .map_err(|e| FeedError::InvalidUrl(format!("{}: {e}", self.base_url)))?;

        Ok(url.into())
    }

    /// Fetch all raw records in the window. An empty list is a valid result.
    pub fn fetch(&self, config: &RunConfig) -> Result<Vec<RawRecord>, FeedError> {
        let url = self.request_url(config)?;
        let mut attempt = 1;

        loop {
            match self.fetch_once(&url) {
                Ok(records) => {
                    tracing::info!(records = records.len(), attempt, "fetched day-ahead prices");
                    return Ok(records);
                }
                Err(e) => {
                    tracing::warn!(attempt, max_attempts = self.max_attempts, error = %e, "market data fetch failed");
                    if attempt >= self.max_attempts {
                        return Err(FeedError::RetriesExhausted {
                            attempts: attempt,
                            last: Box::new(e),
                        });
                    }
                }
            }

            std::thread::sleep(self.backoff);
            attempt += 1;
        }
    }

    fn fetch_once(&self, url: &str) -> Result<Vec<RawRecord>, FeedError> {
        let body = self.transport.get_text(url)?;
        parse_body(&body)
    }
}

/// Parse a dataset response body into raw records.
pub fn parse_body(body: &str) -> Result<Vec<RawRecord>, FeedError> {
    if body.trim_start().starts_with('<') {
        return Err(FeedError::MarkupBody);
    }

    let resp: DatasetResponse =
        serde_json::from_str(body).map_err(|e| FeedError::MalformedBody(e.to_string()))?;
    Ok(resp.records.unwrap_or_default())
}
