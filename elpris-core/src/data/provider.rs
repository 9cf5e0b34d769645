//! Transport trait, raw feed records and structured error types.
//!
//! The Transport trait abstracts over how a feed body is retrieved so the rate
//! resolver and market-data fetcher can be driven by scripted bodies in tests.

use crate::domain::LocalTimestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error types for feed operations.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("network unreachable: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("feed returned a markup page instead of JSON")]
    MarkupBody,

    #[error("malformed response body: {0}")]
    MalformedBody(String),

    #[error("invalid feed URL: {0}")]
    InvalidUrl(String),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("giving up after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<FeedError>,
    },
}

/// Why the live exchange rate could not be used. Never surfaces past the resolver.
#[derive(Debug, Error)]
pub enum RateError {
    #[error("rate feed unavailable: {0}")]
    Fetch(#[from] FeedError),

    #[error("no rate quote found in feed body")]
    NoQuote,

    #[error("unparseable rate quote '{0}'")]
    BadQuote(String),
}

/// Retrieves a text body for a URL.
pub trait Transport: Send + Sync {
    fn get_text(&self, url: &str) -> Result<String, FeedError>;
}

/// Blocking HTTP transport. Uses the client's default timeout.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, FeedError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("elpris/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FeedError::ClientBuild(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get_text(&self, url: &str) -> Result<String, FeedError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FeedError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        resp.text().map_err(|e| FeedError::Network(e.to_string()))
    }
}

/// One record from the day-ahead price dataset, before normalization.
///
/// Prices are per MWh; either currency may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "TimeDK")]
    pub time: LocalTimestamp,
    #[serde(rename = "PriceArea")]
    pub area: String,
    #[serde(rename = "DayAheadPriceDKK", default)]
    pub price_dkk: Option<f64>,
    #[serde(rename = "DayAheadPriceEUR", default)]
    pub price_eur: Option<f64>,
}

/// Which price a record actually carries, in priority order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceQuote {
    /// DKK per MWh as published.
    Native(f64),
    /// Only the EUR per MWh value is present.
    Foreign(f64),
    Missing,
}

impl RawRecord {
    pub fn quote(&self) -> PriceQuote {
        match (self.price_dkk, self.price_eur) {
            (Some(dkk), _) => PriceQuote::Native(dkk),
            (None, Some(eur)) => PriceQuote::Foreign(eur),
            (None, None) => PriceQuote::Missing,
        }
    }
}

impl PriceQuote {
    /// DKK per MWh, converting EUR with `rate` (DKK per EUR). Missing is zero.
    pub fn to_native(self, rate: f64) -> f64 {
        match self {
            PriceQuote::Native(dkk) => dkk,
            PriceQuote::Foreign(eur) => eur * rate,
            PriceQuote::Missing => 0.0,
        }
    }
}
