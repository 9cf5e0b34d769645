//! EUR→DKK exchange-rate resolution from the central bank's rate feed.
//!
//! The feed is an RSS document whose item descriptions read like
//! "1 EUR koster 746,04 DKK"; the quoted number is per 100 EUR. Items are
//! listed oldest first, so the last quote is the current one.
//!
//! Resolution never fails: any problem is logged and the fallback rate used.

use super::provider::{RateError, Transport};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_RATE_URL: &str =
    "https://www.nationalbanken.dk/api/currencyrates?format=rss&lang=da&isoCodes=EUR";

const QUOTE_LABEL: &str = "koster";
const QUOTE_CURRENCY: &str = "DKK";

/// Where a rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateSource {
    Live,
    Fallback,
}

/// DKK per EUR.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub dkk_per_eur: f64,
    pub source: RateSource,
}

pub struct RateResolver {
    transport: Arc<dyn Transport>,
    url: String,
    fallback: f64,
}

impl RateResolver {
    pub fn new(transport: Arc<dyn Transport>, url: impl Into<String>, fallback: f64) -> Self {
        Self {
            transport,
            url: url.into(),
            fallback,
        }
    }

    /// Resolve the current rate, degrading to the fallback on any error.
    pub fn resolve(&self) -> ExchangeRate {
        match self.try_resolve() {
            Ok(dkk_per_eur) => {
                tracing::info!(dkk_per_eur, "using live EUR rate");
                ExchangeRate {
                    dkk_per_eur,
                    source: RateSource::Live,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, fallback = self.fallback, "live EUR rate unavailable, using fallback");
                ExchangeRate {
                    dkk_per_eur: self.fallback,
                    source: RateSource::Fallback,
                }
            }
        }
    }

    fn try_resolve(&self) -> Result<f64, RateError> {
        let body = self.transport.get_text(&self.url)?;
        let last = scan_quotes(&body).pop().ok_or(RateError::NoQuote)?;
        parse_quote(last)
    }
}

/// Find every `koster <digits-and-commas> DKK` quote, in document order.
///
/// Each separator is one or more whitespace characters.
pub fn scan_quotes(text: &str) -> Vec<&str> {
    let mut quotes = Vec::new();

    for (idx, _) in text.match_indices(QUOTE_LABEL) {
        let rest = &text[idx + QUOTE_LABEL.len()..];

        let after_gap = rest.trim_start();
        if after_gap.len() == rest.len() {
            continue;
        }

        let num_len = after_gap
            .find(|c: char| !(c.is_ascii_digit() || c == ','))
            .unwrap_or(after_gap.len());
        if num_len == 0 {
            continue;
        }
        let (number, tail) = after_gap.split_at(num_len);

        let after_gap = tail.trim_start();
        if after_gap.len() == tail.len() || !after_gap.starts_with(QUOTE_CURRENCY) {
            continue;
        }

        quotes.push(number);
    }

    quotes
}

/// Parse a per-100 quote with a decimal comma into DKK per single EUR.
pub fn parse_quote(quote: &str) -> Result<f64, RateError> {
    let per_hundred: f64 = quote
        .replacen(',', ".", 1)
        .parse()
        .map_err(|_| RateError::BadQuote(quote.to_string()))?;

    if !per_hundred.is_finite() || per_hundred <= 0.0 {
        return Err(RateError::BadQuote(quote.to_string()));
    }

    Ok(per_hundred / 100.0)
}
