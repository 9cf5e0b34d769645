//! Immutable per-run configuration.
//!
//! Every run parameter is a fixed constant. The only input is the wall-clock
//! time, captured once by the caller and passed to [`RunConfig::for_hour_of`];
//! no component reads the clock itself.

use crate::domain::LocalTimestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Look-ahead window length, in hours, starting at the top of the current hour.
pub const WINDOW_HOURS: i64 = 36;

/// Consumer tax factor (25% VAT).
pub const TAX_FACTOR: f64 = 1.25;

/// DKK per EUR used when the live rate cannot be resolved.
pub const FALLBACK_EUR_RATE: f64 = 7.4604;

/// Total fetch attempts, including the first.
pub const MAX_FETCH_ATTEMPTS: u32 = 3;

/// Fixed pause between failed fetch attempts.
pub const RETRY_BACKOFF: Duration = Duration::from_secs(2);

/// Row-count ceiling sent to the market-data API.
pub const ROW_LIMIT: u32 = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Inclusive window start, top of the hour.
    pub window_start: LocalTimestamp,
    /// Window end, `WINDOW_HOURS` after the start.
    pub window_end: LocalTimestamp,
    pub tax_factor: f64,
    pub fallback_rate: f64,
    pub max_attempts: u32,
    pub retry_backoff: Duration,
    pub row_limit: u32,
}

impl RunConfig {
    /// Build the run configuration for the hour containing `now`.
    ///
    /// The window is computed with plain wall-clock arithmetic; across a
    /// daylight-saving transition it spans 35 or 37 real hours.
    pub fn for_hour_of(now: NaiveDateTime) -> Self {
        let window_start = LocalTimestamp::new(now).truncate_to_hour();
        Self {
            window_start,
            window_end: window_start.plus_hours(WINDOW_HOURS),
            tax_factor: TAX_FACTOR,
            fallback_rate: FALLBACK_EUR_RATE,
            max_attempts: MAX_FETCH_ATTEMPTS,
            retry_backoff: RETRY_BACKOFF,
            row_limit: ROW_LIMIT,
        }
    }
}
