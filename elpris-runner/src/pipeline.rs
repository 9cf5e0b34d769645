//! Single-run orchestration.
//!
//! Resolves the exchange rate, fetches the window, normalizes and aggregates,
//! then writes both reports. Only fetch exhaustion or an empty dataset stop
//! the run early; in both cases nothing is written.

use crate::report::{ReportError, ReportPaths, ReportWriter};
use crate::settings::Settings;
use elpris_core::data::{ExchangeRate, FeedError, MarketDataFetcher, RateResolver, Transport};
use elpris_core::pricing::{aggregate_hourly, normalize_all, partition, zone_extrema};
use elpris_core::{PerZone, RunConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("market data unavailable: {0}")]
    Fetch(#[from] FeedError),

    #[error("report output failed: {0}")]
    Report(#[from] ReportError),
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub rate: ExchangeRate,
    pub records: usize,
    pub discarded: usize,
    pub points: PerZone<usize>,
    pub hours: usize,
    pub artifacts: ReportPaths,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Written(RunSummary),
    /// The feed answered with zero records. No artifacts were written.
    NoData,
}

pub fn run(
    config: &RunConfig,
    rates: &RateResolver,
    fetcher: &MarketDataFetcher,
    writer: &ReportWriter,
) -> Result<RunOutcome, RunError> {
    let rate = rates.resolve();

    let records = fetcher.fetch(config)?;
    if records.is_empty() {
        tracing::error!(
            start = %config.window_start,
            end = %config.window_end,
            "no price data received for window"
        );
        return Ok(RunOutcome::NoData);
    }

    let normalized = normalize_all(&records, rate.dkk_per_eur, config.tax_factor);
    let series = partition(normalized.points);
    let hourly = aggregate_hourly(&series);
    let extrema = zone_extrema(&series);

    let points = series.map(|_, s| s.len());
    tracing::info!(
        dk1 = points.dk1,
        dk2 = points.dk2,
        discarded = normalized.discarded,
        hours = hourly.len(),
        "prices normalized"
    );

    let artifacts = writer.write(&hourly, &extrema)?;

    Ok(RunOutcome::Written(RunSummary {
        rate,
        records: records.len(),
        discarded: normalized.discarded,
        points,
        hours: hourly.len(),
        artifacts,
    }))
}

/// Wire the feeds and writer from settings, then [`run`].
pub fn run_with_settings(
    config: &RunConfig,
    settings: &Settings,
    transport: Arc<dyn Transport>,
) -> Result<RunOutcome, RunError> {
    let rates = RateResolver::new(
        transport.clone(),
        settings.feeds.rate_url.clone(),
        config.fallback_rate,
    );
    let fetcher = MarketDataFetcher::new(transport, settings.feeds.market_data_url.clone(), config);
    let writer = ReportWriter::new(ReportPaths {
        hourly: settings.output.hourly_report.clone(),
        extrema: settings.output.extrema_report.clone(),
    });

    run(config, &rates, &fetcher, &writer)
}
