//! Elpris — Danish day-ahead retail electricity prices.
//!
//! Takes no arguments. Each invocation:
//! - resolves the EUR→DKK rate (falling back to a fixed rate)
//! - fetches the next 36 hours of DK1/DK2 day-ahead prices
//! - writes `data.csv` (hourly means) and `extrema.csv` (lowest/highest)
//!
//! Feed URLs and output paths may be overridden in `elpris.toml` in the
//! working directory. Log verbosity follows `RUST_LOG` (default `info`).

use anyhow::{Context, Result};
use elpris_core::data::HttpTransport;
use elpris_core::RunConfig;
use elpris_runner::{run_with_settings, RunOutcome, Settings, SETTINGS_FILE};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load_or_default(Path::new(SETTINGS_FILE))
        .with_context(|| format!("loading {SETTINGS_FILE}"))?;

    let config = RunConfig::for_hour_of(chrono::Local::now().naive_local());
    tracing::info!(
        start = %config.window_start,
        end = %config.window_end,
        "fetching day-ahead prices"
    );

    let transport = Arc::new(HttpTransport::new()?);

    match run_with_settings(&config, &settings, transport) {
        Ok(RunOutcome::Written(summary)) => {
            tracing::info!(
                hourly = %summary.artifacts.hourly.display(),
                extrema = %summary.artifacts.extrema.display(),
                dkk_per_eur = summary.rate.dkk_per_eur,
                hours = summary.hours,
                "reports written"
            );
            Ok(())
        }
        Ok(RunOutcome::NoData) => Ok(()),
        Err(e) => {
            tracing::error!(error = %e, "run failed, no reports written");
            Err(e.into())
        }
    }
}
