//! Elpris Runner — settings, report artifacts and run orchestration.
//!
//! This crate builds on `elpris-core` to provide:
//! - TOML settings for feed endpoints and artifact paths
//! - CSV rendering of the hourly table and the extrema summary
//! - The single-run pipeline with its outcome and summary

pub mod pipeline;
pub mod report;
pub mod settings;

pub use pipeline::{run, run_with_settings, RunError, RunOutcome, RunSummary};
pub use report::{
    render_extrema_csv, render_hourly_csv, to_fixed, ReportError, ReportPaths, ReportWriter,
};
pub use settings::{Settings, SettingsError, SETTINGS_FILE};
