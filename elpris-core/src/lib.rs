//! Elpris Core — domain types, feed clients and the price pipeline.
//!
//! This crate contains everything up to, but not including, report output:
//! - Domain types (zones, zone-local timestamps, price points)
//! - The immutable per-run configuration
//! - Exchange-rate resolution with a fixed fallback
//! - Market-data fetching with bounded retry
//! - Normalization, zone partitioning, hourly averaging and extrema

pub mod config;
pub mod data;
pub mod domain;
pub mod pricing;

pub use config::RunConfig;
pub use domain::{LocalTimestamp, PerZone, PricePoint, Zone};
