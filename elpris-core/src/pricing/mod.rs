//! Price pipeline: normalize raw records, split by zone, then aggregate.
//!
//! ```text
//! RawRecord ──normalize──▶ PricePoint ──partition──▶ ZoneSeries ─┬─▶ hourly means
//!                                                                └─▶ extrema
//! ```

pub mod extrema;
pub mod hourly;
pub mod normalize;
pub mod partition;

pub use extrema::{find_extrema, zone_extrema, Extrema, SENTINEL_TIME};
pub use hourly::{aggregate_hourly, HourlyRow};
pub use normalize::{normalize, normalize_all, retail_price, Normalized};
pub use partition::{partition, ZoneSeries};
