//! Feed access: transport, exchange-rate resolution and market-data fetching.

pub mod energidata;
pub mod provider;
pub mod rate;

pub use energidata::{MarketDataFetcher, DEFAULT_MARKET_DATA_URL};
pub use provider::{FeedError, HttpTransport, PriceQuote, RateError, RawRecord, Transport};
pub use rate::{ExchangeRate, RateResolver, RateSource, DEFAULT_RATE_URL};
