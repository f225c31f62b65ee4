use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Last successful fiat price reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    pub value: Decimal,
    pub fetched_at: Instant,
}

impl PriceQuote {
    pub fn new(value: Decimal, fetched_at: Instant) -> Self {
        Self { value, fetched_at }
    }

    pub fn age(&self, now: Instant) -> std::time::Duration {
        now.saturating_duration_since(self.fetched_at)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceOrigin {
    /// Fetched from the price source during this call
    Fresh,
    /// Served from the cache inside the freshness window
    Cached,
    /// The source failed and an older cached value was reused
    Stale,
    /// The source failed and nothing usable was cached
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceReading {
    pub value: Decimal,
    pub origin: PriceOrigin,
}

impl PriceReading {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, PriceOrigin::Stale | PriceOrigin::Default)
    }
}
