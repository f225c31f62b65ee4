use std::sync::Arc;
use std::time::Duration;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tokio::time::Instant;
use crate::models::price::{PriceOrigin, PriceQuote, PriceReading};
use crate::utilities::exchange::PriceSource;
use crate::utilities::logging::log_source_error;

/// Single-slot time-to-live cache in front of a [`PriceSource`].
///
/// The slot lock is only held to read or overwrite the quote, never across the
/// outbound request, so concurrent callers during a miss may each fetch.
pub struct PriceCache {
    source: Arc<dyn PriceSource>,
    slot: RwLock<Option<PriceQuote>>,
    ttl: Duration,
    fallback: Decimal,
}

impl PriceCache {
    pub fn new(source: Arc<dyn PriceSource>, ttl: Duration, fallback: Decimal) -> Self {
        Self {
            source,
            slot: RwLock::new(None),
            ttl,
            fallback,
        }
    }

    pub async fn current(&self) -> Option<PriceQuote> {
        *self.slot.read().await
    }

    pub async fn get_price(&self) -> Decimal {
        self.read_price().await.value
    }

    pub async fn read_price(&self) -> PriceReading {
        let now = Instant::now();
        let cached = self.current().await;

        if let Some(quote) = cached {
            if !quote.value.is_zero() && quote.age(now) < self.ttl {
                return PriceReading { value: quote.value, origin: PriceOrigin::Cached };
            }
        }

        match self.source.fetch_price().await {
            Ok(value) => {
                *self.slot.write().await = Some(PriceQuote::new(value, now));
                log::debug!("Fetched fiat price {}", value);
                PriceReading { value, origin: PriceOrigin::Fresh }
            }
            Err(e) => {
                log_source_error("PriceFetchFailed", &e);

                // Another caller may have refreshed the slot while we were waiting
                match self.current().await {
                    Some(quote) if !quote.value.is_zero() => {
                        PriceReading { value: quote.value, origin: PriceOrigin::Stale }
                    }
                    _ => PriceReading { value: self.fallback, origin: PriceOrigin::Default },
                }
            }
        }
    }
}
