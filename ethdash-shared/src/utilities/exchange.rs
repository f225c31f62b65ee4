use std::collections::HashMap;
use std::future::Future;
use std::str::FromStr;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use crate::models::errors::SourceError;
use crate::utilities::config::DashConfig;
use crate::utilities::rpc::{shared_http_client, validate_response};

/// Spot price of ETH in the configured fiat currency.
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_price(&self) -> Result<Decimal, SourceError>;
}

#[derive(Debug, Deserialize)]
struct CoinbaseResponse {
    data: CoinbaseData,
}

#[derive(Debug, Deserialize)]
struct CoinbaseData {
    rates: HashMap<String, String>,
}

/// Reads a JSON number or numeric string without going through `f64`.
pub fn decimal_from_json(source: &str, value: &Value) -> Result<Decimal, SourceError> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => return Err(SourceError::malformed(source, format!("expected a number, got {}", other))),
    };

    let parsed = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| SourceError::malformed(source, format!("{}: {}", text, e)))?;

    if parsed.is_sign_negative() {
        return Err(SourceError::malformed(source, format!("negative price {}", parsed)));
    }
    Ok(parsed)
}

pub struct ExchangeRateManager {
    client: Client,
    price_url: String,
    fallback_url: String,
    fiat_currency: String,
}

impl ExchangeRateManager {
    pub fn new(price_url: &str, fallback_url: &str, fiat_currency: &str) -> Self {
        Self::with_client(shared_http_client(), price_url, fallback_url, fiat_currency)
    }

    pub fn with_client(client: Client, price_url: &str, fallback_url: &str, fiat_currency: &str) -> Self {
        Self {
            client,
            price_url: price_url.to_string(),
            fallback_url: fallback_url.to_string(),
            fiat_currency: fiat_currency.to_lowercase(),
        }
    }

    pub fn from_config(client: Client, config: &DashConfig) -> Self {
        Self::with_client(client, &config.price_url, &config.price_fallback_url, &config.fiat_currency)
    }

    pub fn fiat_currency(&self) -> &str {
        &self.fiat_currency
    }

    pub async fn get_latest_rate(&self) -> Result<Decimal, SourceError> {
        self.fetch_exchange_rate(
            || async { self.fetch_coingecko_rate().await },
            || async { self.fetch_coinbase_rate().await },
        ).await
    }

    async fn fetch_exchange_rate<F, Fut, G, Fut2>(&self,
        fetch_primary: F,
        fetch_secondary: G,
    ) -> Result<Decimal, SourceError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output=Result<Decimal, SourceError>>,
        G: Fn() -> Fut2,
        Fut2: Future<Output=Result<Decimal, SourceError>>,
    {
        match fetch_primary().await {
            Ok(rate) => return Ok(rate),
            Err(e) => log::warn!("Primary price source failed, trying secondary: {}", e),
        }

        fetch_secondary().await
    }

    fn coingecko_url(&self) -> String {
        let separator = if self.price_url.contains('?') { '&' } else { '?' };
        format!("{}{}ids=ethereum&vs_currencies={}", self.price_url, separator, self.fiat_currency)
    }

    async fn fetch_coingecko_rate(&self) -> Result<Decimal, SourceError> {
        let response = self.client.get(self.coingecko_url()).send().await;
        let body = validate_response("CoinGecko", response).await?;

        let price = body
            .get("ethereum")
            .and_then(|asset| asset.get(&self.fiat_currency))
            .ok_or_else(|| SourceError::malformed("CoinGecko", format!("missing ethereum.{}", self.fiat_currency)))?;

        decimal_from_json("CoinGecko", price)
    }

    async fn fetch_coinbase_rate(&self) -> Result<Decimal, SourceError> {
        let response = self.client.get(&self.fallback_url).send().await;
        let body = validate_response("Coinbase", response).await?;
        let parsed: CoinbaseResponse = serde_json::from_value(body)?;

        let rate = parsed.data.rates
            .get(&self.fiat_currency.to_uppercase())
            .ok_or_else(|| SourceError::malformed("Coinbase", format!("missing rate for {}", self.fiat_currency)))?;

        decimal_from_json("Coinbase", &Value::String(rate.clone()))
    }
}

#[async_trait::async_trait]
impl PriceSource for ExchangeRateManager {
    async fn fetch_price(&self) -> Result<Decimal, SourceError> {
        self.get_latest_rate().await
    }
}
