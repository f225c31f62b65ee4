use dotenv::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use rust_decimal::Decimal;
use crate::models::errors::ConfigError;
use crate::models::gas::GasTiers;

pub const DEFAULT_RPC_URLS: [&str; 3] = [
    "https://eth-mainnet.g.alchemy.com/v2/demo",
    "https://cloudflare-eth.com",
    "https://ethereum-rpc.publicnode.com",
];
pub const DEFAULT_PRICE_URL: &str = "https://api.coingecko.com/api/v3/simple/price";
pub const DEFAULT_PRICE_FALLBACK_URL: &str = "https://api.coinbase.com/v2/exchange-rates?currency=ETH";
pub const DEFAULT_FIAT_CURRENCY: &str = "eur";
pub const DEFAULT_PRICE_TTL_SECS: u64 = 60;
pub const DEFAULT_FALLBACK_PRICE: u32 = 2500;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Initialize dotenv (only needs to be called once at startup)
pub fn init() {
    if dotenv().is_ok() {
        log::info!("Loaded .env file");
    } else {
        log::debug!("No .env file loaded");
    }
}

/// Fetch an optional environment variable, treating blank values as unset
pub fn get_env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

pub fn parse_rpc_urls(raw: &str) -> Result<Vec<String>, ConfigError> {
    let urls: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect();

    if urls.is_empty() {
        return Err(ConfigError::Empty("DASH_RPC_URLS".to_string()));
    }
    Ok(urls)
}

/// Parses "slow,standard,fast" in gwei.
pub fn parse_gas_tiers(raw: &str) -> Result<GasTiers, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key: "DASH_FALLBACK_GAS".to_string(),
        value: raw.to_string(),
    };

    let parts = raw
        .split(',')
        .map(|p| p.trim().parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;

    match parts.as_slice() {
        [slow, standard, fast] => Ok(GasTiers::new(*slow, *standard, *fast)),
        _ => Err(invalid()),
    }
}

/// Values the snapshot falls back to when a source cannot be read.
#[derive(Debug, Clone, PartialEq)]
pub struct Fallbacks {
    pub price: Decimal,
    pub gas: GasTiers,
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self {
            price: Decimal::from(DEFAULT_FALLBACK_PRICE),
            gas: GasTiers::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashConfig {
    pub rpc_urls: Vec<String>,
    pub price_url: String,
    pub price_fallback_url: String,
    pub fiat_currency: String,
    pub price_ttl: Duration,
    pub request_timeout: Duration,
    pub fallbacks: Fallbacks,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            rpc_urls: DEFAULT_RPC_URLS.iter().map(|u| u.to_string()).collect(),
            price_url: DEFAULT_PRICE_URL.to_string(),
            price_fallback_url: DEFAULT_PRICE_FALLBACK_URL.to_string(),
            fiat_currency: DEFAULT_FIAT_CURRENCY.to_string(),
            price_ttl: Duration::from_secs(DEFAULT_PRICE_TTL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            fallbacks: Fallbacks::default(),
        }
    }
}

impl DashConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(get_env_var)
    }

    /// Builds the configuration from any key lookup, defaulting what is missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = DashConfig::default();

        let rpc_urls = match lookup("DASH_RPC_URLS") {
            Some(raw) => parse_rpc_urls(&raw)?,
            None => defaults.rpc_urls,
        };

        let gas = match lookup("DASH_FALLBACK_GAS") {
            Some(raw) => parse_gas_tiers(&raw)?,
            None => defaults.fallbacks.gas,
        };

        let price: Decimal = parse_or("DASH_FALLBACK_PRICE", lookup("DASH_FALLBACK_PRICE"), defaults.fallbacks.price)?;
        if price.is_sign_negative() {
            return Err(ConfigError::InvalidValue {
                key: "DASH_FALLBACK_PRICE".to_string(),
                value: price.to_string(),
            });
        }

        let ttl_secs = parse_or("DASH_PRICE_TTL_SECS", lookup("DASH_PRICE_TTL_SECS"), DEFAULT_PRICE_TTL_SECS)?;
        let timeout_secs = parse_or("DASH_REQUEST_TIMEOUT_SECS", lookup("DASH_REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS)?;

        Ok(Self {
            rpc_urls,
            price_url: lookup("DASH_PRICE_URL").unwrap_or(defaults.price_url),
            price_fallback_url: lookup("DASH_PRICE_FALLBACK_URL").unwrap_or(defaults.price_fallback_url),
            fiat_currency: lookup("DASH_FIAT_CURRENCY")
                .map(|c| c.trim().to_lowercase())
                .unwrap_or(defaults.fiat_currency),
            price_ttl: Duration::from_secs(ttl_secs),
            request_timeout: Duration::from_secs(timeout_secs),
            fallbacks: Fallbacks { price, gas },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = DashConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.rpc_urls.len(), 3);
        assert_eq!(config.fiat_currency, "eur");
        assert_eq!(config.price_ttl, Duration::from_secs(60));
        assert_eq!(config.fallbacks.price, Decimal::from(2500));
        assert_eq!(config.fallbacks.gas, GasTiers::new(20, 30, 50));
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = DashConfig::from_lookup(lookup_from(&[
            ("DASH_RPC_URLS", "http://a.local, http://b.local"),
            ("DASH_FIAT_CURRENCY", "USD"),
            ("DASH_PRICE_TTL_SECS", "5"),
            ("DASH_FALLBACK_PRICE", "1800.5"),
            ("DASH_FALLBACK_GAS", "2, 3, 4"),
        ])).unwrap();

        assert_eq!(config.rpc_urls, vec!["http://a.local", "http://b.local"]);
        assert_eq!(config.fiat_currency, "usd");
        assert_eq!(config.price_ttl, Duration::from_secs(5));
        assert_eq!(config.fallbacks.price, Decimal::new(18005, 1));
        assert_eq!(config.fallbacks.gas, GasTiers::new(2, 3, 4));
    }

    #[test]
    fn test_invalid_gas_triple_is_rejected() {
        assert!(parse_gas_tiers("20,30").is_err());
        assert!(parse_gas_tiers("20,thirty,50").is_err());
    }

    #[test]
    fn test_negative_fallback_price_is_rejected() {
        let result = DashConfig::from_lookup(lookup_from(&[("DASH_FALLBACK_PRICE", "-1")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_empty_rpc_list_is_rejected() {
        assert!(matches!(parse_rpc_urls(" , "), Err(ConfigError::Empty(_))));
    }
}
