use std::sync::Arc;
use chrono::Local;
use ethers_core::types::Address;
use rust_decimal::Decimal;
use crate::models::errors::SourceError;
use crate::models::gas::{GasReading, GasTiers};
use crate::models::snapshot::{Snapshot, SnapshotFlags};
use crate::services::price_cache::PriceCache;
use crate::utilities::config::{DashConfig, Fallbacks};
use crate::utilities::exchange::{ExchangeRateManager, PriceSource};
use crate::utilities::gas::{fetch_gas_tiers, GasPriceSource};
use crate::models::wallet::AccountBalance;
use crate::utilities::logging::log_source_error;
use crate::utilities::rpc::{build_http_client, BalanceSource, RpcClient};
use crate::utilities::wallet::wei_to_eth;

/// Everything one dashboard session needs to read chain and price data.
pub struct DashContext {
    balances: Arc<dyn BalanceSource>,
    fees: Arc<dyn GasPriceSource>,
    prices: PriceCache,
    fallbacks: Fallbacks,
    fiat_currency: String,
}

impl DashContext {
    pub fn new(
        balances: Arc<dyn BalanceSource>,
        fees: Arc<dyn GasPriceSource>,
        prices: Arc<dyn PriceSource>,
        config: &DashConfig,
    ) -> Self {
        Self {
            balances,
            fees,
            prices: PriceCache::new(prices, config.price_ttl, config.fallbacks.price),
            fallbacks: config.fallbacks.clone(),
            fiat_currency: config.fiat_currency.clone(),
        }
    }

    /// Wires the public RPC endpoints and price APIs named in the config.
    pub fn from_config(config: &DashConfig) -> Result<Self, SourceError> {
        let client = build_http_client(config.request_timeout)?;
        let rpc = Arc::new(RpcClient::with_client(client.clone(), config.rpc_urls.clone()));
        let prices = Arc::new(ExchangeRateManager::from_config(client, config));

        Ok(Self::new(rpc.clone(), rpc, prices, config))
    }

    pub fn fallbacks(&self) -> &Fallbacks {
        &self.fallbacks
    }

    pub fn fiat_currency(&self) -> &str {
        &self.fiat_currency
    }

    pub async fn fetch_balance(&self, account: &Address) -> Result<AccountBalance, SourceError> {
        let wei = self.balances.fetch_balance(account).await?;
        Ok(AccountBalance::new(*account, wei_to_eth(wei)?))
    }

    pub async fn fetch_gas(&self) -> Result<GasTiers, SourceError> {
        fetch_gas_tiers(self.fees.as_ref()).await
    }

    pub async fn load_gas(&self) -> GasReading {
        self.gas_or_fallback(self.fetch_gas().await)
    }

    fn gas_or_fallback(&self, result: Result<GasTiers, SourceError>) -> GasReading {
        match result {
            Ok(tiers) => GasReading { tiers, is_fallback: false },
            Err(e) => {
                log_source_error("GasFetchFailed", &e);
                GasReading { tiers: self.fallbacks.gas, is_fallback: true }
            }
        }
    }

    /// Reads balance, price and gas concurrently. Never fails: each branch that
    /// errors is replaced by its fallback and flagged in `degraded`.
    pub async fn load_snapshot(&self, account: &Address) -> Snapshot {
        let (balance, price, gas) = tokio::join!(
            self.fetch_balance(account),
            self.prices.read_price(),
            self.fetch_gas()
        );

        let mut degraded = SnapshotFlags::empty();

        let balance = match balance {
            Ok(balance) => balance,
            Err(e) => {
                log_source_error("BalanceFetchFailed", &e);
                degraded |= SnapshotFlags::BALANCE_FALLBACK;
                AccountBalance::zero(*account)
            }
        };

        if price.is_fallback() {
            degraded |= SnapshotFlags::PRICE_FALLBACK;
        }

        // A quote too large to multiply is as unusable as a failed fetch
        let (price, total_value) = match balance.eth.checked_mul(price.value) {
            Some(total) => (price.value, total),
            None => {
                let e = SourceError::malformed("price", format!("{} ETH at {} overflows", balance.eth, price.value));
                log_source_error("TotalValueOverflow", &e);
                degraded |= SnapshotFlags::PRICE_FALLBACK;

                let fallback = self.fallbacks.price;
                (fallback, balance.eth.checked_mul(fallback).unwrap_or(Decimal::ZERO))
            }
        };

        let gas = self.gas_or_fallback(gas);
        if gas.is_fallback {
            degraded |= SnapshotFlags::GAS_FALLBACK;
        }

        Snapshot {
            balance,
            price,
            total_value,
            gas: gas.tiers,
            refreshed_at: Local::now(),
            degraded,
        }
    }
}
