use alloy_primitives::U256;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use crate::models::errors::SourceError;
use crate::models::gas::GasTiers;
use crate::utilities::wallet::wei_to_gwei;

/// Current base fee rate, in wei per gas unit.
#[async_trait::async_trait]
pub trait GasPriceSource: Send + Sync {
    async fn fetch_gas_price(&self) -> Result<U256, SourceError>;
}

const SLOW_FACTOR_TENTHS: i64 = 8;
const FAST_FACTOR_TENTHS: i64 = 13;

fn to_gwei_units(value: Decimal) -> u64 {
    value.to_u64().unwrap_or(u64::MAX)
}

/// Derives slow/standard/fast tiers from one base rate in gwei.
pub fn derive_tiers(base_gwei: Decimal) -> GasTiers {
    let base = base_gwei.max(Decimal::ZERO);
    let slow = (base * Decimal::new(SLOW_FACTOR_TENTHS, 1)).floor();
    let fast = (base * Decimal::new(FAST_FACTOR_TENTHS, 1)).ceil();

    GasTiers {
        slow: to_gwei_units(slow).max(1),
        standard: to_gwei_units(base.floor()),
        fast: to_gwei_units(fast),
    }
}

pub async fn fetch_gas_tiers(source: &dyn GasPriceSource) -> Result<GasTiers, SourceError> {
    let wei = source.fetch_gas_price().await?;
    let gwei = wei_to_gwei(wei)?;
    log::debug!("Base fee rate: {} gwei", gwei);
    Ok(derive_tiers(gwei))
}
