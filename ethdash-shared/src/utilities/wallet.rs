use std::str::FromStr;
use alloy_primitives::U256;
use ethers_core::types::Address;
use ethers_core::utils::to_checksum;
use rust_decimal::{Decimal, RoundingStrategy};
use crate::models::errors::{SourceError, WalletError};

pub const ETH_DECIMALS: u32 = 18;
pub const GWEI_DECIMALS: u32 = 9;

/// Scales an integer amount of base units into a fixed-point decimal.
pub fn scale_units(amount: U256, decimals: u32) -> Result<Decimal, SourceError> {
    let mut value = Decimal::from_str_exact(&amount.to_string())
        .map_err(|e| SourceError::malformed("units", format!("{} does not fit a decimal: {}", amount, e)))?;
    value
        .set_scale(decimals)
        .map_err(|e| SourceError::malformed("units", e.to_string()))?;
    Ok(value.normalize())
}

pub fn wei_to_eth(wei: U256) -> Result<Decimal, SourceError> {
    scale_units(wei, ETH_DECIMALS)
}

pub fn wei_to_gwei(wei: U256) -> Result<Decimal, SourceError> {
    scale_units(wei, GWEI_DECIMALS)
}

/// Rounds half away from zero and pads to exactly `precision` places.
pub fn format_fixed(value: Decimal, precision: u32) -> String {
    let rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", precision as usize, rounded)
}

pub fn format_eth(value: Decimal) -> String {
    format_fixed(value, 4)
}

pub fn format_fiat(value: Decimal) -> String {
    format_fixed(value, 2)
}

pub fn currency_symbol(code: &str) -> String {
    match code.to_lowercase().as_str() {
        "eur" => "€".to_string(),
        "usd" => "$".to_string(),
        "gbp" => "£".to_string(),
        "jpy" => "¥".to_string(),
        other => format!("{} ", other.to_uppercase()),
    }
}

pub fn parse_account(raw: &str) -> Result<Address, WalletError> {
    Address::from_str(raw.trim()).map_err(|_| WalletError::InvalidAddress(raw.to_string()))
}

/// Shortens an account to `0x1234...abcd` using its checksummed form.
pub fn format_address(account: &Address) -> String {
    let full = to_checksum(account, None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}
