use ethers_core::types::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Native balance of the connected account, in ETH.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub account: Address,
    pub eth: Decimal,
}

impl AccountBalance {
    pub fn new(account: Address, eth: Decimal) -> Self {
        Self { account, eth }
    }

    /// Shown while the read failed or nothing is connected.
    pub fn zero(account: Address) -> Self {
        Self::new(account, Decimal::ZERO)
    }
}
