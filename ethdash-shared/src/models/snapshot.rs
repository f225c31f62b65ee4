use bitflags::bitflags;
use chrono::{DateTime, Local};
use ethers_core::types::Address;
use rust_decimal::Decimal;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use crate::models::gas::GasTiers;
use crate::models::wallet::AccountBalance;

bitflags! {
    /// Fields of a snapshot that carry a fallback instead of a live reading.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct SnapshotFlags: u32 {
        const BALANCE_FALLBACK = 0b00000001;
        const PRICE_FALLBACK = 0b00000010;
        const GAS_FALLBACK = 0b00000100;
    }
}

impl Default for SnapshotFlags {
    fn default() -> Self {
        SnapshotFlags::empty()
    }
}

pub fn serialize_flags_as_strings<S>(flags: &SnapshotFlags, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut seq = serializer.serialize_seq(None)?;
    for flag in SnapshotFlags::all().iter() {
        if flags.contains(flag) {
            let label = match flag {
                SnapshotFlags::BALANCE_FALLBACK => "BALANCE_FALLBACK",
                SnapshotFlags::PRICE_FALLBACK => "PRICE_FALLBACK",
                SnapshotFlags::GAS_FALLBACK => "GAS_FALLBACK",
                _ => "UNKNOWN",
            };
            seq.serialize_element(label)?;
        }
    }
    seq.end()
}

/// Joined balance, price and fee-rate reads for one render cycle.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub balance: AccountBalance,
    pub price: Decimal,
    #[serde(rename = "totalValue")]
    pub total_value: Decimal,
    pub gas: GasTiers,
    #[serde(rename = "refreshedAt")]
    pub refreshed_at: DateTime<Local>,
    #[serde(serialize_with = "serialize_flags_as_strings")]
    pub degraded: SnapshotFlags,
}

impl Snapshot {
    pub fn account(&self) -> Address {
        self.balance.account
    }

    pub fn is_complete(&self) -> bool {
        self.degraded.is_empty()
    }
}
