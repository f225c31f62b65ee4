use serde::{Deserialize, Serialize};

/// Fee-rate tiers in gwei, derived from a single observed base rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasTiers {
    pub slow: u64,
    pub standard: u64,
    pub fast: u64,
}

impl GasTiers {
    pub const fn new(slow: u64, standard: u64, fast: u64) -> Self {
        Self { slow, standard, fast }
    }
}

impl Default for GasTiers {
    fn default() -> Self {
        GasTiers::new(20, 30, 50)
    }
}

/// Tiers handed to the display, flagged when they are the configured fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasReading {
    pub tiers: GasTiers,
    pub is_fallback: bool,
}
