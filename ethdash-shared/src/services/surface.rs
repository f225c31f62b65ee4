use std::collections::{BTreeMap, BTreeSet};
use serde::{Deserialize, Serialize};

/// Named display regions of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Region {
    ConnectButton,
    NetworkBadge,
    StatusDot,
    StatusText,
    TotalValue,
    EthBalance,
    EthHoldings,
    EthValue,
    GasSlow,
    GasStandard,
    GasFast,
    GasTime,
    RefreshGas,
    RefreshTokens,
}

impl Region {
    pub fn id(&self) -> &'static str {
        match self {
            Region::ConnectButton => "connectBtn",
            Region::NetworkBadge => "networkBadge",
            Region::StatusDot => "statusDot",
            Region::StatusText => "statusText",
            Region::TotalValue => "totalValue",
            Region::EthBalance => "ethBalance",
            Region::EthHoldings => "ethHoldings",
            Region::EthValue => "ethValue",
            Region::GasSlow => "gasSlow",
            Region::GasStandard => "gasStandard",
            Region::GasFast => "gasFast",
            Region::GasTime => "gasTime",
            Region::RefreshGas => "refreshGas",
            Region::RefreshTokens => "refreshTokens",
        }
    }
}

/// Visual state toggles a region can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFlag {
    Online,
    Connected,
    Mainnet,
    Loading,
    Disabled,
}

/// Where the dashboard renders. Implementations decide how text and flags are shown.
pub trait RenderSurface: Send {
    fn set_text(&mut self, region: Region, text: &str);

    fn set_flag(&mut self, region: Region, flag: DisplayFlag, on: bool);

    /// Blocking, user-facing message (the only error the user ever sees).
    fn notify(&mut self, message: &str);
}

/// Surface that just remembers what was rendered; used by tests and captures.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MemorySurface {
    texts: BTreeMap<Region, String>,
    flags: BTreeSet<(Region, DisplayFlag)>,
    notifications: Vec<String>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, region: Region) -> Option<&str> {
        self.texts.get(&region).map(String::as_str)
    }

    pub fn has_flag(&self, region: Region, flag: DisplayFlag) -> bool {
        self.flags.contains(&(region, flag))
    }

    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    /// Rendered text keyed by element id.
    pub fn regions(&self) -> BTreeMap<&'static str, String> {
        self.texts
            .iter()
            .map(|(region, text)| (region.id(), text.clone()))
            .collect()
    }
}

impl RenderSurface for MemorySurface {
    fn set_text(&mut self, region: Region, text: &str) {
        self.texts.insert(region, text.to_string());
    }

    fn set_flag(&mut self, region: Region, flag: DisplayFlag, on: bool) {
        if on {
            self.flags.insert((region, flag));
        } else {
            self.flags.remove(&(region, flag));
        }
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }
}
