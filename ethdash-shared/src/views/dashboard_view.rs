use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::Serialize;
use crate::models::gas::GasTiers;
use crate::models::snapshot::Snapshot;
use crate::services::surface::{Region, RenderSurface};
use crate::utilities::wallet::{currency_symbol, format_eth, format_fiat};

/// Display strings for the fee-rate panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GasView {
    pub slow: String,
    pub standard: String,
    pub fast: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl GasView {
    pub fn new(tiers: &GasTiers, at: DateTime<Local>) -> Self {
        Self {
            slow: tiers.slow.to_string(),
            standard: tiers.standard.to_string(),
            fast: tiers.fast.to_string(),
            updated_at: at.format("%H:%M:%S").to_string(),
        }
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        surface.set_text(Region::GasSlow, &self.slow);
        surface.set_text(Region::GasStandard, &self.standard);
        surface.set_text(Region::GasFast, &self.fast);
        surface.set_text(Region::GasTime, &self.updated_at);
    }
}

/// Display strings for the holdings panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoldingsView {
    #[serde(rename = "ethBalance")]
    pub eth_balance: String,
    #[serde(rename = "ethHoldings")]
    pub eth_holdings: String,
    #[serde(rename = "totalValue")]
    pub total_value: String,
    #[serde(rename = "ethValue")]
    pub eth_value: String,
}

impl HoldingsView {
    pub fn new(balance: Decimal, total_value: Decimal, fiat_currency: &str) -> Self {
        let balance = format_eth(balance);
        let value = format_fiat(total_value);

        Self {
            eth_holdings: format!("{} ETH", balance),
            eth_balance: balance,
            eth_value: format!("{}{}", currency_symbol(fiat_currency), value),
            total_value: value,
        }
    }

    pub fn empty(fiat_currency: &str) -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO, fiat_currency)
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        surface.set_text(Region::EthBalance, &self.eth_balance);
        surface.set_text(Region::EthHoldings, &self.eth_holdings);
        surface.set_text(Region::TotalValue, &self.total_value);
        surface.set_text(Region::EthValue, &self.eth_value);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub holdings: HoldingsView,
    pub gas: GasView,
}

impl DashboardView {
    pub fn from_snapshot(snapshot: &Snapshot, fiat_currency: &str) -> Self {
        Self {
            holdings: HoldingsView::new(snapshot.balance.eth, snapshot.total_value, fiat_currency),
            gas: GasView::new(&snapshot.gas, snapshot.refreshed_at),
        }
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        self.holdings.render(surface);
        self.gas.render(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::services::surface::MemorySurface;

    #[test]
    fn test_holdings_formatting() {
        let view = HoldingsView::new(Decimal::new(25, 1), Decimal::from(5000), "eur");

        assert_eq!(view.eth_balance, "2.5000");
        assert_eq!(view.eth_holdings, "2.5000 ETH");
        assert_eq!(view.total_value, "5000.00");
        assert_eq!(view.eth_value, "€5000.00");
    }

    #[test]
    fn test_empty_holdings() {
        let view = HoldingsView::empty("eur");
        assert_eq!(view.eth_balance, "0.0000");
        assert_eq!(view.eth_value, "€0.00");
    }

    #[test]
    fn test_gas_view_renders_time_of_day() {
        let at = Local.with_ymd_and_hms(2026, 10, 17, 9, 5, 7).unwrap();
        let view = GasView::new(&GasTiers::new(24, 30, 39), at);

        let mut surface = MemorySurface::new();
        view.render(&mut surface);

        assert_eq!(surface.text(Region::GasSlow), Some("24"));
        assert_eq!(surface.text(Region::GasStandard), Some("30"));
        assert_eq!(surface.text(Region::GasFast), Some("39"));
        assert_eq!(surface.text(Region::GasTime), Some("09:05:07"));
    }
}
