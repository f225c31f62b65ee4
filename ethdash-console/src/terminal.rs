use ethdash_shared::services::surface::{DisplayFlag, MemorySurface, Region, RenderSurface};
use tracing::{debug, warn};

/// Renders the dashboard to stdout. Keeps a [`MemorySurface`] so the current
/// display can be printed or captured at any time.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    state: MemorySurface,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MemorySurface {
        &self.state
    }

    fn text(&self, region: Region) -> &str {
        self.state.text(region).unwrap_or("-")
    }

    pub fn panel(&self) -> String {
        let online = if self.state.has_flag(Region::StatusDot, DisplayFlag::Online) { "●" } else { "○" };
        let mut lines = vec![
            format!("{} {}  [{}]  {}", online, self.text(Region::StatusText), self.text(Region::NetworkBadge), self.text(Region::ConnectButton)),
            format!("Total Value: {}", self.text(Region::EthValue)),
            format!("Holdings:    {}", self.text(Region::EthHoldings)),
            format!(
                "Gas (Gwei):  slow {} | standard {} | fast {}  @ {}",
                self.text(Region::GasSlow),
                self.text(Region::GasStandard),
                self.text(Region::GasFast),
                self.text(Region::GasTime),
            ),
        ];

        for region in [Region::RefreshGas, Region::RefreshTokens] {
            if self.state.has_flag(region, DisplayFlag::Loading) {
                lines.push(format!("{} loading...", region.id()));
            }
        }
        lines.join("\n")
    }

    pub fn print_panel(&self) {
        println!("{}\n", self.panel());
    }
}

impl RenderSurface for TerminalSurface {
    fn set_text(&mut self, region: Region, text: &str) {
        debug!(region = region.id(), text, "region updated");
        self.state.set_text(region, text);
    }

    fn set_flag(&mut self, region: Region, flag: DisplayFlag, on: bool) {
        self.state.set_flag(region, flag, on);
    }

    fn notify(&mut self, message: &str) {
        warn!("{}", message);
        eprintln!("!! {}", message);
        self.state.notify(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_shows_regions() {
        let mut surface = TerminalSurface::new();
        surface.set_text(Region::StatusText, "Connected");
        surface.set_text(Region::EthValue, "€5000.00");
        surface.set_text(Region::GasStandard, "30");
        surface.set_flag(Region::StatusDot, DisplayFlag::Online, true);

        let panel = surface.panel();
        assert!(panel.starts_with("● Connected"));
        assert!(panel.contains("Total Value: €5000.00"));
        assert!(panel.contains("standard 30"));
    }
}
