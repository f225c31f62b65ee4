use std::collections::BTreeMap;
use std::path::Path;
use ethdash_shared::models::snapshot::Snapshot;
use ethdash_shared::services::dashboard::Dashboard;
use ethdash_shared::services::surface::Region;
use serde::Serialize;
use tracing::info;
use crate::errors::ConsoleError;
use crate::terminal::TerminalSurface;

/// What the scripted run leaves on screen, written out as the capture.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalState {
    pub wallet_connected: bool,
    pub wallet_address: Option<String>,
    pub total_value: String,
    pub eth_balance: String,
    pub network: String,
    pub regions: BTreeMap<&'static str, String>,
    pub snapshot: Option<Snapshot>,
}

impl FinalState {
    fn read(dash: &Dashboard<TerminalSurface>) -> Self {
        let surface = dash.surface().state();
        let text = |region| surface.text(region).unwrap_or_default().to_string();

        Self {
            wallet_connected: dash.account().is_some(),
            wallet_address: dash.account().map(|a| format!("{:#x}", a)),
            total_value: text(Region::TotalValue),
            eth_balance: text(Region::EthBalance),
            network: text(Region::NetworkBadge),
            regions: surface.regions(),
            snapshot: dash.last_snapshot().cloned(),
        }
    }
}

fn print_gas(dash: &Dashboard<TerminalSurface>) {
    let surface = dash.surface().state();
    let text = |region| surface.text(region).unwrap_or("-");
    println!(
        "Gas - Slow: {} | Standard: {} | Fast: {} Gwei",
        text(Region::GasSlow),
        text(Region::GasStandard),
        text(Region::GasFast)
    );
}

/// Drives every interaction once and captures the final display.
pub async fn run_automation(
    dash: &mut Dashboard<TerminalSurface>,
    capture_path: &Path,
) -> Result<FinalState, ConsoleError> {
    println!("=== Dashboard Automation ===\n");

    dash.start().await;
    println!("--- Initial State ---");
    dash.surface().print_panel();
    print_gas(dash);

    println!("\n--- Connecting Wallet ---");
    match dash.connect().await? {
        Some(account) => println!("Address: {:#x}", account),
        None => println!("Wallet exposed no accounts"),
    }

    println!("\n--- Updated UI ---");
    dash.surface().print_panel();

    println!("--- Testing Refresh Gas ---");
    dash.refresh_gas().await;
    print_gas(dash);

    println!("\n--- Testing Refresh Tokens ---");
    if let Some(snapshot) = dash.refresh_tokens().await {
        println!("Balance: {} ETH at {} per ETH", snapshot.balance.eth, snapshot.price);
    }

    let state = FinalState::read(dash);
    let capture = serde_json::to_string_pretty(&state)?;
    tokio::fs::write(capture_path, &capture).await?;
    info!(path = %capture_path.display(), "Capture saved");

    println!("\n=== Final State ===");
    println!("{}", capture);
    println!("\n=== Run Complete ===");

    Ok(state)
}
