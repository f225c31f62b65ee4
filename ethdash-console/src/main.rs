use std::sync::Arc;
use anyhow::Context;
use ethdash_shared::services::dashboard::Dashboard;
use ethdash_shared::services::snapshot_service::DashContext;
use ethdash_shared::services::wallet_provider::{accounts_channel, StaticWalletProvider, WalletProvider};
use ethdash_shared::utilities::config as dash_config;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use crate::automation::run_automation;
use crate::config::{ConsoleConfig, Mode};
use crate::errors::ConsoleError;
use crate::live::run_live;
use crate::terminal::TerminalSurface;

mod automation;
mod config;
mod errors;
mod live;
mod terminal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dash_config::init();

    // Set up structured logging; library `log` records are bridged in as well
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| ConsoleError::InitializationError(e.to_string()))?;

    std::panic::set_hook(Box::new(|info| {
        tracing::error!("Application panicked: {}", info);
    }));

    info!("🚀 Starting ethdash console...");

    let settings = ConsoleConfig::from_env().context("invalid configuration")?;
    let context = DashContext::from_config(&settings.dash)?;

    let provider: Option<Arc<dyn WalletProvider>> = match &settings.wallet_address {
        Some(address) => Some(Arc::new(StaticWalletProvider::single(address))),
        None => {
            warn!("DASH_WALLET_ADDRESS is not set; running without a wallet provider");
            None
        }
    };
    let auto_connect = provider.is_some();

    let mut dash = Dashboard::new(context, TerminalSurface::new(), provider);

    match settings.mode {
        Mode::Live => {
            let (notifier, accounts_changed) = accounts_channel();
            run_live(
                &mut dash,
                notifier,
                accounts_changed,
                settings.gas_refresh,
                settings.token_refresh,
                auto_connect,
            ).await;
        }
        Mode::Automation => {
            run_automation(&mut dash, &settings.capture_path).await?;
        }
    }

    info!("ethdash console stopped");
    Ok(())
}
