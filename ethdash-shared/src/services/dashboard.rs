use std::sync::Arc;
use chrono::Local;
use ethers_core::types::Address;
use crate::models::errors::WalletError;
use crate::models::gas::GasReading;
use crate::models::snapshot::Snapshot;
use crate::services::snapshot_service::DashContext;
use crate::services::surface::{DisplayFlag, Region, RenderSurface};
use crate::services::wallet_provider::WalletProvider;
use crate::state_machine::connection::{AccountsChange, ConnectionState, ConnectionStatus};
use crate::utilities::logging::{log_degraded, log_info, log_wallet_error};
use crate::utilities::wallet::format_address;
use crate::views::dashboard_view::{DashboardView, GasView, HoldingsView};

pub const CONNECT_LABEL: &str = "Connect Wallet";
pub const CONNECTING_LABEL: &str = "Connecting...";
pub const NETWORK_LABEL: &str = "Ethereum";
pub const NO_NETWORK_LABEL: &str = "Not Connected";
pub const STATUS_READY: &str = "Ready";
pub const STATUS_CONNECTED: &str = "Connected";
pub const MISSING_PROVIDER_MESSAGE: &str = "Please install a wallet provider!";
pub const CONNECT_FAILED_MESSAGE: &str = "Failed to connect wallet";

/// One dashboard session: the user-facing interactions on top of [`DashContext`].
pub struct Dashboard<S: RenderSurface> {
    context: DashContext,
    surface: S,
    provider: Option<Arc<dyn WalletProvider>>,
    connection: ConnectionState,
    last_snapshot: Option<Snapshot>,
}

impl<S: RenderSurface> Dashboard<S> {
    pub fn new(context: DashContext, surface: S, provider: Option<Arc<dyn WalletProvider>>) -> Self {
        Self {
            context,
            surface,
            provider,
            connection: ConnectionState::new(),
            last_snapshot: None,
        }
    }

    pub fn context(&self) -> &DashContext {
        &self.context
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn status(&self) -> ConnectionStatus {
        self.connection.status()
    }

    pub fn account(&self) -> Option<Address> {
        self.connection.account()
    }

    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.last_snapshot.as_ref()
    }

    /// Paints the disconnected layout and loads the fee panel.
    pub async fn start(&mut self) -> GasReading {
        self.reset_display();
        self.refresh_gas().await
    }

    pub async fn connect(&mut self) -> Result<Option<Address>, WalletError> {
        let Some(provider) = self.provider.clone() else {
            self.surface.notify(MISSING_PROVIDER_MESSAGE);
            return Err(WalletError::ProviderMissing);
        };

        self.set_connecting(true);
        let result = self.acquire(provider.as_ref()).await;
        self.set_connecting(false);

        if let Err(e) = &result {
            log_wallet_error("ConnectionFailed", &e);
            self.surface.notify(CONNECT_FAILED_MESSAGE);
        }
        result
    }

    async fn acquire(&mut self, provider: &dyn WalletProvider) -> Result<Option<Address>, WalletError> {
        let accounts = provider.request_accounts().await?;
        let Some(account) = self.connection.on_accounts_acquired(&accounts)? else {
            return Ok(None);
        };

        log_info("WalletConnected", &format!("{:#x}", account));
        self.label_connected(&account);
        self.load_wallet_data().await;
        Ok(Some(account))
    }

    pub fn disconnect(&mut self) {
        self.connection.on_disconnect();
        self.last_snapshot = None;
        self.reset_display();
        log_info("WalletDisconnected", "display reset");
    }

    /// Loads and renders a fresh snapshot. Does nothing while disconnected.
    pub async fn load_wallet_data(&mut self) -> Option<&Snapshot> {
        let account = self.connection.account()?;

        self.surface.set_text(Region::NetworkBadge, NETWORK_LABEL);
        self.surface.set_flag(Region::NetworkBadge, DisplayFlag::Mainnet, true);

        let snapshot = self.context.load_snapshot(&account).await;
        if !snapshot.is_complete() {
            log_degraded(&snapshot);
        }

        DashboardView::from_snapshot(&snapshot, self.context.fiat_currency()).render(&mut self.surface);
        self.surface.set_flag(Region::StatusDot, DisplayFlag::Online, true);
        self.surface.set_text(Region::StatusText, STATUS_CONNECTED);

        self.last_snapshot = Some(snapshot);
        self.last_snapshot.as_ref()
    }

    pub async fn refresh_gas(&mut self) -> GasReading {
        self.surface.set_flag(Region::RefreshGas, DisplayFlag::Loading, true);

        let reading = self.context.load_gas().await;
        GasView::new(&reading.tiers, Local::now()).render(&mut self.surface);

        self.surface.set_flag(Region::RefreshGas, DisplayFlag::Loading, false);
        reading
    }

    pub async fn refresh_tokens(&mut self) -> Option<&Snapshot> {
        if !self.connection.is_connected() {
            return None;
        }

        self.surface.set_flag(Region::RefreshTokens, DisplayFlag::Loading, true);
        self.load_wallet_data().await;
        self.surface.set_flag(Region::RefreshTokens, DisplayFlag::Loading, false);
        self.last_snapshot.as_ref()
    }

    pub async fn on_accounts_changed(&mut self, accounts: &[String]) -> Result<AccountsChange, WalletError> {
        let change = self.connection.on_accounts_changed(accounts)?;

        match change {
            AccountsChange::Disconnect => self.disconnect(),
            AccountsChange::Reload(account) => {
                log_info("AccountChanged", &format!("{:#x}", account));
                self.last_snapshot = None;
                self.label_connected(&account);
                self.load_wallet_data().await;
            }
            AccountsChange::Unchanged => {}
        }
        Ok(change)
    }

    fn set_connecting(&mut self, connecting: bool) {
        self.surface.set_flag(Region::ConnectButton, DisplayFlag::Disabled, connecting);
        if connecting {
            self.surface.set_text(Region::ConnectButton, CONNECTING_LABEL);
        } else if !self.connection.is_connected() {
            self.surface.set_text(Region::ConnectButton, CONNECT_LABEL);
        }
    }

    fn label_connected(&mut self, account: &Address) {
        self.surface.set_flag(Region::ConnectButton, DisplayFlag::Connected, true);
        self.surface.set_text(Region::ConnectButton, &format_address(account));
    }

    fn reset_display(&mut self) {
        self.surface.set_flag(Region::ConnectButton, DisplayFlag::Connected, false);
        self.surface.set_text(Region::ConnectButton, CONNECT_LABEL);

        HoldingsView::empty(self.context.fiat_currency()).render(&mut self.surface);

        self.surface.set_text(Region::NetworkBadge, NO_NETWORK_LABEL);
        self.surface.set_flag(Region::NetworkBadge, DisplayFlag::Mainnet, false);
        self.surface.set_flag(Region::StatusDot, DisplayFlag::Online, false);
        self.surface.set_text(Region::StatusText, STATUS_READY);
    }
}
