use std::sync::Mutex;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use crate::models::errors::WalletError;

/// The `eth_requestAccounts` side of a wallet.
#[async_trait::async_trait]
pub trait WalletProvider: Send + Sync {
    /// Asks the holder to expose their accounts; the first one is used.
    async fn request_accounts(&self) -> Result<Vec<String>, WalletError>;
}

/// Sender half for `accountsChanged` notifications.
pub type AccountsNotifier = UnboundedSender<Vec<String>>;
pub type AccountsChanged = UnboundedReceiver<Vec<String>>;

pub fn accounts_channel() -> (AccountsNotifier, AccountsChanged) {
    unbounded_channel()
}

/// Provider whose accounts are fixed up front (configured address, tests).
pub struct StaticWalletProvider {
    accounts: Mutex<Vec<String>>,
    rejects: bool,
}

impl StaticWalletProvider {
    pub fn new(accounts: Vec<String>) -> Self {
        Self {
            accounts: Mutex::new(accounts),
            rejects: false,
        }
    }

    pub fn single(account: &str) -> Self {
        Self::new(vec![account.to_string()])
    }

    /// A provider whose holder declines every request.
    pub fn rejecting() -> Self {
        Self {
            accounts: Mutex::new(Vec::new()),
            rejects: true,
        }
    }

    pub fn set_accounts(&self, accounts: Vec<String>) {
        if let Ok(mut guard) = self.accounts.lock() {
            *guard = accounts;
        }
    }
}

#[async_trait::async_trait]
impl WalletProvider for StaticWalletProvider {
    async fn request_accounts(&self) -> Result<Vec<String>, WalletError> {
        if self.rejects {
            return Err(WalletError::UserRejected);
        }

        self.accounts
            .lock()
            .map(|accounts| accounts.clone())
            .map_err(|e| WalletError::Provider(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider_returns_accounts() {
        let provider = StaticWalletProvider::single("0x0E47675D5157aa13FF662E364091B2c5656a6322");
        let accounts = provider.request_accounts().await.unwrap();
        assert_eq!(accounts.len(), 1);

        provider.set_accounts(Vec::new());
        assert!(provider.request_accounts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejecting_provider() {
        let provider = StaticWalletProvider::rejecting();
        assert_eq!(provider.request_accounts().await, Err(WalletError::UserRejected));
    }
}
