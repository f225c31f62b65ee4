use ethers_core::types::Address;
use serde::Serialize;
use crate::models::errors::WalletError;
use crate::utilities::wallet::parse_account;

/// Displayed connection status. Starts `Disconnected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connected { account: Address },
}

/// What the dashboard has to do after an `accountsChanged` notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountsChange {
    /// The wallet exposes no accounts any more
    Disconnect,
    /// A different account is now first; its data must be reloaded
    Reload(Address),
    Unchanged,
}

#[derive(Debug, Default)]
pub struct ConnectionState {
    status: ConnectionStatus,
}

impl ConnectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn account(&self) -> Option<Address> {
        match self.status {
            ConnectionStatus::Connected { account } => Some(account),
            ConnectionStatus::Disconnected => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.account().is_some()
    }

    /// Applies the answer to an account request. An empty list leaves the state alone.
    pub fn on_accounts_acquired(&mut self, accounts: &[String]) -> Result<Option<Address>, WalletError> {
        let Some(head) = accounts.first() else {
            return Ok(None);
        };

        let account = parse_account(head)?;
        self.status = ConnectionStatus::Connected { account };
        Ok(Some(account))
    }

    pub fn on_disconnect(&mut self) {
        self.status = ConnectionStatus::Disconnected;
    }

    pub fn on_accounts_changed(&mut self, accounts: &[String]) -> Result<AccountsChange, WalletError> {
        let Some(head) = accounts.first() else {
            self.on_disconnect();
            return Ok(AccountsChange::Disconnect);
        };

        let account = parse_account(head)?;
        match self.status {
            ConnectionStatus::Connected { account: current } if current == account => Ok(AccountsChange::Unchanged),
            ConnectionStatus::Connected { .. } => {
                self.status = ConnectionStatus::Connected { account };
                Ok(AccountsChange::Reload(account))
            }
            // Nothing was granted in this session, so a wallet-side switch is not a connect
            ConnectionStatus::Disconnected => Ok(AccountsChange::Unchanged),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: &str = "0x0E47675D5157aa13FF662E364091B2c5656a6322";
    const SECOND: &str = "0xa826d3484625b29dfcbdaee6ca636a1acb439bf8";

    fn accounts(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_starts_disconnected() {
        let state = ConnectionState::new();
        assert_eq!(state.status(), ConnectionStatus::Disconnected);
        assert!(!state.is_connected());
    }

    #[test]
    fn test_acquire_connects_first_account() {
        let mut state = ConnectionState::new();
        let account = state.on_accounts_acquired(&accounts(&[FIRST, SECOND])).unwrap();

        assert_eq!(account, Some(parse_account(FIRST).unwrap()));
        assert_eq!(state.account(), account);
    }

    #[test]
    fn test_empty_acquire_stays_disconnected() {
        let mut state = ConnectionState::new();
        assert_eq!(state.on_accounts_acquired(&[]).unwrap(), None);
        assert!(!state.is_connected());
    }

    #[test]
    fn test_invalid_account_is_rejected() {
        let mut state = ConnectionState::new();
        let result = state.on_accounts_acquired(&accounts(&["not-an-address"]));
        assert!(matches!(result, Err(WalletError::InvalidAddress(_))));
        assert!(!state.is_connected());
    }

    #[test]
    fn test_empty_change_disconnects() {
        let mut state = ConnectionState::new();
        state.on_accounts_acquired(&accounts(&[FIRST])).unwrap();

        assert_eq!(state.on_accounts_changed(&[]).unwrap(), AccountsChange::Disconnect);
        assert_eq!(state.status(), ConnectionStatus::Disconnected);
    }

    #[test]
    fn test_same_head_is_unchanged() {
        let mut state = ConnectionState::new();
        state.on_accounts_acquired(&accounts(&[FIRST])).unwrap();

        // Address comparison ignores checksum casing
        let change = state.on_accounts_changed(&accounts(&[&FIRST.to_lowercase()])).unwrap();
        assert_eq!(change, AccountsChange::Unchanged);
    }

    #[test]
    fn test_different_head_reloads() {
        let mut state = ConnectionState::new();
        state.on_accounts_acquired(&accounts(&[FIRST])).unwrap();

        let second = parse_account(SECOND).unwrap();
        assert_eq!(state.on_accounts_changed(&accounts(&[SECOND])).unwrap(), AccountsChange::Reload(second));
        assert_eq!(state.account(), Some(second));
    }

    #[test]
    fn test_change_while_disconnected_does_not_connect() {
        let mut state = ConnectionState::new();
        assert_eq!(state.on_accounts_changed(&accounts(&[FIRST])).unwrap(), AccountsChange::Unchanged);
        assert!(!state.is_connected());
    }
}
