//! Session state transitions.
//!
//! # Transitions
//! ```text
//! WalletsUpdated            → wallets replaced
//! WalletUnregistered        → wallets replaced; reset if it was current
//! ConnectionStatusUpdated   → status only
//! WalletConnected           → wallet, accounts, account; Connected
//! WalletDisconnected        → cleared; Disconnected
//! WalletPropertiesChanged   → accounts replaced; account reconciled
//! AccountSwitched           → account only
//! ```

use std::sync::Arc;

use crate::session::state::{ConnectionStatus, SessionState};
use crate::wallet::standard::{same_wallet, Wallet};
use crate::wallet::types::WalletAccount;

/// An event that changes the session.
#[derive(Debug, Clone)]
pub enum SessionAction {
    /// A wallet was registered; carries the re-sorted list.
    WalletsUpdated { wallets: Vec<Arc<dyn Wallet>> },
    WalletUnregistered {
        updated_wallets: Vec<Arc<dyn Wallet>>,
        unregistered_wallet: Arc<dyn Wallet>,
    },
    ConnectionStatusUpdated(ConnectionStatus),
    WalletConnected {
        wallet: Arc<dyn Wallet>,
        accounts: Vec<WalletAccount>,
        current_account: Option<WalletAccount>,
    },
    WalletDisconnected,
    /// The current wallet reported a new account list.
    WalletPropertiesChanged { accounts: Vec<WalletAccount> },
    AccountSwitched(WalletAccount),
}

impl SessionAction {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionAction::WalletsUpdated { .. } => "wallets-updated",
            SessionAction::WalletUnregistered { .. } => "wallet-unregistered",
            SessionAction::ConnectionStatusUpdated(_) => "connection-status-updated",
            SessionAction::WalletConnected { .. } => "wallet-connected",
            SessionAction::WalletDisconnected => "wallet-disconnected",
            SessionAction::WalletPropertiesChanged { .. } => "wallet-properties-changed",
            SessionAction::AccountSwitched(_) => "account-switched",
        }
    }
}

impl SessionState {
    /// Apply `action` in place.
    pub fn apply(&mut self, action: SessionAction) {
        match action {
            SessionAction::WalletsUpdated { wallets } => {
                self.wallets = wallets;
            }
            SessionAction::WalletUnregistered {
                updated_wallets,
                unregistered_wallet,
            } => {
                let was_current = self
                    .current_wallet
                    .as_ref()
                    .is_some_and(|current| same_wallet(current, &unregistered_wallet));

                if was_current {
                    *self = SessionState::with_wallets(updated_wallets);
                } else {
                    self.wallets = updated_wallets;
                }
            }
            SessionAction::ConnectionStatusUpdated(status) => {
                self.connection_status = status;
            }
            SessionAction::WalletConnected {
                wallet,
                accounts,
                current_account,
            } => {
                self.current_wallet = Some(wallet);
                self.accounts = accounts;
                self.current_account = current_account;
                self.connection_status = ConnectionStatus::Connected;
            }
            SessionAction::WalletDisconnected => {
                let wallets = std::mem::take(&mut self.wallets);
                *self = SessionState::with_wallets(wallets);
            }
            SessionAction::WalletPropertiesChanged { accounts } => {
                self.current_account = reconcile_account(self.current_account.take(), &accounts);
                self.accounts = accounts;
            }
            SessionAction::AccountSwitched(account) => {
                self.current_account = Some(account);
            }
        }
    }
}

/// Keep the selected account if its address survived the change, otherwise
/// fall back to the first account of the new list. No selection stays none.
pub fn reconcile_account(
    current: Option<WalletAccount>,
    updated: &[WalletAccount],
) -> Option<WalletAccount> {
    let current = current?;
    if updated.iter().any(|a| a.address == current.address) {
        Some(current)
    } else {
        updated.first().cloned()
    }
}

/// Account to select after connecting: the requested address if present,
/// else the first account.
pub fn select_account(
    accounts: &[WalletAccount],
    address: Option<&str>,
) -> Option<WalletAccount> {
    address
        .and_then(|address| accounts.iter().find(|a| a.address == address))
        .or_else(|| accounts.first())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::testing::{account, TestWallet};

    fn connected_state(wallet: &Arc<dyn Wallet>, addresses: &[&str]) -> SessionState {
        let accounts: Vec<_> = addresses.iter().map(|a| account(a)).collect();
        let mut state = SessionState::with_wallets(vec![wallet.clone()]);
        state.apply(SessionAction::WalletConnected {
            wallet: wallet.clone(),
            current_account: accounts.first().cloned(),
            accounts,
        });
        state
    }

    #[test]
    fn test_wallet_connected() {
        let wallet = TestWallet::new("A").arc();
        let state = connected_state(&wallet, &["0x1", "0x2"]);

        assert!(state.is_connected());
        assert_eq!(state.current_wallet_name(), Some("A"));
        assert_eq!(state.accounts.len(), 2);
        assert_eq!(state.current_account.as_ref().unwrap().address, "0x1");
    }

    #[test]
    fn test_unregister_current_wallet_resets() {
        let wallet = TestWallet::new("A").arc();
        let other = TestWallet::new("B").arc();
        let mut state = connected_state(&wallet, &["0x1"]);

        state.apply(SessionAction::WalletUnregistered {
            updated_wallets: vec![other.clone()],
            unregistered_wallet: wallet.clone(),
        });

        assert!(state.is_disconnected());
        assert!(state.current_wallet.is_none());
        assert!(state.current_account.is_none());
        assert!(state.accounts.is_empty());
        assert_eq!(state.wallet_names(), vec!["B"]);
    }

    #[test]
    fn test_unregister_other_wallet_keeps_session() {
        let wallet = TestWallet::new("A").arc();
        let other = TestWallet::new("B").arc();
        let mut state = connected_state(&wallet, &["0x1"]);

        state.apply(SessionAction::WalletUnregistered {
            updated_wallets: vec![wallet.clone()],
            unregistered_wallet: other,
        });

        assert!(state.is_connected());
        assert_eq!(state.current_account.as_ref().unwrap().address, "0x1");
    }

    #[test]
    fn test_properties_changed_keeps_surviving_account() {
        let wallet = TestWallet::new("A").arc();
        let mut state = connected_state(&wallet, &["0x1", "0x2"]);
        state.apply(SessionAction::AccountSwitched(account("0x2")));

        state.apply(SessionAction::WalletPropertiesChanged {
            accounts: vec![account("0x3"), account("0x2")],
        });

        assert_eq!(state.current_account.as_ref().unwrap().address, "0x2");
        assert_eq!(state.accounts.len(), 2);
    }

    #[test]
    fn test_properties_changed_falls_back_to_first() {
        let wallet = TestWallet::new("A").arc();
        let mut state = connected_state(&wallet, &["0x1", "0x2", "0x3"]);

        state.apply(SessionAction::WalletPropertiesChanged {
            accounts: vec![account("0x2"), account("0x3"), account("0x4")],
        });

        assert_eq!(state.current_account.as_ref().unwrap().address, "0x2");
        assert_eq!(state.accounts.len(), 3);
    }

    #[test]
    fn test_properties_changed_to_empty() {
        let wallet = TestWallet::new("A").arc();
        let mut state = connected_state(&wallet, &["0x1"]);

        state.apply(SessionAction::WalletPropertiesChanged { accounts: vec![] });

        assert!(state.current_account.is_none());
        assert!(state.accounts.is_empty());
        assert!(state.is_connected());
    }

    #[test]
    fn test_disconnect_keeps_wallet_list() {
        let wallet = TestWallet::new("A").arc();
        let mut state = connected_state(&wallet, &["0x1"]);

        state.apply(SessionAction::WalletDisconnected);

        assert!(state.is_disconnected());
        assert!(state.current_wallet.is_none());
        assert_eq!(state.wallet_names(), vec!["A"]);
    }

    #[test]
    fn test_select_account() {
        let accounts = vec![account("0x1"), account("0x2")];
        assert_eq!(select_account(&accounts, Some("0x2")).unwrap().address, "0x2");
        assert_eq!(select_account(&accounts, Some("0x9")).unwrap().address, "0x1");
        assert_eq!(select_account(&accounts, None).unwrap().address, "0x1");
        assert!(select_account(&[], Some("0x1")).is_none());
    }

    #[test]
    fn test_reconcile_without_selection() {
        assert!(reconcile_account(None, &[account("0x1")]).is_none());
    }
}
