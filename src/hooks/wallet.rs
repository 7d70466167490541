//! Read-only hooks over the session.

use std::sync::Arc;

use crate::provider::WalletProvider;
use crate::session::state::{ConnectionStatus, SessionState};
use crate::wallet::standard::Wallet;
use crate::wallet::types::{WalletAccount, WalletError, WalletResult};

/// Full session snapshot.
pub fn use_wallet(provider: &WalletProvider) -> SessionState {
    provider.state()
}

pub fn use_wallets(provider: &WalletProvider) -> Vec<Arc<dyn Wallet>> {
    provider.wallets()
}

pub fn use_current_wallet(provider: &WalletProvider) -> Option<Arc<dyn Wallet>> {
    provider.current_wallet()
}

pub fn use_current_account(provider: &WalletProvider) -> Option<WalletAccount> {
    provider.current_account()
}

pub fn use_accounts(provider: &WalletProvider) -> Vec<WalletAccount> {
    provider.accounts()
}

pub fn use_connection_status(provider: &WalletProvider) -> ConnectionStatus {
    provider.connection_status()
}

/// The current wallet, or `NotConnected`.
pub(crate) fn require_wallet(session: &SessionState) -> WalletResult<Arc<dyn Wallet>> {
    session
        .current_wallet
        .clone()
        .ok_or(WalletError::NotConnected)
}

/// The explicit account if given, else the session account, else
/// `NoAccountSelected`.
pub(crate) fn resolve_account(
    explicit: Option<WalletAccount>,
    session: &SessionState,
) -> WalletResult<WalletAccount> {
    explicit
        .or_else(|| session.current_account.clone())
        .ok_or(WalletError::NoAccountSelected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::testing::account;

    #[test]
    fn test_require_wallet() {
        let session = SessionState::default();
        assert_eq!(require_wallet(&session).unwrap_err(), WalletError::NotConnected);
    }

    #[test]
    fn test_resolve_account_prefers_explicit() {
        let session = SessionState {
            current_account: Some(account("0x1")),
            ..Default::default()
        };

        let resolved = resolve_account(Some(account("0x2")), &session).unwrap();
        assert_eq!(resolved.address, "0x2");

        let resolved = resolve_account(None, &session).unwrap();
        assert_eq!(resolved.address, "0x1");

        let err = resolve_account(None, &SessionState::default()).unwrap_err();
        assert_eq!(err, WalletError::NoAccountSelected);
    }
}
