//! Session state model.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::wallet::standard::Wallet;
use crate::wallet::types::WalletAccount;

/// Connection status of the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
        };
        f.write_str(s)
    }
}

/// Which wallets exist and which wallet/account is active.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Available wallets, preferred first then discovery order.
    pub wallets: Vec<Arc<dyn Wallet>>,
    pub current_wallet: Option<Arc<dyn Wallet>>,
    /// Accounts of the current wallet.
    pub accounts: Vec<WalletAccount>,
    pub current_account: Option<WalletAccount>,
    pub connection_status: ConnectionStatus,
}

impl SessionState {
    /// Disconnected session listing `wallets`.
    pub fn with_wallets(wallets: Vec<Arc<dyn Wallet>>) -> Self {
        Self {
            wallets,
            ..Self::default()
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection_status == ConnectionStatus::Connected
    }

    pub fn is_connecting(&self) -> bool {
        self.connection_status == ConnectionStatus::Connecting
    }

    pub fn is_disconnected(&self) -> bool {
        self.connection_status == ConnectionStatus::Disconnected
    }

    pub fn wallet_names(&self) -> Vec<String> {
        self.wallets.iter().map(|w| w.name().to_string()).collect()
    }

    pub fn current_wallet_name(&self) -> Option<&str> {
        self.current_wallet.as_ref().map(|w| w.name())
    }

    /// Serializable view for logging and the CLI.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            wallets: self.wallet_names(),
            current_wallet: self.current_wallet_name().map(str::to_string),
            accounts: self.accounts.iter().map(|a| a.address.clone()).collect(),
            current_account: self.current_account.as_ref().map(|a| a.address.clone()),
            connection_status: self.connection_status,
        }
    }
}

/// Name/address-only snapshot of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub wallets: Vec<String>,
    pub current_wallet: Option<String>,
    pub accounts: Vec<String>,
    pub current_account: Option<String>,
    pub connection_status: ConnectionStatus,
}
