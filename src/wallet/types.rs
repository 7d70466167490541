//! Account, request/response and error types shared by wallets and hooks.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wallet::features::Feature;

/// An account exposed by a wallet.
///
/// Accounts are never mutated in place; change events replace the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAccount {
    /// Chain address of the account.
    pub address: String,
    /// Raw public key bytes.
    pub public_key: Vec<u8>,
    /// Chains the account can be used on (e.g. `evm:31337`).
    #[serde(default)]
    pub chains: Vec<String>,
    /// Features this account supports.
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Optional display label.
    #[serde(default)]
    pub label: Option<String>,
    /// Optional icon (usually a data URL).
    #[serde(default)]
    pub icon: Option<String>,
}

impl WalletAccount {
    /// Create an account with no label or icon.
    pub fn new(address: impl Into<String>, public_key: Vec<u8>) -> Self {
        Self {
            address: address.into(),
            public_key,
            chains: Vec::new(),
            features: Vec::new(),
            label: None,
            icon: None,
        }
    }

    /// Attach the chains the account lives on.
    pub fn with_chains(mut self, chains: Vec<String>) -> Self {
        self.chains = chains;
        self
    }

    /// Attach a display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Input to `standard:connect`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectInput {
    /// Connect without prompting the user if the wallet allows it.
    pub silent: bool,
}

/// Output of `standard:connect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectOutput {
    pub accounts: Vec<WalletAccount>,
}

/// Input to `wallet:signPersonalMessage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignPersonalMessageInput {
    pub message: Vec<u8>,
    pub account: WalletAccount,
}

/// A signed personal message as returned by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedMessage {
    /// Encoded message bytes, in the wallet's encoding.
    pub bytes: String,
    /// Encoded signature, in the wallet's encoding.
    pub signature: String,
}

/// Input to `wallet:signTransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignTransactionInput {
    /// Serialized transaction. Encoding is owned by the caller.
    pub transaction: Vec<u8>,
    pub account: WalletAccount,
    pub chain: Option<String>,
}

/// A signed transaction as returned by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub transaction_bytes: String,
    pub signature: String,
}

/// Input to `wallet:signAndExecuteTransaction`.
#[derive(Debug, Clone, PartialEq)]
pub struct SignAndExecuteTransactionInput {
    pub transaction: Vec<u8>,
    pub account: WalletAccount,
    pub chain: Option<String>,
    /// Wallet-specific execution mode (e.g. `WaitForLocalExecution`).
    pub request_type: Option<String>,
    /// Opaque execution options forwarded to the wallet.
    pub options: serde_json::Value,
}

/// Result of executing a transaction through the wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutedTransaction {
    pub digest: String,
    /// Remaining response fields, untouched.
    #[serde(default)]
    pub raw: serde_json::Value,
}

/// Errors surfaced by wallet operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// No wallet is currently selected.
    #[error("No wallet is connected")]
    NotConnected,

    /// The selected wallet does not implement the requested capability.
    #[error("This wallet doesn't support the `{0}` feature")]
    FeatureNotSupported(Feature),

    /// Neither an explicit nor a session account is available.
    #[error("No wallet account is selected")]
    NoAccountSelected,

    /// The account does not belong to the current wallet.
    #[error("No account with address {0} is connected")]
    AccountNotFound(String),

    /// A wallet with the same name is already registered.
    #[error("A wallet named '{0}' is already registered")]
    DuplicateWallet(String),

    /// The wallet left the registry before the operation finished.
    #[error("Wallet '{0}' is no longer registered")]
    WalletUnregistered(String),

    /// The user declined the request in the wallet.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Failure reported by the wallet implementation.
    #[error("Wallet error: {0}")]
    Wallet(String),
}

/// Result type for wallet operations.
pub type WalletResult<T> = Result<T, WalletError>;
