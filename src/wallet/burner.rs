//! Unsafe burner wallet for development.
//!
//! # Security
//! - The key is generated in memory and lost on drop unless supplied explicitly
//! - Keys are never logged or serialized
//! - Never use with real funds

use alloy::primitives::{hex, keccak256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use async_trait::async_trait;

use crate::wallet::events::{ChangeListener, Emitter, Subscription, WalletChange};
use crate::wallet::features::{
    Feature, SignPersonalMessage, SignTransaction, StandardConnect, StandardEvents,
};
use crate::wallet::standard::Wallet;
use crate::wallet::types::{
    ConnectInput, ConnectOutput, SignPersonalMessageInput, SignTransactionInput, SignedMessage,
    SignedTransaction, WalletAccount, WalletError, WalletResult,
};

/// Registered name of the burner wallet.
pub const UNSAFE_BURNER_WALLET_NAME: &str = "Unsafe Burner Wallet";

/// Environment variable holding an optional fixed burner key.
pub const BURNER_PRIVATE_KEY_ENV_VAR: &str = "WALLET_KIT_BURNER_PRIVATE_KEY";

/// An in-process wallet holding a single ephemeral secp256k1 account.
pub struct UnsafeBurnerWallet {
    signer: PrivateKeySigner,
    account: WalletAccount,
    chain: String,
    events: Emitter<WalletChange>,
}

impl UnsafeBurnerWallet {
    /// Create a burner with a freshly generated key.
    pub fn new(chain_id: u64) -> Self {
        Self::with_signer(PrivateKeySigner::random(), chain_id)
    }

    /// Create a burner from a hex-encoded private key (with or without 0x prefix).
    pub fn from_private_key(private_key_hex: &str, chain_id: u64) -> WalletResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| WalletError::Wallet(format!("Invalid private key format: {}", e)))?;

        Ok(Self::with_signer(signer, chain_id))
    }

    /// Use `WALLET_KIT_BURNER_PRIVATE_KEY` if set, otherwise a random key.
    pub fn from_env_or_random(chain_id: u64) -> WalletResult<Self> {
        match std::env::var(BURNER_PRIVATE_KEY_ENV_VAR) {
            Ok(key) => Self::from_private_key(&key, chain_id),
            Err(_) => Ok(Self::new(chain_id)),
        }
    }

    fn with_signer(signer: PrivateKeySigner, chain_id: u64) -> Self {
        let signer = signer.with_chain_id(Some(chain_id));
        let chain = format!("evm:{}", chain_id);
        let public_key = signer
            .credential()
            .verifying_key()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec();

        let account = WalletAccount {
            address: signer.address().to_string(),
            public_key,
            chains: vec![chain.clone()],
            features: vec![Feature::SignPersonalMessage, Feature::SignTransaction],
            label: Some("Burner Account".to_string()),
            icon: None,
        };

        tracing::warn!(
            address = %account.address,
            chain = %chain,
            "Unsafe burner wallet created; do not use with real funds"
        );

        Self {
            signer,
            account,
            chain,
            events: Emitter::new(),
        }
    }

    /// The single burner account.
    pub fn account(&self) -> &WalletAccount {
        &self.account
    }

    fn check_account(&self, account: &WalletAccount) -> WalletResult<()> {
        if account.address != self.account.address {
            return Err(WalletError::Wallet(format!(
                "Account {} is not managed by the burner wallet",
                account.address
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for UnsafeBurnerWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnsafeBurnerWallet")
            .field("address", &self.account.address)
            .field("chain", &self.chain)
            .finish()
    }
}

impl Wallet for UnsafeBurnerWallet {
    fn name(&self) -> &str {
        UNSAFE_BURNER_WALLET_NAME
    }

    fn chains(&self) -> Vec<String> {
        vec![self.chain.clone()]
    }

    fn accounts(&self) -> Vec<WalletAccount> {
        vec![self.account.clone()]
    }

    fn connect_feature(&self) -> Option<&dyn StandardConnect> {
        Some(self)
    }

    fn events_feature(&self) -> Option<&dyn StandardEvents> {
        Some(self)
    }

    fn sign_personal_message_feature(&self) -> Option<&dyn SignPersonalMessage> {
        Some(self)
    }

    fn sign_transaction_feature(&self) -> Option<&dyn SignTransaction> {
        Some(self)
    }
}

#[async_trait]
impl StandardConnect for UnsafeBurnerWallet {
    async fn connect(&self, _input: ConnectInput) -> WalletResult<ConnectOutput> {
        Ok(ConnectOutput {
            accounts: self.accounts(),
        })
    }
}

// The account never changes, but listeners are still tracked so that
// subscriptions behave like any other wallet's.
impl StandardEvents for UnsafeBurnerWallet {
    fn on_change(&self, listener: ChangeListener) -> Subscription {
        self.events.subscribe(listener)
    }
}

#[async_trait]
impl SignPersonalMessage for UnsafeBurnerWallet {
    async fn sign_personal_message(
        &self,
        input: SignPersonalMessageInput,
    ) -> WalletResult<SignedMessage> {
        self.check_account(&input.account)?;

        let signature = self
            .signer
            .sign_message(&input.message)
            .await
            .map_err(|e| WalletError::Wallet(format!("Message signing failed: {}", e)))?;

        Ok(SignedMessage {
            bytes: hex::encode_prefixed(&input.message),
            signature: hex::encode_prefixed(signature.as_bytes()),
        })
    }
}

#[async_trait]
impl SignTransaction for UnsafeBurnerWallet {
    async fn sign_transaction(
        &self,
        input: SignTransactionInput,
    ) -> WalletResult<SignedTransaction> {
        self.check_account(&input.account)?;
        if let Some(chain) = &input.chain {
            if chain != &self.chain {
                return Err(WalletError::Wallet(format!(
                    "Burner wallet cannot sign for chain {}",
                    chain
                )));
            }
        }

        let hash = keccak256(&input.transaction);
        let signature = self
            .signer
            .sign_hash(&hash)
            .await
            .map_err(|e| WalletError::Wallet(format!("Transaction signing failed: {}", e)))?;

        Ok(SignedTransaction {
            transaction_bytes: hex::encode_prefixed(&input.transaction),
            signature: hex::encode_prefixed(signature.as_bytes()),
        })
    }
}
