//! `use_sign_transaction` and `use_sign_and_execute_transaction`

use crate::hooks::keys;
use crate::hooks::mutation::{Mutation, MutationOptions};
use crate::hooks::wallet::{require_wallet, resolve_account};
use crate::provider::WalletProvider;
use crate::wallet::features::Feature;
use crate::wallet::types::{
    ExecutedTransaction, SignAndExecuteTransactionInput, SignTransactionInput, SignedTransaction,
    WalletAccount, WalletError,
};

#[derive(Debug, Clone, Default)]
pub struct SignTransactionArgs {
    /// Serialized transaction bytes.
    pub transaction: Vec<u8>,
    /// Signer; defaults to the session account.
    pub account: Option<WalletAccount>,
    /// Target chain; defaults to the signer's first chain.
    pub chain: Option<String>,
}

impl SignTransactionArgs {
    pub fn new(transaction: impl Into<Vec<u8>>) -> Self {
        Self {
            transaction: transaction.into(),
            ..Default::default()
        }
    }

    pub fn account(mut self, account: WalletAccount) -> Self {
        self.account = Some(account);
        self
    }

    pub fn chain(mut self, chain: impl Into<String>) -> Self {
        self.chain = Some(chain.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignAndExecuteTransactionArgs {
    pub transaction: Vec<u8>,
    pub account: Option<WalletAccount>,
    pub chain: Option<String>,
    pub request_type: Option<String>,
    /// Forwarded to the wallet untouched.
    pub options: serde_json::Value,
}

impl SignAndExecuteTransactionArgs {
    pub fn new(transaction: impl Into<Vec<u8>>) -> Self {
        Self {
            transaction: transaction.into(),
            ..Default::default()
        }
    }
}

fn default_chain(chain: Option<String>, account: &WalletAccount) -> Option<String> {
    chain.or_else(|| account.chains.first().cloned())
}

pub fn use_sign_transaction(
    provider: &WalletProvider,
    options: MutationOptions<SignTransactionArgs, SignedTransaction>,
) -> Mutation<SignTransactionArgs, SignedTransaction> {
    let key = keys::sign_transaction(options.mutation_key.clone());
    let provider = provider.clone();

    Mutation::new(key, options, move |args: SignTransactionArgs| {
        let provider = provider.clone();
        Box::pin(async move {
            let session = provider.state();
            let wallet = require_wallet(&session)?;
            let feature = wallet
                .sign_transaction_feature()
                .ok_or(WalletError::FeatureNotSupported(Feature::SignTransaction))?;
            let account = resolve_account(args.account, &session)?;
            let chain = default_chain(args.chain, &account);

            feature
                .sign_transaction(SignTransactionInput {
                    transaction: args.transaction,
                    account,
                    chain,
                })
                .await
        })
    })
}

pub fn use_sign_and_execute_transaction(
    provider: &WalletProvider,
    options: MutationOptions<SignAndExecuteTransactionArgs, ExecutedTransaction>,
) -> Mutation<SignAndExecuteTransactionArgs, ExecutedTransaction> {
    let key = keys::sign_and_execute_transaction(options.mutation_key.clone());
    let provider = provider.clone();

    Mutation::new(key, options, move |args: SignAndExecuteTransactionArgs| {
        let provider = provider.clone();
        Box::pin(async move {
            let session = provider.state();
            let wallet = require_wallet(&session)?;
            let feature = wallet.sign_and_execute_transaction_feature().ok_or(
                WalletError::FeatureNotSupported(Feature::SignAndExecuteTransaction),
            )?;
            let account = resolve_account(args.account, &session)?;
            let chain = default_chain(args.chain, &account);

            feature
                .sign_and_execute_transaction(SignAndExecuteTransactionInput {
                    transaction: args.transaction,
                    account,
                    chain,
                    request_type: args.request_type,
                    options: args.options,
                })
                .await
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::testing::account;

    #[test]
    fn test_default_chain() {
        let signer = account("0x1");
        assert_eq!(default_chain(None, &signer).as_deref(), Some("test:local"));
        assert_eq!(
            default_chain(Some("test:other".to_string()), &signer).as_deref(),
            Some("test:other")
        );
        assert_eq!(default_chain(None, &WalletAccount::new("0x2", Vec::new())), None);
    }
}
