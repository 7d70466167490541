//! `use_sign_personal_message`

use crate::hooks::keys;
use crate::hooks::mutation::{Mutation, MutationOptions};
use crate::hooks::wallet::{require_wallet, resolve_account};
use crate::provider::WalletProvider;
use crate::wallet::features::Feature;
use crate::wallet::types::{SignPersonalMessageInput, SignedMessage, WalletAccount, WalletError};

#[derive(Debug, Clone)]
pub struct SignPersonalMessageArgs {
    pub message: Vec<u8>,
    /// Signer; defaults to the session account.
    pub account: Option<WalletAccount>,
}

impl SignPersonalMessageArgs {
    pub fn new(message: impl Into<Vec<u8>>) -> Self {
        Self {
            message: message.into(),
            account: None,
        }
    }

    pub fn account(mut self, account: WalletAccount) -> Self {
        self.account = Some(account);
        self
    }
}

pub fn use_sign_personal_message(
    provider: &WalletProvider,
    options: MutationOptions<SignPersonalMessageArgs, SignedMessage>,
) -> Mutation<SignPersonalMessageArgs, SignedMessage> {
    let key = keys::sign_personal_message(options.mutation_key.clone());
    let provider = provider.clone();

    Mutation::new(key, options, move |args: SignPersonalMessageArgs| {
        let provider = provider.clone();
        Box::pin(async move {
            let session = provider.state();
            let wallet = require_wallet(&session)?;
            let feature = wallet
                .sign_personal_message_feature()
                .ok_or(WalletError::FeatureNotSupported(Feature::SignPersonalMessage))?;
            let account = resolve_account(args.account, &session)?;

            feature
                .sign_personal_message(SignPersonalMessageInput {
                    message: args.message,
                    account,
                })
                .await
        })
    })
}
