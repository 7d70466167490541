//! `use_switch_account`

use crate::hooks::keys;
use crate::hooks::mutation::{Mutation, MutationOptions};
use crate::hooks::wallet::require_wallet;
use crate::provider::WalletProvider;
use crate::session::reducer::SessionAction;
use crate::wallet::types::{WalletAccount, WalletError};

#[derive(Debug, Clone)]
pub struct SwitchAccountArgs {
    pub account: WalletAccount,
}

/// Select another account of the connected wallet.
pub fn use_switch_account(
    provider: &WalletProvider,
    options: MutationOptions<SwitchAccountArgs, WalletAccount>,
) -> Mutation<SwitchAccountArgs, WalletAccount> {
    let key = keys::switch_account(options.mutation_key.clone());
    let provider = provider.clone();

    Mutation::new(key, options, move |args: SwitchAccountArgs| {
        let provider = provider.clone();
        Box::pin(async move {
            let session = provider.state();
            require_wallet(&session)?;

            let address = args.account.address;
            let account = session
                .accounts
                .iter()
                .find(|a| a.address == address)
                .cloned()
                .ok_or(WalletError::AccountNotFound(address))?;

            provider.dispatch(SessionAction::AccountSwitched(account.clone()));
            tracing::info!(account = %account.address, "Account switched");
            Ok::<_, WalletError>(account)
        })
    })
}
