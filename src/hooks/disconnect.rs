//! `use_disconnect_wallet`

use crate::hooks::keys;
use crate::hooks::mutation::{Mutation, MutationOptions};
use crate::hooks::wallet::require_wallet;
use crate::provider::WalletProvider;
use crate::session::reducer::SessionAction;
use crate::wallet::types::WalletError;

/// Disconnect the current wallet.
///
/// A failing `standard:disconnect` is logged; the session is cleared anyway.
pub fn use_disconnect_wallet(
    provider: &WalletProvider,
    options: MutationOptions<(), ()>,
) -> Mutation<(), ()> {
    let key = keys::disconnect_wallet(options.mutation_key.clone());
    let provider = provider.clone();

    Mutation::new(key, options, move |_: ()| {
        let provider = provider.clone();
        Box::pin(async move {
            let wallet = require_wallet(&provider.state())?;

            if let Some(disconnect) = wallet.disconnect_feature() {
                if let Err(e) = disconnect.disconnect().await {
                    tracing::error!(wallet = %wallet.name(), error = %e, "Failed to disconnect the wallet");
                }
            }

            provider.dispatch(SessionAction::WalletDisconnected);
            tracing::info!(wallet = %wallet.name(), "Wallet disconnected");
            Ok::<_, WalletError>(())
        })
    })
}
