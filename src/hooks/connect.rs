//! `use_connect_wallet`

use std::sync::Arc;

use crate::hooks::keys;
use crate::hooks::mutation::{Mutation, MutationOptions};
use crate::provider::WalletProvider;
use crate::session::reducer::{select_account, SessionAction};
use crate::session::state::ConnectionStatus;
use crate::wallet::features::Feature;
use crate::wallet::standard::{same_wallet, Wallet};
use crate::wallet::types::{ConnectInput, ConnectOutput, WalletError};

#[derive(Debug, Clone)]
pub struct ConnectWalletArgs {
    pub wallet: Arc<dyn Wallet>,
    /// Address to select after connecting. Falls back to the first account.
    pub account_address: Option<String>,
    pub silent: bool,
}

impl ConnectWalletArgs {
    pub fn new(wallet: Arc<dyn Wallet>) -> Self {
        Self {
            wallet,
            account_address: None,
            silent: false,
        }
    }

    pub fn account_address(mut self, address: impl Into<String>) -> Self {
        self.account_address = Some(address.into());
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }
}

/// Puts the connection status back unless disarmed.
///
/// Covers both a failed connect and a connect future dropped mid-await.
struct StatusGuard {
    provider: WalletProvider,
    previous: ConnectionStatus,
    armed: bool,
}

impl StatusGuard {
    fn connecting(provider: &WalletProvider) -> Self {
        let previous = provider.connection_status();
        provider.dispatch(SessionAction::ConnectionStatusUpdated(
            ConnectionStatus::Connecting,
        ));
        Self {
            provider: provider.clone(),
            previous,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for StatusGuard {
    fn drop(&mut self) {
        if self.armed {
            tracing::debug!(status = %self.previous, "Restoring connection status");
            self.provider
                .dispatch(SessionAction::ConnectionStatusUpdated(self.previous));
        }
    }
}

/// Connect to a wallet and make it the current one.
///
/// The status is `connecting` while the wallet is asked. If the connect fails,
/// is cancelled, or the wallet is unregistered meanwhile, the status goes back
/// to what it was before.
pub fn use_connect_wallet(
    provider: &WalletProvider,
    options: MutationOptions<ConnectWalletArgs, ConnectOutput>,
) -> Mutation<ConnectWalletArgs, ConnectOutput> {
    let key = keys::connect_wallet(options.mutation_key.clone());
    let provider = provider.clone();

    Mutation::new(key, options, move |args: ConnectWalletArgs| {
        let provider = provider.clone();
        Box::pin(async move {
            let wallet = args.wallet;
            let connect = wallet
                .connect_feature()
                .ok_or(WalletError::FeatureNotSupported(Feature::Connect))?;

            let guard = StatusGuard::connecting(&provider);

            let output = match connect.connect(ConnectInput { silent: args.silent }).await {
                Ok(output) => output,
                Err(e) => {
                    tracing::warn!(wallet = %wallet.name(), error = %e, "Wallet connection failed");
                    return Err(e);
                }
            };

            let registered = provider
                .registry()
                .get()
                .iter()
                .any(|w| same_wallet(w, &wallet));
            if !registered {
                tracing::warn!(wallet = %wallet.name(), "Wallet unregistered while connecting");
                return Err(WalletError::WalletUnregistered(wallet.name().to_string()));
            }

            let current_account =
                select_account(&output.accounts, args.account_address.as_deref());
            tracing::info!(
                wallet = %wallet.name(),
                accounts = output.accounts.len(),
                account = current_account.as_ref().map(|a| a.address.as_str()),
                "Wallet connected"
            );
            provider.dispatch(SessionAction::WalletConnected {
                wallet: wallet.clone(),
                accounts: output.accounts.clone(),
                current_account,
            });
            guard.disarm();
            Ok::<_, WalletError>(output)
        })
    })
}
