//! The wallet provider: owner of the session.

use std::sync::{Arc, Mutex, Weak};

use tokio::sync::watch;

use crate::config::schema::WalletProviderConfig;
use crate::observability::metrics;
use crate::provider::properties::PropertiesWatcher;
use crate::registry::ordering::sort_wallets;
use crate::registry::store::{Registration, RegistryEvent, WalletRegistry};
use crate::session::reducer::SessionAction;
use crate::session::state::{ConnectionStatus, SessionState};
use crate::wallet::burner::UnsafeBurnerWallet;
use crate::wallet::events::{ChangeListener, Subscription, WalletChange};
use crate::wallet::features::{required_feature_set, FeatureSet};
use crate::wallet::standard::Wallet;
use crate::wallet::types::WalletAccount;

struct ProviderInner {
    config: WalletProviderConfig,
    required_features: FeatureSet,
    registry: WalletRegistry,
    /// Session state; observers hold receivers.
    state: watch::Sender<SessionState>,
    properties: PropertiesWatcher,
    registry_subscription: Mutex<Option<Subscription>>,
    burner: Mutex<Option<Registration>>,
}

impl ProviderInner {
    fn sorted_wallets(&self) -> Vec<Arc<dyn Wallet>> {
        sort_wallets(
            &self.registry.get(),
            &self.config.preferred_wallets,
            &self.required_features,
        )
    }

    fn handle_registry_event(self: &Arc<Self>, event: &RegistryEvent) {
        let wallets = self.sorted_wallets();
        let action = match event {
            RegistryEvent::Registered(_) => SessionAction::WalletsUpdated { wallets },
            RegistryEvent::Unregistered(wallet) => SessionAction::WalletUnregistered {
                updated_wallets: wallets,
                unregistered_wallet: wallet.clone(),
            },
        };
        self.dispatch(action);
    }

    fn dispatch(self: &Arc<Self>, action: SessionAction) {
        let kind = action.kind();
        let mut status = ConnectionStatus::Disconnected;
        self.state.send_modify(|state| {
            state.apply(action);
            status = state.connection_status;
        });
        tracing::debug!(action = kind, status = %status, "Session updated");
        metrics::record_connection_status(status);

        self.sync_properties_subscription();
    }

    /// Re-point the change subscription at the current wallet.
    fn sync_properties_subscription(self: &Arc<Self>) {
        let current = self.state.borrow().current_wallet.clone();
        let weak = Arc::downgrade(self);
        self.properties
            .track(current.as_ref(), move || change_listener(weak));
    }

    fn on_wallet_change(self: &Arc<Self>, change: &WalletChange) {
        metrics::record_wallet_event("change");
        let Some(accounts) = change.accounts.clone() else {
            return;
        };
        tracing::info!(accounts = accounts.len(), "Wallet accounts changed");
        self.dispatch(SessionAction::WalletPropertiesChanged { accounts });
    }
}

fn change_listener(provider: Weak<ProviderInner>) -> ChangeListener {
    Arc::new(move |change: &WalletChange| {
        if let Some(provider) = provider.upgrade() {
            provider.on_wallet_change(change);
        }
    })
}

impl Drop for ProviderInner {
    fn drop(&mut self) {
        self.properties.release();
        if let Ok(mut subscription) = self.registry_subscription.lock() {
            subscription.take();
        }
        let burner = self.burner.lock().ok().and_then(|mut burner| burner.take());
        if let Some(registration) = burner {
            registration.unregister();
        }
        tracing::debug!("Wallet provider torn down");
    }
}

/// Owner of the wallet session.
///
/// Listens to the registry, keeps the wallet list ordered and filtered, and
/// follows the current wallet's change events. Cloning yields another handle
/// to the same session; the session is torn down when the last handle drops.
#[derive(Clone)]
pub struct WalletProvider {
    inner: Arc<ProviderInner>,
}

impl WalletProvider {
    /// Create a provider over `registry`.
    pub fn new(registry: WalletRegistry, config: WalletProviderConfig) -> Self {
        let required_features = required_feature_set(&config.required_features);
        let wallets = sort_wallets(
            &registry.get(),
            &config.preferred_wallets,
            &required_features,
        );
        let (state, _) = watch::channel(SessionState::with_wallets(wallets));

        let inner = Arc::new(ProviderInner {
            config,
            required_features,
            registry,
            state,
            properties: PropertiesWatcher::new(),
            registry_subscription: Mutex::new(None),
            burner: Mutex::new(None),
        });

        let weak = Arc::downgrade(&inner);
        let subscription = inner.registry.subscribe(move |event| {
            if let Some(inner) = weak.upgrade() {
                inner.handle_registry_event(event);
            }
        });
        *inner
            .registry_subscription
            .lock()
            .expect("provider mutex poisoned") = Some(subscription);

        let provider = Self { inner };
        if provider.inner.config.enable_unsafe_burner {
            provider.register_unsafe_burner();
        }

        tracing::info!(
            wallets = ?provider.state().wallet_names(),
            preferred = ?provider.inner.config.preferred_wallets,
            "Wallet provider initialized"
        );
        provider
    }

    fn register_unsafe_burner(&self) {
        let chain_id = self.inner.config.burner.chain_id;
        let burner = match UnsafeBurnerWallet::from_env_or_random(chain_id) {
            Ok(burner) => burner,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create unsafe burner wallet");
                return;
            }
        };

        match self.inner.registry.register(Arc::new(burner)) {
            Ok(registration) => {
                *self.inner.burner.lock().expect("provider mutex poisoned") = Some(registration);
            }
            Err(e) => tracing::warn!(error = %e, "Unsafe burner wallet not registered"),
        }
    }

    /// Snapshot of the session.
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every session change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn wallets(&self) -> Vec<Arc<dyn Wallet>> {
        self.inner.state.borrow().wallets.clone()
    }

    pub fn current_wallet(&self) -> Option<Arc<dyn Wallet>> {
        self.inner.state.borrow().current_wallet.clone()
    }

    pub fn current_account(&self) -> Option<WalletAccount> {
        self.inner.state.borrow().current_account.clone()
    }

    pub fn accounts(&self) -> Vec<WalletAccount> {
        self.inner.state.borrow().accounts.clone()
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        self.inner.state.borrow().connection_status
    }

    pub fn registry(&self) -> &WalletRegistry {
        &self.inner.registry
    }

    pub fn config(&self) -> &WalletProviderConfig {
        &self.inner.config
    }

    /// Name of the wallet whose change events are being followed.
    pub fn observed_wallet(&self) -> Option<String> {
        self.inner.properties.tracked_wallet()
    }

    pub(crate) fn dispatch(&self, action: SessionAction) {
        self.inner.dispatch(action);
    }
}

impl std::fmt::Debug for WalletProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletProvider")
            .field("session", &self.state().summary())
            .finish()
    }
}
