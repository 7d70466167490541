//! Registered wallet store.

use std::sync::{Arc, Mutex, Weak};

use crate::observability::metrics;
use crate::wallet::events::{Emitter, Subscription};
use crate::wallet::standard::{same_wallet, Wallet};
use crate::wallet::types::{WalletError, WalletResult};

/// Registry change notification.
#[derive(Debug, Clone)]
pub enum RegistryEvent {
    Registered(Arc<dyn Wallet>),
    Unregistered(Arc<dyn Wallet>),
}

impl RegistryEvent {
    pub fn wallet(&self) -> &Arc<dyn Wallet> {
        match self {
            RegistryEvent::Registered(wallet) | RegistryEvent::Unregistered(wallet) => wallet,
        }
    }
}

#[derive(Default)]
struct RegistryInner {
    /// Wallets in discovery order.
    wallets: Mutex<Vec<Arc<dyn Wallet>>>,
    events: Emitter<RegistryEvent>,
}

impl RegistryInner {
    fn remove(&self, wallet: &Arc<dyn Wallet>) -> bool {
        let (removed, remaining) = {
            let mut wallets = self.wallets.lock().expect("wallet registry mutex poisoned");
            let before = wallets.len();
            wallets.retain(|w| !same_wallet(w, wallet));
            (wallets.len() != before, wallets.len())
        };

        if removed {
            tracing::info!(wallet = %wallet.name(), "Wallet unregistered");
            metrics::record_registered_wallets(remaining);
            metrics::record_wallet_event("unregister");
            self.events.emit(&RegistryEvent::Unregistered(wallet.clone()));
        }
        removed
    }
}

/// Set of wallets available to the application.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct WalletRegistry {
    inner: Arc<RegistryInner>,
}

impl WalletRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a wallet. Fails if a wallet with the same name exists.
    pub fn register(&self, wallet: Arc<dyn Wallet>) -> WalletResult<Registration> {
        let count = {
            let mut wallets = self.inner.wallets.lock().expect("wallet registry mutex poisoned");
            if wallets.iter().any(|w| w.name() == wallet.name()) {
                tracing::warn!(wallet = %wallet.name(), "Ignoring duplicate wallet registration");
                return Err(WalletError::DuplicateWallet(wallet.name().to_string()));
            }
            wallets.push(wallet.clone());
            wallets.len()
        };

        tracing::info!(
            wallet = %wallet.name(),
            version = %wallet.version(),
            registered = count,
            "Wallet registered"
        );
        metrics::record_registered_wallets(count);
        metrics::record_wallet_event("register");
        self.inner.events.emit(&RegistryEvent::Registered(wallet.clone()));

        Ok(Registration {
            registry: Arc::downgrade(&self.inner),
            wallet,
        })
    }

    /// Remove a wallet by identity. Returns false if it was not registered.
    pub fn unregister(&self, wallet: &Arc<dyn Wallet>) -> bool {
        self.inner.remove(wallet)
    }

    /// Registered wallets in discovery order.
    pub fn get(&self) -> Vec<Arc<dyn Wallet>> {
        self.inner
            .wallets
            .lock()
            .expect("wallet registry mutex poisoned")
            .clone()
    }

    /// Look a wallet up by name.
    pub fn find(&self, name: &str) -> Option<Arc<dyn Wallet>> {
        self.inner
            .wallets
            .lock()
            .expect("wallet registry mutex poisoned")
            .iter()
            .find(|w| w.name() == name)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner
            .wallets
            .lock()
            .expect("wallet registry mutex poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Listen for register/unregister events until the subscription drops.
    pub fn subscribe(
        &self,
        listener: impl Fn(&RegistryEvent) + Send + Sync + 'static,
    ) -> Subscription {
        self.inner.events.subscribe(Arc::new(listener))
    }

    pub fn listener_count(&self) -> usize {
        self.inner.events.listener_count()
    }
}

impl std::fmt::Debug for WalletRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.get().iter().map(|w| w.name().to_string()).collect();
        f.debug_struct("WalletRegistry").field("wallets", &names).finish()
    }
}

/// Handle returned by [`WalletRegistry::register`].
#[must_use = "keep the Registration to unregister the wallet later"]
pub struct Registration {
    registry: Weak<RegistryInner>,
    wallet: Arc<dyn Wallet>,
}

impl Registration {
    pub fn wallet(&self) -> &Arc<dyn Wallet> {
        &self.wallet
    }

    /// Remove the wallet from the registry it was registered with.
    pub fn unregister(self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.remove(&self.wallet),
            None => false,
        }
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("wallet", &self.wallet.name())
            .finish()
    }
}
