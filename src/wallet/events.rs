//! Event listeners and scoped subscriptions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::wallet::features::FeatureSet;
use crate::wallet::types::WalletAccount;

/// Properties that changed on a wallet. `None` fields are unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletChange {
    pub accounts: Option<Vec<WalletAccount>>,
    pub chains: Option<Vec<String>>,
    pub features: Option<FeatureSet>,
}

impl WalletChange {
    /// A change carrying only a new account list.
    pub fn accounts(accounts: Vec<WalletAccount>) -> Self {
        Self {
            accounts: Some(accounts),
            ..Self::default()
        }
    }
}

/// Shared event callback.
pub type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Callback for `standard:events` change notifications.
pub type ChangeListener = Listener<WalletChange>;

/// A RAII guard that releases a listener on drop.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Wrap an unsubscribe function.
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release.
    pub fn noop() -> Self {
        Self { release: None }
    }

    /// Release the listener now.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Fan-out of events to registered listeners.
///
/// Listeners are snapshotted before dispatch, so a listener may subscribe,
/// unsubscribe or emit again without deadlocking. Ids are handed out in
/// increasing order and dispatch follows them.
pub struct Emitter<E> {
    listeners: Arc<DashMap<u64, Listener<E>>>,
    next_id: AtomicU64,
}

impl<E: 'static> Emitter<E> {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(DashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register a listener until the returned subscription is dropped.
    pub fn subscribe(&self, listener: Listener<E>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.insert(id, listener);

        let listeners = Arc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.remove(&id);
            }
        })
    }

    /// Deliver an event to every listener, in subscription order.
    pub fn emit(&self, event: &E) {
        let mut snapshot: Vec<(u64, Listener<E>)> = self
            .listeners
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        snapshot.sort_unstable_by_key(|(id, _)| *id);

        for (_, listener) in snapshot {
            listener(event);
        }
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<E: 'static> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}
