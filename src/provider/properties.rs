//! Change-event bridge.
//!
//! Holds at most one subscription to a wallet's `standard:events` stream,
//! keyed by wallet identity.
//!
//! # Lifecycle
//! ```text
//! track(Some(w)) with w != tracked → release old, subscribe to w
//! track(Some(w)) with w == tracked → no-op
//! track(None) / release()          → release old
//! drop                             → release old
//! ```

use std::sync::{Arc, Mutex};

use crate::wallet::events::{ChangeListener, Subscription};
use crate::wallet::standard::{same_wallet_opt, Wallet};

#[derive(Default)]
struct Tracked {
    wallet: Option<Arc<dyn Wallet>>,
    subscription: Option<Subscription>,
}

/// Keeps a change subscription on the current wallet.
#[derive(Default)]
pub struct PropertiesWatcher {
    tracked: Mutex<Tracked>,
}

impl PropertiesWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow `wallet`. `listener` is only built when a new subscription is
    /// needed.
    ///
    /// The wallet may invoke the listener synchronously while subscribing; no
    /// lock is held at that point, so the listener may call back into `track`.
    pub fn track(
        &self,
        wallet: Option<&Arc<dyn Wallet>>,
        listener: impl FnOnce() -> ChangeListener,
    ) {
        let previous = {
            let mut tracked = self.tracked.lock().expect("properties watcher mutex poisoned");
            if same_wallet_opt(tracked.wallet.as_ref(), wallet) {
                return;
            }
            tracked.wallet = wallet.cloned();
            tracked.subscription.take()
        };
        if previous.is_some() {
            tracing::debug!("Released wallet change subscription");
        }
        drop(previous);

        let Some(wallet) = wallet else {
            return;
        };
        let Some(events) = wallet.events_feature() else {
            tracing::warn!(wallet = %wallet.name(), "Wallet has no events feature; account changes will not be observed");
            return;
        };

        let subscription = events.on_change(listener());
        tracing::debug!(wallet = %wallet.name(), "Subscribed to wallet change events");

        let stale = {
            let mut tracked = self.tracked.lock().expect("properties watcher mutex poisoned");
            if same_wallet_opt(tracked.wallet.as_ref(), Some(wallet)) {
                tracked.subscription = Some(subscription);
                None
            } else {
                // The wallet was swapped while we were subscribing.
                Some(subscription)
            }
        };
        drop(stale);
    }

    /// Drop the current subscription and forget the wallet.
    pub fn release(&self) {
        let previous = {
            let mut tracked = self.tracked.lock().expect("properties watcher mutex poisoned");
            tracked.wallet = None;
            tracked.subscription.take()
        };
        drop(previous);
    }

    /// Name of the wallet currently followed.
    pub fn tracked_wallet(&self) -> Option<String> {
        self.tracked
            .lock()
            .expect("properties watcher mutex poisoned")
            .wallet
            .as_ref()
            .map(|w| w.name().to_string())
    }

    pub fn is_subscribed(&self) -> bool {
        self.tracked
            .lock()
            .expect("properties watcher mutex poisoned")
            .subscription
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::events::WalletChange;
    use crate::wallet::testing::{account, TestWallet};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_listener(count: &Arc<AtomicUsize>) -> impl FnOnce() -> ChangeListener {
        let count = count.clone();
        move || -> ChangeListener {
            Arc::new(move |_: &WalletChange| {
                count.fetch_add(1, Ordering::SeqCst);
            })
        }
    }

    #[test]
    fn test_subscribes_and_receives_changes() {
        let wallet = Arc::new(TestWallet::new("A"));
        let handle: Arc<dyn Wallet> = wallet.clone();
        let watcher = PropertiesWatcher::new();
        let count = Arc::new(AtomicUsize::new(0));

        watcher.track(Some(&handle), counting_listener(&count));
        wallet.events.emit(&WalletChange::accounts(vec![account("0x1")]));

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(watcher.is_subscribed());
        assert_eq!(watcher.tracked_wallet().as_deref(), Some("A"));
    }

    #[test]
    fn test_same_wallet_does_not_resubscribe() {
        let wallet = Arc::new(TestWallet::new("A"));
        let handle: Arc<dyn Wallet> = wallet.clone();
        let watcher = PropertiesWatcher::new();
        let count = Arc::new(AtomicUsize::new(0));

        watcher.track(Some(&handle), counting_listener(&count));
        watcher.track(Some(&handle), counting_listener(&count));

        assert_eq!(wallet.events.listener_count(), 1);
    }

    #[test]
    fn test_swap_releases_previous() {
        let first = Arc::new(TestWallet::new("A"));
        let second = Arc::new(TestWallet::new("A"));
        let (h1, h2): (Arc<dyn Wallet>, Arc<dyn Wallet>) = (first.clone(), second.clone());
        let watcher = PropertiesWatcher::new();
        let count = Arc::new(AtomicUsize::new(0));

        watcher.track(Some(&h1), counting_listener(&count));
        // Same name, different identity.
        watcher.track(Some(&h2), counting_listener(&count));

        assert_eq!(first.events.listener_count(), 0);
        assert_eq!(second.events.listener_count(), 1);

        watcher.track(None, counting_listener(&count));
        assert_eq!(second.events.listener_count(), 0);
        assert!(watcher.tracked_wallet().is_none());
    }

    #[test]
    fn test_release_and_drop() {
        let wallet = Arc::new(TestWallet::new("A"));
        let handle: Arc<dyn Wallet> = wallet.clone();
        let count = Arc::new(AtomicUsize::new(0));

        let watcher = PropertiesWatcher::new();
        watcher.track(Some(&handle), counting_listener(&count));
        watcher.release();
        assert_eq!(wallet.events.listener_count(), 0);

        let watcher = PropertiesWatcher::new();
        watcher.track(Some(&handle), counting_listener(&count));
        drop(watcher);
        assert_eq!(wallet.events.listener_count(), 0);
    }
}
