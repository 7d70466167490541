//! Wallet filtering and preference ordering.
//!
//! # Ordering
//! ```text
//! eligible = wallets supporting every required feature
//! result   = preferred names (in the order given) ++ remaining eligible
//!            wallets (in discovery order)
//! ```
//! Names are unique in the result even if the input repeats them.

use std::sync::Arc;

use crate::wallet::features::FeatureSet;
use crate::wallet::standard::Wallet;

/// Filter `wallets` by `required` and order them by `preferred`.
pub fn sort_wallets(
    wallets: &[Arc<dyn Wallet>],
    preferred: &[String],
    required: &FeatureSet,
) -> Vec<Arc<dyn Wallet>> {
    let eligible: Vec<&Arc<dyn Wallet>> = wallets
        .iter()
        .filter(|wallet| {
            let features = wallet.features();
            let supported = required.iter().all(|f| features.contains(f));
            if !supported {
                tracing::debug!(wallet = %wallet.name(), "Wallet lacks required features, hiding it");
            }
            supported
        })
        .collect();

    let mut ordered: Vec<Arc<dyn Wallet>> = Vec::with_capacity(eligible.len());
    let mut push_unique = |wallet: &Arc<dyn Wallet>| {
        if !ordered.iter().any(|w| w.name() == wallet.name()) {
            ordered.push(wallet.clone());
        }
    };

    for name in preferred {
        if let Some(wallet) = eligible.iter().find(|w| w.name() == name) {
            push_unique(*wallet);
        }
    }
    for wallet in &eligible {
        push_unique(*wallet);
    }

    ordered
}
