//! The wallet interface injected by wallet implementations.

use std::fmt;
use std::sync::Arc;

use crate::wallet::features::{
    Feature, FeatureSet, SignAndExecuteTransaction, SignPersonalMessage, SignTransaction,
    StandardConnect, StandardDisconnect, StandardEvents,
};
use crate::wallet::types::WalletAccount;

/// An external wallet exposing a named set of capabilities.
///
/// Feature accessors return `None` when the capability is absent. Callers check
/// membership through [`Wallet::supports`] or the accessor before invoking.
pub trait Wallet: Send + Sync {
    /// Unique display name. The registry rejects duplicates.
    fn name(&self) -> &str;

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn icon(&self) -> Option<&str> {
        None
    }

    /// Chains the wallet supports.
    fn chains(&self) -> Vec<String>;

    /// Accounts the wallet has authorized for this application.
    fn accounts(&self) -> Vec<WalletAccount>;

    fn connect_feature(&self) -> Option<&dyn StandardConnect> {
        None
    }

    fn disconnect_feature(&self) -> Option<&dyn StandardDisconnect> {
        None
    }

    fn events_feature(&self) -> Option<&dyn StandardEvents> {
        None
    }

    fn sign_personal_message_feature(&self) -> Option<&dyn SignPersonalMessage> {
        None
    }

    fn sign_transaction_feature(&self) -> Option<&dyn SignTransaction> {
        None
    }

    fn sign_and_execute_transaction_feature(&self) -> Option<&dyn SignAndExecuteTransaction> {
        None
    }

    /// Application-defined capabilities beyond the typed ones.
    fn additional_features(&self) -> Vec<Feature> {
        Vec::new()
    }

    /// Full capability set.
    fn features(&self) -> FeatureSet {
        let mut features = FeatureSet::new();
        if self.connect_feature().is_some() {
            features.insert(Feature::Connect);
        }
        if self.disconnect_feature().is_some() {
            features.insert(Feature::Disconnect);
        }
        if self.events_feature().is_some() {
            features.insert(Feature::Events);
        }
        if self.sign_personal_message_feature().is_some() {
            features.insert(Feature::SignPersonalMessage);
        }
        if self.sign_transaction_feature().is_some() {
            features.insert(Feature::SignTransaction);
        }
        if self.sign_and_execute_transaction_feature().is_some() {
            features.insert(Feature::SignAndExecuteTransaction);
        }
        features.extend(self.additional_features());
        features
    }

    fn supports(&self, feature: &Feature) -> bool {
        self.features().contains(feature)
    }
}

impl fmt::Debug for dyn Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("name", &self.name())
            .field("version", &self.version())
            .finish()
    }
}

/// Identity comparison. Two handles are the same wallet only if they share
/// an allocation; equal names are not enough.
pub fn same_wallet(a: &Arc<dyn Wallet>, b: &Arc<dyn Wallet>) -> bool {
    Arc::ptr_eq(a, b)
}

/// [`same_wallet`] lifted over optional references.
pub fn same_wallet_opt(a: Option<&Arc<dyn Wallet>>, b: Option<&Arc<dyn Wallet>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => same_wallet(a, b),
        (None, None) => true,
        _ => false,
    }
}
