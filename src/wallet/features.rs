//! Wallet capabilities.
//!
//! Each wallet is polymorphic over a fixed capability set. Membership is
//! checked through [`Feature`] before a capability is invoked; the invocation
//! itself goes through the typed feature traits below.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::wallet::events::{ChangeListener, Subscription};
use crate::wallet::types::{
    ConnectInput, ConnectOutput, ExecutedTransaction, SignAndExecuteTransactionInput,
    SignPersonalMessageInput, SignTransactionInput, SignedMessage, SignedTransaction,
    WalletResult,
};

/// A named wallet capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Feature {
    Connect,
    Disconnect,
    Events,
    SignPersonalMessage,
    SignTransaction,
    SignAndExecuteTransaction,
    /// Application-defined capability, `namespace:name`.
    Custom(String),
}

/// Ordered set of capabilities.
pub type FeatureSet = BTreeSet<Feature>;

/// Capabilities every wallet must expose to be listed by a provider.
pub const BASE_REQUIRED_FEATURES: [Feature; 2] = [Feature::Connect, Feature::Events];

impl Feature {
    /// Wire identifier of the feature.
    pub fn identifier(&self) -> &str {
        match self {
            Feature::Connect => "standard:connect",
            Feature::Disconnect => "standard:disconnect",
            Feature::Events => "standard:events",
            Feature::SignPersonalMessage => "wallet:signPersonalMessage",
            Feature::SignTransaction => "wallet:signTransaction",
            Feature::SignAndExecuteTransaction => "wallet:signAndExecuteTransaction",
            Feature::Custom(identifier) => identifier,
        }
    }

    /// Whether the identifier has the `namespace:name` shape.
    pub fn is_well_formed(&self) -> bool {
        match self.identifier().split_once(':') {
            Some((namespace, name)) => !namespace.is_empty() && !name.is_empty(),
            None => false,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl From<&str> for Feature {
    fn from(identifier: &str) -> Self {
        match identifier {
            "standard:connect" => Feature::Connect,
            "standard:disconnect" => Feature::Disconnect,
            "standard:events" => Feature::Events,
            "wallet:signPersonalMessage" => Feature::SignPersonalMessage,
            "wallet:signTransaction" => Feature::SignTransaction,
            "wallet:signAndExecuteTransaction" => Feature::SignAndExecuteTransaction,
            other => Feature::Custom(other.to_string()),
        }
    }
}

impl From<String> for Feature {
    fn from(identifier: String) -> Self {
        Feature::from(identifier.as_str())
    }
}

impl From<Feature> for String {
    fn from(feature: Feature) -> Self {
        feature.identifier().to_string()
    }
}

impl FromStr for Feature {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Feature::from(s))
    }
}

/// Base required features plus any extra ones.
pub fn required_feature_set(extra: &[Feature]) -> FeatureSet {
    BASE_REQUIRED_FEATURES
        .iter()
        .cloned()
        .chain(extra.iter().cloned())
        .collect()
}

/// `standard:connect`
#[async_trait]
pub trait StandardConnect: Send + Sync {
    async fn connect(&self, input: ConnectInput) -> WalletResult<ConnectOutput>;
}

/// `standard:disconnect`
#[async_trait]
pub trait StandardDisconnect: Send + Sync {
    async fn disconnect(&self) -> WalletResult<()>;
}

/// `standard:events`
pub trait StandardEvents: Send + Sync {
    /// Listen for property changes. The listener may be called synchronously
    /// from inside this method.
    fn on_change(&self, listener: ChangeListener) -> Subscription;
}

/// `wallet:signPersonalMessage`
#[async_trait]
pub trait SignPersonalMessage: Send + Sync {
    async fn sign_personal_message(
        &self,
        input: SignPersonalMessageInput,
    ) -> WalletResult<SignedMessage>;
}

/// `wallet:signTransaction`
#[async_trait]
pub trait SignTransaction: Send + Sync {
    async fn sign_transaction(&self, input: SignTransactionInput)
        -> WalletResult<SignedTransaction>;
}

/// `wallet:signAndExecuteTransaction`
#[async_trait]
pub trait SignAndExecuteTransaction: Send + Sync {
    async fn sign_and_execute_transaction(
        &self,
        input: SignAndExecuteTransactionInput,
    ) -> WalletResult<ExecutedTransaction>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_round_trip() {
        for feature in [
            Feature::Connect,
            Feature::Disconnect,
            Feature::Events,
            Feature::SignPersonalMessage,
            Feature::SignTransaction,
            Feature::SignAndExecuteTransaction,
        ] {
            assert_eq!(Feature::from(feature.identifier()), feature);
        }
    }

    #[test]
    fn test_custom_feature() {
        let feature: Feature = "my-dapp:super-cool-feature".parse().unwrap();
        assert_eq!(
            feature,
            Feature::Custom("my-dapp:super-cool-feature".to_string())
        );
        assert!(feature.is_well_formed());
        assert!(!Feature::from("no-namespace").is_well_formed());
        assert!(!Feature::from(":empty").is_well_formed());
    }

    #[test]
    fn test_serde_as_identifier() {
        let json = serde_json::to_string(&Feature::SignTransaction).unwrap();
        assert_eq!(json, "\"wallet:signTransaction\"");

        let features: Vec<Feature> =
            serde_json::from_str(r#"["standard:events","x:y"]"#).unwrap();
        assert_eq!(features[0], Feature::Events);
        assert_eq!(features[1], Feature::Custom("x:y".to_string()));
    }

    #[test]
    fn test_required_feature_set() {
        let set = required_feature_set(&[Feature::SignTransaction, Feature::Connect]);
        assert_eq!(set.len(), 3);
        assert!(set.contains(&Feature::Events));
    }
}
