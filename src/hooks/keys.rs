//! Mutation keys.
//!
//! A key is `[{"baseScope":"wallet","baseEntity":<entity>}, ...additional]`.

use std::fmt;

use serde::Serialize;
use serde_json::{json, Value};

pub const WALLET_SCOPE: &str = "wallet";

/// Identifies a mutation for logging, metrics and callers' bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MutationKey(Vec<Value>);

impl MutationKey {
    /// Wallet-scoped key for `entity`, followed by `additional` parts.
    pub fn wallet(entity: &str, additional: Vec<Value>) -> Self {
        let mut parts = Vec::with_capacity(additional.len() + 1);
        parts.push(json!({ "baseScope": WALLET_SCOPE, "baseEntity": entity }));
        parts.extend(additional);
        Self(parts)
    }

    pub fn parts(&self) -> &[Value] {
        &self.0
    }

    /// The `baseEntity` of the key, if present.
    pub fn entity(&self) -> &str {
        self.0
            .first()
            .and_then(|base| base.get("baseEntity"))
            .and_then(Value::as_str)
            .unwrap_or("unknown")
    }
}

impl fmt::Display for MutationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Value::Array(self.0.clone()).to_string())
    }
}

pub fn connect_wallet(additional: Vec<Value>) -> MutationKey {
    MutationKey::wallet("connect-wallet", additional)
}

pub fn disconnect_wallet(additional: Vec<Value>) -> MutationKey {
    MutationKey::wallet("disconnect-wallet", additional)
}

pub fn switch_account(additional: Vec<Value>) -> MutationKey {
    MutationKey::wallet("switch-account", additional)
}

pub fn sign_personal_message(additional: Vec<Value>) -> MutationKey {
    MutationKey::wallet("sign-personal-message", additional)
}

pub fn sign_transaction(additional: Vec<Value>) -> MutationKey {
    MutationKey::wallet("sign-transaction", additional)
}

pub fn sign_and_execute_transaction(additional: Vec<Value>) -> MutationKey {
    MutationKey::wallet("sign-and-execute-transaction", additional)
}
