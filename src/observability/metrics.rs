//! Metrics collection.
//!
//! # Metrics
//! - `wallet_kit_mutations_total` (counter): settled mutations by entity, outcome
//! - `wallet_kit_registered_wallets` (gauge): wallets in the registry
//! - `wallet_kit_wallet_events_total` (counter): registry and wallet events by kind
//! - `wallet_kit_connected` (gauge): 1=connected, 0=otherwise
//!
//! Recorded through the `metrics` facade; the embedding application installs
//! an exporter if it wants one.

use metrics::{counter, gauge};

use crate::session::state::ConnectionStatus;

/// Record a settled mutation. `outcome` is `success` or `error`.
pub fn record_mutation(entity: &str, outcome: &'static str) {
    counter!(
        "wallet_kit_mutations_total",
        "entity" => entity.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_registered_wallets(count: usize) {
    gauge!("wallet_kit_registered_wallets").set(count as f64);
}

pub fn record_wallet_event(kind: &'static str) {
    counter!("wallet_kit_wallet_events_total", "kind" => kind).increment(1);
}

pub fn record_connection_status(status: ConnectionStatus) {
    let value = if status == ConnectionStatus::Connected { 1.0 } else { 0.0 };
    gauge!("wallet_kit_connected").set(value);
}
