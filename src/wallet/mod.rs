//! Wallet interface subsystem.
//!
//! # Data Flow
//! ```text
//! Injected wallet (implements standard.rs::Wallet)
//!     → features.rs (capability set + typed feature traits)
//!     → events.rs (change listeners, scoped subscriptions)
//!     → types.rs (accounts, requests, responses, errors)
//! ```
//!
//! # Design Decisions
//! - Wallets are trait objects; identity is the `Arc` allocation
//! - Signing is always delegated to the wallet; nothing here holds keys,
//!   except the development-only burner.rs

pub mod burner;
pub mod events;
pub mod features;
pub mod standard;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use burner::{UnsafeBurnerWallet, UNSAFE_BURNER_WALLET_NAME};
pub use events::{ChangeListener, Subscription, WalletChange};
pub use features::{Feature, FeatureSet};
pub use standard::Wallet;
pub use types::{WalletAccount, WalletError, WalletResult};
