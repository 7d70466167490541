//! Wallet discovery subsystem.
//!
//! # Data Flow
//! ```text
//! Wallet implementation
//!     → store.rs register() / unregister()
//!     → RegistryEvent fanned out to subscribers
//!     → ordering.rs (required-feature filter, preference order)
//!     → provider session state
//! ```
//!
//! # Design Decisions
//! - The registry is an explicit value, not a process global
//! - Wallet names are unique within a registry
//! - Discovery order is registration order

pub mod ordering;
pub mod store;

pub use ordering::sort_wallets;
pub use store::{Registration, RegistryEvent, WalletRegistry};
