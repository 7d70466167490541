//! Wallet provider subsystem.
//!
//! # Data Flow
//! ```text
//! WalletRegistry events
//!     → context.rs (filter + order wallets, dispatch SessionAction)
//!     → session reducer → watch channel → observers
//!
//! Current wallet changes
//!     → properties.rs (re-subscribe to standard:events by identity)
//!     → change event → WalletPropertiesChanged
//! ```
//!
//! # Design Decisions
//! - One provider owns one session; no global state
//! - Callbacks never run under an internal lock
//! - Teardown (drop of the last handle) releases every subscription and
//!   unregisters the burner wallet

pub mod context;
pub mod properties;

pub use context::WalletProvider;
pub use properties::PropertiesWatcher;
