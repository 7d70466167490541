//! Wallet connector kit.
//!
//! Discovers wallets through a registry, keeps a connection session in a
//! provider, and exposes wallet operations as mutation hooks.

pub mod config;
pub mod hooks;
pub mod observability;
pub mod provider;
pub mod registry;
pub mod session;
pub mod wallet;

pub use config::schema::{KitConfig, WalletProviderConfig};
pub use provider::WalletProvider;
pub use registry::WalletRegistry;
pub use session::{ConnectionStatus, SessionState};
pub use wallet::{Feature, Wallet, WalletAccount, WalletError, WalletResult};
