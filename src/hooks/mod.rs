//! Hook surface.
//!
//! # Data Flow
//! ```text
//! use_*(provider, MutationOptions)
//!     → Mutation handle (mutation.rs), keyed by keys.rs
//!     → mutate(args): preconditions against the session snapshot
//!         1. NotConnected          no current wallet
//!         2. FeatureNotSupported   wallet lacks the capability
//!         3. NoAccountSelected     no explicit or session account
//!     → wallet feature call, result returned unchanged
//!     → session actions dispatched for connect/disconnect/switch
//! ```
//!
//! # Design Decisions
//! - Preconditions are evaluated when `mutate` runs, not when the hook is built
//! - Read hooks are plain snapshots of the provider's state

pub mod connect;
pub mod disconnect;
pub mod keys;
pub mod mutation;
pub mod sign_personal_message;
pub mod sign_transaction;
pub mod switch_account;
pub mod wallet;

pub use connect::{use_connect_wallet, ConnectWalletArgs};
pub use disconnect::use_disconnect_wallet;
pub use keys::MutationKey;
pub use mutation::{Mutation, MutationOptions, MutationState, MutationStatus};
pub use sign_personal_message::{use_sign_personal_message, SignPersonalMessageArgs};
pub use sign_transaction::{
    use_sign_and_execute_transaction, use_sign_transaction, SignAndExecuteTransactionArgs,
    SignTransactionArgs,
};
pub use switch_account::{use_switch_account, SwitchAccountArgs};
pub use wallet::{
    use_accounts, use_connection_status, use_current_account, use_current_wallet, use_wallet,
    use_wallets,
};
