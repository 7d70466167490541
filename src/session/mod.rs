//! Session state subsystem.
//!
//! # Data Flow
//! ```text
//! registry events / hook results / wallet change events
//!     → reducer.rs SessionAction
//!     → state.rs SessionState (applied in place)
//!     → published by the provider to observers
//! ```
//!
//! # Design Decisions
//! - Transitions are a pure function of (state, action)
//! - Accounts are replaced wholesale, never edited
//! - The session is owned by exactly one provider

pub mod reducer;
pub mod state;

pub use reducer::SessionAction;
pub use state::{ConnectionStatus, SessionState};
