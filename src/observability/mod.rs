//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! registry, provider, hooks
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges)
//! ```

pub mod logging;
pub mod metrics;
