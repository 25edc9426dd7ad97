//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Skip decisions, config loading, server lifecycle
//!     → logging.rs (structured log events via tracing)
//!     → stdout (fmt layer)
//! ```

pub mod logging;
