//! HTTP integration subsystem.
//!
//! # Data Flow
//! ```text
//! axum Router
//!     → layer.rs (Unless service: evaluate rules per request)
//!         → skip: inner service directly
//!         → otherwise: wrapped middleware, then inner service
//!     → server.rs (demo app wiring, listener)
//! ```

pub mod layer;
pub mod server;

pub use layer::{Unless, UnlessExt, UnlessLayer};
pub use server::HttpServer;
