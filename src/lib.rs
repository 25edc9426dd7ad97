//! Conditional-skip ("unless") middleware for tower and axum.
//!
//! Wrap a middleware layer with declarative rules (paths, path patterns,
//! nested path + method rules, extensions, methods, or a custom predicate);
//! matching requests go straight to the inner service.

pub mod config;
pub mod http;
pub mod matching;
pub mod observability;

pub use config::schema::AppConfig;
pub use http::{UnlessExt, UnlessLayer};
pub use matching::{wrap, NestedRule, PathRule, RequestContext, RuleSet, UnlessOptions};
