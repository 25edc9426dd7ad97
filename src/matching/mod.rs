//! Skip decision subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, url, original url)
//!     → context.rs (uniform accessors)
//!     → url.rs (pick url variant, parse pathname + query)
//!     → matcher.rs (custom → path → ext → method, first hit wins)
//!     → decision.rs: skip (call next) or run the wrapped handler
//!
//! Rule construction (at wrap time):
//!     UnlessOptions (predicate | rule set)
//!     → rules.rs normalisation
//!     → immutable RuleSet, shared read-only
//! ```
//!
//! # Design Decisions
//! - Rule sets never change after construction
//! - Matching is a linear scan over short user-supplied lists
//! - Absent rules never cause a skip
//! - Matching never fails; a panicking custom predicate propagates

pub mod context;
pub mod decision;
pub mod matcher;
pub mod rules;
pub mod url;

pub use context::{RequestContext, RequestParts};
pub use decision::wrap;
pub use rules::{NestedRule, PathMatchMode, PathRule, Predicate, RuleSet, UnlessOptions};
pub use url::ParsedUrl;
