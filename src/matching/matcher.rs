//! Skip condition matchers.
//!
//! # Responsibilities
//! - Custom predicate
//! - Path (recursive with nested rules, and the flat legacy form)
//! - Extension suffix
//! - HTTP method
//!
//! # Design Decisions
//! - Every matcher is a pure function returning `false` for an absent rule
//! - Lists are scanned linearly in configuration order, first hit wins
//! - Nested path rules see only `path` and `method`; `ext` and `custom`
//!   are never consulted below the top level

use crate::matching::context::RequestContext;
use crate::matching::rules::{NestedRule, PathMatchMode, PathRule, RuleSet};
use crate::matching::url::ParsedUrl;

/// The part of a rule set visible to the recursive path matcher.
///
/// Each nested entry yields a fresh scope; the parent is left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathScope<'a> {
    pub path: Option<&'a [PathRule]>,
    pub method: Option<&'a [String]>,
}

impl<'a> PathScope<'a> {
    /// Top-level scope of a rule set.
    pub fn of<C>(rules: &'a RuleSet<C>) -> Self {
        Self {
            path: rules.path.as_deref(),
            method: rules.method.as_deref(),
        }
    }

    /// Scope for a nested entry: its path replaces ours, its method
    /// replaces ours only when present.
    pub fn merge(self, nested: &'a NestedRule) -> Self {
        Self {
            path: nested.path.as_deref(),
            method: nested.method.as_deref().or(self.method),
        }
    }
}

/// Result of the caller's predicate, or `false` when none is configured.
pub fn matches_custom<C>(ctx: &C, rules: &RuleSet<C>) -> bool {
    match &rules.custom {
        Some(predicate) => predicate(ctx),
        None => false,
    }
}

/// Path match with nested rules.
///
/// A nested entry matches only when its own paths match AND the request
/// method matches the merged method list.
pub fn matches_path_recursive(method: &str, url: &ParsedUrl, scope: PathScope<'_>) -> bool {
    let Some(paths) = scope.path else {
        return false;
    };

    paths.iter().any(|rule| match rule {
        PathRule::Nested(nested) => {
            let merged = scope.merge(nested);
            matches_path_recursive(method, url, merged) && matches_method(method, merged.method)
        }
        other => matches_direct(other, &url.pathname),
    })
}

/// Path match over literal and pattern entries only.
pub fn matches_path_flat(url: &ParsedUrl, paths: Option<&[PathRule]>) -> bool {
    paths
        .map(|paths| paths.iter().any(|rule| matches_direct(rule, &url.pathname)))
        .unwrap_or(false)
}

fn matches_direct(rule: &PathRule, pathname: &str) -> bool {
    match rule {
        PathRule::Literal(path) => path == pathname,
        PathRule::Pattern(pattern) => pattern.is_match(pathname),
        PathRule::Nested(_) => false,
    }
}

/// True when any configured extension ends the pathname.
///
/// Comparison is case-sensitive and the leading dot is part of the
/// configured value. Empty extensions never match.
pub fn matches_extension(url: &ParsedUrl, exts: Option<&[String]>) -> bool {
    exts.map(|exts| {
        exts.iter()
            .any(|ext| !ext.is_empty() && url.pathname.ends_with(ext.as_str()))
    })
    .unwrap_or(false)
}

/// True when the request method is listed (exact, case-sensitive).
pub fn matches_method(method: &str, methods: Option<&[String]>) -> bool {
    methods
        .map(|methods| methods.iter().any(|m| m == method))
        .unwrap_or(false)
}

/// Dispatch to the path matcher selected by the rule set.
pub fn matches_path<C: RequestContext>(ctx: &C, url: &ParsedUrl, rules: &RuleSet<C>) -> bool {
    match rules.path_mode {
        PathMatchMode::Recursive => matches_path_recursive(ctx.method(), url, PathScope::of(rules)),
        PathMatchMode::Flat => matches_path_flat(url, rules.path.as_deref()),
    }
}
