//! Skip rules.
//!
//! A [`RuleSet`] is built once when a handler is wrapped and is read-only
//! afterwards. Single values given to the builder are stored as one-element
//! lists so the matchers only ever see lists.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Caller-supplied predicate over the request context.
pub type Predicate<C> = Arc<dyn Fn(&C) -> bool + Send + Sync>;

/// Which path matcher the decision function runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMatchMode {
    /// Literal, pattern and nested entries.
    #[default]
    Recursive,
    /// Literal and pattern entries only; nested entries never match.
    Flat,
}

/// One entry of a `path` rule list.
#[derive(Debug, Clone)]
pub enum PathRule {
    /// Matches only when equal to the pathname.
    Literal(String),
    /// Matches when the expression finds a match anywhere in the pathname.
    Pattern(Regex),
    /// Path entries with their own method list.
    Nested(NestedRule),
}

impl From<&str> for PathRule {
    fn from(path: &str) -> Self {
        PathRule::Literal(path.to_string())
    }
}

impl From<String> for PathRule {
    fn from(path: String) -> Self {
        PathRule::Literal(path)
    }
}

impl From<Regex> for PathRule {
    fn from(pattern: Regex) -> Self {
        PathRule::Pattern(pattern)
    }
}

impl From<NestedRule> for PathRule {
    fn from(rule: NestedRule) -> Self {
        PathRule::Nested(rule)
    }
}

/// A nested path rule.
///
/// Inherits the enclosing rule set, replacing its `path` and, when given,
/// its `method`.
#[derive(Debug, Clone, Default)]
pub struct NestedRule {
    pub path: Option<Vec<PathRule>>,
    pub method: Option<Vec<String>>,
}

impl NestedRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, rule: impl Into<PathRule>) -> Self {
        self.path.get_or_insert_with(Vec::new).push(rule.into());
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method.get_or_insert_with(Vec::new).push(method.into());
        self
    }
}

/// Declarative description of when to skip the wrapped handler.
pub struct RuleSet<C> {
    pub custom: Option<Predicate<C>>,
    pub path: Option<Vec<PathRule>>,
    pub ext: Option<Vec<String>>,
    pub method: Option<Vec<String>>,
    /// Evaluate the URL captured before rewriting (default) instead of the
    /// current one.
    pub use_original_url: bool,
    pub path_mode: PathMatchMode,
}

impl<C> RuleSet<C> {
    /// An empty rule set: nothing skips.
    pub fn new() -> Self {
        Self {
            custom: None,
            path: None,
            ext: None,
            method: None,
            use_original_url: true,
            path_mode: PathMatchMode::default(),
        }
    }

    pub fn custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(predicate));
        self
    }

    pub fn path(mut self, rule: impl Into<PathRule>) -> Self {
        self.path.get_or_insert_with(Vec::new).push(rule.into());
        self
    }

    pub fn ext(mut self, ext: impl Into<String>) -> Self {
        self.ext.get_or_insert_with(Vec::new).push(ext.into());
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method.get_or_insert_with(Vec::new).push(method.into());
        self
    }

    pub fn use_original_url(mut self, enabled: bool) -> Self {
        self.use_original_url = enabled;
        self
    }

    pub fn path_mode(mut self, mode: PathMatchMode) -> Self {
        self.path_mode = mode;
        self
    }
}

impl<C> Default for RuleSet<C> {
    fn default() -> Self {
        Self::new()
    }
}

// Derives would require `C: Clone`/`C: Debug`.
impl<C> Clone for RuleSet<C> {
    fn clone(&self) -> Self {
        Self {
            custom: self.custom.clone(),
            path: self.path.clone(),
            ext: self.ext.clone(),
            method: self.method.clone(),
            use_original_url: self.use_original_url,
            path_mode: self.path_mode,
        }
    }
}

impl<C> fmt::Debug for RuleSet<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("custom", &self.custom.as_ref().map(|_| "<predicate>"))
            .field("path", &self.path)
            .field("ext", &self.ext)
            .field("method", &self.method)
            .field("use_original_url", &self.use_original_url)
            .field("path_mode", &self.path_mode)
            .finish()
    }
}

/// What a caller may pass when wrapping a handler.
pub enum UnlessOptions<C> {
    /// A bare predicate; equivalent to a rule set with only `custom`.
    Predicate(Predicate<C>),
    Rules(RuleSet<C>),
}

impl<C> UnlessOptions<C> {
    /// Wrap a bare predicate.
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        UnlessOptions::Predicate(Arc::new(predicate))
    }

    /// Reduce to the canonical rule set.
    pub fn into_rule_set(self) -> RuleSet<C> {
        match self {
            UnlessOptions::Predicate(predicate) => RuleSet {
                custom: Some(predicate),
                ..RuleSet::new()
            },
            UnlessOptions::Rules(rules) => rules,
        }
    }
}

impl<C> From<RuleSet<C>> for UnlessOptions<C> {
    fn from(rules: RuleSet<C>) -> Self {
        UnlessOptions::Rules(rules)
    }
}

impl<C> From<Predicate<C>> for UnlessOptions<C> {
    fn from(predicate: Predicate<C>) -> Self {
        UnlessOptions::Predicate(predicate)
    }
}
