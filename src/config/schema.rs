//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Rule fields accept either a single value or a list.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::validation::ValidationError;
use crate::matching::{NestedRule, PathMatchMode, PathRule, RuleSet};

/// Root configuration for the demo server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// API key check applied to every route.
    pub auth: AuthConfig,

    /// Requests matching these rules bypass the API key check.
    pub unless: RuleSetConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            auth: AuthConfig::default(),
            unless: RuleSetConfig {
                path: Some(OneOrMany::One(PathEntryConfig::Literal("/health".to_string()))),
                method: Some(OneOrMany::One("OPTIONS".to_string())),
                ..RuleSetConfig::default()
            },
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// API key authentication.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Header carrying the key.
    pub header: String,

    /// Expected key value.
    pub api_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            header: "x-api-key".to_string(),
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// A value written either alone or as a list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            OneOrMany::Many(values) => values.iter(),
            OneOrMany::One(value) => std::slice::from_ref(value).iter(),
        }
    }
}

impl<T: Clone> OneOrMany<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

/// One entry of a configured `path` list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PathEntryConfig {
    /// `"/health"`
    Literal(String),
    /// `{ regex = "^/public/" }`
    Pattern { regex: String },
    /// `{ path = "/admin", method = "POST" }`
    Nested(Box<NestedRuleConfig>),
    /// Anything else; never matches.
    Unrecognized(serde_json::Value),
}

/// A nested path rule as written in config.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NestedRuleConfig {
    pub path: OneOrMany<PathEntryConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<OneOrMany<String>>,
}

/// Skip rules as written in config.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuleSetConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<OneOrMany<PathEntryConfig>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<OneOrMany<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<OneOrMany<String>>,

    /// Match against the URL as first received (default) rather than the
    /// rewritten one.
    pub use_original_url: bool,

    pub path_mode: PathMatchMode,
}

impl Default for RuleSetConfig {
    fn default() -> Self {
        Self {
            path: None,
            ext: None,
            method: None,
            use_original_url: true,
            path_mode: PathMatchMode::Recursive,
        }
    }
}

impl RuleSetConfig {
    /// Build the runtime rule set.
    ///
    /// Every invalid pattern is reported, not just the first. Unrecognized
    /// path entries are dropped with a warning.
    pub fn compile<C>(&self) -> Result<RuleSet<C>, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let path = self
            .path
            .as_ref()
            .map(|entries| compile_paths(entries, &mut errors));

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(RuleSet {
            custom: None,
            path,
            ext: self.ext.as_ref().map(OneOrMany::to_vec),
            method: self.method.as_ref().map(OneOrMany::to_vec),
            use_original_url: self.use_original_url,
            path_mode: self.path_mode,
        })
    }
}

fn compile_paths(
    entries: &OneOrMany<PathEntryConfig>,
    errors: &mut Vec<ValidationError>,
) -> Vec<PathRule> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            PathEntryConfig::Literal(path) => Some(PathRule::Literal(path.clone())),
            PathEntryConfig::Pattern { regex } => match Regex::new(regex) {
                Ok(pattern) => Some(PathRule::Pattern(pattern)),
                Err(source) => {
                    errors.push(ValidationError::InvalidPattern {
                        pattern: regex.clone(),
                        source,
                    });
                    None
                }
            },
            PathEntryConfig::Nested(nested) => Some(PathRule::Nested(NestedRule {
                path: Some(compile_paths(&nested.path, errors)),
                method: nested.method.as_ref().map(OneOrMany::to_vec),
            })),
            PathEntryConfig::Unrecognized(value) => {
                tracing::warn!(entry = %value, "Ignoring unrecognized path rule");
                None
            }
        })
        .collect()
}
