//! Request target parsing.

use axum::http::Uri;
use url::form_urlencoded;

/// A request target split into its path and decoded query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUrl {
    /// Path component exactly as received, without query or fragment.
    pub pathname: String,
    /// Form-decoded query pairs, in order of appearance.
    pub query: Vec<(String, String)>,
}

impl ParsedUrl {
    /// Parse an origin-form ("/path?query") or absolute-form target.
    ///
    /// The path is never normalised: dot segments, repeated slashes and
    /// percent escapes are kept as received. An empty or unparseable target
    /// yields an empty pathname.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::default();
        }

        match raw.parse::<Uri>() {
            Ok(uri) => Self {
                pathname: uri.path().to_string(),
                query: uri
                    .query()
                    .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
                    .unwrap_or_default(),
            },
            Err(e) => {
                tracing::debug!(target_url = %raw, error = %e, "Unparseable request target");
                Self::default()
            }
        }
    }
}
