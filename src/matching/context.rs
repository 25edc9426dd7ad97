//! Request context seen by the matchers.
//!
//! # Responsibilities
//! - Expose the request method and both URL variants
//! - Adapt `http::Request` (axum) and plain owned parts to one interface
//!
//! # Design Decisions
//! - Read-only: matchers never mutate the context
//! - The "original" URL is the one captured before any upstream rewriting
//!   (axum records it as the `OriginalUri` extension when nesting routers)

use std::borrow::Cow;

use axum::extract::OriginalUri;
use axum::http::Request;

/// Accessors the decision function needs from a request.
pub trait RequestContext {
    /// HTTP method name, compared exactly (case-sensitive).
    fn method(&self) -> &str;

    /// Current, possibly rewritten, request target.
    fn url(&self) -> Cow<'_, str>;

    /// Request target as first received, if the framework recorded one.
    fn original_url(&self) -> Option<Cow<'_, str>>;
}

impl<B> RequestContext for Request<B> {
    fn method(&self) -> &str {
        Request::method(self).as_str()
    }

    fn url(&self) -> Cow<'_, str> {
        let uri = self.uri();
        match uri.path_and_query() {
            Some(pq) => Cow::Borrowed(pq.as_str()),
            None => Cow::Borrowed(uri.path()),
        }
    }

    fn original_url(&self) -> Option<Cow<'_, str>> {
        self.extensions().get::<OriginalUri>().map(|OriginalUri(uri)| {
            match uri.path_and_query() {
                Some(pq) => Cow::Borrowed(pq.as_str()),
                None => Cow::Borrowed(uri.path()),
            }
        })
    }
}

/// Owned request parts, for callers outside of a tower stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParts {
    pub method: String,
    pub url: String,
    pub original_url: Option<String>,
}

impl RequestParts {
    /// Parts where the original and current URL are the same.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            original_url: None,
        }
    }

    /// Record the URL as it was before rewriting.
    pub fn with_original_url(mut self, original_url: impl Into<String>) -> Self {
        self.original_url = Some(original_url.into());
        self
    }
}

impl RequestContext for RequestParts {
    fn method(&self) -> &str {
        &self.method
    }

    fn url(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.url)
    }

    fn original_url(&self) -> Option<Cow<'_, str>> {
        self.original_url.as_deref().map(Cow::Borrowed)
    }
}
