//! tower integration.
//!
//! # Responsibilities
//! - Wrap any tower `Layer` (e.g. `axum::middleware::from_fn`) with skip rules
//! - Route each request either through the wrapped middleware or straight to
//!   the inner service
//!
//! # Design Decisions
//! - The inner service is cloned once at layer time: one copy sits behind the
//!   wrapped middleware, the other is called directly on skip
//! - `poll_ready` drives both services since the branch is only known in `call`
//! - Responses and errors pass through untouched

use std::sync::Arc;
use std::task::{ready, Context, Poll};

use axum::http::Request;
use futures_util::future::Either;
use tower::{Layer, Service};

use crate::matching::{RuleSet, UnlessOptions};

/// Layer that conditionally bypasses another layer.
pub struct UnlessLayer<L, C> {
    layer: L,
    rules: Arc<RuleSet<C>>,
}

impl<L, C> UnlessLayer<L, C> {
    /// Wrap `layer`, skipping it whenever `options` match a request.
    pub fn new(layer: L, options: impl Into<UnlessOptions<C>>) -> Self {
        Self {
            layer,
            rules: Arc::new(options.into().into_rule_set()),
        }
    }

    /// The normalised rules this layer evaluates.
    pub fn rules(&self) -> &RuleSet<C> {
        &self.rules
    }
}

impl<L: Clone, C> Clone for UnlessLayer<L, C> {
    fn clone(&self) -> Self {
        Self {
            layer: self.layer.clone(),
            rules: self.rules.clone(),
        }
    }
}

impl<L, S, C> Layer<S> for UnlessLayer<L, C>
where
    L: Layer<S>,
    S: Clone,
{
    type Service = Unless<L::Service, S, C>;

    fn layer(&self, inner: S) -> Self::Service {
        Unless {
            wrapped: self.layer.layer(inner.clone()),
            next: inner,
            rules: self.rules.clone(),
        }
    }
}

/// Service produced by [`UnlessLayer`].
///
/// `poll_ready` readies both the wrapped and the inner service. When `call`
/// then skips to the inner service, any capacity the wrapped one reserved in
/// `poll_ready` (a `ConcurrencyLimit` permit, a `Buffer` slot) stays held
/// until the next call that is not skipped.
pub struct Unless<W, S, C> {
    wrapped: W,
    next: S,
    rules: Arc<RuleSet<C>>,
}

impl<W: Clone, S: Clone, C> Clone for Unless<W, S, C> {
    fn clone(&self) -> Self {
        Self {
            wrapped: self.wrapped.clone(),
            next: self.next.clone(),
            rules: self.rules.clone(),
        }
    }
}

impl<W, S, B> Service<Request<B>> for Unless<W, S, Request<B>>
where
    S: Service<Request<B>>,
    W: Service<Request<B>, Response = S::Response, Error = S::Error>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Either<S::Future, W::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        ready!(self.wrapped.poll_ready(cx))?;
        self.next.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        if self.rules.should_skip(&req) {
            tracing::debug!(
                method = %req.method(),
                path = %req.uri().path(),
                "Skipping wrapped middleware"
            );
            Either::Left(self.next.call(req))
        } else {
            Either::Right(self.wrapped.call(req))
        }
    }
}

/// Adds `.unless(..)` to every layer.
pub trait UnlessExt: Sized {
    /// Skip this layer for requests matching `options`.
    fn unless<C>(self, options: impl Into<UnlessOptions<C>>) -> UnlessLayer<Self, C> {
        UnlessLayer::new(self, options)
    }
}

impl<L> UnlessExt for L {}
