//! The skip decision and the plain-function wrapper.

use std::borrow::Cow;

use crate::matching::context::RequestContext;
use crate::matching::matcher::{matches_custom, matches_extension, matches_method, matches_path};
use crate::matching::rules::{RuleSet, UnlessOptions};
use crate::matching::url::ParsedUrl;

impl<C: RequestContext> RuleSet<C> {
    /// URL string the matchers evaluate for this request.
    pub fn target_url<'c>(&self, ctx: &'c C) -> Cow<'c, str> {
        if self.use_original_url {
            ctx.original_url().unwrap_or_else(|| ctx.url())
        } else {
            ctx.url()
        }
    }

    /// Whether the wrapped handler should be bypassed for `ctx`.
    ///
    /// Matchers run in a fixed order (custom, path, extension, method) and
    /// stop at the first hit.
    pub fn should_skip(&self, ctx: &C) -> bool {
        let url = ParsedUrl::parse(&self.target_url(ctx));

        matches_custom(ctx, self)
            || matches_path(ctx, &url, self)
            || matches_extension(&url, self.ext.as_deref())
            || matches_method(ctx.method(), self.method.as_deref())
    }
}

/// Wrap `handler` so it is bypassed whenever `options` match.
///
/// The returned function calls `next()` on a match and `handler(ctx, next)`
/// otherwise, returning either result untouched.
pub fn wrap<C, N, R, H>(handler: H, options: impl Into<UnlessOptions<C>>) -> impl Fn(&C, N) -> R
where
    C: RequestContext,
    N: FnOnce() -> R,
    H: Fn(&C, N) -> R,
{
    let rules = options.into().into_rule_set();
    move |ctx, next| {
        if rules.should_skip(ctx) {
            next()
        } else {
            handler(ctx, next)
        }
    }
}
