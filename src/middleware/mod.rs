//! Middleware layer.
//!
//! Middleware intercepts requests and responses and is the right place for
//! cross-cutting concerns: structured tracing, request-id injection, and
//! authentication-header inspection.
//!
//! A [`Middleware`] turns an inner [`Endpoint`] into a new one. Group them
//! into a [`Pipeline`] in the order they should fire, then apply pipelines
//! to a handler with [`start`]:
//!
//! ```rust
//! use plumb::middleware::{self, Pipeline, start};
//! use plumb::{Request, Response};
//!
//! async fn hello(_req: Request) -> Response {
//!     Response::text("hello")
//! }
//!
//! let common = Pipeline::build([middleware::trace::trace()]);
//! let private = Pipeline::build([middleware::auth::bearer_auth("s3cret")]);
//!
//! // trace fires first, then auth, then `hello`.
//! let endpoint = start(hello).pipe(&common).pipe(&private).handler();
//! ```
//!
//! Built-in middleware:
//! - [`trace`] — per-request span with method, path, status, latency
//! - [`auth`] — bearer-token check, `401` on mismatch
//! - [`headers`] — fixed request or response header injection

use std::future::Future;
use std::sync::Arc;

use crate::handler::{Endpoint, Handler};
use crate::request::Request;
use crate::response::IntoResponse;

pub mod auth;
pub mod headers;
pub mod pipeline;
pub mod trace;

pub use pipeline::{Chain, Pipeline, start};

/// A transformation from an inner handler to a new handler wrapped around it.
///
/// Cloning is cheap and shares the same function. Middleware has no identity:
/// two clones are indistinguishable from two separately built values.
#[derive(Clone)]
pub struct Middleware(Arc<dyn Fn(Endpoint) -> Endpoint + Send + Sync + 'static>);

impl Middleware {
    /// Builds a middleware from a function that receives the inner endpoint
    /// and returns the handler that wraps it.
    ///
    /// ```rust
    /// use plumb::{Endpoint, Request, middleware::Middleware};
    ///
    /// let passthrough = Middleware::new(|next: Endpoint| move |req: Request| next.call(req));
    /// ```
    pub fn new<F, H>(f: F) -> Self
    where
        F: Fn(Endpoint) -> H + Send + Sync + 'static,
        H: Handler,
    {
        Self(Arc::new(move |next: Endpoint| Endpoint::new(f(next))))
    }

    /// Builds a middleware from an `async` function of the request and the
    /// inner endpoint. Code before `next.call(req)` runs on the way in, code
    /// after it on the way out.
    ///
    /// ```rust
    /// use plumb::{Endpoint, Request, middleware::Middleware};
    ///
    /// let tagged = Middleware::from_fn(|req: Request, next: Endpoint| async move {
    ///     let mut res = next.call(req).await;
    ///     res.set_header("x-served-by", "plumb");
    ///     res
    /// });
    /// ```
    pub fn from_fn<F, Fut, R>(f: F) -> Self
    where
        F: Fn(Request, Endpoint) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + Send + 'static,
    {
        let f = Arc::new(f);
        Self::new(move |next: Endpoint| {
            let f = Arc::clone(&f);
            move |req: Request| (*f)(req, next.clone())
        })
    }

    /// Wraps `inner`, returning the outer endpoint.
    pub fn apply(&self, inner: Endpoint) -> Endpoint {
        (self.0)(inner)
    }
}

impl std::fmt::Debug for Middleware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Middleware").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Method, Response, Status};

    async fn ok(_req: Request) -> Response {
        Response::text("ok")
    }

    #[tokio::test]
    async fn from_fn_can_short_circuit() {
        let deny = Middleware::from_fn(|_req: Request, _next: Endpoint| async { Status::FORBIDDEN });
        let endpoint = deny.apply(Endpoint::new(ok));

        let res = endpoint.call(Request::new(Method::Get, "/")).await;
        assert_eq!(res.status_code(), Status::FORBIDDEN);
    }

    #[tokio::test]
    async fn from_fn_sees_the_response_on_the_way_out() {
        let tag = Middleware::from_fn(|req: Request, next: Endpoint| async move {
            let mut res = next.call(req).await;
            res.set_header("x-tag", "outer");
            res
        });
        let endpoint = tag.apply(Endpoint::new(ok));

        let res = endpoint.call(Request::new(Method::Get, "/")).await;
        assert_eq!(res.header("x-tag"), Some("outer"));
        assert_eq!(res.body(), b"ok");
    }

    #[tokio::test]
    async fn new_wraps_with_a_plain_handler() {
        let rewrite = Middleware::new(|next: Endpoint| move |mut req: Request| {
            req.set_header("x-rewritten", "yes");
            next.call(req)
        });
        let echo = |req: Request| async move {
            Response::text(req.header("x-rewritten").unwrap_or("no").to_owned())
        };
        let endpoint = rewrite.apply(Endpoint::new(echo));

        let res = endpoint.call(Request::new(Method::Get, "/")).await;
        assert_eq!(res.body(), b"yes");
    }

    #[test]
    fn identity_middleware_returns_the_inner_endpoint() {
        let noop = Middleware::new(|next: Endpoint| next);
        let inner = Endpoint::new(ok);

        assert!(noop.apply(inner.clone()).ptr_eq(&inner));
    }
}
