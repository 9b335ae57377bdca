//! Pipelines and the chain that applies them to a handler.
//!
//! Wrapping is naturally inside-out: to have `a` fire before `b` around `h`
//! you must build `a(b(h))`, applying `b` first. Callers should not have to
//! think about that, so two orderings are kept apart:
//!
//! - **declared order** — what callers pass to [`Pipeline::build`] and the
//!   order in which they call [`Chain::pipe`]; first fires first.
//! - **wrapping order** — the order middleware is actually applied in
//!   [`Chain::handler`]; innermost first.
//!
//! A pipeline stores its middleware already in wrapping order. The chain
//! keeps pipelines in declared order and walks them backwards when it
//! composes.

use std::sync::Arc;

use tracing::debug;

use crate::handler::{Endpoint, Handler};
use crate::middleware::Middleware;

/// A reusable, ordered group of middleware.
///
/// Build once at startup and share freely: cloning is one reference-count
/// increment and the contents never change.
#[derive(Clone, Default)]
pub struct Pipeline {
    /// Wrapping order: the reverse of the order passed to `build`.
    wrapping: Arc<[Middleware]>,
}

impl Pipeline {
    /// Groups `middleware`, given in the order it should fire.
    ///
    /// `Pipeline::build([log, auth])` runs `log` first, then `auth`, then the
    /// handler. An empty list gives a pipeline that wraps nothing.
    pub fn build(middleware: impl IntoIterator<Item = Middleware>) -> Self {
        let mut wrapping: Vec<Middleware> = middleware.into_iter().collect();
        wrapping.reverse();
        Self { wrapping: wrapping.into() }
    }

    /// Number of middleware in the pipeline.
    pub fn len(&self) -> usize {
        self.wrapping.len()
    }

    /// `true` for a pipeline that wraps nothing.
    pub fn is_empty(&self) -> bool {
        self.wrapping.is_empty()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline").field("len", &self.len()).finish()
    }
}

/// Starts a [`Chain`] around `handler`.
pub fn start(handler: impl Handler) -> Chain {
    Chain::new(handler)
}

/// Fluent builder that applies pipelines to a base handler.
///
/// Each [`pipe`](Chain::pipe) consumes the chain and returns it, so a chain
/// cannot be changed behind another owner's back. To branch from a common
/// prefix, clone it first: the clone owns its own pipeline list.
///
/// ```rust
/// use plumb::middleware::{Pipeline, start};
/// use plumb::{Request, Response};
///
/// async fn hello(_req: Request) -> Response { Response::text("hello") }
///
/// let common = Pipeline::build([plumb::middleware::trace::trace()]);
///
/// let public = start(hello).pipe(&common);
/// let private = public.clone()
///     .pipe(&Pipeline::build([plumb::middleware::auth::bearer_auth("s3cret")]));
///
/// let (public, private) = (public.handler(), private.handler());
/// ```
#[derive(Clone, Debug)]
pub struct Chain {
    base: Endpoint,
    /// Declared order: first piped is outermost.
    pipelines: Vec<Pipeline>,
}

impl Chain {
    /// A chain around `handler` with no pipelines yet. Same as [`start`].
    pub fn new(handler: impl Handler) -> Self {
        Self { base: Endpoint::new(handler), pipelines: Vec::new() }
    }

    /// Adds `pipeline` inside every pipeline added before it.
    pub fn pipe(mut self, pipeline: &Pipeline) -> Self {
        self.pipelines.push(pipeline.clone());
        self
    }

    /// Composes the base handler with every pipeline.
    ///
    /// Pipelines take effect in the order they were piped and middleware in
    /// the order it was declared. With nothing piped this is the base handler
    /// itself. Calling it again recomposes from the same state.
    pub fn handler(&self) -> Endpoint {
        let mut endpoint = self.base.clone();
        let mut applied = 0usize;

        // Innermost pipeline first; its middleware is already stored innermost first.
        for pipeline in self.pipelines.iter().rev() {
            for middleware in pipeline.wrapping.iter() {
                endpoint = middleware.apply(endpoint);
                applied += 1;
            }
        }

        debug!(pipelines = self.pipelines.len(), middleware = applied, "composed handler");
        endpoint
    }
}
