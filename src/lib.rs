//! # plumb
//!
//! Ordered middleware pipelines for minimal HTTP services.
//!
//! ## The contract
//!
//! Cross-cutting behavior (tracing, authentication, header injection) is
//! written once as [`Middleware`], grouped into reusable [`Pipeline`]s, and
//! applied to a handler in the order it should fire. plumb only builds the
//! composed handler. Routing, accepting connections, timeouts and retries
//! belong to whatever hosts it.
//!
//! - [`Pipeline::build`] takes middleware in firing order. First listed
//!   fires first on the way in and last on the way out.
//! - [`start`] + [`Chain::pipe`] apply pipelines in the order they are
//!   piped. The first pipeline piped is the outermost.
//! - [`Chain::handler`] returns an [`Endpoint`], which is itself a handler and
//!   a hyper `Service`.
//!
//! ## Quick start
//!
//! ```rust
//! use plumb::middleware::{auth, headers, trace};
//! use plumb::{Pipeline, Request, Response, Status, start};
//!
//! async fn create_user(req: Request) -> Response {
//!     if req.body().is_empty() {
//!         return Response::status(Status::BAD_REQUEST);
//!     }
//!     Response::builder()
//!         .status(Status::CREATED)
//!         .header("location", "/users/99")
//!         .json(br#"{"id":"99"}"#.to_vec())
//! }
//!
//! // Built once at startup, shared by every endpoint that needs them.
//! let common = Pipeline::build([
//!     trace::trace(),
//!     headers::response_header("x-powered-by", "plumb"),
//! ]);
//! let private = Pipeline::build([auth::bearer_auth("s3cret")]);
//!
//! // trace → x-powered-by → bearer auth → create_user
//! let endpoint = start(create_user).pipe(&common).pipe(&private).handler();
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod service;

pub mod middleware;

pub use error::Error;
pub use handler::{Endpoint, Handler};
pub use http::StatusCode as Status;
pub use method::Method;
pub use middleware::{Chain, Middleware, Pipeline, start};
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
