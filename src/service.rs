//! Serving an [`Endpoint`] with hyper.
//!
//! plumb does not accept connections. Whatever owns the listener hands each
//! connection to a hyper connection builder together with an endpoint, which
//! implements hyper's `Service` directly:
//!
//! ```rust,ignore
//! let endpoint = start(app).pipe(&common).handler();
//! hyper::server::conn::http1::Builder::new()
//!     .serve_connection(io, endpoint.clone())
//!     .await?;
//! ```

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::service::Service;
use tracing::warn;

use crate::error::Error;
use crate::handler::Endpoint;
use crate::request::Request;
use crate::response::Response;

type ServiceFuture = Pin<Box<dyn Future<Output = Result<http::Response<Full<Bytes>>, Error>> + Send>>;

impl Service<hyper::Request<Incoming>> for Endpoint {
    type Response = http::Response<Full<Bytes>>;
    type Error = Error;
    type Future = ServiceFuture;

    /// Buffers the request and runs the endpoint on it.
    ///
    /// Unknown methods are answered `405` without calling the endpoint. A body
    /// that cannot be read is returned as an error, which makes hyper drop the
    /// connection.
    fn call(&self, req: hyper::Request<Incoming>) -> Self::Future {
        let endpoint = self.clone();
        Box::pin(async move {
            let res = match Request::from_hyper(req).await {
                Ok(req) => endpoint.call(req).await,
                Err(Error::UnsupportedMethod(method)) => {
                    warn!(%method, "unsupported method");
                    Response::status(StatusCode::METHOD_NOT_ALLOWED)
                }
                Err(e) => return Err(e),
            };
            Ok(res.into_http())
        })
    }
}
