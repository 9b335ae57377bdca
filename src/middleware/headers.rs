//! Fixed header injection.

use std::sync::Arc;

use crate::handler::Endpoint;
use crate::middleware::Middleware;
use crate::request::Request;

/// Sets `name: value` on every request before the inner endpoint sees it,
/// replacing any value the client sent.
pub fn request_header(name: &str, value: &str) -> Middleware {
    let header: Arc<(String, String)> = Arc::new((name.to_owned(), value.to_owned()));

    Middleware::from_fn(move |mut req: Request, next: Endpoint| {
        req.set_header(&header.0, &header.1);
        next.call(req)
    })
}

/// Sets `name: value` on every response from the inner endpoint, replacing
/// any value the handler chose.
pub fn response_header(name: &str, value: &str) -> Middleware {
    let header: Arc<(String, String)> = Arc::new((name.to_owned(), value.to_owned()));

    Middleware::from_fn(move |req: Request, next: Endpoint| {
        let header = Arc::clone(&header);
        async move {
            let mut res = next.call(req).await;
            res.set_header(&header.0, &header.1);
            res
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::{Pipeline, start};
    use crate::{Method, Response};

    async fn echo_host(req: Request) -> Response {
        Response::builder()
            .header("server", "handler")
            .text(req.header("x-forwarded-host").unwrap_or("-").to_owned())
    }

    #[tokio::test]
    async fn request_header_overrides_client_value() {
        let endpoint = start(echo_host)
            .pipe(&Pipeline::build([request_header("X-Forwarded-Host", "api.internal")]))
            .handler();

        let req = Request::new(Method::Get, "/").with_header("x-forwarded-host", "spoofed");
        let res = endpoint.call(req).await;

        assert_eq!(res.body(), b"api.internal");
    }

    #[tokio::test]
    async fn response_header_overrides_handler_value() {
        let endpoint = start(echo_host)
            .pipe(&Pipeline::build([response_header("Server", "plumb")]))
            .handler();

        let res = endpoint.call(Request::new(Method::Get, "/")).await;

        assert_eq!(res.header("server"), Some("plumb"));
        assert_eq!(res.headers().iter().filter(|(k, _)| k.eq_ignore_ascii_case("server")).count(), 1);
    }
}
