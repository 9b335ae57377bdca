//! Bearer-token authentication.
//!
//! Checks `Authorization: Bearer <token>` against one shared token. Requests
//! without the header, or with a different token, are answered
//! `401 Unauthorized` and never reach the inner endpoint.

use std::sync::Arc;

use http::StatusCode;
use tracing::debug;

use crate::handler::Endpoint;
use crate::middleware::Middleware;
use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// Why a request was turned away.
#[derive(Debug, PartialEq, Eq)]
enum AuthError {
    /// The Authorization header is missing or not a bearer token.
    MissingToken,
    /// A bearer token was given but does not match.
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            Self::MissingToken => "Missing bearer token",
            Self::InvalidToken => "Invalid bearer token",
        };
        Response::builder()
            .status(StatusCode::UNAUTHORIZED)
            .header("www-authenticate", "Bearer")
            .text(message)
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
fn bearer_token(req: &Request) -> Option<&str> {
    req.header("authorization")?.strip_prefix("Bearer ")
}

/// Constant-time comparison, so response timing does not reveal how much of
/// the token matched. Only the length can leak.
fn timing_safe_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

fn check(req: &Request, expected: &str) -> Result<(), AuthError> {
    match bearer_token(req) {
        None => Err(AuthError::MissingToken),
        Some(token) if timing_safe_eq(token, expected) => Ok(()),
        Some(_) => Err(AuthError::InvalidToken),
    }
}

/// Requires every request to carry `Authorization: Bearer <token>`.
pub fn bearer_auth(token: &str) -> Middleware {
    let expected: Arc<str> = Arc::from(token);

    Middleware::from_fn(move |req: Request, next: Endpoint| {
        let verdict = check(&req, &expected);
        async move {
            match verdict {
                Ok(()) => next.call(req).await,
                Err(e) => {
                    debug!(path = req.path(), reason = ?e, "request rejected");
                    e.into_response()
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Method;

    async fn secret(_req: Request) -> Response {
        Response::text("secret")
    }

    fn protected() -> Endpoint {
        bearer_auth("test-api-key-12345").apply(Endpoint::new(secret))
    }

    #[test]
    fn extracts_token_from_bearer_header() {
        let req = Request::new(Method::Get, "/").with_header("Authorization", "Bearer abc");
        assert_eq!(bearer_token(&req), Some("abc"));
    }

    #[test]
    fn ignores_non_bearer_schemes() {
        let req = Request::new(Method::Get, "/").with_header("authorization", "Basic dXNlcjpwYXNz");
        assert_eq!(check(&req, "dXNlcjpwYXNz"), Err(AuthError::MissingToken));
    }

    #[test]
    fn timing_safe_eq_matches_only_identical_strings() {
        assert!(timing_safe_eq("test-api-key-12345", "test-api-key-12345"));
        assert!(!timing_safe_eq("test-api-key-12345", "test-api-key-XXXXX"));
        assert!(!timing_safe_eq("test-api-key-12345", "test-api-key-1234"));
        assert!(timing_safe_eq("", ""));
    }

    #[test]
    fn same_length_wrong_token_is_invalid() {
        let req = Request::new(Method::Get, "/")
            .with_header("authorization", "Bearer test-api-key-XXXXX");
        assert_eq!(check(&req, "test-api-key-12345"), Err(AuthError::InvalidToken));

        let req = Request::new(Method::Get, "/")
            .with_header("authorization", "Bearer Xest-api-key-12345");
        assert_eq!(check(&req, "test-api-key-12345"), Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let res = protected().call(Request::new(Method::Get, "/")).await;

        assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(res.header("www-authenticate"), Some("Bearer"));
        assert_eq!(res.body(), b"Missing bearer token");
    }

    #[tokio::test]
    async fn wrong_token_is_unauthorized() {
        let req = Request::new(Method::Get, "/").with_header("authorization", "Bearer nope");
        let res = protected().call(req).await;

        assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(res.body(), b"Invalid bearer token");
    }

    #[tokio::test]
    async fn matching_token_reaches_the_handler() {
        let req = Request::new(Method::Get, "/")
            .with_header("authorization", "Bearer test-api-key-12345");
        let res = protected().call(req).await;

        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"secret");
    }
}
