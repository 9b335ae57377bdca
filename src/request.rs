//! Incoming HTTP request type.

use http_body_util::BodyExt;
use hyper::body::Incoming;

use crate::error::Error;
use crate::method::Method;

/// An incoming HTTP request, fully buffered.
///
/// Hosts build one with [`Request::from_hyper`]; tests and custom servers can
/// use [`Request::new`] plus the `with_*` methods.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Vec<u8>,
}

impl Request {
    /// A request with no headers and an empty body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Buffers a hyper request into a [`Request`].
    ///
    /// Header values that are not valid UTF-8 are converted lossily.
    pub async fn from_hyper(req: hyper::Request<Incoming>) -> Result<Self, Error> {
        let (parts, body) = req.into_parts();

        let method = parts.method.as_str().parse::<Method>()
            .map_err(|()| Error::UnsupportedMethod(parts.method.to_string()))?;

        let headers = parts.headers.iter()
            .map(|(k, v)| (k.as_str().to_owned(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect();

        let body = body.collect().await?.to_bytes().to_vec();

        Ok(Self {
            method,
            path: parts.uri.path().to_owned(),
            query: parts.uri.query().map(str::to_owned),
            headers,
            body,
        })
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn query(&self) -> Option<&str> { self.query.as_deref() }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Sets a header, replacing any existing header with the same name.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = Request::new(Method::Get, "/")
            .with_header("X-Request-Id", "abc");

        assert_eq!(req.header("x-request-id"), Some("abc"));
        assert_eq!(req.header("x-missing"), None);
    }

    #[test]
    fn set_header_replaces_existing_value() {
        let mut req = Request::new(Method::Post, "/users")
            .with_header("x-tenant", "old")
            .with_header("accept", "*/*");

        req.set_header("X-Tenant", "new");

        assert_eq!(req.header("x-tenant"), Some("new"));
        assert_eq!(req.headers().len(), 2);
    }

    #[test]
    fn builder_sets_body_and_path() {
        let req = Request::new(Method::Put, "/items/7").with_body("payload");

        assert_eq!(req.method(), Method::Put);
        assert_eq!(req.path(), "/items/7");
        assert_eq!(req.body(), b"payload");
        assert_eq!(req.query(), None);
    }
}
