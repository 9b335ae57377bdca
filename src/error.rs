//! Unified error type.

use std::fmt;

/// The error type returned by plumb's fallible operations.
///
/// Composing middleware never fails. This type surfaces the host-side
/// failures of turning a hyper request into a [`Request`](crate::Request):
/// reading the body or recognising the method.
#[derive(Debug)]
pub enum Error {
    /// The request body could not be read from the connection.
    Body(hyper::Error),
    /// The request method is not one of the known [`Method`](crate::Method)s.
    UnsupportedMethod(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body(e) => write!(f, "body: {e}"),
            Self::UnsupportedMethod(m) => write!(f, "unsupported method `{m}`"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Body(e) => Some(e),
            Self::UnsupportedMethod(_) => None,
        }
    }
}

impl From<hyper::Error> for Error {
    fn from(e: hyper::Error) -> Self {
        Self::Body(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_method_display_names_the_method() {
        let err = Error::UnsupportedMethod("BREW".to_owned());
        assert_eq!(err.to_string(), "unsupported method `BREW`");
        assert!(std::error::Error::source(&err).is_none());
    }
}
