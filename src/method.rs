//! HTTP method as a typed enum.
//!
//! Covers RFC 9110 standard methods, WebDAV extensions (RFC 4918 / 4791 / 3253 / 5323),
//! and `PURGE` used by nginx and Varnish for cache invalidation.
//!
//! Unknown method strings are answered with `405 Method Not Allowed` by the
//! hyper service before they ever reach a handler.

use std::fmt;
use std::str::FromStr;

macro_rules! methods {
    ($($variant:ident => $wire:literal,)+) => {
        /// A known HTTP method.
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        pub enum Method {
            $($variant,)+
        }

        impl Method {
            /// Returns the uppercase wire representation (e.g. `"GET"`).
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        /// Parses an uppercase method string (e.g. `"GET"`). Case-sensitive per RFC 9110 §9.1.
        impl FromStr for Method {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(()),
                }
            }
        }
    };
}

methods! {
    // RFC 9110
    Connect    => "CONNECT",
    Delete     => "DELETE",
    Get        => "GET",
    Head       => "HEAD",
    Options    => "OPTIONS",
    Patch      => "PATCH",
    Post       => "POST",
    Put        => "PUT",
    Trace      => "TRACE",
    // WebDAV RFC 4918
    Copy       => "COPY",
    Lock       => "LOCK",
    Mkcol      => "MKCOL",
    Move       => "MOVE",
    Propfind   => "PROPFIND",
    Proppatch  => "PROPPATCH",
    Unlock     => "UNLOCK",
    // WebDAV extensions
    Mkcalendar => "MKCALENDAR",
    Report     => "REPORT",
    Search     => "SEARCH",
    // nginx / Varnish cache invalidation
    Purge      => "PURGE",
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!("PURGE".parse::<Method>(), Ok(Method::Purge));
        assert_eq!("get".parse::<Method>(), Err(()));
        assert_eq!("BREW".parse::<Method>(), Err(()));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for m in [Method::Get, Method::Propfind, Method::Mkcalendar] {
            assert_eq!(m.to_string().parse::<Method>(), Ok(m));
        }
    }
}
