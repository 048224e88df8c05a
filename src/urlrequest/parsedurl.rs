//! URL decomposition into the pieces a raw HTTP/1.1 request needs.
//!
//! The path and query are carried to the wire byte-for-byte: no
//! percent-decoding, no normalization. Only `http` and `https` are accepted;
//! a missing scheme means `http`.

use crate::base::neterror::NetError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A URL split into scheme, host, port and request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub scheme: Scheme,
    /// Host without port. IPv6 brackets are not handled.
    pub host: String,
    pub port: u16,
    /// Path plus `?query` when a query is present. Never empty.
    pub path: String,
}

impl ParsedUrl {
    pub fn parse(input: &str) -> Result<Self, NetError> {
        let input = input.trim();

        // A "://" after the first '/', '?' or '#' belongs to the path or query.
        let scheme_end = input
            .find("://")
            .filter(|&pos| !input[..pos].contains(|c: char| c == '/' || c == '?' || c == '#'));
        let (scheme, rest) = match scheme_end {
            Some(pos) => (Self::parse_scheme(&input[..pos])?, &input[pos + 3..]),
            None => (Scheme::Http, input.strip_prefix("//").unwrap_or(input)),
        };

        // Fragments never reach the wire.
        let rest = rest.split('#').next().unwrap_or_default();

        let authority_end = rest.find(|c: char| c == '/' || c == '?').unwrap_or(rest.len());
        let (authority, target) = rest.split_at(authority_end);

        // Drop userinfo if present.
        let authority = authority.rsplit('@').next().unwrap_or_default();

        let (host, port) = match authority.split_once(':') {
            Some((host, "")) => (host, scheme.default_port()),
            Some((host, port)) => {
                let port = port.parse::<u16>().map_err(|_| NetError::InvalidUrl)?;
                (host, port)
            }
            None => (authority, scheme.default_port()),
        };

        if host.is_empty() {
            return Err(NetError::InvalidUrl);
        }

        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, query),
            None => (target, ""),
        };
        let mut path = if path.is_empty() {
            "/".to_string()
        } else {
            path.to_string()
        };
        if !query.is_empty() {
            path.push('?');
            path.push_str(query);
        }

        Ok(Self {
            scheme,
            host: host.to_string(),
            port,
            path,
        })
    }

    fn parse_scheme(scheme: &str) -> Result<Scheme, NetError> {
        if scheme.is_empty() {
            return Err(NetError::InvalidUrl);
        }
        match scheme.to_ascii_lowercase().as_str() {
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            _ => Err(NetError::UnknownUrlScheme),
        }
    }

    pub fn is_secure(&self) -> bool {
        self.scheme == Scheme::Https
    }

    /// `host` or `host:port` when the port is not the scheme default.
    ///
    /// This is the `Host` header value. The port is kept for non-default
    /// ports (RFC 9112 section 3.2); sending the bare host there is not
    /// supported.
    pub fn authority(&self) -> String {
        if self.port == self.scheme.default_port() {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.authority(), self.path)
    }
}
