//! Decomposition of absolute `http://` urls.

use std::fmt;

use crate::{Error, Result};

/// Port used when the authority does not name one.
pub const DEFAULT_PORT: u16 = 80;

/// Things that can be wrong with an url once the scheme is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum UrlError {
    TooShortHost,
    PortNotANumber,
    PortIsZero,
}

/// An absolute http url split into the parts needed to talk to a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    scheme: String,
    host: String,
    port: u16,
    path: String,
    query: String,
}

impl ParsedUrl {
    /// Always `"http"`.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Hostname, without port or userinfo.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Path, never empty.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query without the leading `?`. Empty if there is none.
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Split an absolute url into scheme, host, port, path and query.
///
/// Only `http` is accepted as scheme. A missing port becomes [`DEFAULT_PORT`],
/// a missing path becomes `/`. Fragments are dropped.
///
/// ```
/// let u = rawhttp::decompose("http://example.com:8080/a/b?x=1").unwrap();
///
/// assert_eq!(u.host(), "example.com");
/// assert_eq!(u.port(), 8080);
/// assert_eq!(u.path(), "/a/b");
/// assert_eq!(u.query(), "x=1");
/// ```
pub fn decompose(url: &str) -> Result<ParsedUrl> {
    let parts = Parts::split(url)?;
    let (host, port) = parts.host_port()?;

    let path = if parts.path.is_empty() {
        "/"
    } else {
        parts.path
    };

    Ok(ParsedUrl {
        scheme: parts.scheme.to_ascii_lowercase(),
        host: host.to_string(),
        port,
        path: path.to_string(),
        query: parts.query.to_string(),
    })
}

/// Extract only host and port from an absolute http url.
pub fn authority(url: &str) -> Result<(String, u16)> {
    let parts = Parts::split(url)?;
    let (host, port) = parts.host_port()?;
    Ok((host.to_string(), port))
}

struct Parts<'a> {
    scheme: &'a str,
    authority: &'a str,
    path: &'a str,
    query: &'a str,
}

impl<'a> Parts<'a> {
    fn split(s: &'a str) -> Result<Self> {
        let Some((scheme, rest)) = s.split_once("://") else {
            return Err(Error::InvalidUrlScheme(String::new()));
        };

        if !scheme.eq_ignore_ascii_case("http") {
            return Err(Error::InvalidUrlScheme(scheme.to_string()));
        }

        // The fragment is client side only.
        let rest = rest.split_once('#').map_or(rest, |(r, _)| r);

        let (rest, query) = rest.split_once('?').unwrap_or((rest, ""));

        // All the following have an empty path:
        // http://foo.com
        // http://foo.com?a=b
        let path_start = rest.find('/').unwrap_or(rest.len());
        let (authority, path) = rest.split_at(path_start);

        Ok(Parts {
            scheme,
            authority,
            path,
            query,
        })
    }

    fn host_port(&self) -> std::result::Result<(&'a str, u16), UrlError> {
        let x = self.authority;

        // user:password@ is not used for anything.
        let x = x.rsplit_once('@').map_or(x, |(_, h)| h);

        let (host, port) = match x.split_once(':') {
            Some((host, port)) => {
                let p: u16 = port.parse().map_err(|_| UrlError::PortNotANumber)?;
                if p == 0 {
                    return Err(UrlError::PortIsZero);
                }
                (host, p)
            }
            None => (x, DEFAULT_PORT),
        };

        if host.is_empty() {
            return Err(UrlError::TooShortHost);
        }

        Ok((host, port))
    }
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}{}", self.scheme, self.host, self.port, self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        Ok(())
    }
}

impl fmt::Display for UrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use UrlError::*;
        let s = match self {
            TooShortHost => "too short hostname",
            PortNotANumber => "port is not a number",
            PortIsZero => "port is zero",
        };
        write!(f, "{}", s)
    }
}

impl std::error::Error for UrlError {}
