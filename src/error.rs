use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

use crate::url::UrlError;

/// Error type for rawhttp.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid url scheme: {0:?}")]
    InvalidUrlScheme(String),

    #[error("url: {0}")]
    Url(#[from] UrlError),

    #[error("failed to connect to {host}:{port}: {source}")]
    Connection {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("response is not utf-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error("malformed response: no blank line between headers and body")]
    MalformedResponse,

    #[error("bad status line: {0:?}")]
    BadStatus(String),

    #[error("failed to start dispatch runtime: {0}")]
    Runtime(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
