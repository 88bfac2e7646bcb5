//! http/1.1 client written directly on tcp sockets.
//!
//! Requests are built by hand, written to a fresh socket, and the response
//! is read until the server closes the connection. The raw bytes are then
//! split into status, headers and body at the first blank line.
//!
//! ```no_run
//! use rawhttp::{ClientConfig, HttpClient, QueryArgs};
//!
//! let client = HttpClient::new(ClientConfig::default());
//!
//! // GET http://localhost:8080/search?q=a+b
//! let args = QueryArgs::from([("q", "a b")]);
//! let res = client.get("http://localhost:8080/search", Some(&args))?;
//! println!("{} {}", res.status(), res.body());
//!
//! // POST with a form body: name=rawhttp
//! let args = QueryArgs::from([("name", "rawhttp")]);
//! let res = client.post("http://localhost:8080/submit", Some(&args))?;
//! assert_eq!(res.status(), 200);
//! # Ok::<_, rawhttp::Error>(())
//! ```
//!
//! # In scope:
//!
//! * GET and POST with form encoded arguments
//! * Url decomposition of `http://` urls
//! * Fan-out of many parallel requests for load generation ([`dispatch`])
//!
//! # Out of scope:
//!
//! * TLS (https)
//! * transfer-encoding: chunked
//! * Connection reuse (keep-alive)
//! * Redirects, cookies, compression

#[macro_use]
extern crate log;

// Re-export the basis for this library.
pub use http;

mod error;
pub use error::{Error, Result};

pub mod url;
pub use self::url::{decompose, ParsedUrl, UrlError};

mod form;
pub use form::{encode_pairs, QueryArgs, FORM_CONTENT_TYPE};

mod config;
pub use config::{ClientConfig, HostDelays, DEFAULT_USER_AGENT};

pub mod conn;

mod request;

mod response;
pub use response::Response;

pub mod client;
pub use client::HttpClient;

pub mod dispatch;
pub use dispatch::{DispatchConfig, Dispatcher, Summary};
