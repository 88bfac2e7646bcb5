//! Request messages, written by hand.

use std::borrow::Cow;

use http::Method;

use crate::form::{QueryArgs, FORM_CONTENT_TYPE};
use crate::url::ParsedUrl;

const CRLF: &str = "\r\n";

/// Builder of one request message.
///
/// The order of calls is the order on the wire: send line, headers, body.
pub(crate) struct Out {
    buf: String,
}

impl Out {
    pub fn new() -> Self {
        Out {
            buf: String::with_capacity(256),
        }
    }

    pub fn send_line(mut self, method: &Method, target: &str) -> Self {
        self.buf.push_str(method.as_str());
        self.buf.push(' ');
        self.buf.push_str(target);
        self.buf.push_str(" HTTP/1.1");
        self.buf.push_str(CRLF);
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.buf.push_str(name);
        self.buf.push_str(": ");
        self.buf.push_str(value);
        self.buf.push_str(CRLF);
        self
    }

    /// Blank line, then the body (if any).
    pub fn finish(mut self, body: &str) -> Vec<u8> {
        self.buf.push_str(CRLF);
        self.buf.push_str(body);
        self.buf.into_bytes()
    }
}

/// The query to send for a GET.
///
/// Explicit arguments replace whatever query the url carries.
pub fn get_query<'a>(url: &'a ParsedUrl, args: Option<&QueryArgs>) -> Cow<'a, str> {
    match args {
        None => Cow::Borrowed(url.query()),
        Some(args) => Cow::Owned(args.encode()),
    }
}

/// `GET <path>[?<query>] HTTP/1.1` with a fixed set of headers and no body.
pub fn get_request(url: &ParsedUrl, query: &str, user_agent: &str) -> Vec<u8> {
    let target = if query.is_empty() {
        Cow::Borrowed(url.path())
    } else {
        Cow::Owned(format!("{}?{}", url.path(), query))
    };

    Out::new()
        .send_line(&Method::GET, &target)
        .header("Host", url.host())
        .header("User-Agent", user_agent)
        .header("Connection", "keep-alive")
        .header("Accept", "*/*")
        .finish("")
}

/// `POST <url> HTTP/1.1` with a form encoded, content-length framed body.
///
/// The request target is the url exactly as given.
pub fn post_request(target: &str, host: &str, body: &str) -> Vec<u8> {
    Out::new()
        .send_line(&Method::POST, target)
        .header("Host", host)
        .header("Content-Type", FORM_CONTENT_TYPE)
        .header("Content-Length", &body.len().to_string())
        .finish(body)
}
