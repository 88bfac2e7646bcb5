use httparse::ParserConfig;

use crate::{Error, Result};

const BLANK_LINE: &str = "\r\n\r\n";

/// A response read in full from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

impl Response {
    /// Parse the entire byte stream of a response.
    ///
    /// Everything before the first blank line is status line and headers,
    /// everything after is body. The status code is the second token of the
    /// status line. Headers are read best effort: lines that are not headers
    /// are skipped, they never fail the parse.
    ///
    /// ```
    /// let raw = b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nhello".to_vec();
    /// let res = rawhttp::Response::parse(raw).unwrap();
    ///
    /// assert_eq!(res.status(), 200);
    /// assert_eq!(res.header("content-type"), Some("text/plain"));
    /// assert_eq!(res.body(), "hello");
    /// ```
    pub fn parse(raw: Vec<u8>) -> Result<Response> {
        let mut text = String::from_utf8(raw)?;

        let sep = text.find(BLANK_LINE).ok_or(Error::MalformedResponse)?;

        let status_end = text[..sep].find("\r\n").unwrap_or(sep);
        let status = parse_status(&text[..status_end])?;

        let headers = parse_headers(&text[..sep + 4], status_end);

        let body = text.split_off(sep + 4);

        trace!(
            "Parsed response: {} headers: {} body: {}",
            status,
            headers.len(),
            body.len()
        );

        Ok(Response {
            status,
            headers,
            body,
        })
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Headers in the order they were received.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First header value with a name matching case insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }
}

fn parse_status(line: &str) -> Result<u16> {
    line.split_whitespace()
        .nth(1)
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| Error::BadStatus(line.to_string()))
}

/// `head` is status line and headers including the blank line.
fn parse_headers(head: &str, status_end: usize) -> Vec<(String, String)> {
    // There can't be more headers than lines.
    let max = head.matches("\r\n").count();
    let mut buf = vec![httparse::EMPTY_HEADER; max];
    let mut res = httparse::Response::new(&mut buf);

    let parsed = ParserConfig::default()
        .allow_spaces_after_header_name_in_responses(true)
        .allow_obsolete_multiline_headers_in_responses(true)
        .ignore_invalid_headers_in_responses(true)
        .parse_response(&mut res, head.as_bytes());

    match parsed {
        Ok(httparse::Status::Complete(_)) => res
            .headers
            .iter()
            .map(|h| {
                (
                    h.name.to_string(),
                    String::from_utf8_lossy(h.value).into_owned(),
                )
            })
            .collect(),
        v => {
            trace!("Header fallback after httparse: {:?}", v);
            split_headers(&head[(status_end + 2).min(head.len())..])
        }
    }
}

/// `Name: value` per line, lines without a colon are skipped.
fn split_headers(block: &str) -> Vec<(String, String)> {
    block
        .split("\r\n")
        .filter_map(|line| line.split_once(':'))
        .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
        .collect()
}
