//! HTTP/1.1 client over raw sockets.
//!
//! Every call opens a fresh connection, writes a hand built request, reads
//! the response until the server closes and parses it. Nothing is kept
//! between calls, which means one [`HttpClient`] can be shared by any
//! number of threads.
//!
//! # GET
//!
//! The url is decomposed into host, port, path and query. The request target
//! is `path[?query]`. After the request is sent, the write direction is shut
//! down to tell the server no more data follows.
//!
//! # POST
//!
//! Only host and port are taken from the url. The request target is the url
//! string as given. The body is framed by `Content-Length`, so there is no
//! half-close.

use std::thread;

use http::Method;

use crate::config::ClientConfig;
use crate::conn::tcp::TcpConnector;
use crate::conn::Connector;
use crate::form::QueryArgs;
use crate::request::{get_query, get_request, post_request};
use crate::response::Response;
use crate::url::{authority, decompose};
use crate::Result;

pub mod flow;
use flow::Exchange;

#[cfg(test)]
pub(crate) mod test;

/// Client doing one exchange per call.
#[derive(Debug, Clone, Default)]
pub struct HttpClient<C = TcpConnector> {
    config: ClientConfig,
    connector: C,
}

impl HttpClient<TcpConnector> {
    /// Client using TCP connections.
    pub fn new(config: ClientConfig) -> Self {
        HttpClient {
            config,
            connector: TcpConnector,
        }
    }
}

impl<C: Connector> HttpClient<C> {
    /// Client using a custom way of opening connections.
    pub fn with_connector(config: ClientConfig, connector: C) -> Self {
        HttpClient { config, connector }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a GET.
    ///
    /// Without `args` the query of the url is sent. With `args`, they replace
    /// the url query: raw strings verbatim, pairs form encoded.
    pub fn get(&self, url: &str, args: Option<&QueryArgs>) -> Result<Response> {
        let url = decompose(url)?;
        let exchange = Exchange::open(&self.connector, url.host(), url.port())?;

        let query = get_query(&url, args);
        let request = get_request(&url, &query, self.config.get_user_agent());

        debug!("GET {}", url);
        let exchange = exchange.send(&request)?;

        if let Some(delay) = self.config.get_host_delays().delay_for(url.host()) {
            debug!("Delay {:?} before half-close to {}", delay, url.host());
            thread::sleep(delay);
        }

        let raw = exchange.half_close()?.recv_all()?;

        Response::parse(raw)
    }

    /// Send a POST with `args` as form encoded body.
    pub fn post(&self, url: &str, args: Option<&QueryArgs>) -> Result<Response> {
        let (host, port) = authority(url)?;
        let exchange = Exchange::open(&self.connector, &host, port)?;

        let body = args.map(|a| a.encode()).unwrap_or_default();
        let request = post_request(url, &host, &body);

        debug!("POST {} ({} bytes body)", url, body.len());
        let raw = exchange.send(&request)?.recv_all()?;

        Response::parse(raw)
    }

    /// Send `POST` as [`post`](Self::post), every other method as
    /// [`get`](Self::get).
    pub fn command(&self, method: &Method, url: &str, args: Option<&QueryArgs>) -> Result<Response> {
        if method == Method::POST {
            self.post(url, args)
        } else {
            self.get(url, args)
        }
    }
}
