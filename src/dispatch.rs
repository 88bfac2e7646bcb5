//! Fan-out of many identical requests, for load generation.
//!
//! Every request runs on its own blocking task with its own connection.
//! The number of tasks running at the same time is capped by
//! [`DispatchConfig::concurrency`]. [`Dispatcher::run`] returns when every
//! request has finished, successfully or not.

use std::collections::BTreeMap;
use std::sync::Arc;

use http::Method;
use tokio::runtime;
use tokio::task::JoinSet;

use crate::client::HttpClient;
use crate::conn::tcp::TcpConnector;
use crate::conn::Connector;
use crate::form::QueryArgs;
use crate::response::Response;
use crate::{Error, Result};

/// How many requests to make, and how many may be in flight at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    pub requests: usize,
    pub concurrency: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        DispatchConfig {
            requests: 200,
            concurrency: 200,
        }
    }
}

/// Outcome of a dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub succeeded: usize,
    pub failed: usize,
    /// Number of responses per status code.
    pub statuses: BTreeMap<u16, usize>,
}

impl Summary {
    fn record(&mut self, index: usize, result: &Result<Response>) {
        match result {
            Ok(res) => {
                self.succeeded += 1;
                *self.statuses.entry(res.status()).or_default() += 1;
            }
            Err(e) => {
                warn!("Request {} failed: {}", index, e);
                self.failed += 1;
            }
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Runs many requests through one shared client.
pub struct Dispatcher<C = TcpConnector> {
    client: Arc<HttpClient<C>>,
    config: DispatchConfig,
}

impl<C> Dispatcher<C>
where
    C: Connector + Send + Sync + 'static,
{
    pub fn new(client: HttpClient<C>, config: DispatchConfig) -> Self {
        Dispatcher {
            client: Arc::new(client),
            config,
        }
    }

    /// Make `requests` calls of `method` to `url` and wait for all of them.
    ///
    /// `on_done` is called with the index and outcome of each request in the
    /// order they complete. A failed request is counted and reported, it does
    /// not stop the others.
    pub fn run<F>(
        &self,
        method: Method,
        url: &str,
        args: Option<QueryArgs>,
        mut on_done: F,
    ) -> Result<Summary>
    where
        F: FnMut(usize, &Result<Response>),
    {
        let concurrency = self.config.concurrency.max(1);

        let rt = runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(concurrency)
            .thread_name("rawhttp-request")
            .build()
            .map_err(Error::Runtime)?;

        debug!(
            "Dispatch {} x {} {} (concurrency: {})",
            self.config.requests, method, url, concurrency
        );

        let url: Arc<str> = Arc::from(url);
        let args = args.map(Arc::new);

        let summary = rt.block_on(async {
            let mut set = JoinSet::new();

            for index in 0..self.config.requests {
                let client = self.client.clone();
                let method = method.clone();
                let url = url.clone();
                let args = args.clone();

                set.spawn_blocking(move || {
                    let result = client.command(&method, &url, args.as_deref());
                    (index, result)
                });
            }

            let mut summary = Summary::default();

            while let Some(joined) = set.join_next().await {
                match joined {
                    Ok((index, result)) => {
                        summary.record(index, &result);
                        on_done(index, &result);
                    }
                    Err(e) => {
                        // A panic in the request task.
                        warn!("Request task failed: {}", e);
                        summary.failed += 1;
                    }
                }
            }

            summary
        });

        info!(
            "Dispatch done: {} succeeded, {} failed",
            summary.succeeded, summary.failed
        );

        Ok(summary)
    }
}
