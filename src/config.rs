use std::collections::HashMap;
use std::time::Duration;

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("rawhttp/", env!("CARGO_PKG_VERSION"));

/// Configuration shared by every request made by a client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    user_agent: String,
    host_delays: HostDelays,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value sent in the `User-Agent` header of GET requests.
    pub fn user_agent(mut self, v: impl Into<String>) -> Self {
        self.user_agent = v.into();
        self
    }

    /// Replace the per host delay table.
    pub fn host_delays(mut self, v: HostDelays) -> Self {
        self.host_delays = v;
        self
    }

    pub fn get_user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn get_host_delays(&self) -> &HostDelays {
        &self.host_delays
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            host_delays: HostDelays::default(),
        }
    }
}

/// Pause between sending a GET request and half-closing the connection,
/// keyed on hostname.
///
/// Some slow or rate limited servers drop the request if the write side is
/// shut down straight after the request is written. The default table holds
/// one such host, `slashdot.org`, with one second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDelays(HashMap<String, Duration>);

impl HostDelays {
    /// A table without any delays.
    pub fn empty() -> Self {
        HostDelays(HashMap::new())
    }

    pub fn insert(&mut self, host: impl Into<String>, delay: Duration) {
        self.0.insert(host.into().to_ascii_lowercase(), delay);
    }

    pub fn remove(&mut self, host: &str) -> Option<Duration> {
        self.0.remove(&host.to_ascii_lowercase())
    }

    /// Delay for `host`, if any. Hostnames compare case insensitive.
    pub fn delay_for(&self, host: &str) -> Option<Duration> {
        self.0.get(&host.to_ascii_lowercase()).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for HostDelays {
    fn default() -> Self {
        let mut d = HostDelays::empty();
        d.insert("slashdot.org", Duration::from_secs(1));
        d
    }
}
