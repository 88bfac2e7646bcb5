use std::io;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::client::HttpClient;
use crate::config::ClientConfig;
use crate::conn::{Connector, Transport};

/// What happened on the scripted connections of a scenario.
#[derive(Debug, Default)]
pub struct Record {
    pub connects: Vec<(String, u16)>,
    pub written: Vec<u8>,
    pub last_write: Option<Instant>,
    pub half_closed: Option<Instant>,
    pub closed: usize,
}

impl Record {
    pub fn written_str(&self) -> &str {
        std::str::from_utf8(&self.written).unwrap()
    }
}

/// A connector handing out in-memory connections that answer with a
/// fixed response.
#[derive(Clone)]
pub struct Scenario {
    response: Vec<u8>,
    refuse: bool,
    fail_read: bool,
    record: Arc<Mutex<Record>>,
}

impl Scenario {
    pub fn builder() -> ScenarioBuilder {
        ScenarioBuilder {
            response: b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok".to_vec(),
            refuse: false,
            fail_read: false,
            config: ClientConfig::default().user_agent("test"),
        }
    }

    pub fn record(&self) -> std::sync::MutexGuard<'_, Record> {
        self.record.lock().unwrap()
    }
}

pub struct ScenarioBuilder {
    response: Vec<u8>,
    refuse: bool,
    fail_read: bool,
    config: ClientConfig,
}

impl ScenarioBuilder {
    pub fn response(mut self, v: &[u8]) -> Self {
        self.response = v.to_vec();
        self
    }

    pub fn refuse(mut self) -> Self {
        self.refuse = true;
        self
    }

    pub fn fail_read(mut self) -> Self {
        self.fail_read = true;
        self
    }

    pub fn config(mut self, v: ClientConfig) -> Self {
        self.config = v;
        self
    }

    pub fn build(self) -> (HttpClient<Scenario>, Scenario) {
        let scenario = Scenario {
            response: self.response,
            refuse: self.refuse,
            fail_read: self.fail_read,
            record: Arc::new(Mutex::new(Record::default())),
        };
        let client = HttpClient::with_connector(self.config, scenario.clone());
        (client, scenario)
    }
}

impl Connector for Scenario {
    type Stream = Scripted;

    fn connect(&self, host: &str, port: u16) -> io::Result<Self::Stream> {
        if self.refuse {
            return Err(io::ErrorKind::ConnectionRefused.into());
        }

        self.record().connects.push((host.to_string(), port));

        Ok(Scripted {
            input: io::Cursor::new(self.response.clone()),
            fail_read: self.fail_read,
            write_closed: false,
            record: self.record.clone(),
        })
    }
}

pub struct Scripted {
    input: io::Cursor<Vec<u8>>,
    fail_read: bool,
    write_closed: bool,
    record: Arc<Mutex<Record>>,
}

impl io::Read for Scripted {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.fail_read {
            return Err(io::ErrorKind::ConnectionReset.into());
        }
        io::Read::read(&mut self.input, buf)
    }
}

impl io::Write for Scripted {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.write_closed {
            return Err(io::ErrorKind::BrokenPipe.into());
        }
        let mut record = self.record.lock().unwrap();
        record.written.extend_from_slice(buf);
        record.last_write = Some(Instant::now());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Transport for Scripted {
    fn shutdown_write(&mut self) -> io::Result<()> {
        self.write_closed = true;
        self.record.lock().unwrap().half_closed = Some(Instant::now());
        Ok(())
    }
}

impl Drop for Scripted {
    fn drop(&mut self) {
        if let Ok(mut record) = self.record.lock() {
            record.closed += 1;
        }
    }
}
