//! Byte streams to a server, one per request.

use std::io;

const INCREMENT: usize = 4096;
const THRESHOLD: usize = 100;

/// Opens transports to a `(host, port)`.
///
/// The default [`tcp::TcpConnector`] opens a TCP socket. Tests can substitute
/// in-memory transports.
pub trait Connector {
    type Stream: Transport;

    fn connect(&self, host: &str, port: u16) -> io::Result<Self::Stream>;
}

/// A bidirectional byte stream that can shut down its write direction only.
pub trait Transport: io::Read + io::Write {
    /// Half-close. The peer sees end of input, reads still work.
    fn shutdown_write(&mut self) -> io::Result<()>;
}

/// A single transport bound to one request.
///
/// The transport is released when the connection is closed or dropped,
/// whichever happens first.
pub struct Connection<T: Transport> {
    transport: T,
    sent: usize,
    received: usize,
}

impl<T: Transport> Connection<T> {
    pub fn new(transport: T) -> Self {
        Connection {
            transport,
            sent: 0,
            received: 0,
        }
    }

    /// Write all of `bytes` and flush.
    pub fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.transport.write_all(bytes)?;
        self.transport.flush()?;
        self.sent += bytes.len();
        trace!("Sent {} bytes", bytes.len());
        Ok(())
    }

    /// Signal that nothing more will be written.
    pub fn half_close(&mut self) -> io::Result<()> {
        trace!("Half-close after {} bytes sent", self.sent);
        self.transport.shutdown_write()
    }

    /// Read until the peer closes its side.
    pub fn recv_all(&mut self) -> io::Result<Vec<u8>> {
        let mut buffer = vec![0; INCREMENT];
        let mut pos = 0;

        loop {
            if pos > buffer.len() - THRESHOLD {
                buffer.resize(buffer.len() + INCREMENT, 0);
            }

            let n = match self.transport.read(&mut buffer[pos..]) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            if n == 0 {
                break;
            }

            pos += n;
        }

        buffer.truncate(pos);
        self.received += pos;
        trace!("Received {} bytes", pos);

        Ok(buffer)
    }

    /// Release the transport.
    pub fn close(self) {
        // drop does it
    }
}

impl<T: Transport> Drop for Connection<T> {
    fn drop(&mut self) {
        trace!(
            "Close connection (sent: {}, received: {})",
            self.sent,
            self.received
        );
    }
}

pub mod tcp {
    use std::io;
    use std::net::{Shutdown, TcpStream};

    use super::{Connector, Transport};

    /// Opens plain TCP connections.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct TcpConnector;

    impl Connector for TcpConnector {
        type Stream = TcpStream;

        fn connect(&self, host: &str, port: u16) -> io::Result<Self::Stream> {
            TcpStream::connect((host, port))
        }
    }

    impl Transport for TcpStream {
        fn shutdown_write(&mut self) -> io::Result<()> {
            self.shutdown(Shutdown::Write)
        }
    }
}
