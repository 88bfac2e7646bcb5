//! One request/response exchange over one connection.
//!
//! The stage of the exchange is a type parameter, `Exchange<T, Sent>` etc.
//! Only the operations valid in a stage can be called:
//!
//! ```text
//!  Connected ──send──▶ Sent ──half_close──▶ HalfClosed
//!                        │                      │
//!                        └──────recv_all────────┴──▶ (closed, raw bytes)
//! ```
//!
//! Any error consumes the exchange, which drops and closes the connection.

use std::marker::PhantomData;

use crate::conn::{Connection, Connector, Transport};
use crate::{Error, Result};

/// Type states of an [`Exchange`].
pub mod state {
    #[doc(hidden)]
    pub trait Named {
        fn name() -> &'static str;
    }

    macro_rules! exchange_state {
        ($n:tt) => {
            #[doc(hidden)]
            pub struct $n(());
            impl Named for $n {
                fn name() -> &'static str {
                    stringify!($n)
                }
            }
        };
    }

    exchange_state!(Connected);
    exchange_state!(Sent);
    exchange_state!(HalfClosed);

    /// States in which the response can be read.
    pub trait Receivable: Named {}

    impl Receivable for Sent {}
    impl Receivable for HalfClosed {}
}
use self::state::*;

/// A connection at a particular stage of a request.
pub struct Exchange<T: Transport, S> {
    conn: Connection<T>,
    _ph: PhantomData<S>,
}

impl<T: Transport> Exchange<T, Connected> {
    /// Open a new connection to `host:port`.
    pub fn open<C>(connector: &C, host: &str, port: u16) -> Result<Self>
    where
        C: Connector<Stream = T>,
    {
        let transport = connector
            .connect(host, port)
            .map_err(|source| Error::Connection {
                host: host.to_string(),
                port,
                source,
            })?;

        debug!("Connected to {}:{}", host, port);

        Ok(Exchange {
            conn: Connection::new(transport),
            _ph: PhantomData,
        })
    }

    /// Transmit the whole request.
    pub fn send(mut self, request: &[u8]) -> Result<Exchange<T, Sent>> {
        self.conn.send(request)?;
        Ok(self.transition())
    }
}

impl<T: Transport> Exchange<T, Sent> {
    /// Shut down the write direction.
    pub fn half_close(mut self) -> Result<Exchange<T, HalfClosed>> {
        self.conn.half_close()?;
        Ok(self.transition())
    }
}

impl<T: Transport, S: Receivable> Exchange<T, S> {
    /// Read until the server closes, then close the connection.
    pub fn recv_all(mut self) -> Result<Vec<u8>> {
        trace!("Receive in state {}", S::name());
        let raw = self.conn.recv_all()?;
        self.conn.close();
        Ok(raw)
    }
}

impl<T: Transport, S> Exchange<T, S> {
    fn transition<S2: Named>(self) -> Exchange<T, S2> {
        trace!("Exchange state: {}", S2::name());
        Exchange {
            conn: self.conn,
            _ph: PhantomData,
        }
    }
}
