use std::io::{self, ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

pub(crate) const MAX_RESPONSE_LEN: usize = 4096;

#[derive(Debug, Error)]
pub(crate) enum TransportError {
    #[error("failed to connect to {host}")]
    Connect { host: String },
    #[error("failed to send request")]
    Send(#[source] io::Error),
    #[error("failed to receive response")]
    Recv(#[source] io::Error),
}

/// One request/response exchange over a fresh connection.
pub(crate) trait Transport {
    fn exchange(&mut self, request: &[u8]) -> Result<Vec<u8>, TransportError>;
}

pub(crate) struct HttpTransport {
    host: String,
    candidates: Vec<SocketAddr>,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Resolves the host once up front. An empty candidate list is an
    /// immediate failure, there is nothing to connect to later.
    pub(crate) fn new(
        host: String,
        port: u16,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let candidates: Vec<SocketAddr> = (host.as_str(), port)
            .to_socket_addrs()
            .map_err(|err| {
                debug!(%host, %err, "address resolution failed");
                TransportError::Connect { host: host.clone() }
            })?
            .collect();
        if candidates.is_empty() {
            return Err(TransportError::Connect { host });
        }
        Ok(Self {
            host,
            candidates,
            timeout,
        })
    }

    /// Startup connectivity check: connect once and hang up.
    pub(crate) fn probe(&self) -> Result<(), TransportError> {
        self.connect().map(drop)
    }

    fn connect(&self) -> Result<TcpStream, TransportError> {
        for addr in &self.candidates {
            let attempt = match self.timeout {
                Some(timeout) => TcpStream::connect_timeout(addr, timeout),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(stream) => {
                    if let Some(timeout) = self.timeout {
                        stream
                            .set_read_timeout(Some(timeout))
                            .and_then(|()| stream.set_write_timeout(Some(timeout)))
                            .map_err(|err| {
                                debug!(%addr, %err, "could not arm socket timeouts");
                                TransportError::Connect {
                                    host: self.host.clone(),
                                }
                            })?;
                    }
                    return Ok(stream);
                }
                Err(err) => debug!(%addr, %err, "candidate did not connect"),
            }
        }
        Err(TransportError::Connect {
            host: self.host.clone(),
        })
    }
}

impl Transport for HttpTransport {
    fn exchange(&mut self, request: &[u8]) -> Result<Vec<u8>, TransportError> {
        let mut conn = self.connect()?;
        send_all(&mut conn, request)?;
        debug!(bytes = request.len(), "request sent");
        receive(&mut conn, MAX_RESPONSE_LEN)
        // conn drops here, closing the per-event connection.
    }
}

/// Writes the whole buffer. Short writes are progress, not errors; only a
/// write that fails (or can make no progress at all) aborts.
pub(crate) fn send_all<W: Write>(conn: &mut W, bytes: &[u8]) -> Result<(), TransportError> {
    let mut sent = 0;
    while sent < bytes.len() {
        match conn.write(&bytes[sent..]) {
            Ok(0) => {
                return Err(TransportError::Send(io::Error::new(
                    ErrorKind::WriteZero,
                    "peer stopped accepting data",
                )))
            }
            Ok(n) => sent += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(TransportError::Send(err)),
        }
    }
    Ok(())
}

/// Reads until the buffer is full or the peer closes, returning whatever
/// accumulated. A closed connection is a normal end of response.
pub(crate) fn receive<R: Read>(conn: &mut R, capacity: usize) -> Result<Vec<u8>, TransportError> {
    let mut buf = vec![0u8; capacity];
    let mut filled = 0;
    while filled < capacity {
        match conn.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(TransportError::Recv(err)),
        }
    }
    buf.truncate(filled);
    Ok(buf)
}
