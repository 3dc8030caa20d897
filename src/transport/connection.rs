//! Module `connection`
//!
//! Blocking TCP connection used for both the control and data channels.
//! Resolves hosts (dotted IPv4 first, then name lookup), retries the
//! connect handshake a bounded number of times, and shuts down on drop.

use crate::error::TransportError;
use log::{debug, warn};
use std::io;
use std::net::{Ipv4Addr, Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::Duration;

/// One established TCP connection.
///
/// Dropping the connection shuts it down; callers model idempotent close
/// by holding connections in `Option` slots and taking them out.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
}

impl Connection {
    /// Connect to `host:port`, making up to `retries` attempts with a
    /// short linear backoff between them.
    pub fn open(host: &str, port: u16, retries: u32) -> Result<Connection, TransportError> {
        let addr = resolve(host, port)?;
        let mut attempt = 0;
        loop {
            attempt += 1;
            match TcpStream::connect(addr) {
                Ok(stream) => {
                    debug!("Connected to {addr} (attempt {attempt})");
                    return Ok(Connection { stream, peer: addr });
                }
                Err(e) if attempt < retries => {
                    warn!(
                        "Connect to {addr} failed (attempt {attempt}/{retries}): {e}. Retrying..."
                    );
                    thread::sleep(Duration::from_millis(100 * u64::from(attempt)));
                }
                Err(e) => {
                    return Err(TransportError::ConnectExhausted {
                        host: host.to_string(),
                        port,
                        attempts: attempt,
                        cause: e,
                    });
                }
            }
        }
    }

    /// Send bytes; the count may be short and is zero only on a dead peer
    pub fn send(&mut self, data: &[u8]) -> io::Result<usize> {
        use std::io::Write;
        self.stream.write(data)
    }

    /// Receive into `buf`; `Ok(0)` is a graceful end of stream
    pub fn receive(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        use std::io::Read;
        self.stream.read(buf)
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        let _ = self.stream.shutdown(Shutdown::Both);
        debug!("Closed connection to {}", self.peer);
    }
}

/// Dotted IPv4 first, then name resolution taking the first IPv4 result
fn resolve(host: &str, port: u16) -> Result<SocketAddr, TransportError> {
    if let Ok(ip) = host.parse::<Ipv4Addr>() {
        return Ok(SocketAddr::from((ip, port)));
    }
    let mut addrs = (host, port)
        .to_socket_addrs()
        .map_err(|_| TransportError::HostResolution(host.to_string()))?;
    addrs
        .find(SocketAddr::is_ipv4)
        .ok_or_else(|| TransportError::HostResolution(host.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_open_connects_to_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let conn = Connection::open("127.0.0.1", port, 1);
        assert!(conn.is_ok());
        listener.accept().unwrap();
    }

    #[test]
    fn test_open_rejects_unresolvable_host() {
        let result = Connection::open("host.does-not-exist.invalid", 21, 1);
        assert!(matches!(result, Err(TransportError::HostResolution(_))));
    }

    #[test]
    fn test_resolve_parses_dotted_address_directly() {
        let addr = resolve("192.0.2.7", 2121).unwrap();
        assert_eq!(addr.to_string(), "192.0.2.7:2121");
    }
}
