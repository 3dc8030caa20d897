//! Module `data_channel`
//!
//! The short-lived data connection opened for exactly one listing or
//! transfer operation. Created after PASV negotiation, always released
//! before the operation returns.

use crate::error::TransportError;
use crate::transport::Connection;
use log::info;
use std::io;

/// Data connection for one operation
#[derive(Debug)]
pub struct DataChannel {
    connection: Connection,
}

impl DataChannel {
    /// Connect to the negotiated endpoint on the session's host
    pub fn open(host: &str, port: u16, retries: u32) -> Result<DataChannel, TransportError> {
        let connection = Connection::open(host, port, retries)?;
        info!("Data channel open to {host}:{port}");
        Ok(DataChannel { connection })
    }

    /// Read a chunk; `Ok(0)` is end of stream
    pub fn receive(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.connection.receive(buf)
    }

    /// Write part of a chunk; `Ok(0)` means the peer took nothing
    pub fn send(&mut self, data: &[u8]) -> io::Result<usize> {
        self.connection.send(data)
    }
}
