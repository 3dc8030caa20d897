//! Module `control`
//!
//! The FTP control session: owns the control connection, drives the
//! command/reply protocol, and tracks the remembered host, transfer type,
//! and the data channel slot for the operation in flight.

use log::{debug, info, warn};
use std::io;

use crate::config::ClientConfig;
use crate::error::{FtpResult, ProtocolError, SessionError, TransportError};
use crate::protocol::commands;
use crate::protocol::reply::{self, REPLY_BUFFER_SIZE, Reply};
use crate::transfer::data_channel::DataChannel;
use crate::transfer::modes::TransferType;
use crate::transport::Connection;

/// Client-side FTP session.
///
/// The control connection and the per-operation data channel live in
/// `Option` slots, so closing is taking and dropping. Invariant kept at
/// every public-method exit: the remembered host is present exactly while
/// the control connection is open.
pub struct ControlSession {
    config: ClientConfig,
    control: Option<Connection>,
    data: Option<DataChannel>,
    host_address: Option<String>,
    transfer_type: TransferType,
    last_reply: Option<Reply>,
}

impl Default for ControlSession {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl ControlSession {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            control: None,
            data: None,
            host_address: None,
            transfer_type: TransferType::default(),
            last_reply: None,
        }
    }

    // --------------------
    // Accessors
    // --------------------

    /// Returns whether the control connection is open.
    pub fn is_connected(&self) -> bool {
        self.control.is_some()
    }

    /// Returns whether a data channel is attached for an in-flight
    /// operation.
    pub fn is_data_connected(&self) -> bool {
        self.data.is_some()
    }

    /// Returns the remembered server host while connected.
    pub fn host_address(&self) -> Option<&str> {
        self.host_address.as_deref()
    }

    /// Returns the current wire encoding.
    pub fn transfer_type(&self) -> TransferType {
        self.transfer_type
    }

    /// Returns the most recent reply read on the control channel.
    pub fn last_reply(&self) -> Option<&Reply> {
        self.last_reply.as_ref()
    }

    pub(crate) fn default_port(&self) -> u16 {
        self.config.default_port
    }

    pub(crate) fn connect_retries(&self) -> u32 {
        self.config.connect_retries
    }

    pub(crate) fn transfer_buffer_size(&self) -> usize {
        self.config.transfer_buffer_size
    }

    // --------------------
    // Lifecycle
    // --------------------

    /// Connects the control channel to `host:port` and consumes the `220`
    /// greeting.
    ///
    /// Fails fast when a connection or remembered host already exists; any
    /// failure past that point unwinds back to a clean disconnected state.
    pub fn connect(&mut self, host: &str, port: u16) -> FtpResult<()> {
        if self.is_connected() || self.host_address.is_some() || self.is_data_connected() {
            return Err(SessionError::AlreadyConnected.into());
        }
        match self.try_connect(host, port) {
            Ok(()) => {
                info!("Connected to {host}:{port}");
                Ok(())
            }
            Err(e) => {
                self.disconnect(true);
                Err(e)
            }
        }
    }

    fn try_connect(&mut self, host: &str, port: u16) -> FtpResult<()> {
        let connection = Connection::open(host, port, self.config.connect_retries)?;
        self.control = Some(connection);

        let greeting = self.receive_reply()?;
        if greeting.status_code() != Some(reply::SERVICE_READY) {
            return Err(ProtocolError::UnexpectedReply {
                expected: reply::SERVICE_READY,
                text: greeting.text().trim_end().to_string(),
            }
            .into());
        }
        self.host_address = Some(host.to_string());
        Ok(())
    }

    /// Tears down any in-flight data channel with abort semantics; with
    /// `full`, also closes the control connection and resets all session
    /// state to initial values. Safe to call in any state.
    pub fn disconnect(&mut self, full: bool) {
        self.stop_data_channel(true);
        if full {
            if self.control.take().is_some() {
                info!("Control connection closed");
            }
            self.host_address = None;
            self.transfer_type = TransferType::default();
            self.last_reply = None;
        }
    }

    /// Sends `QUIT` when connected (the reply is read but its status does
    /// not matter), then fully disconnects.
    pub fn terminate(&mut self) {
        if self.is_connected() {
            if let Err(e) = self.send_command(commands::QUIT, "") {
                warn!("QUIT failed: {e}");
            }
        }
        self.disconnect(true);
    }

    // --------------------
    // Command / reply round trips
    // --------------------

    /// Sends `verb argument` on the control channel and reads the reply.
    ///
    /// A failure status in the reply is not an error at this level;
    /// callers that require success go through the checked path.
    pub fn send_command(&mut self, verb: &str, argument: &str) -> FtpResult<Reply> {
        if !self.is_connected() {
            return Err(SessionError::NotConnected.into());
        }
        let line = commands::format_command(verb, argument);
        if verb == commands::PASS {
            debug!("--> PASS ****");
        } else {
            debug!("--> {}", line.trim_end());
        }
        self.send_bytes(line.as_bytes())?;
        self.receive_reply()
    }

    /// Sends a command and requires a success reply (status below 400).
    pub(crate) fn checked_command(&mut self, verb: &str, argument: &str) -> FtpResult<Reply> {
        let reply = self.send_command(verb, argument)?;
        match reply.status_code() {
            Some(_) if reply.is_success() => Ok(reply),
            Some(code) => Err(ProtocolError::Rejected {
                code,
                text: reply.text().trim_end().to_string(),
            }
            .into()),
            None => {
                Err(ProtocolError::MalformedReply(reply.text().trim_end().to_string()).into())
            }
        }
    }

    /// One blocking read of a reply from the control channel.
    pub(crate) fn receive_reply(&mut self) -> FtpResult<Reply> {
        let connection = self.control.as_mut().ok_or(SessionError::NotConnected)?;
        let mut buf = [0u8; REPLY_BUFFER_SIZE];
        let n = connection
            .receive(&mut buf)
            .map_err(TransportError::ReceiveFailed)?;
        if n == 0 {
            return Err(TransportError::ConnectionClosed.into());
        }
        let reply = reply::parse_reply(&buf);
        debug!("<-- {}", reply.text().trim_end());
        self.last_reply = Some(reply.clone());
        Ok(reply)
    }

    fn send_bytes(&mut self, bytes: &[u8]) -> FtpResult<()> {
        let connection = self.control.as_mut().ok_or(SessionError::NotConnected)?;
        let mut sent = 0;
        while sent < bytes.len() {
            match connection.send(&bytes[sent..]) {
                Ok(0) => return Err(TransportError::ConnectionClosed.into()),
                Ok(n) => sent += n,
                Err(e) => return Err(TransportError::SendFailed(e).into()),
            }
        }
        Ok(())
    }

    // --------------------
    // Authentication and session commands
    // --------------------

    /// `USER name` (must be met with `331`) followed by `PASS password`
    /// (any reply accepted).
    pub fn login(&mut self, name: &str, password: &str) -> FtpResult<()> {
        let user_reply = self.send_command(commands::USER, name)?;
        if user_reply.status_code() != Some(reply::PASSWORD_REQUIRED) {
            return Err(ProtocolError::UnexpectedReply {
                expected: reply::PASSWORD_REQUIRED,
                text: user_reply.text().trim_end().to_string(),
            }
            .into());
        }
        self.send_command(commands::PASS, password)?;
        info!("Logged in as {name}");
        Ok(())
    }

    /// `TYPE I` or `TYPE A`; the session records the new type on success.
    pub fn set_transfer_type(&mut self, transfer_type: TransferType) -> FtpResult<()> {
        self.checked_command(commands::TYPE, transfer_type.type_code())?;
        self.transfer_type = transfer_type;
        info!("Transfer type set to {transfer_type}");
        Ok(())
    }

    // --------------------
    // Navigation and metadata commands
    // --------------------

    /// `PWD`; the reply text carries the directory.
    pub fn current_dir(&mut self) -> FtpResult<Reply> {
        self.checked_command(commands::PWD, "")
    }

    /// `CWD path`.
    pub fn change_dir(&mut self, path: &str) -> FtpResult<Reply> {
        self.checked_command(commands::CWD, path)
    }

    /// `CDUP` to the parent directory.
    pub fn change_dir_up(&mut self) -> FtpResult<Reply> {
        self.checked_command(commands::CDUP, "")
    }

    /// `MKD path`.
    pub fn make_dir(&mut self, path: &str) -> FtpResult<Reply> {
        self.checked_command(commands::MKD, path)
    }

    /// `RMD path`.
    pub fn remove_dir(&mut self, path: &str) -> FtpResult<Reply> {
        self.checked_command(commands::RMD, path)
    }

    /// `DELE name`.
    pub fn delete_file(&mut self, name: &str) -> FtpResult<Reply> {
        self.checked_command(commands::DELE, name)
    }

    /// `SYST`; the reply text names the server's operating system.
    pub fn system_type(&mut self) -> FtpResult<Reply> {
        self.checked_command(commands::SYST, "")
    }

    /// `STAT` server status.
    pub fn server_status(&mut self) -> FtpResult<Reply> {
        self.checked_command(commands::STAT, "")
    }

    /// `REIN` resets the server side of the session.
    pub fn reinitialize(&mut self) -> FtpResult<Reply> {
        self.checked_command(commands::REIN, "")
    }

    // --------------------
    // Data channel slot
    // --------------------

    /// Attaches the channel for the operation in flight.
    pub(crate) fn attach_data_channel(&mut self, channel: DataChannel) {
        self.data = Some(channel);
    }

    /// Closes any attached data channel; on a graceful stop, also reads
    /// the transfer acknowledgment (its outcome is logged and ignored).
    pub(crate) fn stop_data_channel(&mut self, abort: bool) {
        if self.data.take().is_some() {
            debug!("Data channel closed{}", if abort { " (abort)" } else { "" });
        }
        if !abort {
            match self.receive_reply() {
                Ok(ack) => debug!("Transfer acknowledgment: {}", ack.text().trim_end()),
                Err(e) => warn!("No transfer acknowledgment: {e}"),
            }
        }
    }

    /// Reads from the attached data channel; no channel reads as end of
    /// stream.
    pub(crate) fn data_read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.as_mut() {
            Some(channel) => channel.receive(buf),
            None => Ok(0),
        }
    }

    /// Writes to the attached data channel; no channel accepts nothing.
    pub(crate) fn data_write(&mut self, data: &[u8]) -> io::Result<usize> {
        match self.data.as_mut() {
            Some(channel) => channel.send(data),
            None => Ok(0),
        }
    }
}

impl Drop for ControlSession {
    fn drop(&mut self) {
        self.disconnect(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FtpClientError;

    #[test]
    fn test_initial_state() {
        let session = ControlSession::default();
        assert!(!session.is_connected());
        assert!(!session.is_data_connected());
        assert_eq!(session.host_address(), None);
        assert_eq!(session.transfer_type(), TransferType::Binary);
        assert!(session.last_reply().is_none());
    }

    #[test]
    fn test_send_command_requires_connection() {
        let mut session = ControlSession::default();
        let result = session.send_command(commands::PWD, "");
        assert!(matches!(
            result,
            Err(FtpClientError::Session(SessionError::NotConnected))
        ));
    }

    #[test]
    fn test_disconnect_is_safe_when_disconnected() {
        let mut session = ControlSession::default();
        session.disconnect(true);
        session.disconnect(true);
        assert!(!session.is_connected());
        assert_eq!(session.host_address(), None);
    }
}
