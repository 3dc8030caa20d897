//! Error types
//!
//! Defines domain-specific error types for each module of the FTP client.

use std::fmt;
use std::io;

/// Transport module errors (control or data connection)
#[derive(Debug)]
pub enum TransportError {
    HostResolution(String),
    ConnectExhausted {
        host: String,
        port: u16,
        attempts: u32,
        cause: io::Error,
    },
    SendFailed(io::Error),
    ReceiveFailed(io::Error),
    ConnectionClosed,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::HostResolution(host) => write!(f, "Cannot resolve host: {}", host),
            TransportError::ConnectExhausted {
                host,
                port,
                attempts,
                cause,
            } => {
                write!(
                    f,
                    "Failed to connect to {}:{} after {} attempts: {}",
                    host, port, attempts, cause
                )
            }
            TransportError::SendFailed(e) => write!(f, "Send failed: {}", e),
            TransportError::ReceiveFailed(e) => write!(f, "Receive failed: {}", e),
            TransportError::ConnectionClosed => write!(f, "Connection closed by server"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Protocol module errors (reply framing and status classification)
#[derive(Debug)]
pub enum ProtocolError {
    MalformedReply(String),
    Rejected { code: u16, text: String },
    UnexpectedReply { expected: u16, text: String },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::MalformedReply(text) => write!(f, "Malformed reply: {}", text),
            ProtocolError::Rejected { code, text } => {
                write!(f, "Server rejected command with {}: {}", code, text)
            }
            ProtocolError::UnexpectedReply { expected, text } => {
                write!(f, "Expected reply {}, got: {}", expected, text)
            }
        }
    }
}

impl std::error::Error for ProtocolError {}

/// PASV negotiation errors
#[derive(Debug)]
pub enum NegotiationError {
    PortNotFound(String),
}

impl fmt::Display for NegotiationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NegotiationError::PortNotFound(text) => {
                write!(f, "No data port in passive reply: {}", text)
            }
        }
    }
}

impl std::error::Error for NegotiationError {}

/// Transfer module errors
#[derive(Debug)]
pub enum TransferError {
    ChannelBusy,
    LocalFile(String, io::Error),
    LocalRead(io::Error),
    LocalWrite(io::Error),
    DataRead(io::Error),
    DataWrite(io::Error),
    WriteStalled,
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::ChannelBusy => write!(f, "Data channel already in use"),
            TransferError::LocalFile(path, e) => {
                write!(f, "Cannot open local file {}: {}", path, e)
            }
            TransferError::LocalRead(e) => write!(f, "Local read failed: {}", e),
            TransferError::LocalWrite(e) => write!(f, "Local write failed: {}", e),
            TransferError::DataRead(e) => write!(f, "Data channel read failed: {}", e),
            TransferError::DataWrite(e) => write!(f, "Data channel write failed: {}", e),
            TransferError::WriteStalled => {
                write!(f, "Data channel accepted zero bytes; transfer aborted")
            }
        }
    }
}

impl std::error::Error for TransferError {}

/// Session lifecycle errors
#[derive(Debug)]
pub enum SessionError {
    AlreadyConnected,
    NotConnected,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::AlreadyConnected => write!(f, "Session already connected"),
            SessionError::NotConnected => write!(f, "Session not connected"),
        }
    }
}

impl std::error::Error for SessionError {}

/// General FTP client error that encompasses all error types
#[derive(Debug)]
pub enum FtpClientError {
    Transport(TransportError),
    Protocol(ProtocolError),
    Negotiation(NegotiationError),
    Transfer(TransferError),
    Session(SessionError),
}

impl fmt::Display for FtpClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FtpClientError::Transport(e) => write!(f, "Transport error: {}", e),
            FtpClientError::Protocol(e) => write!(f, "Protocol error: {}", e),
            FtpClientError::Negotiation(e) => write!(f, "Negotiation error: {}", e),
            FtpClientError::Transfer(e) => write!(f, "Transfer error: {}", e),
            FtpClientError::Session(e) => write!(f, "Session error: {}", e),
        }
    }
}

impl std::error::Error for FtpClientError {}

// Implement conversions from specific errors to FtpClientError
impl From<TransportError> for FtpClientError {
    fn from(error: TransportError) -> Self {
        FtpClientError::Transport(error)
    }
}

impl From<ProtocolError> for FtpClientError {
    fn from(error: ProtocolError) -> Self {
        FtpClientError::Protocol(error)
    }
}

impl From<NegotiationError> for FtpClientError {
    fn from(error: NegotiationError) -> Self {
        FtpClientError::Negotiation(error)
    }
}

impl From<TransferError> for FtpClientError {
    fn from(error: TransferError) -> Self {
        FtpClientError::Transfer(error)
    }
}

impl From<SessionError> for FtpClientError {
    fn from(error: SessionError) -> Self {
        FtpClientError::Session(error)
    }
}

/// Convenience alias for operations that can fail with any client error
pub type FtpResult<T> = Result<T, FtpClientError>;
