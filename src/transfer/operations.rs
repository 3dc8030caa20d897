//! Transfer operations
//!
//! Sequences one data-channel operation end to end: PASV negotiation,
//! data connect, triggering command, streaming loop, and teardown. Every
//! failure path and the graceful path converge on the session's single
//! teardown routine.

use log::{debug, info};
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{FtpResult, NegotiationError, SessionError, TransferError};
use crate::protocol::commands;
use crate::protocol::pasv::{DataEndpoint, PASSIVE_MODE_FLAG, decode_passive_port};
use crate::session::ControlSession;
use crate::transfer::data_channel::DataChannel;
use crate::transfer::file_ops;

/// Negotiate a passive endpoint for the next data connection.
///
/// Sends PASV and, when the confirmation text has not arrived yet, reads
/// one further reply. The port digits are decoded from the newest text.
fn negotiate_passive(session: &mut ControlSession) -> FtpResult<DataEndpoint> {
    let reply = session.checked_command(commands::PASV, "")?;
    let mut text = reply.text().to_string();
    if !text.contains(PASSIVE_MODE_FLAG) {
        debug!("Passive confirmation not in first reply, reading a second one");
        let follow_up = session.receive_reply()?;
        text = follow_up.text().to_string();
    }
    let port = decode_passive_port(&text)
        .ok_or_else(|| NegotiationError::PortNotFound(text.trim_end().to_string()))?;
    debug!("Negotiated passive data port {port}");
    Ok(DataEndpoint { port })
}

/// Guard, negotiate, connect the data channel, and send the triggering
/// command. On a rejected trigger the channel is torn down with abort
/// semantics before the error propagates.
fn open_data_channel(session: &mut ControlSession, verb: &str, argument: &str) -> FtpResult<()> {
    if !session.is_connected() {
        return Err(SessionError::NotConnected.into());
    }
    if session.is_data_connected() {
        return Err(TransferError::ChannelBusy.into());
    }

    let endpoint = negotiate_passive(session)?;
    let host = session
        .host_address()
        .ok_or(SessionError::NotConnected)?
        .to_string();
    let channel = DataChannel::open(&host, endpoint.port, session.connect_retries())?;
    session.attach_data_channel(channel);

    if let Err(e) = session.checked_command(verb, argument) {
        session.stop_data_channel(true);
        return Err(e);
    }
    Ok(())
}

/// Inward streaming shared by listings and downloads
fn stream_in(
    session: &mut ControlSession,
    verb: &str,
    argument: &str,
    sink: &mut dyn Write,
) -> FtpResult<()> {
    open_data_channel(session, verb, argument)?;

    let mut buf = vec![0u8; session.transfer_buffer_size()];
    let mut received = 0u64;
    loop {
        let n = match session.data_read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                session.stop_data_channel(true);
                return Err(TransferError::DataRead(e).into());
            }
        };
        if let Err(e) = sink.write_all(&buf[..n]) {
            session.stop_data_channel(true);
            return Err(TransferError::LocalWrite(e).into());
        }
        received += n as u64;
    }

    session.stop_data_channel(false);
    info!("{verb} complete ({received} bytes)");
    Ok(())
}

/// LIST the current remote directory into `sink`
pub fn list_directory(session: &mut ControlSession, sink: &mut dyn Write) -> FtpResult<()> {
    stream_in(session, commands::LIST, "", sink)
}

/// NLST the current remote directory into `sink`
pub fn list_names(session: &mut ControlSession, sink: &mut dyn Write) -> FtpResult<()> {
    stream_in(session, commands::NLST, "", sink)
}

/// RETR `remote` into an arbitrary sink
pub fn download_to(
    session: &mut ControlSession,
    remote: &str,
    sink: &mut dyn Write,
) -> FtpResult<()> {
    stream_in(session, commands::RETR, remote, sink)
}

/// STOR to `remote` from an arbitrary source.
///
/// Each chunk read from the source is written to completion; a zero-byte
/// write aborts the operation and skips the final acknowledgment read.
pub fn upload_from(
    session: &mut ControlSession,
    remote: &str,
    source: &mut dyn Read,
) -> FtpResult<()> {
    open_data_channel(session, commands::STOR, remote)?;

    let mut buf = vec![0u8; session.transfer_buffer_size()];
    let mut total = 0u64;
    loop {
        let n = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                session.stop_data_channel(true);
                return Err(TransferError::LocalRead(e).into());
            }
        };

        let mut sent = 0;
        while sent < n {
            match session.data_write(&buf[sent..n]) {
                Ok(0) => {
                    session.stop_data_channel(true);
                    return Err(TransferError::WriteStalled.into());
                }
                Ok(written) => sent += written,
                Err(e) => {
                    session.stop_data_channel(true);
                    return Err(TransferError::DataWrite(e).into());
                }
            }
        }
        total += n as u64;
    }

    session.stop_data_channel(false);
    info!("STOR complete ({total} bytes)");
    Ok(())
}

/// Download `remote` into the local file at `local`
pub fn download_file(session: &mut ControlSession, remote: &str, local: &Path) -> FtpResult<()> {
    let mut file = file_ops::open_download_sink(local, session.transfer_type())?;
    download_to(session, remote, &mut file)
}

/// Upload the local file at `local` under the name `remote`
pub fn upload_file(session: &mut ControlSession, local: &Path, remote: &str) -> FtpResult<()> {
    let mut file = file_ops::open_upload_source(local, session.transfer_type())?;
    upload_from(session, remote, &mut file)
}
