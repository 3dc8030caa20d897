//! Error handlers
//!
//! Provides error handling and reporting functions.

use crate::error::types::FtpClientError;
use log::error;

/// Handle an FTP client error
pub fn handle_error(err: &FtpClientError) {
    error!("FTP Client Error: {}", err);
}
