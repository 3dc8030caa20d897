//! Module `file_ops`
//!
//! Local file endpoints for transfers. Files are opened according to the
//! session's transfer type; on this platform the text and binary open
//! modes are byte-identical, and the type selects the wire encoding
//! through the TYPE command instead.

use crate::error::TransferError;
use crate::transfer::modes::TransferType;
use log::debug;
use std::fs::File;
use std::path::Path;

/// Open the local destination file for a download
pub fn open_download_sink(path: &Path, transfer_type: TransferType) -> Result<File, TransferError> {
    debug!(
        "Opening {} for writing ({transfer_type} mode)",
        path.display()
    );
    File::create(path).map_err(|e| TransferError::LocalFile(path.display().to_string(), e))
}

/// Open the local source file for an upload
pub fn open_upload_source(path: &Path, transfer_type: TransferType) -> Result<File, TransferError> {
    debug!(
        "Opening {} for reading ({transfer_type} mode)",
        path.display()
    );
    File::open(path).map_err(|e| TransferError::LocalFile(path.display().to_string(), e))
}
