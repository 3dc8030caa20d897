//! Transfer module for the FTP client
//!
//! Handles the data-channel lifecycle, local file endpoints, and the
//! orchestration of listing, download, and upload operations.

pub mod data_channel;
pub mod file_ops;
pub mod modes;
pub mod operations;

pub use data_channel::DataChannel;
pub use modes::TransferType;
pub use operations::{
    download_file, download_to, list_directory, list_names, upload_file, upload_from,
};
