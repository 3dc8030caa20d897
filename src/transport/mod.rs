//! Transport layer
//!
//! Blocking byte-stream connections shared by the control and data
//! channels.

pub mod connection;

pub use connection::Connection;
