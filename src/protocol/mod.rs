//! FTP Protocol implementation
//!
//! Handles command formatting, reply framing/parsing, and PASV decoding.

pub mod commands;
pub mod pasv;
pub mod reply;

pub use commands::format_command;
pub use pasv::{DataEndpoint, decode_passive_port};
pub use reply::{Reply, parse_reply};
