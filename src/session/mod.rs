//! Control session
//!
//! The client-side FTP session state machine: connection lifecycle,
//! command/reply round trips, and the per-operation data channel slot.

pub mod control;

pub use control::ControlSession;
