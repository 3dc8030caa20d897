pub mod config;
pub mod error;
pub mod protocol;
pub mod session;
pub mod shell;
pub mod transfer;
pub mod transport;

pub use error::{FtpClientError, FtpResult};
pub use session::ControlSession;
