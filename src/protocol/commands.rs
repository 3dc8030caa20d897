//! FTP command formatting
//!
//! Defines the command verbs this client sends and the control-channel
//! wire format.

/// Command verbs sent on the control channel
pub const USER: &str = "USER";
pub const PASS: &str = "PASS";
pub const QUIT: &str = "QUIT";
pub const TYPE: &str = "TYPE";
pub const PASV: &str = "PASV";
pub const LIST: &str = "LIST";
pub const NLST: &str = "NLST";
pub const RETR: &str = "RETR";
pub const STOR: &str = "STOR";
pub const PWD: &str = "PWD";
pub const CWD: &str = "CWD";
pub const CDUP: &str = "CDUP";
pub const MKD: &str = "MKD";
pub const RMD: &str = "RMD";
pub const DELE: &str = "DELE";
pub const SYST: &str = "SYST";
pub const STAT: &str = "STAT";
pub const REIN: &str = "REIN";

/// Format a command line for the control channel
pub fn format_command(verb: &str, argument: &str) -> String {
    if argument.is_empty() {
        format!("{}\r\n", verb)
    } else {
        format!("{} {}\r\n", verb, argument)
    }
}
