//! PASV reply decoding
//!
//! Extracts the data-channel port a server advertises in the free text of
//! its passive-mode reply.

/// Substring that marks a passive-mode confirmation reply
pub const PASSIVE_MODE_FLAG: &str = "Entering Passive Mode";

/// Endpoint for one data connection; the host is reused from the session
#[derive(Debug, Clone)]
pub struct DataEndpoint {
    pub port: u16,
}

/// Decode the advertised data port from passive-reply text.
///
/// Scans backward from the end of the text. The last run of decimal digits
/// accumulates with weights 1, 10, 100, ... (the p2 octet); the run before
/// it restarts the weight at 256 (the p1 octet); the first non-digit after
/// that finalizes `p1 * 256 + p2`. Index 0 is never examined. Text without
/// two digit runs yields `None`, as does a value too large for a TCP port
/// or a digit run too long to accumulate. The text is server-controlled,
/// so the accumulation is overflow-checked rather than trusted.
pub fn decode_passive_port(text: &str) -> Option<u16> {
    let bytes = text.as_bytes();
    let mut port: u64 = 0;
    let mut weight: u64 = 1;

    let mut i = bytes.len().checked_sub(1)?;
    while i > 0 {
        let byte = bytes[i];
        if byte.is_ascii_digit() {
            port = port.checked_add(u64::from(byte - b'0').checked_mul(weight)?)?;
            weight = weight.checked_mul(10)?;
        } else if weight > 1 {
            // p2 consumed; rescan from this separator for the p1 run
            weight = 256;
            while i > 0 {
                let byte = bytes[i];
                if byte.is_ascii_digit() {
                    port = port.checked_add(u64::from(byte - b'0').checked_mul(weight)?)?;
                    weight = weight.checked_mul(10)?;
                } else if weight > 256 {
                    return u16::try_from(port).ok();
                }
                i -= 1;
            }
            return None;
        }
        i -= 1;
    }
    None
}
