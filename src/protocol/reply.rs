//! FTP Reply parsing
//!
//! Frames and classifies server replies read from the control channel,
//! honoring the multi-line reply convention.

/// Size of the control-channel receive buffer
pub const REPLY_BUFFER_SIZE: usize = 4096;

/// Reply codes this client requires explicitly
pub const SERVICE_READY: u16 = 220;
pub const PASSWORD_REQUIRED: u16 = 331;

/// Status codes at or above this value are failures
pub const ERROR_THRESHOLD: u16 = 400;

/// Tail margin that keeps the status-code parse inside the buffer
const PARSE_MARGIN: usize = 5;

/// A parsed server reply.
///
/// Produced once per command round trip and never mutated. `status_code`
/// is absent when no terminal line could be located or its leading digits
/// were missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    status_code: Option<u16>,
    text: String,
}

impl Reply {
    /// Numeric status of the terminal line, if one parsed
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Full reply body, continuation lines included
    pub fn text(&self) -> &str {
        &self.text
    }

    /// A reply succeeds when its status code parsed and is below 400
    pub fn is_success(&self) -> bool {
        matches!(self.status_code, Some(code) if code < ERROR_THRESHOLD)
    }
}

/// Parse the raw bytes of one control-channel read into a `Reply`.
///
/// A line counts as a continuation while its 4th character is a hyphen or
/// its 2nd-4th characters are all spaces. The scan advances past each
/// newline-terminated continuation line until a terminal line is found or
/// the position bound (buffer length minus 5, so the numeric parse cannot
/// run past the end) is exhausted. A terminal line found exactly at the
/// bound still fails. The first zero byte ends the content.
pub fn parse_reply(buf: &[u8]) -> Reply {
    let text = text_before_terminator(buf);
    let max_pos = buf.len().saturating_sub(PARSE_MARGIN);

    let mut pos = 0;
    while pos < max_pos && is_continuation(buf, pos) {
        match next_line_start(buf, pos) {
            Some(next) => pos = next,
            None => {
                return Reply {
                    status_code: None,
                    text,
                };
            }
        }
    }
    if pos >= max_pos {
        return Reply {
            status_code: None,
            text,
        };
    }

    Reply {
        status_code: leading_code(&buf[pos..]),
        text,
    }
}

/// Conservative continuation heuristic; coarser than the RFC 959
/// first/last code-matching rule.
fn is_continuation(buf: &[u8], pos: usize) -> bool {
    buf[pos + 3] == b'-' || (buf[pos + 1] == b' ' && buf[pos + 2] == b' ' && buf[pos + 3] == b' ')
}

/// Index just past the next newline, or `None` when a zero byte or the end
/// of the buffer comes first.
fn next_line_start(buf: &[u8], pos: usize) -> Option<usize> {
    for (offset, &byte) in buf[pos..].iter().enumerate() {
        match byte {
            0 => return None,
            b'\n' => return Some(pos + offset + 1),
            _ => {}
        }
    }
    None
}

/// Decimal parse of the digits leading the terminal line
fn leading_code(line: &[u8]) -> Option<u16> {
    let digits = line
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(line.len());
    if digits == 0 {
        return None;
    }
    std::str::from_utf8(&line[..digits]).ok()?.parse().ok()
}

/// Buffer content up to the first zero byte, decoded as UTF-8
fn text_before_terminator(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}
