//! FTP Transfer types
//!
//! Binary and ASCII wire encodings negotiated with the TYPE command.

use std::fmt;

/// Wire encoding for data transfers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferType {
    #[default]
    Binary,
    Ascii,
}

impl TransferType {
    /// Argument sent with the TYPE command
    pub fn type_code(&self) -> &'static str {
        match self {
            TransferType::Binary => "I",
            TransferType::Ascii => "A",
        }
    }

    /// Parse a user-facing type name
    pub fn from_name(name: &str) -> Option<TransferType> {
        match name.to_ascii_lowercase().as_str() {
            "binary" => Some(TransferType::Binary),
            "ascii" => Some(TransferType::Ascii),
            _ => None,
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferType::Binary => write!(f, "binary"),
            TransferType::Ascii => write!(f, "ascii"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_binary() {
        assert_eq!(TransferType::default(), TransferType::Binary);
    }

    #[test]
    fn test_type_codes() {
        assert_eq!(TransferType::Binary.type_code(), "I");
        assert_eq!(TransferType::Ascii.type_code(), "A");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(TransferType::from_name("binary"), Some(TransferType::Binary));
        assert_eq!(TransferType::from_name("ASCII"), Some(TransferType::Ascii));
        assert_eq!(TransferType::from_name("ebcdic"), None);
    }
}
