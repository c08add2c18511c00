//! Error types for the wire model.
//!
//! [`ProtocolError`] covers framing and parsing faults produced on this
//! side; [`ErrorCode`] is the numeric error taxonomy BRLTTY itself reports
//! in `ERROR` and `EXCEPTION` packets.

use std::fmt;

use thiserror::Error;

/// Convenience alias for wire-model results.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced while framing or parsing packets.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Declared frame size exceeds the protocol maximum.
    #[error("frame of {size} bytes exceeds the {max}-byte limit; peer is not speaking BrlAPI")]
    FrameTooLarge {
        /// Declared total frame size (header included).
        size: usize,
        /// The protocol maximum.
        max: usize,
    },

    /// Buffer ends before the declared payload does.
    #[error("frame truncated: expected {expected} payload bytes, got {actual}")]
    FrameTruncated {
        /// Payload bytes the header declared.
        expected: usize,
        /// Payload bytes actually present.
        actual: usize,
    },

    /// Payload does not match the layout required by the packet type.
    #[error("invalid payload for packet type {packet_type:#x}: expected {expected}")]
    InvalidPayload {
        /// Type code of the offending packet.
        packet_type: u32,
        /// Description of the expected layout.
        expected: &'static str,
    },
}

/// Numeric error code reported by BRLTTY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(pub u32);

impl ErrorCode {
    /// Success.
    pub const SUCCESS: Self = Self(0);
    /// Not enough memory.
    pub const NOMEM: Self = Self(1);
    /// A connection is already running in this tty.
    pub const TTYBUSY: Self = Self(2);
    /// A connection is already using raw or suspend mode.
    pub const DEVICEBUSY: Self = Self(3);
    /// Not implemented in protocol.
    pub const UNKNOWN_INSTRUCTION: Self = Self(4);
    /// Forbidden in current mode.
    pub const ILLEGAL_INSTRUCTION: Self = Self(5);
    /// Out of range or has no sense.
    pub const INVALID_PARAMETER: Self = Self(6);
    /// Invalid size.
    pub const INVALID_PACKET: Self = Self(7);
    /// Connection refused.
    pub const CONNREFUSED: Self = Self(8);
    /// Operation not supported.
    pub const OPNOTSUPP: Self = Self(9);
    /// Getaddrinfo error.
    pub const GAIERR: Self = Self(10);
    /// Libc error.
    pub const LIBCERR: Self = Self(11);
    /// Couldn't find out the tty number.
    pub const UNKNOWNTTY: Self = Self(12);
    /// Bad protocol version.
    pub const PROTOCOL_VERSION: Self = Self(13);
    /// Unexpected end of file.
    pub const EOF: Self = Self(14);
    /// Key file is empty.
    pub const EMPTYKEY: Self = Self(15);
    /// Packet returned by driver too large.
    pub const DRIVERERROR: Self = Self(16);
    /// Authentication failed.
    pub const AUTHENTICATION: Self = Self(17);
    /// Parameter cannot be changed.
    pub const READONLY_PARAMETER: Self = Self(18);

    /// Human-readable description of this code.
    pub fn description(self) -> &'static str {
        match self {
            Self::SUCCESS => "Success",
            Self::NOMEM => "Not enough memory",
            Self::TTYBUSY => "A connection is already running in this tty",
            Self::DEVICEBUSY => "A connection is already using RAW or suspend mode",
            Self::UNKNOWN_INSTRUCTION => "Not implemented in protocol",
            Self::ILLEGAL_INSTRUCTION => "Forbidden in current mode",
            Self::INVALID_PARAMETER => "Out of range or have no sense",
            Self::INVALID_PACKET => "Invalid size",
            Self::CONNREFUSED => "Connection refused",
            Self::OPNOTSUPP => "Operation not supported",
            Self::GAIERR => "Getaddrinfo error",
            Self::LIBCERR => "Libc error",
            Self::UNKNOWNTTY => "Couldn't find out the tty number",
            Self::PROTOCOL_VERSION => "Bad protocol version",
            Self::EOF => "Unexpected end of file",
            Self::EMPTYKEY => "Key file empty",
            Self::DRIVERERROR => "Packet returned by driver too large",
            Self::AUTHENTICATION => "Authentication failed",
            Self::READONLY_PARAMETER => "Parameter cannot be changed",
            Self(_) => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.description())
    }
}
