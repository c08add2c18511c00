//! Wire model for the BrlAPI protocol (version 8).
//!
//! BrlAPI is the TCP control protocol of the BRLTTY daemon: a client
//! enumerates the attached braille display, claims virtual terminals,
//! pushes dot patterns or text, and receives key events from the display
//! hardware. This crate covers the pure data side of that conversation:
//!
//! - [`Frame`]: the length-prefixed envelope, with a streaming deframer
//! - [`Packet`]: one typed record per packet type, parse and encode
//! - [`write`]: construction of the flag-driven `WRITE` payloads
//! - [`keycodes`]: decomposition of 64-bit key codes into commands,
//!   arguments, and flags
//! - [`ErrorCode`]: the daemon's numeric error taxonomy
//!
//! No I/O happens here; the connection lifecycle lives in the client
//! crate.

#![forbid(unsafe_code)]

pub mod keycodes;

mod errors;
mod frame;
mod packet;
pub mod write;

pub use errors::{ErrorCode, ProtocolError, Result};
pub use frame::Frame;
pub use packet::{AuthMethod, Packet, PacketType};
pub use write::{Cursor, WriteRequest};

/// Protocol version this crate implements; lower versions are rejected.
pub const PROTOCOL_VERSION: u32 = 8;

/// Host BRLTTY listens on by default.
pub const DEFAULT_HOST: &str = "localhost";

/// TCP port BRLTTY listens on by default.
pub const DEFAULT_PORT: u16 = 4101;

/// TTY number sentinel meaning "use TTY 0".
pub const DEFAULT_TTY: i32 = -1;

/// Display number sentinel meaning "the default display".
pub const DEFAULT_DISPLAY: i32 = -1;
