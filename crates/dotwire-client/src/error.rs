//! Error types for the client.
//!
//! Errors are cloneable so a single fault can be fanned out to every
//! waiter; anything carrying an `std::io::Error` is flattened to its
//! message first.

use std::time::Duration;

use dotwire_proto::{ErrorCode, ProtocolError};
use thiserror::Error;

use crate::client::Mode;

/// Errors surfaced by [`Client`](crate::Client) operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Socket open, read, or write failed. The connection is gone.
    #[error("transport error: {0}")]
    Transport(String),

    /// Malformed or oversized frame. Fatal during the handshake; in
    /// normal operation an unparseable payload is dropped instead.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The daemon replied with an `ERROR` packet.
    #[error("server error {code}: {message}")]
    Server {
        /// Numeric error code.
        code: ErrorCode,
        /// Message or canonical description.
        message: String,
    },

    /// The daemon replied with an `EXCEPTION` packet, returning the
    /// offending packet.
    #[error("server exception {code} caused by packet type {cause:#x}: {message}")]
    Exception {
        /// Numeric error code.
        code: ErrorCode,
        /// Type code of the packet that caused it.
        cause: u32,
        /// Canonical description of the code.
        message: String,
    },

    /// A frame arrived whose type has no handler in normal operation.
    /// The frame is dropped and the connection continues; this only
    /// reaches the error callback, never a pending caller.
    #[error("unexpected packet type {packet_type:#x}")]
    UnexpectedPacket {
        /// Raw type code of the dropped frame.
        packet_type: u32,
    },

    /// Operation invoked in a mode that forbids it. The connection is
    /// untouched.
    #[error("{operation} is not permitted in {mode:?} mode")]
    InvalidMode {
        /// Mode at the time of the call.
        mode: Mode,
        /// Operation that was attempted.
        operation: &'static str,
    },

    /// No reply within the deadline. The connection is untouched; the
    /// caller decides whether to retry.
    #[error("{gate} timed out after {timeout:?}")]
    TimedOut {
        /// Which wait timed out.
        gate: &'static str,
        /// The deadline that elapsed.
        timeout: Duration,
    },

    /// The offered authentication method is unsupported or the secret
    /// could not be produced.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The handshake went off script.
    #[error("handshake failed: {0}")]
    Handshake(String),

    /// The connection has been closed; the operation cannot proceed.
    #[error("connection closed")]
    ConnectionClosed,

    /// More than one error accumulated before a waiter drained them.
    #[error("multiple errors: {0:?}")]
    Multiple(Vec<ClientError>),
}

impl ClientError {
    /// Fold another error into this one, flattening nested composites.
    pub(crate) fn merge(self, other: ClientError) -> ClientError {
        let mut errors = match self {
            Self::Multiple(errors) => errors,
            single => vec![single],
        };
        match other {
            Self::Multiple(more) => errors.extend(more),
            single => errors.push(single),
        }
        Self::Multiple(errors)
    }
}
