//! Handshake state machine.
//!
//! Runs the version/authentication exchange that opens every connection.
//! Pure state machine: packets go in, send/complete actions come out, the
//! caller does the I/O. Any error aborts the connection attempt.
//!
//! ```text
//!                recv VERSION              recv AUTH(method)
//!  AwaitVersion ──────────────▶ AwaitAuth ─────────────────────▶ AwaitAck
//!                send VERSION      │  NONE: done                    │
//!                                  │  KEY:  send AUTH(KEY, secret)  │ recv ACK
//!                                  │  CRED: abort                   ▼
//!                                  └─────────────────────────────▶ Done
//! ```

use dotwire_proto::{AuthMethod, PROTOCOL_VERSION, Packet};

use crate::{config::AuthSource, error::ClientError};

/// Actions the driver executes on behalf of the handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HandshakeAction {
    /// Send this packet to the daemon.
    Send(Packet),
    /// The handshake is finished; switch to normal dispatch.
    Complete,
}

/// Handshake steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Nothing received yet; the daemon speaks first.
    AwaitVersion,
    /// Version answered, waiting for the authentication offer.
    AwaitAuth,
    /// Credentials sent, waiting for the acknowledgement.
    AwaitAck,
    /// Connection established.
    Done,
}

/// The version/authentication exchange for one connection attempt.
#[derive(Debug)]
pub(crate) struct Handshake {
    step: Step,
    auth: AuthSource,
}

impl Handshake {
    /// Start a handshake that answers key authentication from `auth`.
    pub fn new(auth: AuthSource) -> Self {
        Self { step: Step::AwaitVersion, auth }
    }

    /// Whether the handshake has finished.
    pub fn is_complete(&self) -> bool {
        self.step == Step::Done
    }

    /// Process one packet from the daemon.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Handshake`] for version mismatches and packets
    ///   that are out of script.
    /// - [`ClientError::Authentication`] for unsupported methods or an
    ///   unusable secret.
    /// - [`ClientError::Server`] when the daemon reports an error.
    pub fn handle(&mut self, packet: Packet) -> Result<Vec<HandshakeAction>, ClientError> {
        match (self.step, packet) {
            (_, Packet::Error { code, message }) => Err(ClientError::Server { code, message }),

            (Step::AwaitVersion, Packet::Version { protocol }) => {
                if protocol < PROTOCOL_VERSION {
                    return Err(ClientError::Handshake(format!(
                        "daemon speaks protocol {protocol}, version {PROTOCOL_VERSION} required"
                    )));
                }
                self.step = Step::AwaitAuth;
                Ok(vec![HandshakeAction::Send(Packet::Version { protocol: PROTOCOL_VERSION })])
            }

            (Step::AwaitAuth, Packet::ServerAuth { method }) => match AuthMethod::from_u32(method)
            {
                Some(AuthMethod::None) => {
                    self.step = Step::Done;
                    Ok(vec![HandshakeAction::Complete])
                }
                Some(AuthMethod::Key) => {
                    let key = self.auth.load()?;
                    self.step = Step::AwaitAck;
                    Ok(vec![HandshakeAction::Send(Packet::ClientAuth {
                        method: AuthMethod::Key.to_u32(),
                        key,
                    })])
                }
                Some(AuthMethod::Cred) => Err(ClientError::Authentication(
                    "daemon requires credential authentication, which is not supported"
                        .to_string(),
                )),
                None => Err(ClientError::Authentication(format!(
                    "daemon offered unknown authentication method {method:#x}"
                ))),
            },

            (Step::AwaitAck, Packet::Ack) => {
                self.step = Step::Done;
                Ok(vec![HandshakeAction::Complete])
            }

            (step, packet) => Err(ClientError::Handshake(format!(
                "unexpected packet {packet:?} in step {step:?}"
            ))),
        }
    }
}
