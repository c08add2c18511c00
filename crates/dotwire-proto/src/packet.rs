//! Typed packets and the protocol taxonomy.
//!
//! [`PacketType`] names every type code of protocol version 8, including
//! the ones this client never sends (raw mode, key-range filters, driver
//! suspension). [`Packet`] is the typed view of a frame with an explicit
//! parser and encoder per variant, so the reader's dispatch can match
//! exhaustively instead of inspecting raw bytes.
//!
//! Parsing covers everything a server can send; the client-only packets
//! (`ClientAuth`, `EnterTtyMode`, `Write`, ...) are encode-only and come
//! back as [`Packet::Unknown`] when parsed, mirroring how the daemon treats
//! them as opaque until validated.

use bytes::{Buf, BufMut, Bytes};

use crate::{
    errors::{ErrorCode, ProtocolError, Result},
    frame::Frame,
};

/// Type codes of protocol version 8.
///
/// The wire value is the byte value of an ASCII letter, carried as a
/// big-endian `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PacketType {
    /// Protocol version exchange (`v`).
    Version = b'v' as u32,
    /// Authentication request/response (`a`).
    Auth = b'a' as u32,
    /// Driver name query/reply (`n`).
    GetDriverName = b'n' as u32,
    /// Model identifier query/reply (`d`).
    GetModelId = b'd' as u32,
    /// Display size query/reply (`s`).
    GetDisplaySize = b's' as u32,
    /// Claim control of a tty chain (`t`).
    EnterTtyMode = b't' as u32,
    /// Focus change notification (`F`).
    SetFocus = b'F' as u32,
    /// Release tty control (`L`).
    LeaveTtyMode = b'L' as u32,
    /// Asynchronous key event (`k`).
    Key = b'k' as u32,
    /// Ignore a set of key ranges (`m`).
    IgnoreKeyRanges = b'm' as u32,
    /// Accept a set of key ranges (`u`).
    AcceptKeyRanges = b'u' as u32,
    /// Braille output (`w`).
    Write = b'w' as u32,
    /// Enter raw driver mode (`*`).
    EnterRawMode = b'*' as u32,
    /// Leave raw driver mode (`#`).
    LeaveRawMode = b'#' as u32,
    /// Raw driver packet (`p`).
    Packet = b'p' as u32,
    /// Positive acknowledgement (`A`).
    Ack = b'A' as u32,
    /// Error report (`e`).
    Error = b'e' as u32,
    /// Exception report carrying the offending packet (`E`).
    Exception = b'E' as u32,
    /// Suspend the braille driver (`S`).
    SuspendDriver = b'S' as u32,
    /// Resume the braille driver (`R`).
    ResumeDriver = b'R' as u32,
    /// Synchronization point (`Z`).
    Synchronize = b'Z' as u32,
}

impl PacketType {
    /// The wire value.
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    /// Type code from the wire value. `None` if unrecognized.
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            v if v == Self::Version.to_u32() => Some(Self::Version),
            v if v == Self::Auth.to_u32() => Some(Self::Auth),
            v if v == Self::GetDriverName.to_u32() => Some(Self::GetDriverName),
            v if v == Self::GetModelId.to_u32() => Some(Self::GetModelId),
            v if v == Self::GetDisplaySize.to_u32() => Some(Self::GetDisplaySize),
            v if v == Self::EnterTtyMode.to_u32() => Some(Self::EnterTtyMode),
            v if v == Self::SetFocus.to_u32() => Some(Self::SetFocus),
            v if v == Self::LeaveTtyMode.to_u32() => Some(Self::LeaveTtyMode),
            v if v == Self::Key.to_u32() => Some(Self::Key),
            v if v == Self::IgnoreKeyRanges.to_u32() => Some(Self::IgnoreKeyRanges),
            v if v == Self::AcceptKeyRanges.to_u32() => Some(Self::AcceptKeyRanges),
            v if v == Self::Write.to_u32() => Some(Self::Write),
            v if v == Self::EnterRawMode.to_u32() => Some(Self::EnterRawMode),
            v if v == Self::LeaveRawMode.to_u32() => Some(Self::LeaveRawMode),
            v if v == Self::Packet.to_u32() => Some(Self::Packet),
            v if v == Self::Ack.to_u32() => Some(Self::Ack),
            v if v == Self::Error.to_u32() => Some(Self::Error),
            v if v == Self::Exception.to_u32() => Some(Self::Exception),
            v if v == Self::SuspendDriver.to_u32() => Some(Self::SuspendDriver),
            v if v == Self::ResumeDriver.to_u32() => Some(Self::ResumeDriver),
            v if v == Self::Synchronize.to_u32() => Some(Self::Synchronize),
            _ => None,
        }
    }
}

/// Authentication methods offered in `AUTH` packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum AuthMethod {
    /// No credentials required (`N`).
    None = b'N' as u32,
    /// Shared secret key (`K`).
    Key = b'K' as u32,
    /// Credential-based authentication (`C`); not supported by this client.
    Cred = b'C' as u32,
}

impl AuthMethod {
    /// The wire value.
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    /// Method from the wire value. `None` if unrecognized.
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            v if v == Self::None.to_u32() => Some(Self::None),
            v if v == Self::Key.to_u32() => Some(Self::Key),
            v if v == Self::Cred.to_u32() => Some(Self::Cred),
            _ => None,
        }
    }
}

/// A frame interpreted according to its type code.
///
/// Server-to-client packets parse into their typed form; packets only ever
/// sent by the client exist for encoding and come back as
/// [`Packet::Unknown`] if fed to the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    /// Protocol version, first packet in either direction.
    Version {
        /// Declared protocol version.
        protocol: u32,
    },
    /// Authentication method offered by the server.
    ServerAuth {
        /// Raw method value; see [`AuthMethod`].
        method: u32,
    },
    /// Authentication answer from the client, key bytes included for
    /// [`AuthMethod::Key`]. Encode-only.
    ClientAuth {
        /// Raw method value.
        method: u32,
        /// Shared secret, sent verbatim.
        key: Vec<u8>,
    },
    /// Positive acknowledgement.
    Ack,
    /// Error report.
    Error {
        /// Numeric error code.
        code: ErrorCode,
        /// Message sent by the server, or the code's canonical
        /// description when the packet carries none.
        message: String,
    },
    /// Exception report: an error plus the packet that caused it.
    Exception {
        /// Numeric error code.
        code: ErrorCode,
        /// Type code of the offending packet.
        cause: u32,
        /// Leading bytes of the offending packet.
        content: Bytes,
    },
    /// Driver name request (empty) or reply.
    DriverName {
        /// Driver name, NUL padding stripped. Empty for the request form.
        name: String,
    },
    /// Model identifier request (empty) or reply.
    ModelId {
        /// Model identifier, NUL padding stripped. Empty for the request
        /// form.
        model: String,
    },
    /// Display size request. Encodes to an empty payload.
    GetDisplaySize,
    /// Display size reply.
    DisplaySize {
        /// Cells per row.
        columns: u32,
        /// Rows.
        rows: u32,
    },
    /// Asynchronous key event.
    Key {
        /// 64-bit key code; see [`crate::keycodes`].
        code: u64,
    },
    /// Claim control of a tty chain. Encode-only.
    EnterTtyMode {
        /// Path of tty numbers, outermost first.
        ttys: Vec<u32>,
        /// Driver name selecting the key reporting mode; empty for the
        /// universal command set.
        driver: String,
    },
    /// Release tty control. Encode-only.
    LeaveTtyMode,
    /// Braille output. Encode-only; the payload layout is driven by the
    /// write flags (see [`crate::write`]).
    Write {
        /// Flag word plus fields, already laid out in wire order.
        payload: Bytes,
    },
    /// Any packet type without a typed parser.
    Unknown {
        /// Raw type code.
        packet_type: u32,
        /// Raw payload.
        payload: Bytes,
    },
}

/// Parse helpers shared by the string-carrying info packets.
fn parse_info_string(packet_type: PacketType, payload: &[u8]) -> Result<String> {
    let trimmed = match payload.iter().rposition(|&b| b != 0) {
        Some(last) => &payload[..=last],
        None => &[][..],
    };
    String::from_utf8(trimmed.to_vec()).map_err(|_| ProtocolError::InvalidPayload {
        packet_type: packet_type.to_u32(),
        expected: "NUL-terminated text",
    })
}

impl Packet {
    /// The raw type code this packet encodes to.
    pub fn packet_type(&self) -> u32 {
        match self {
            Self::Version { .. } => PacketType::Version.to_u32(),
            Self::ServerAuth { .. } | Self::ClientAuth { .. } => PacketType::Auth.to_u32(),
            Self::Ack => PacketType::Ack.to_u32(),
            Self::Error { .. } => PacketType::Error.to_u32(),
            Self::Exception { .. } => PacketType::Exception.to_u32(),
            Self::DriverName { .. } => PacketType::GetDriverName.to_u32(),
            Self::ModelId { .. } => PacketType::GetModelId.to_u32(),
            Self::GetDisplaySize | Self::DisplaySize { .. } => PacketType::GetDisplaySize.to_u32(),
            Self::Key { .. } => PacketType::Key.to_u32(),
            Self::EnterTtyMode { .. } => PacketType::EnterTtyMode.to_u32(),
            Self::LeaveTtyMode => PacketType::LeaveTtyMode.to_u32(),
            Self::Write { .. } => PacketType::Write.to_u32(),
            Self::Unknown { packet_type, .. } => *packet_type,
        }
    }

    /// Interpret a frame according to its type code.
    ///
    /// Unknown and client-only type codes parse as [`Packet::Unknown`];
    /// the caller decides whether that is a fault.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::InvalidPayload`] if the payload does not match
    ///   the layout the type code requires.
    pub fn from_frame(frame: &Frame) -> Result<Self> {
        let payload = &frame.payload;
        let short = |expected| ProtocolError::InvalidPayload {
            packet_type: frame.packet_type,
            expected,
        };

        let packet = match frame.packet_type_enum() {
            Some(PacketType::Version) => {
                if payload.len() < 4 {
                    return Err(short("32-bit protocol version"));
                }
                Self::Version { protocol: (&payload[..4]).get_u32() }
            }
            Some(PacketType::Auth) => {
                if payload.len() < 4 {
                    return Err(short("32-bit authentication method"));
                }
                Self::ServerAuth { method: (&payload[..4]).get_u32() }
            }
            Some(PacketType::Ack) => Self::Ack,
            Some(PacketType::Error) => {
                if payload.len() < 4 {
                    return Err(short("32-bit error code"));
                }
                let code = ErrorCode((&payload[..4]).get_u32());
                let message = if payload.len() > 4 {
                    String::from_utf8(payload[4..].to_vec())
                        .map_err(|_| short("UTF-8 error message"))?
                } else {
                    code.description().to_string()
                };
                Self::Error { code, message }
            }
            Some(PacketType::Exception) => {
                if payload.len() < 8 {
                    return Err(short("error code and offending packet type"));
                }
                let mut head = &payload[..8];
                Self::Exception {
                    code: ErrorCode(head.get_u32()),
                    cause: head.get_u32(),
                    content: payload.slice(8..),
                }
            }
            Some(PacketType::GetDriverName) => Self::DriverName {
                name: parse_info_string(PacketType::GetDriverName, payload)?,
            },
            Some(PacketType::GetModelId) => Self::ModelId {
                model: parse_info_string(PacketType::GetModelId, payload)?,
            },
            Some(PacketType::GetDisplaySize) => {
                if payload.is_empty() {
                    Self::GetDisplaySize
                } else if payload.len() == 8 {
                    let mut body = &payload[..];
                    Self::DisplaySize { columns: body.get_u32(), rows: body.get_u32() }
                } else {
                    return Err(short("two 32-bit dimensions"));
                }
            }
            Some(PacketType::Key) => {
                if payload.len() < 8 {
                    return Err(short("64-bit key code"));
                }
                Self::Key { code: (&payload[..8]).get_u64() }
            }
            Some(PacketType::LeaveTtyMode) => Self::LeaveTtyMode,
            _ => Self::Unknown { packet_type: frame.packet_type, payload: payload.clone() },
        };

        Ok(packet)
    }

    /// Encode this packet's payload into a buffer.
    pub fn encode_payload(&self, dst: &mut impl BufMut) {
        match self {
            Self::Version { protocol } => dst.put_u32(*protocol),
            Self::ServerAuth { method } => dst.put_u32(*method),
            Self::ClientAuth { method, key } => {
                dst.put_u32(*method);
                dst.put_slice(key);
            }
            Self::Ack | Self::GetDisplaySize | Self::LeaveTtyMode => {}
            Self::Error { code, message } => {
                dst.put_u32(code.0);
                if message != code.description() {
                    dst.put_slice(message.as_bytes());
                }
            }
            Self::Exception { code, cause, content } => {
                dst.put_u32(code.0);
                dst.put_u32(*cause);
                dst.put_slice(content);
            }
            Self::DriverName { name } => {
                if !name.is_empty() {
                    dst.put_slice(name.as_bytes());
                    dst.put_u8(0);
                }
            }
            Self::ModelId { model } => {
                if !model.is_empty() {
                    dst.put_slice(model.as_bytes());
                    dst.put_u8(0);
                }
            }
            Self::DisplaySize { columns, rows } => {
                dst.put_u32(*columns);
                dst.put_u32(*rows);
            }
            Self::Key { code } => dst.put_u64(*code),
            Self::EnterTtyMode { ttys, driver } => {
                dst.put_u32(ttys.len() as u32);
                for tty in ttys {
                    dst.put_u32(*tty);
                }
                dst.put_u8(driver.len() as u8);
                dst.put_slice(driver.as_bytes());
            }
            Self::Write { payload } | Self::Unknown { payload, .. } => dst.put_slice(payload),
        }
    }

    /// Wrap this packet in a wire frame.
    pub fn into_frame(self) -> Frame {
        let mut payload = Vec::new();
        self.encode_payload(&mut payload);
        Frame { packet_type: self.packet_type(), payload: payload.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(packet: Packet) -> Packet {
        let frame = packet.into_frame();
        Packet::from_frame(&frame).unwrap()
    }

    #[test]
    fn version_round_trip() {
        let packet = Packet::Version { protocol: 8 };
        assert_eq!(round_trip(packet.clone()), packet);
    }

    #[test]
    fn server_auth_round_trip() {
        let packet = Packet::ServerAuth { method: AuthMethod::Key.to_u32() };
        assert_eq!(round_trip(packet.clone()), packet);
    }

    #[test]
    fn client_auth_wire_layout() {
        let packet =
            Packet::ClientAuth { method: AuthMethod::Key.to_u32(), key: b"secret".to_vec() };
        let frame = packet.into_frame();
        assert_eq!(frame.packet_type, u32::from(b'a'));
        assert_eq!(&frame.payload[..], b"\x00\x00\x00\x4Bsecret");
    }

    #[test]
    fn error_with_message() {
        let frame = Frame::new(
            PacketType::Error,
            [&2u32.to_be_bytes()[..], &b"busy elsewhere"[..]].concat(),
        );
        let packet = Packet::from_frame(&frame).unwrap();
        assert_eq!(
            packet,
            Packet::Error { code: ErrorCode::TTYBUSY, message: "busy elsewhere".to_string() }
        );
    }

    #[test]
    fn error_without_message_uses_description() {
        let frame = Frame::new(PacketType::Error, 17u32.to_be_bytes().to_vec());
        let packet = Packet::from_frame(&frame).unwrap();
        assert_eq!(
            packet,
            Packet::Error {
                code: ErrorCode::AUTHENTICATION,
                message: "Authentication failed".to_string()
            }
        );
    }

    #[test]
    fn exception_carries_offending_packet() {
        let mut payload = Vec::new();
        payload.put_u32(7);
        payload.put_u32(u32::from(b'w'));
        payload.put_slice(b"\x00\x00\x00\x36");
        let frame = Frame::new(PacketType::Exception, payload);

        let packet = Packet::from_frame(&frame).unwrap();
        assert_eq!(
            packet,
            Packet::Exception {
                code: ErrorCode::INVALID_PACKET,
                cause: u32::from(b'w'),
                content: Bytes::from_static(b"\x00\x00\x00\x36"),
            }
        );
    }

    #[test]
    fn driver_name_strips_nul_padding() {
        let frame = Frame::new(PacketType::GetDriverName, &b"HandyTech\x00"[..]);
        let packet = Packet::from_frame(&frame).unwrap();
        assert_eq!(packet, Packet::DriverName { name: "HandyTech".to_string() });
    }

    #[test]
    fn empty_info_payload_is_request_form() {
        let frame = Frame::new(PacketType::GetDisplaySize, Bytes::new());
        assert_eq!(Packet::from_frame(&frame).unwrap(), Packet::GetDisplaySize);

        let frame = Frame::new(PacketType::GetDriverName, Bytes::new());
        assert_eq!(
            Packet::from_frame(&frame).unwrap(),
            Packet::DriverName { name: String::new() }
        );
    }

    #[test]
    fn display_size_reply() {
        let mut payload = Vec::new();
        payload.put_u32(40);
        payload.put_u32(1);
        let frame = Frame::new(PacketType::GetDisplaySize, payload);
        assert_eq!(
            Packet::from_frame(&frame).unwrap(),
            Packet::DisplaySize { columns: 40, rows: 1 }
        );
    }

    #[test]
    fn display_size_rejects_odd_lengths() {
        let frame = Frame::new(PacketType::GetDisplaySize, vec![0; 5]);
        assert!(matches!(
            Packet::from_frame(&frame),
            Err(ProtocolError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn key_round_trip() {
        let packet = Packet::Key { code: 0x0000_0000_2001_0008 };
        assert_eq!(round_trip(packet.clone()), packet);
    }

    #[test]
    fn enter_tty_mode_wire_layout() {
        let packet = Packet::EnterTtyMode { ttys: vec![1, 7], driver: "ht".to_string() };
        let frame = packet.into_frame();
        assert_eq!(
            &frame.payload[..],
            b"\x00\x00\x00\x02\x00\x00\x00\x01\x00\x00\x00\x07\x02ht"
        );
    }

    #[test]
    fn client_only_packets_parse_as_unknown() {
        let frame = Packet::EnterTtyMode { ttys: vec![1], driver: String::new() }.into_frame();
        assert!(matches!(
            Packet::from_frame(&frame).unwrap(),
            Packet::Unknown { packet_type, .. } if packet_type == u32::from(b't')
        ));
    }

    #[test]
    fn unknown_type_round_trip() {
        let packet =
            Packet::Unknown { packet_type: u32::from(b'Z'), payload: Bytes::from_static(b"") };
        assert_eq!(round_trip(packet.clone()), packet);
    }
}
