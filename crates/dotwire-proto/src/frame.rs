//! Wire frame: the length-prefixed envelope around every packet.
//!
//! Layout on the wire:
//! `[payload size: u32 BE] [type code: u32 BE] [payload: size bytes]`
//!
//! The size field counts payload bytes only, not the 8-byte header. A whole
//! frame may never exceed [`Frame::MAX_SIZE`] bytes; a peer declaring more
//! is not speaking BrlAPI and the connection must be torn down.
//!
//! # Invariants
//!
//! - The declared size always matches `payload.len()`; [`Frame::new`] sets
//!   it implicitly and [`Frame::decode`] verifies it.
//! - [`Frame::take_from`] removes at most one frame per call and leaves
//!   trailing bytes in the buffer, so frames split or coalesced by TCP
//!   arrive intact regardless of read boundaries.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::{
    errors::{ProtocolError, Result},
    packet::PacketType,
};

/// A complete protocol frame: type code plus raw payload bytes.
///
/// The type code is kept as an opaque `u32`; conventionally it is an ASCII
/// letter (`'v'` for VERSION, `'k'` for KEY, ...) but unknown values must
/// survive a round-trip untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Raw type code.
    pub packet_type: u32,
    /// Payload bytes (may be empty).
    pub payload: Bytes,
}

impl Frame {
    /// Size of the frame header (size + type words).
    pub const HEADER_SIZE: usize = 8;

    /// Maximum total frame size, header included.
    pub const MAX_SIZE: usize = 4096;

    /// Create a frame for a known packet type.
    pub fn new(packet_type: PacketType, payload: impl Into<Bytes>) -> Self {
        Self { packet_type: packet_type.to_u32(), payload: payload.into() }
    }

    /// The type code as an enum. `None` for unrecognized codes.
    pub fn packet_type_enum(&self) -> Option<PacketType> {
        PacketType::from_u32(self.packet_type)
    }

    /// Total encoded size of this frame, header included.
    pub fn wire_size(&self) -> usize {
        Self::HEADER_SIZE + self.payload.len()
    }

    /// Encode the frame into a buffer.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::FrameTooLarge`] if the encoded frame would exceed
    ///   [`Frame::MAX_SIZE`].
    pub fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        if self.wire_size() > Self::MAX_SIZE {
            return Err(ProtocolError::FrameTooLarge {
                size: self.wire_size(),
                max: Self::MAX_SIZE,
            });
        }

        dst.put_u32(self.payload.len() as u32);
        dst.put_u32(self.packet_type);
        dst.put_slice(&self.payload);

        Ok(())
    }

    /// Decode one frame from a byte slice.
    ///
    /// Trailing bytes beyond the declared payload are ignored.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::FrameTruncated`] if the slice is shorter than the
    ///   header or the declared payload.
    /// - [`ProtocolError::FrameTooLarge`] if the declared size exceeds
    ///   [`Frame::MAX_SIZE`].
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::HEADER_SIZE {
            return Err(ProtocolError::FrameTruncated {
                expected: Self::HEADER_SIZE,
                actual: bytes.len(),
            });
        }

        let mut header = &bytes[..Self::HEADER_SIZE];
        let size = header.get_u32() as usize;
        let packet_type = header.get_u32();

        let total = Self::HEADER_SIZE + size;
        if total > Self::MAX_SIZE {
            return Err(ProtocolError::FrameTooLarge { size: total, max: Self::MAX_SIZE });
        }
        if bytes.len() < total {
            return Err(ProtocolError::FrameTruncated {
                expected: size,
                actual: bytes.len() - Self::HEADER_SIZE,
            });
        }

        Ok(Self {
            packet_type,
            payload: Bytes::copy_from_slice(&bytes[Self::HEADER_SIZE..total]),
        })
    }

    /// Split one complete frame off the front of a streaming read buffer.
    ///
    /// Returns `Ok(None)` when the buffer holds less than a whole frame;
    /// the caller should read more bytes and try again. Trailing bytes of
    /// the next frame stay in the buffer.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::FrameTooLarge`] as soon as the declared size
    ///   exceeds [`Frame::MAX_SIZE`], without waiting for the payload. The
    ///   connection cannot be resynchronized after this.
    pub fn take_from(buffer: &mut BytesMut) -> Result<Option<Self>> {
        if buffer.len() < Self::HEADER_SIZE {
            return Ok(None);
        }

        let size = u32::from_be_bytes([buffer[0], buffer[1], buffer[2], buffer[3]]) as usize;
        let total = Self::HEADER_SIZE + size;
        if total > Self::MAX_SIZE {
            return Err(ProtocolError::FrameTooLarge { size: total, max: Self::MAX_SIZE });
        }
        if buffer.len() < total {
            return Ok(None);
        }

        let mut frame = buffer.split_to(total);
        frame.advance(4);
        let packet_type = frame.get_u32();

        Ok(Some(Self { packet_type, payload: frame.freeze() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(frame: &Frame) -> Vec<u8> {
        let mut wire = Vec::new();
        frame.encode(&mut wire).unwrap();
        wire
    }

    #[test]
    fn round_trip() {
        let frame = Frame::new(PacketType::Key, vec![0, 0, 0, 0, 0x20, 0x01, 0, 8]);
        let parsed = Frame::decode(&encoded(&frame)).unwrap();
        assert_eq!(parsed, frame);
    }

    #[test]
    fn header_layout() {
        let frame = Frame::new(PacketType::Version, vec![0, 0, 0, 8]);
        assert_eq!(encoded(&frame), [0, 0, 0, 4, 0, 0, 0, b'v', 0, 0, 0, 8]);
    }

    #[test]
    fn unknown_type_survives() {
        let frame = Frame { packet_type: 0xDEAD_BEEF, payload: Bytes::from_static(b"x") };
        let parsed = Frame::decode(&encoded(&frame)).unwrap();
        assert_eq!(parsed.packet_type, 0xDEAD_BEEF);
        assert_eq!(parsed.packet_type_enum(), None);
    }

    #[test]
    fn reject_truncated() {
        let frame = Frame::new(PacketType::Error, vec![0; 16]);
        let wire = encoded(&frame);
        let result = Frame::decode(&wire[..12]);
        assert!(matches!(result, Err(ProtocolError::FrameTruncated { .. })));
    }

    #[test]
    fn reject_oversized_declared_size() {
        let mut wire = Vec::new();
        wire.put_u32(5000);
        wire.put_u32(u32::from(b'w'));
        let result = Frame::decode(&wire);
        assert!(matches!(result, Err(ProtocolError::FrameTooLarge { size: 5008, .. })));
    }

    #[test]
    fn encode_rejects_oversized_payload() {
        let frame = Frame::new(PacketType::Write, vec![0u8; Frame::MAX_SIZE]);
        let mut wire = Vec::new();
        assert!(matches!(frame.encode(&mut wire), Err(ProtocolError::FrameTooLarge { .. })));
    }

    #[test]
    fn take_from_needs_whole_header() {
        let mut buffer = BytesMut::from(&[0u8, 0, 0][..]);
        assert_eq!(Frame::take_from(&mut buffer).unwrap(), None);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn take_from_needs_whole_payload() {
        let frame = Frame::new(PacketType::Key, vec![1; 8]);
        let wire = encoded(&frame);

        let mut buffer = BytesMut::from(&wire[..10]);
        assert_eq!(Frame::take_from(&mut buffer).unwrap(), None);

        buffer.extend_from_slice(&wire[10..]);
        assert_eq!(Frame::take_from(&mut buffer).unwrap(), Some(frame));
        assert!(buffer.is_empty());
    }

    #[test]
    fn take_from_leaves_next_frame_buffered() {
        let first = Frame::new(PacketType::Ack, Bytes::new());
        let second = Frame::new(PacketType::Key, vec![0; 8]);

        let mut buffer = BytesMut::new();
        buffer.extend_from_slice(&encoded(&first));
        buffer.extend_from_slice(&encoded(&second));

        assert_eq!(Frame::take_from(&mut buffer).unwrap(), Some(first));
        assert_eq!(buffer.len(), second.wire_size());
        assert_eq!(Frame::take_from(&mut buffer).unwrap(), Some(second));
    }

    #[test]
    fn take_from_rejects_oversized_before_payload_arrives() {
        let mut buffer = BytesMut::new();
        buffer.put_u32(5000);
        buffer.put_u32(u32::from(b'w'));
        let result = Frame::take_from(&mut buffer);
        assert!(matches!(result, Err(ProtocolError::FrameTooLarge { .. })));
    }
}
