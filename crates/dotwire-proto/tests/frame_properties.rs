//! Property-based tests for frame and packet encoding/decoding.
//!
//! These verify the codec for ALL valid inputs rather than specific
//! examples: round-trip identity, streaming-safety of the deframer under
//! arbitrary read boundaries, and oversized-frame rejection.

use bytes::{BufMut, Bytes, BytesMut};
use dotwire_proto::{ErrorCode, Frame, Packet, PacketType, ProtocolError};
use proptest::{prelude::*, strategy::Union};

/// Strategy for generating arbitrary known packet types.
fn arbitrary_packet_type() -> impl Strategy<Value = PacketType> {
    prop::sample::select(vec![
        PacketType::Version,
        PacketType::Auth,
        PacketType::GetDriverName,
        PacketType::GetModelId,
        PacketType::GetDisplaySize,
        PacketType::EnterTtyMode,
        PacketType::LeaveTtyMode,
        PacketType::Key,
        PacketType::Write,
        PacketType::Ack,
        PacketType::Error,
        PacketType::Exception,
        PacketType::Synchronize,
    ])
}

/// Strategy for generating arbitrary frames within the size limit.
fn arbitrary_frame() -> impl Strategy<Value = Frame> {
    (
        arbitrary_packet_type(),
        prop::collection::vec(any::<u8>(), 0..512), // payload well under the limit
    )
        .prop_map(|(packet_type, payload)| Frame::new(packet_type, Bytes::from(payload)))
}

/// Strategy for packets whose parser is total (server-to-client forms).
fn arbitrary_decodable_packet() -> impl Strategy<Value = Packet> {
    let variants: Vec<BoxedStrategy<Packet>> = vec![
        any::<u32>().prop_map(|protocol| Packet::Version { protocol }).boxed(),
        any::<u32>().prop_map(|method| Packet::ServerAuth { method }).boxed(),
        Just(Packet::Ack).boxed(),
        Just(Packet::LeaveTtyMode).boxed(),
        (any::<u32>(), "[a-z ]{1,40}")
            .prop_map(|(code, message)| Packet::Error { code: ErrorCode(code), message })
            .boxed(),
        (any::<u32>(), any::<u32>(), prop::collection::vec(any::<u8>(), 0..32))
            .prop_map(|(code, cause, content)| Packet::Exception {
                code: ErrorCode(code),
                cause,
                content: Bytes::from(content),
            })
            .boxed(),
        "[a-zA-Z0-9]{1,16}".prop_map(|name| Packet::DriverName { name }).boxed(),
        "[a-zA-Z0-9]{1,16}".prop_map(|model| Packet::ModelId { model }).boxed(),
        Just(Packet::GetDisplaySize).boxed(),
        (1u32..=200, 1u32..=8)
            .prop_map(|(columns, rows)| Packet::DisplaySize { columns, rows })
            .boxed(),
        any::<u64>().prop_map(|code| Packet::Key { code }).boxed(),
    ];
    Union::new(variants)
}

#[test]
fn prop_frame_round_trip() {
    proptest!(|(frame in arbitrary_frame())| {
        let mut wire = Vec::new();
        frame.encode(&mut wire).expect("within size limit");

        let decoded = Frame::decode(&wire).expect("should decode");
        prop_assert_eq!(decoded, frame);
    });
}

#[test]
fn prop_packet_round_trip() {
    proptest!(|(packet in arbitrary_decodable_packet())| {
        let frame = packet.clone().into_frame();
        let parsed = Packet::from_frame(&frame).expect("should parse");
        prop_assert_eq!(parsed, packet);
    });
}

#[test]
fn prop_deframer_is_streaming_safe() {
    // Concatenate a handful of frames, feed the byte stream in arbitrary
    // chunks, and require the exact frame sequence back out.
    proptest!(|(
        frames in prop::collection::vec(arbitrary_frame(), 1..6),
        chunk_sizes in prop::collection::vec(1usize..64, 1..64),
    )| {
        let mut stream = Vec::new();
        for frame in &frames {
            frame.encode(&mut stream).expect("within size limit");
        }

        let mut buffer = BytesMut::new();
        let mut decoded = Vec::new();
        let mut offset = 0;
        let mut chunks = chunk_sizes.iter().cycle();

        while offset < stream.len() {
            let take = (*chunks.next().expect("cycled")).min(stream.len() - offset);
            buffer.extend_from_slice(&stream[offset..offset + take]);
            offset += take;

            while let Some(frame) = Frame::take_from(&mut buffer).expect("valid stream") {
                decoded.push(frame);
            }
        }

        prop_assert_eq!(decoded, frames);
        prop_assert!(buffer.is_empty());
    });
}

#[test]
fn prop_oversized_declared_size_is_rejected() {
    proptest!(|(size in (Frame::MAX_SIZE as u32 - 7)..=u32::MAX, type_code in any::<u32>())| {
        let mut buffer = BytesMut::new();
        buffer.put_u32(size);
        buffer.put_u32(type_code);

        // Rejection happens on the header alone, before any payload bytes.
        let result = Frame::take_from(&mut buffer);
        let is_too_large = matches!(result, Err(ProtocolError::FrameTooLarge { .. }));
        prop_assert!(is_too_large);
    });
}
