//! End-to-end scenarios against an in-process mock BRLTTY.
//!
//! A scripted TCP server plays the daemon side of each conversation and
//! asserts on the exact bytes the client puts on the wire.

use std::{sync::Arc, time::Duration};

use bytes::{Bytes, BytesMut};
use dotwire_client::{
    AuthSource, Callbacks, Client, ClientConfig, ClientError, Cursor, Mode,
};
use dotwire_proto::{
    AuthMethod, ErrorCode, Frame, Packet, PacketType, ProtocolError,
    keycodes::KeyType,
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    time::timeout,
};

const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Bind an ephemeral listener and a config pointing at it.
async fn bind_mock_server() -> (TcpListener, ClientConfig) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let config = ClientConfig {
        host: "127.0.0.1".to_string(),
        port,
        auth: AuthSource::Key(b"nonsense\n".to_vec()),
        reply_timeout: TEST_TIMEOUT,
        ..ClientConfig::default()
    };
    (listener, config)
}

/// Read one frame from the client, blocking until it is complete.
async fn recv_frame(stream: &mut TcpStream, buffer: &mut BytesMut) -> Frame {
    loop {
        if let Some(frame) = Frame::take_from(buffer).unwrap() {
            return frame;
        }
        let read = stream.read_buf(buffer).await.unwrap();
        assert!(read > 0, "client closed the connection mid-script");
    }
}

async fn send_packet(stream: &mut TcpStream, packet: Packet) {
    let frame = packet.into_frame();
    let mut wire = Vec::new();
    frame.encode(&mut wire).unwrap();
    stream.write_all(&wire).await.unwrap();
}

/// Play the daemon side of the handshake, offering open authentication.
async fn serve_open_handshake(stream: &mut TcpStream, buffer: &mut BytesMut) {
    send_packet(stream, Packet::Version { protocol: 8 }).await;
    let reply = recv_frame(stream, buffer).await;
    assert_eq!(Packet::from_frame(&reply).unwrap(), Packet::Version { protocol: 8 });
    send_packet(stream, Packet::ServerAuth { method: AuthMethod::None.to_u32() }).await;
}

/// Handshake plus a granted `enter_tty_mode(&[1], None)`.
async fn serve_up_to_tty_mode(
    listener: &TcpListener,
) -> (TcpStream, BytesMut) {
    let (mut stream, _) = listener.accept().await.unwrap();
    let mut buffer = BytesMut::new();
    serve_open_handshake(&mut stream, &mut buffer).await;

    let request = recv_frame(&mut stream, &mut buffer).await;
    assert_eq!(request.packet_type_enum(), Some(PacketType::EnterTtyMode));
    send_packet(&mut stream, Packet::Ack).await;

    (stream, buffer)
}

#[tokio::test]
async fn connect_with_open_authentication() {
    let (listener, config) = bind_mock_server().await;

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buffer = BytesMut::new();
        serve_open_handshake(&mut stream, &mut buffer).await;
        // Some daemons follow up with a stray ACK; it must be harmless.
        send_packet(&mut stream, Packet::Ack).await;
        stream
    });

    let client = timeout(TEST_TIMEOUT, Client::connect(config)).await.unwrap().unwrap();
    assert_eq!(client.mode(), Mode::Normal);

    server.await.unwrap();
}

#[tokio::test]
async fn connect_with_key_authentication() {
    let (listener, config) = bind_mock_server().await;

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buffer = BytesMut::new();

        send_packet(&mut stream, Packet::Version { protocol: 8 }).await;
        let reply = recv_frame(&mut stream, &mut buffer).await;
        assert_eq!(Packet::from_frame(&reply).unwrap(), Packet::Version { protocol: 8 });

        send_packet(&mut stream, Packet::ServerAuth { method: AuthMethod::Key.to_u32() }).await;

        // The configured secret must arrive verbatim behind the method word.
        let auth = recv_frame(&mut stream, &mut buffer).await;
        assert_eq!(auth.packet_type_enum(), Some(PacketType::Auth));
        assert_eq!(&auth.payload[..4], AuthMethod::Key.to_u32().to_be_bytes());
        assert_eq!(&auth.payload[4..], b"nonsense\n");

        send_packet(&mut stream, Packet::Ack).await;
        stream
    });

    let client = timeout(TEST_TIMEOUT, Client::connect(config)).await.unwrap().unwrap();
    assert_eq!(client.mode(), Mode::Normal);

    server.await.unwrap();
}

#[tokio::test]
async fn connect_rejects_older_protocol() {
    let (listener, config) = bind_mock_server().await;

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        send_packet(&mut stream, Packet::Version { protocol: 7 }).await;
        // Hold the socket open; the client must abort on its own.
        let mut sink = Vec::new();
        let _ = stream.read_to_end(&mut sink).await;
    });

    let result = timeout(TEST_TIMEOUT, Client::connect(config)).await.unwrap();
    assert!(matches!(result, Err(ClientError::Handshake(_))));
}

#[tokio::test]
async fn display_size_query_round_trip() {
    let (listener, config) = bind_mock_server().await;

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buffer = BytesMut::new();
        serve_open_handshake(&mut stream, &mut buffer).await;

        let request = recv_frame(&mut stream, &mut buffer).await;
        assert_eq!(request.packet_type_enum(), Some(PacketType::GetDisplaySize));
        assert!(request.payload.is_empty());
        send_packet(&mut stream, Packet::DisplaySize { columns: 40, rows: 1 }).await;
        stream
    });

    let client = Client::connect(config).await.unwrap();
    let size = timeout(TEST_TIMEOUT, client.get_display_size()).await.unwrap().unwrap();
    assert_eq!(size, (40, 1));

    server.await.unwrap();
}

#[tokio::test]
async fn write_dots_produces_the_exact_wire_image() {
    let (listener, config) = bind_mock_server().await;

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buffer = BytesMut::new();
        serve_open_handshake(&mut stream, &mut buffer).await;

        let request = recv_frame(&mut stream, &mut buffer).await;
        assert_eq!(request.packet_type_enum(), Some(PacketType::GetDisplaySize));
        send_packet(&mut stream, Packet::DisplaySize { columns: 40, rows: 1 }).await;

        let request = recv_frame(&mut stream, &mut buffer).await;
        assert_eq!(request.packet_type_enum(), Some(PacketType::EnterTtyMode));
        assert_eq!(
            &request.payload[..],
            b"\x00\x00\x00\x01\x00\x00\x00\x01\x00"
        );
        send_packet(&mut stream, Packet::Ack).await;

        let write = recv_frame(&mut stream, &mut buffer).await;
        assert_eq!(write.packet_type_enum(), Some(PacketType::Write));

        // flags REGION|TEXT|ATTR_OR|CURSOR, region 1..=40, 40 spaces of
        // text, 40 bytes of or-mask, cursor off
        let mut expected = Vec::new();
        expected.extend_from_slice(&0x36u32.to_be_bytes());
        expected.extend_from_slice(&1u32.to_be_bytes());
        expected.extend_from_slice(&40u32.to_be_bytes());
        expected.extend_from_slice(&40u32.to_be_bytes());
        expected.extend_from_slice(&[b' '; 40]);
        expected.extend_from_slice(&[0xFF; 40]);
        expected.extend_from_slice(&0u32.to_be_bytes());
        assert_eq!(&write.payload[..], expected);
        stream
    });

    let client = Client::connect(config).await.unwrap();
    client.get_display_size().await.unwrap();
    client.enter_tty_mode(&[1], None).await.unwrap();
    assert_eq!(client.mode(), Mode::Tty { tty: 1 });
    client.write_dots(&[0xFF; 40]).await.unwrap();

    timeout(TEST_TIMEOUT, server).await.unwrap().unwrap();
}

#[tokio::test]
async fn key_events_queue_for_read_key() {
    let (listener, config) = bind_mock_server().await;

    let server = tokio::spawn(async move {
        let (mut stream, _) = serve_up_to_tty_mode(&listener).await;
        send_packet(&mut stream, Packet::Key { code: 0x0000_0000_2001_0008 }).await;
        stream
    });

    let client = Client::connect(config).await.unwrap();
    client.enter_tty_mode(&[1], None).await.unwrap();

    let key = timeout(TEST_TIMEOUT, client.read_key()).await.unwrap().unwrap();
    let description = key.describe();
    assert_eq!(description.key_type, KeyType::Command);
    assert_eq!(description.command, "ROUTE");
    assert_eq!(description.argument, 8);
    assert!(description.flags.is_empty());

    server.await.unwrap();
}

#[tokio::test]
async fn key_events_reach_a_registered_callback_in_order() {
    let (listener, config) = bind_mock_server().await;
    let (key_tx, mut key_rx) = tokio::sync::mpsc::unbounded_channel();

    let server = tokio::spawn(async move {
        let (mut stream, _) = serve_up_to_tty_mode(&listener).await;
        for cell in 0..3u64 {
            send_packet(&mut stream, Packet::Key { code: 0x2001_0000 | cell }).await;
        }
        stream
    });

    let callbacks = Callbacks {
        on_key: Some(Box::new(move |event| {
            let _ = key_tx.send(event);
        })),
        on_error: None,
    };
    let client = Client::connect_with(config, callbacks).await.unwrap();
    client.enter_tty_mode(&[1], None).await.unwrap();

    for cell in 0..3u64 {
        let event = timeout(TEST_TIMEOUT, key_rx.recv()).await.unwrap().unwrap();
        assert_eq!(event.code, 0x2001_0000 | cell);
    }

    // With a callback registered, nothing may pile up in the queue.
    assert_eq!(client.try_read_key().unwrap(), None);

    server.await.unwrap();
}

#[tokio::test]
async fn oversized_frame_terminates_the_connection() {
    let (listener, config) = bind_mock_server().await;
    let (error_tx, mut error_rx) = tokio::sync::mpsc::unbounded_channel();

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buffer = BytesMut::new();
        serve_open_handshake(&mut stream, &mut buffer).await;

        // Header declaring a 5000-byte payload: not BrlAPI.
        let mut wire = Vec::new();
        wire.extend_from_slice(&5000u32.to_be_bytes());
        wire.extend_from_slice(&u32::from(b'w').to_be_bytes());
        stream.write_all(&wire).await.unwrap();
        stream
    });

    let callbacks = Callbacks {
        on_key: None,
        on_error: Some(Box::new(move |error| {
            let _ = error_tx.send(error.clone());
        })),
    };
    let client = Client::connect_with(config, callbacks).await.unwrap();

    let reported = timeout(TEST_TIMEOUT, error_rx.recv()).await.unwrap().unwrap();
    assert!(matches!(
        reported,
        ClientError::Protocol(ProtocolError::FrameTooLarge { size: 5008, .. })
    ));

    // The connection is gone; subsequent calls fail fast.
    assert_eq!(client.mode(), Mode::Closed);
    let result = client.get_display_size().await;
    assert!(matches!(
        result,
        Err(ClientError::InvalidMode { mode: Mode::Closed, .. })
    ));

    server.await.unwrap();
}

#[tokio::test]
async fn writes_outside_tty_mode_never_touch_the_socket() {
    let (listener, config) = bind_mock_server().await;

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buffer = BytesMut::new();
        serve_open_handshake(&mut stream, &mut buffer).await;

        // The very next frame must be the driver-name query; anything a
        // rejected write had sent would arrive first.
        let request = recv_frame(&mut stream, &mut buffer).await;
        assert_eq!(request.packet_type_enum(), Some(PacketType::GetDriverName));
        send_packet(&mut stream, Packet::DriverName { name: "ht".to_string() }).await;
        stream
    });

    let client = Client::connect(config).await.unwrap();

    for (operation, result) in [
        ("write_text", client.write_text("hi", Cursor::Off).await),
        ("write_dots", client.write_dots(&[0xFF; 40]).await),
        ("write_region", client.write_region(b"hi", 1, Cursor::Off).await),
        ("set_cursor", client.set_cursor(Cursor::At(1)).await),
        ("read_key", client.read_key().await.map(|_| ())),
        ("try_read_key", client.try_read_key().map(|_| ())),
    ] {
        assert_eq!(
            result,
            Err(ClientError::InvalidMode { mode: Mode::Normal, operation })
        );
    }

    assert_eq!(client.get_driver_name().await.unwrap(), "ht");

    server.await.unwrap();
}

#[tokio::test]
async fn unknown_packet_type_is_reported_but_not_fatal() {
    let (listener, config) = bind_mock_server().await;
    let (error_tx, mut error_rx) = tokio::sync::mpsc::unbounded_channel();

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buffer = BytesMut::new();
        serve_open_handshake(&mut stream, &mut buffer).await;

        // A type code without a handler; the client must drop it and
        // keep the connection alive.
        send_packet(
            &mut stream,
            Packet::Unknown { packet_type: u32::from(b'Z'), payload: Bytes::new() },
        )
        .await;

        let request = recv_frame(&mut stream, &mut buffer).await;
        assert_eq!(request.packet_type_enum(), Some(PacketType::GetDisplaySize));
        send_packet(&mut stream, Packet::DisplaySize { columns: 40, rows: 1 }).await;
        stream
    });

    let callbacks = Callbacks {
        on_key: None,
        on_error: Some(Box::new(move |error| {
            let _ = error_tx.send(error.clone());
        })),
    };
    let client = Client::connect_with(config, callbacks).await.unwrap();

    let reported = timeout(TEST_TIMEOUT, error_rx.recv()).await.unwrap().unwrap();
    assert_eq!(reported, ClientError::UnexpectedPacket { packet_type: u32::from(b'Z') });

    // The fault is not re-surfaced to callers; the next query succeeds.
    let size = timeout(TEST_TIMEOUT, client.get_display_size()).await.unwrap().unwrap();
    assert_eq!(size, (40, 1));
    assert_eq!(client.mode(), Mode::Normal);

    server.await.unwrap();
}

#[tokio::test]
async fn concurrent_queries_are_serialized() {
    let (listener, config) = bind_mock_server().await;

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buffer = BytesMut::new();
        serve_open_handshake(&mut stream, &mut buffer).await;

        // Exactly one request at a time; answer both in turn.
        for _ in 0..2 {
            let request = recv_frame(&mut stream, &mut buffer).await;
            assert_eq!(request.packet_type_enum(), Some(PacketType::GetDisplaySize));
            send_packet(&mut stream, Packet::DisplaySize { columns: 40, rows: 1 }).await;
        }
        stream
    });

    let client = Arc::new(Client::connect(config).await.unwrap());

    let first = {
        let client = Arc::clone(&client);
        tokio::spawn(async move { client.get_display_size().await })
    };
    let second = {
        let client = Arc::clone(&client);
        tokio::spawn(async move { client.get_display_size().await })
    };

    assert_eq!(first.await.unwrap().unwrap(), (40, 1));
    assert_eq!(second.await.unwrap().unwrap(), (40, 1));

    server.await.unwrap();
}

#[tokio::test]
async fn server_error_fails_the_pending_request() {
    let (listener, config) = bind_mock_server().await;

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buffer = BytesMut::new();
        serve_open_handshake(&mut stream, &mut buffer).await;

        let request = recv_frame(&mut stream, &mut buffer).await;
        assert_eq!(request.packet_type_enum(), Some(PacketType::GetDisplaySize));
        send_packet(
            &mut stream,
            Packet::Error { code: ErrorCode::TTYBUSY, message: String::new() },
        )
        .await;
        stream
    });

    let client = Client::connect(config).await.unwrap();
    let result = timeout(TEST_TIMEOUT, client.get_display_size()).await.unwrap();
    assert!(matches!(
        result,
        Err(ClientError::Server { code: ErrorCode::TTYBUSY, .. })
    ));

    server.await.unwrap();
}

#[tokio::test]
async fn close_wakes_a_blocked_key_reader() {
    let (listener, config) = bind_mock_server().await;

    let server = tokio::spawn(async move {
        let (stream, buffer) = serve_up_to_tty_mode(&listener).await;
        // Keep the connection open but send nothing further.
        (stream, buffer)
    });

    let client = Arc::new(Client::connect(config).await.unwrap());
    client.enter_tty_mode(&[1], None).await.unwrap();

    let blocked = {
        let client = Arc::clone(&client);
        tokio::spawn(async move { client.read_key().await })
    };
    tokio::task::yield_now().await;

    client.close().await;

    let result = timeout(TEST_TIMEOUT, blocked).await.unwrap().unwrap();
    assert_eq!(result, Err(ClientError::ConnectionClosed));

    server.await.unwrap();
}
