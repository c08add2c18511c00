//! Connected client: socket ownership, reader task, and dispatch.
//!
//! Every [`Client`] owns its TCP connection outright: one background task
//! reads frames and dispatches them, callers run on their own tasks and
//! park on completion gates. Three activity sources meet here - the
//! reader, synchronous request/response calls, and asynchronously
//! arriving key events - reconciled by the primitives in the gate module:
//!
//! - the request lock serializes multi-step request/response operations,
//! - the writer mutex keeps concurrent outbound frames from interleaving
//!   at byte level,
//! - the receive gate is completed by the reader on the matching reply,
//! - the key gate wakes blocked key readers as events are queued.
//!
//! Cached identity fields (driver, model, display size) are written only
//! by the reader and read by callers after their reply gate fires; the
//! mode field is written by callers under the request lock.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use bytes::BytesMut;
use dotwire_proto::{Cursor, Frame, Packet, WriteRequest};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
    task::JoinHandle,
    time,
};

use crate::{
    config::ClientConfig,
    error::ClientError,
    event::KeyEvent,
    gate::{Gate, RequestLock},
    handshake::{Handshake, HandshakeAction},
};

/// Connection mode gating the public operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Connected with no tty claimed; queries are allowed, writes are not.
    Normal,
    /// In control of a tty chain; all operations are allowed.
    Tty {
        /// Last tty of the claimed chain.
        tty: u32,
    },
    /// Connection torn down; every operation fails fast.
    Closed,
}

/// Callback receiving key events as they arrive.
pub type KeyCallback = Box<dyn Fn(KeyEvent) + Send + Sync>;

/// Callback observing faults detected by the reader task.
pub type ErrorCallback = Box<dyn Fn(&ClientError) + Send + Sync>;

/// Optional callbacks for asynchronous deliveries.
///
/// With `on_key` registered, key events are handed to it in arrival order
/// and never queued; without it they queue up for
/// [`Client::read_key`](Client::read_key).
#[derive(Default)]
pub struct Callbacks {
    /// Key event consumer.
    pub on_key: Option<KeyCallback>,
    /// Fault observer.
    pub on_error: Option<ErrorCallback>,
}

/// Mutable connection state, owned behind one short-lived lock.
#[derive(Debug)]
struct State {
    mode: Mode,
    driver: String,
    model: String,
    display_size: (u32, u32),
    keys: VecDeque<KeyEvent>,
}

/// Everything the reader task and the callers share.
struct Shared {
    config: ClientConfig,
    callbacks: Callbacks,
    /// Send-mutex; taken for the duration of each outbound frame.
    writer: tokio::sync::Mutex<Option<OwnedWriteHalf>>,
    /// Process gate serializing request/response operations.
    request: RequestLock,
    /// Completion point for the reply to the current request.
    receive: Gate,
    /// Wakes blocked key readers when an event is queued.
    key_wait: Gate,
    state: Mutex<State>,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn mode(&self) -> Mode {
        self.state().mode
    }

    fn report(&self, error: &ClientError) {
        if let Some(on_error) = &self.callbacks.on_error {
            on_error(error);
        }
    }

    /// Encode and send one packet under the send-mutex.
    async fn send(&self, packet: Packet) -> Result<(), ClientError> {
        let frame = packet.into_frame();
        let mut wire = Vec::with_capacity(frame.wire_size());
        frame.encode(&mut wire)?;

        let mut writer = self.writer.lock().await;
        let Some(writer) = writer.as_mut() else {
            return Err(ClientError::ConnectionClosed);
        };
        writer.write_all(&wire).await.map_err(|e| ClientError::Transport(e.to_string()))
    }

    /// Dispatch one inbound frame in normal operation.
    fn dispatch(&self, frame: &Frame) {
        let packet = match Packet::from_frame(frame) {
            Ok(packet) => packet,
            Err(error) => {
                // Best effort: drop the frame and keep reading in the hope
                // the stream re-syncs on the next one.
                tracing::warn!(
                    packet_type = frame.packet_type,
                    %error,
                    "dropping unparseable frame"
                );
                self.report(&ClientError::Protocol(error));
                return;
            }
        };

        match packet {
            Packet::DriverName { name } => {
                self.state().driver = name;
                self.receive.complete();
            }
            Packet::ModelId { model } => {
                self.state().model = model;
                self.receive.complete();
            }
            Packet::DisplaySize { columns, rows } => {
                self.state().display_size = (columns, rows);
                self.receive.complete();
            }
            Packet::GetDisplaySize => {
                // Empty reply from a displayless daemon; nothing to cache.
                self.receive.complete();
            }
            Packet::Ack => self.receive.complete(),
            Packet::Key { code } => {
                let event = KeyEvent { code };
                if let Some(on_key) = &self.callbacks.on_key {
                    on_key(event);
                } else {
                    self.state().keys.push_back(event);
                    self.key_wait.complete();
                }
            }
            Packet::Error { code, message } => {
                let error = ClientError::Server { code, message };
                tracing::debug!(%error, "daemon reported an error");
                self.report(&error);
                self.receive.fail(error.clone());
                self.key_wait.fail(error);
            }
            Packet::Exception { code, cause, .. } => {
                let error =
                    ClientError::Exception { code, cause, message: code.description().to_string() };
                tracing::debug!(%error, "daemon reported an exception");
                self.report(&error);
                self.receive.fail(error.clone());
                self.key_wait.fail(error);
            }
            other => {
                // Soft fault like a parse failure: reported, never failed
                // into a gate, and the connection continues.
                let error = ClientError::UnexpectedPacket { packet_type: other.packet_type() };
                tracing::warn!(%error, "dropping frame without a handler");
                self.report(&error);
            }
        }
    }

    /// Tear the connection down and wake every waiter.
    ///
    /// Idempotent; only the first call reaches the error callback.
    async fn shutdown(&self, error: ClientError, notify: bool) {
        {
            let mut state = self.state();
            if state.mode == Mode::Closed {
                return;
            }
            state.mode = Mode::Closed;
        }

        if notify {
            self.report(&error);
        }

        if let Some(mut writer) = self.writer.lock().await.take() {
            let _ = writer.shutdown().await;
        }

        self.receive.fail(error.clone());
        self.key_wait.fail(error);
    }
}

/// Read frames off the socket and dispatch them until the stream ends.
async fn read_loop(shared: Arc<Shared>, mut reader: OwnedReadHalf, mut buffer: BytesMut) {
    loop {
        loop {
            match Frame::take_from(&mut buffer) {
                Ok(Some(frame)) => shared.dispatch(&frame),
                Ok(None) => break,
                Err(error) => {
                    tracing::error!(%error, "framing violation, closing connection");
                    shared.shutdown(ClientError::Protocol(error), true).await;
                    return;
                }
            }
        }

        match reader.read_buf(&mut buffer).await {
            Ok(0) => {
                tracing::info!("daemon closed the connection");
                shared.shutdown(ClientError::ConnectionClosed, true).await;
                return;
            }
            Ok(_) => {}
            Err(e) => {
                shared.shutdown(ClientError::Transport(e.to_string()), true).await;
                return;
            }
        }
    }
}

/// A connected BrlAPI client.
///
/// Obtained from [`Client::connect`]; the connection is already
/// handshaken and in [`Mode::Normal`] when the future resolves. Dropping
/// the client aborts the reader task; [`Client::close`] additionally
/// wakes pending waiters and shuts the socket down.
pub struct Client {
    shared: Arc<Shared>,
    reader: JoinHandle<()>,
}

impl Client {
    /// Connect and authenticate against a BRLTTY daemon.
    pub async fn connect(config: ClientConfig) -> Result<Self, ClientError> {
        Self::connect_with(config, Callbacks::default()).await
    }

    /// Connect with key and error callbacks registered up front.
    pub async fn connect_with(
        config: ClientConfig,
        callbacks: Callbacks,
    ) -> Result<Self, ClientError> {
        let address = (config.host.clone(), config.port);
        let mut stream = time::timeout(config.connect_timeout, TcpStream::connect(address))
            .await
            .map_err(|_| ClientError::TimedOut {
                gate: "connect",
                timeout: config.connect_timeout,
            })?
            .map_err(|e| ClientError::Transport(format!("connect failed: {e}")))?;

        tracing::info!(host = %config.host, port = config.port, "connected, starting handshake");

        let mut buffer = BytesMut::with_capacity(Frame::MAX_SIZE);
        let mut handshake = Handshake::new(config.auth.clone());
        let deadline = time::Instant::now() + config.reply_timeout;

        'handshake: loop {
            while let Some(frame) = Frame::take_from(&mut buffer)? {
                let packet = Packet::from_frame(&frame)?;
                for action in handshake.handle(packet)? {
                    match action {
                        HandshakeAction::Send(reply) => {
                            let frame = reply.into_frame();
                            let mut wire = Vec::with_capacity(frame.wire_size());
                            frame.encode(&mut wire)?;
                            stream
                                .write_all(&wire)
                                .await
                                .map_err(|e| ClientError::Transport(e.to_string()))?;
                        }
                        HandshakeAction::Complete => break 'handshake,
                    }
                }
            }

            let read = time::timeout_at(deadline, stream.read_buf(&mut buffer))
                .await
                .map_err(|_| ClientError::TimedOut {
                    gate: "handshake",
                    timeout: config.reply_timeout,
                })?
                .map_err(|e| ClientError::Transport(e.to_string()))?;
            if read == 0 {
                return Err(ClientError::Transport(
                    "connection closed during handshake".to_string(),
                ));
            }
        }

        tracing::debug!("handshake complete");

        let (read_half, write_half) = stream.into_split();
        let shared = Arc::new(Shared {
            config,
            callbacks,
            writer: tokio::sync::Mutex::new(Some(write_half)),
            request: RequestLock::new("process"),
            receive: Gate::new("receive"),
            key_wait: Gate::new("key wait"),
            state: Mutex::new(State {
                mode: Mode::Normal,
                driver: String::new(),
                model: String::new(),
                display_size: (0, 0),
                keys: VecDeque::new(),
            }),
        });

        // Frames that arrived behind the handshake belong to the reader.
        let reader = tokio::spawn(read_loop(Arc::clone(&shared), read_half, buffer));

        Ok(Self { shared, reader })
    }

    /// Current connection mode.
    pub fn mode(&self) -> Mode {
        self.shared.mode()
    }

    fn require_open(&self, operation: &'static str) -> Result<(), ClientError> {
        match self.shared.mode() {
            Mode::Normal | Mode::Tty { .. } => Ok(()),
            mode @ Mode::Closed => Err(ClientError::InvalidMode { mode, operation }),
        }
    }

    fn require_tty(&self, operation: &'static str) -> Result<(), ClientError> {
        match self.shared.mode() {
            Mode::Tty { .. } => Ok(()),
            mode => Err(ClientError::InvalidMode { mode, operation }),
        }
    }

    /// One request/response round trip under the process gate.
    async fn round_trip(&self, packet: Packet) -> Result<(), ClientError> {
        let _guard = self.shared.request.acquire(self.shared.config.reply_timeout).await?;
        self.round_trip_locked(packet).await
    }

    /// The round trip itself; the caller holds the process gate.
    async fn round_trip_locked(&self, packet: Packet) -> Result<(), ClientError> {
        self.shared.receive.arm();
        if let Err(error) = self.shared.send(packet).await {
            self.shared.receive.disarm();
            if matches!(error, ClientError::Transport(_)) {
                self.shared.shutdown(error.clone(), false).await;
            }
            return Err(error);
        }
        self.shared.receive.wait(self.shared.config.reply_timeout).await
    }

    /// Send a packet that expects no reply.
    async fn send_one_way(&self, packet: Packet) -> Result<(), ClientError> {
        if let Err(error) = self.shared.send(packet).await {
            if matches!(error, ClientError::Transport(_)) {
                self.shared.shutdown(error.clone(), false).await;
            }
            return Err(error);
        }
        Ok(())
    }

    /// Name of the braille driver the daemon loaded.
    pub async fn get_driver_name(&self) -> Result<String, ClientError> {
        self.require_open("get_driver_name")?;
        self.round_trip(Packet::DriverName { name: String::new() }).await?;
        Ok(self.shared.state().driver.clone())
    }

    /// Model identifier of the attached display.
    pub async fn get_model_identifier(&self) -> Result<String, ClientError> {
        self.require_open("get_model_identifier")?;
        self.round_trip(Packet::ModelId { model: String::new() }).await?;
        Ok(self.shared.state().model.clone())
    }

    /// Display dimensions as `(columns, rows)`.
    pub async fn get_display_size(&self) -> Result<(u32, u32), ClientError> {
        self.require_open("get_display_size")?;
        self.round_trip(Packet::GetDisplaySize).await?;
        Ok(self.shared.state().display_size)
    }

    /// Take control of a tty chain.
    ///
    /// `ttys` is the path of terminal numbers leading to, and including,
    /// the terminal to control; an empty slice claims TTY 0. With
    /// `driver` set to a name obtained from
    /// [`get_driver_name`](Self::get_driver_name), key events use the
    /// driver-specific codes; `None` selects the universal command set.
    pub async fn enter_tty_mode(
        &self,
        ttys: &[u32],
        driver: Option<&str>,
    ) -> Result<(), ClientError> {
        let _guard = self.shared.request.acquire(self.shared.config.reply_timeout).await?;

        {
            let state = self.shared.state();
            if state.mode != Mode::Normal {
                return Err(ClientError::InvalidMode {
                    mode: state.mode,
                    operation: "enter_tty_mode",
                });
            }
        }

        let ttys = if ttys.is_empty() { vec![0] } else { ttys.to_vec() };
        let last = ttys.last().copied().unwrap_or(0);
        let driver = driver.unwrap_or_default().to_string();

        self.round_trip_locked(Packet::EnterTtyMode { ttys, driver }).await?;
        self.shared.state().mode = Mode::Tty { tty: last };
        Ok(())
    }

    /// Release the controlled tty.
    pub async fn leave_tty_mode(&self) -> Result<(), ClientError> {
        let _guard = self.shared.request.acquire(self.shared.config.reply_timeout).await?;

        {
            let state = self.shared.state();
            if !matches!(state.mode, Mode::Tty { .. }) {
                return Err(ClientError::InvalidMode {
                    mode: state.mode,
                    operation: "leave_tty_mode",
                });
            }
        }

        self.round_trip_locked(Packet::LeaveTtyMode).await?;
        self.shared.state().mode = Mode::Normal;
        Ok(())
    }

    /// Put text on the display, encoded as UTF-8.
    pub async fn write_text(&self, text: &str, cursor: Cursor) -> Result<(), ClientError> {
        self.require_tty("write_text")?;
        let request = WriteRequest::text(text.as_bytes().to_vec(), cursor, "UTF-8");
        self.send_one_way(request.into_packet()).await
    }

    /// Put raw dot patterns on the whole display, one byte per cell.
    ///
    /// Fetches the display size first if it is not cached yet. A display
    /// with zero cells (driver `NoBraille`) makes this a no-op.
    pub async fn write_dots(&self, cells: &[u8]) -> Result<(), ClientError> {
        self.require_tty("write_dots")?;

        let mut size = self.shared.state().display_size;
        if size == (0, 0) {
            size = self.get_display_size().await?;
        }
        let cell_count = (size.0 * size.1) as usize;
        if cell_count == 0 {
            return Ok(());
        }

        self.send_one_way(WriteRequest::dots(cells, cell_count).into_packet()).await
    }

    /// Put text on a contiguous region starting at cell `begin` (1-based).
    pub async fn write_region(
        &self,
        text: &[u8],
        begin: u32,
        cursor: Cursor,
    ) -> Result<(), ClientError> {
        self.require_tty("write_region")?;
        let request = WriteRequest::region(text.to_vec(), begin, cursor);
        self.send_one_way(request.into_packet()).await
    }

    /// Reposition the braille cursor. [`Cursor::Leave`] is a no-op.
    pub async fn set_cursor(&self, cursor: Cursor) -> Result<(), ClientError> {
        self.require_tty("set_cursor")?;
        let Some(cell) = cursor.wire_value() else {
            return Ok(());
        };
        self.send_one_way(WriteRequest::cursor(cell).into_packet()).await
    }

    /// Wait for the next key event.
    ///
    /// Pops the oldest queued event, blocking until one arrives. Not
    /// available while a key callback is registered (events bypass the
    /// queue then), and subject to the configured reply timeout.
    pub async fn read_key(&self) -> Result<KeyEvent, ClientError> {
        loop {
            self.require_tty("read_key")?;
            self.shared.key_wait.arm();
            if let Some(event) = self.shared.state().keys.pop_front() {
                return Ok(event);
            }
            self.shared.key_wait.wait(self.shared.config.reply_timeout).await?;
        }
    }

    /// Pop the oldest queued key event without blocking.
    pub fn try_read_key(&self) -> Result<Option<KeyEvent>, ClientError> {
        self.require_tty("try_read_key")?;
        Ok(self.shared.state().keys.pop_front())
    }

    /// Shut the connection down and wake every pending waiter.
    pub async fn close(&self) {
        self.shared.shutdown(ClientError::ConnectionClosed, false).await;
        self.reader.abort();
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.reader.abort();
    }
}
