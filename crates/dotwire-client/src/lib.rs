//! Async client for the BrlAPI protocol spoken by the BRLTTY daemon.
//!
//! A [`Client`] connects over TCP, negotiates protocol version 8 and
//! authentication, and then exposes the daemon's surface: display
//! identity queries, tty control, braille output, and asynchronous key
//! events.
//!
//! # Architecture
//!
//! Wire knowledge lives in [`dotwire_proto`]; this crate adds the
//! connection lifecycle around it. Each client owns its socket and one
//! background reader task - there is no shared poll loop, so independent
//! clients in one process cannot interfere with each other. Callers
//! synchronize with the reader through one-shot completion gates and a
//! timed request lock.
//!
//! # Example
//!
//! ```no_run
//! use dotwire_client::{Client, ClientConfig, Cursor};
//!
//! # async fn run() -> Result<(), dotwire_client::ClientError> {
//! let client = Client::connect(ClientConfig::default()).await?;
//! let (columns, rows) = client.get_display_size().await?;
//! println!("display is {columns}x{rows}");
//!
//! client.enter_tty_mode(&[1], None).await?;
//! client.write_text("hello", Cursor::Off).await?;
//! let key = client.read_key().await?;
//! println!("pressed: {:?}", key.describe());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod client;
mod config;
mod error;
mod event;
mod gate;
mod handshake;

pub use client::{Callbacks, Client, ErrorCallback, KeyCallback, Mode};
pub use config::{AuthSource, ClientConfig};
pub use dotwire_proto::{Cursor, ErrorCode, keycodes};
pub use error::ClientError;
pub use event::KeyEvent;
