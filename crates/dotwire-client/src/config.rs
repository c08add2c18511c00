//! Client configuration.

use std::{path::PathBuf, time::Duration};

use dotwire_proto::{DEFAULT_HOST, DEFAULT_PORT};

use crate::error::ClientError;

/// Default deadline for a single request/response round trip.
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(30);

/// Default deadline for establishing the TCP connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Path the shared secret is read from when the server asks for key
/// authentication.
pub const DEFAULT_KEY_FILE: &str = "/etc/brlapi.key";

/// Where the shared authentication secret comes from.
///
/// BRLTTY only consults it when the server offers key authentication; a
/// server offering `AUTH_NONE` never triggers a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthSource {
    /// Read the secret from a file at connect time.
    KeyFile(PathBuf),
    /// Use these bytes verbatim.
    Key(Vec<u8>),
}

impl AuthSource {
    /// Produce the secret bytes.
    pub(crate) fn load(&self) -> Result<Vec<u8>, ClientError> {
        let key = match self {
            Self::Key(key) => key.clone(),
            Self::KeyFile(path) => std::fs::read(path).map_err(|e| {
                ClientError::Authentication(format!(
                    "cannot read key file {}: {e}",
                    path.display()
                ))
            })?,
        };

        if key.is_empty() {
            return Err(ClientError::Authentication("authentication key is empty".to_string()));
        }
        Ok(key)
    }
}

impl Default for AuthSource {
    fn default() -> Self {
        Self::KeyFile(PathBuf::from(DEFAULT_KEY_FILE))
    }
}

/// Connection parameters for a [`Client`](crate::Client).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Host the BRLTTY daemon runs on.
    pub host: String,
    /// TCP port of the daemon.
    pub port: u16,
    /// Source of the shared secret for key authentication.
    pub auth: AuthSource,
    /// Deadline for the TCP connect.
    pub connect_timeout: Duration,
    /// Deadline for each request/response round trip, including the
    /// handshake and blocking key reads.
    pub reply_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            auth: AuthSource::default(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Configuration for a daemon on the given host, default port.
    pub fn for_host(host: impl Into<String>) -> Self {
        Self { host: host.into(), ..Self::default() }
    }
}
