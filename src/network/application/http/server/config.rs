//! Server configuration and sizing constants.

use serde::{Deserialize, Serialize};

use crate::network::error::Error;

/// Per-connection receive buffer size; bounds the request head.
pub const RX_BUFFER_SIZE: usize = 1460;

/// Per-connection send buffer size; bounds one streamed chunk and a dynamic
/// response body.
pub const TX_BUFFER_SIZE: usize = 1460;

/// Capacity of the scratch buffer the status line and headers are built in.
pub const HEADER_BUFFER_SIZE: usize = 256;

/// Default number of simultaneous clients.
pub const DEFAULT_MAX_CLIENTS: usize = 4;

/// Default bounded wait of one loop iteration, in milliseconds.
pub const DEFAULT_SELECT_TIMEOUT_MS: u32 = 50;

/// Runtime configuration of a [`Server`](super::Server).
///
/// Missing fields take their defaults when deserializing, so a device can ship
/// a partial JSON document:
///
/// ```rust
/// use emberhttp::network::application::http::Config;
///
/// let config = Config::from_json(r#"{ "max_clients": 2 }"#).unwrap();
/// assert_eq!(config.max_clients, 2);
/// assert_eq!(config.select_timeout_ms, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of client slots in use. Clamped to the server's compile-time
    /// slot count.
    pub max_clients: usize,
    /// Bounded wait passed to the selector on every iteration.
    pub select_timeout_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_clients: DEFAULT_MAX_CLIENTS,
            select_timeout_ms: DEFAULT_SELECT_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Parse a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json_core::from_str::<Config>(json)
            .map(|(config, _)| config)
            .map_err(|_| Error::InvalidConfig)
    }
}
