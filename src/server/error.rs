//! Error types for the web server.

use std::net::AddrParseError;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while binding or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid bind address '{addr}': {source}")]
    InvalidBindAddr {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    /// Every port in the fallback range was taken
    #[error("Could not find available port in range {start}-{end}")]
    NoAvailablePort { start: u16, end: u16 },

    #[error("try_bind() must be called before run()")]
    NotBound,

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
