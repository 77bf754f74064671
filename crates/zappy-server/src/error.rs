//! Error types for the server binary.
//!
//! [`ServerError`] covers every failure that can stop the server before or
//! while the reactor runs. Per-connection failures never reach it; they
//! only tear the affected session down.

use std::net::SocketAddr;

use zappy_core::GameError;
use zappy_core::config::ConfigError;

/// Top-level error for the server binary.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The listening socket could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address we tried to bind.
        addr: SocketAddr,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The game could not be created.
    #[error("game error: {source}")]
    Game {
        /// The underlying game error.
        #[from]
        source: GameError,
    },

    /// Listener I/O failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
