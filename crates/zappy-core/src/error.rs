//! Error types for building a game.
//!
//! Once a [`Game`](crate::game::Game) is running nothing in it is fatal:
//! protocol and world failures become `ko`, `suc` or `sbp` replies. Only
//! construction can fail.

/// Errors raised while building a [`Game`](crate::game::Game).
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Configuration failed validation.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// The clock rejected the frequency.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: crate::clock::ClockError,
    },

    /// The world could not be built or seeded.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: zappy_world::WorldError,
    },
}
