//! Configuration, protocol grammars, and the single-mutator game loop for
//! the Zappy server.
//!
//! Nothing in this crate touches a socket. The server crate feeds it lines
//! and wall-clock instants; replies leave through each session's
//! [`Outbox`].
//!
//! # Modules
//!
//! - [`clock`] -- Frequency-derived time unit and the [`Cadence`] that turns
//!   wall time into whole units.
//! - [`codec`] -- Newline framing over a growable byte buffer.
//! - [`command`] -- Agent and observer command grammars.
//! - [`config`] -- Configuration loading from `zappy.yaml` into
//!   strongly-typed structs.
//! - [`error`] -- Top-level game errors.
//! - [`game`] -- [`Game`]: owner of the world, sessions, and observers.
//! - [`notify`] -- Observer events and the [`NotificationBus`].
//! - [`scheduler`] -- Per-session queue of timed actions.
//! - [`session`] -- Sessions, roles, and outbound channels.
//! - [`tick`] -- Food, refills, victory, and action execution per tick.
//!
//! [`Cadence`]: clock::Cadence
//! [`NotificationBus`]: notify::NotificationBus

pub mod clock;
pub mod codec;
pub mod command;
pub mod config;
mod dispatch;
pub mod error;
mod execute;
pub mod game;
pub mod notify;
pub mod scheduler;
pub mod session;
pub mod tick;

pub use codec::{CodecError, LineBuffer};
pub use config::ServerConfig;
pub use error::GameError;
pub use game::{GREETING, Game, TickStatus};
pub use session::{Outbound, Outbox};
