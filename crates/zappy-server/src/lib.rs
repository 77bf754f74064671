//! TCP front end of the Zappy server.
//!
//! # Modules
//!
//! - [`cli`] -- Command-line flags layered over the YAML configuration.
//! - [`connection`] -- Per-socket reader/writer task.
//! - [`error`] -- [`ServerError`], the binary's top-level error.
//! - [`reactor`] -- [`Reactor`]: accept loop, event funnel, and the
//!   single task that mutates the game.
//!
//! [`ServerError`]: error::ServerError
//! [`Reactor`]: reactor::Reactor

pub mod cli;
pub mod connection;
pub mod error;
pub mod reactor;
