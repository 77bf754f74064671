//! Shared type definitions for the Zappy server.
//!
//! This crate is the leaf of the workspace: every other crate depends on
//! it, and it depends on nothing but `serde` and `thiserror`.
//!
//! # Modules
//!
//! - [`enums`] -- [`Resource`] and [`Orientation`], the two closed
//!   vocabularies of the game.
//! - [`error`] -- Parse and arithmetic errors for the shared types.
//! - [`ids`] -- Integer newtype identifiers for sessions, players and eggs.
//! - [`inventory`] -- Seven-slot resource counters shared by tiles and
//!   players.
//! - [`position`] -- Grid coordinates.

pub mod enums;
pub mod error;
pub mod ids;
pub mod inventory;
pub mod position;

pub use enums::{Orientation, Resource};
pub use error::TypesError;
pub use ids::{EggId, PlayerId, SessionId};
pub use inventory::Inventory;
pub use position::Position;
