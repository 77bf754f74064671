//! Toroidal map, players, eggs, rituals, and resource spawning for the
//! Zappy server.
//!
//! This crate is pure game state with no I/O. Everything here runs on the
//! single mutator that owns the [`World`].
//!
//! # Modules
//!
//! - [`egg`] -- Egg lifecycle with forward-only state transitions.
//! - [`error`] -- Error types for world operations.
//! - [`incantation`] -- Ritual requirements table and the check-then-act
//!   resolution step.
//! - [`map`] -- Fixed-size toroidal grid of tiles.
//! - [`player`] -- Player avatars.
//! - [`sound`] -- Eight-sector direction of broadcasts and pushes.
//! - [`spawner`] -- Density-based resource top-up.
//! - [`team`] -- Team names and capacities.
//! - [`vision`] -- The lazy, restartable `Look` cone.
//! - [`world`] -- [`World`]: owner of the map and both rosters.

pub mod egg;
pub mod error;
pub mod incantation;
pub mod map;
pub mod player;
pub mod sound;
pub mod spawner;
pub mod team;
pub mod vision;
pub mod world;

// Re-export primary types at crate root.
pub use egg::{Egg, EggState};
pub use error::WorldError;
pub use incantation::{RitualOutcome, RitualPhase, RitualStart};
pub use map::{Map, Tile};
pub use player::{MAX_LEVEL, Player};
pub use team::Team;
pub use vision::VisionCone;
pub use world::{Ejection, Meal, SpawnSource, World};
