//! Error types for the `zappy-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`]. None of
//! them leaves the world half-mutated: an operation either completes or
//! returns an error with every counter and position untouched.

use zappy_types::{EggId, PlayerId, Position, Resource, TypesError};

use crate::egg::EggState;

/// Errors that can occur during world operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// Map dimensions must both be strictly positive.
    #[error("invalid map dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A position lies outside the map (it was not wrapped first).
    #[error("position {0} is outside the map")]
    OutOfBounds(Position),

    /// No live player with this id.
    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// A player with this id already exists.
    #[error("duplicate player id: {0}")]
    DuplicatePlayer(PlayerId),

    /// No egg with this id in the roster.
    #[error("egg not found: {0}")]
    EggNotFound(EggId),

    /// No team with this name.
    #[error("unknown team: {0}")]
    UnknownTeam(String),

    /// The team has no free slot left.
    #[error("team {team} is full (capacity {capacity})")]
    TeamFull {
        /// The full team.
        team: String,
        /// Its configured capacity.
        capacity: u32,
    },

    /// An egg state change that does not move forward.
    #[error("egg {egg} cannot go from {from:?} to {to:?}")]
    InvalidEggTransition {
        /// The egg.
        egg: EggId,
        /// Current state.
        from: EggState,
        /// Requested state.
        to: EggState,
    },

    /// The tile holds none of the requested resource.
    #[error("no {resource} on tile {position}")]
    TileDepleted {
        /// The requested resource.
        resource: Resource,
        /// The tile.
        position: Position,
    },

    /// The player holds none of the requested resource.
    #[error("player {player} has no {resource}")]
    InventoryDepleted {
        /// The player.
        player: PlayerId,
        /// The requested resource.
        resource: Resource,
    },

    /// The ritual's player or stone requirements are not met.
    #[error("ritual requirements not met for level {level} at {position}")]
    RitualRequirementsNotMet {
        /// Level of the initiator.
        level: u8,
        /// Tile of the ritual.
        position: Position,
    },

    /// The player is already at the maximum level.
    #[error("player {0} is already at the maximum level")]
    MaxLevel(PlayerId),

    /// A counter would overflow.
    #[error("arithmetic overflow in world calculation")]
    ArithmeticOverflow,

    /// Shared type error (counter overflow or underflow).
    #[error("type error: {source}")]
    Types {
        /// The underlying error.
        #[from]
        source: TypesError,
    },
}
