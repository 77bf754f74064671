//! Error types for the `zappy-types` crate.

use crate::enums::Resource;

/// Errors produced while parsing or mutating shared types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypesError {
    /// The token does not name a known resource.
    #[error("unknown resource: {0}")]
    UnknownResource(String),

    /// The numeric orientation code is outside `1..=4`.
    #[error("invalid orientation code: {0}")]
    InvalidOrientation(u8),

    /// A removal asked for more units than the counter holds.
    #[error("insufficient {resource}: requested {requested}, available {available}")]
    InsufficientResource {
        /// The depleted resource.
        resource: Resource,
        /// Units requested.
        requested: u32,
        /// Units actually held.
        available: u32,
    },

    /// Arithmetic overflow while adding to a counter.
    #[error("resource counter overflow for {0}")]
    Overflow(Resource),
}
