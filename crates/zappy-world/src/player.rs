//! Players: the avatars controlled by agent sessions.

use zappy_types::{Inventory, Orientation, PlayerId, Position, Resource};

use crate::incantation::RitualPhase;

/// Level a player starts at.
pub const STARTING_LEVEL: u8 = 1;

/// Highest reachable level. No ritual starts from here.
pub const MAX_LEVEL: u8 = 8;

/// A live player in the world roster.
///
/// The world owns every player; tiles only list their ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Identity, equal to the owning session's id.
    pub id: PlayerId,
    /// Name of the player's team.
    pub team: String,
    /// Current tile.
    pub position: Position,
    /// Facing direction.
    pub orientation: Orientation,
    /// Level, `1..=8`.
    pub level: u8,
    /// Carried resources.
    pub inventory: Inventory,
    /// Cleared when the player starves.
    pub alive: bool,
    /// Ritual state. [`RitualPhase::Evaluating`] while an incantation this
    /// player started is pending, [`RitualPhase::Idle`] otherwise.
    pub ritual: RitualPhase,
}

impl Player {
    /// Create a level-1 player carrying `starting_food` food.
    pub fn new(
        id: PlayerId,
        team: impl Into<String>,
        position: Position,
        orientation: Orientation,
        starting_food: u32,
    ) -> Self {
        let mut counts = [0; 7];
        if let Some(food) = counts.get_mut(Resource::Food.index()) {
            *food = starting_food;
        }
        Self {
            id,
            team: team.into(),
            position,
            orientation,
            level: STARTING_LEVEL,
            inventory: Inventory::from_counts(counts),
            alive: true,
            ritual: RitualPhase::Idle,
        }
    }

    /// Whether an incantation started by this player is pending.
    pub fn is_elevating(&self) -> bool {
        self.ritual == RitualPhase::Evaluating
    }
}
