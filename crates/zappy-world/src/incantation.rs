//! The level-up ritual.
//!
//! A ritual goes `Idle -> Evaluating -> Succeeded | Failed`. The player
//! only ever holds `Idle` or `Evaluating`; resolution puts it straight
//! back to `Idle` and reports the terminal phase on [`RitualOutcome`].
//!
//! A ritual is accepted only if the requirements hold when the command
//! arrives, and the same requirements are sampled again when it resolves.
//! Resolution is a single step: either every required stone is debited from the tile
//! and the initiator gains a level, or nothing changes at all.

use tracing::debug;
use zappy_types::{Inventory, PlayerId, Position};

use crate::error::WorldError;
use crate::player::MAX_LEVEL;
use crate::world::World;

/// Where a ritual stands.
///
/// [`Player::ritual`](crate::Player::ritual) is `Idle` or `Evaluating`.
/// `Succeeded` and `Failed` only appear on a [`RitualOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RitualPhase {
    /// No ritual pending.
    #[default]
    Idle,
    /// Accepted, waiting for resolution.
    Evaluating,
    /// Resolved with a level-up.
    Succeeded,
    /// Resolved without effect.
    Failed,
}

/// What a ritual from one level needs on the initiator's tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    /// Players of the initiator's level on the tile, initiator included.
    pub players: u32,
    /// Stones on the tile. The food slot is always zero.
    pub stones: Inventory,
}

impl Requirement {
    const fn new(players: u32, stones: [u32; 6]) -> Self {
        let [l, d, s, m, p, t] = stones;
        Self {
            players,
            stones: Inventory::from_counts([0, l, d, s, m, p, t]),
        }
    }
}

/// Requirements for levels 1 through 7, indexed by `level - 1`.
pub const REQUIREMENTS: [Requirement; 7] = [
    Requirement::new(1, [1, 0, 0, 0, 0, 0]),
    Requirement::new(2, [1, 1, 1, 0, 0, 0]),
    Requirement::new(2, [2, 0, 1, 0, 2, 0]),
    Requirement::new(4, [1, 1, 2, 0, 1, 0]),
    Requirement::new(4, [1, 2, 1, 3, 0, 0]),
    Requirement::new(6, [1, 2, 3, 0, 1, 0]),
    Requirement::new(6, [2, 2, 2, 2, 2, 1]),
];

/// Requirement for a ritual starting at `level`, or `None` at level 8.
pub fn requirement(level: u8) -> Option<&'static Requirement> {
    REQUIREMENTS.get(usize::from(level.checked_sub(1)?))
}

/// A ritual that was just accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RitualStart {
    /// Player who issued `Incantation`.
    pub initiator: PlayerId,
    /// Ritual tile.
    pub position: Position,
    /// Initiator's level.
    pub level: u8,
    /// Same-level players on the tile, initiator included.
    pub participants: Vec<PlayerId>,
}

/// A resolved ritual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RitualOutcome {
    /// Player who issued `Incantation`.
    pub initiator: PlayerId,
    /// Ritual tile.
    pub position: Position,
    /// [`RitualPhase::Succeeded`] or [`RitualPhase::Failed`].
    pub phase: RitualPhase,
    /// Initiator's level after resolution.
    pub level: u8,
}

impl RitualOutcome {
    /// Whether the initiator levelled up.
    pub fn succeeded(&self) -> bool {
        self.phase == RitualPhase::Succeeded
    }
}

fn participants(world: &World, initiator: PlayerId) -> Result<(Position, u8, Vec<PlayerId>), WorldError> {
    let p = world.player(initiator)?;
    let (position, level) = (p.position, p.level);
    let mut same_level = Vec::new();
    for id in world.players_at(position)? {
        let other = world.player(*id)?;
        if other.alive && other.level == level {
            same_level.push(*id);
        }
    }
    Ok((position, level, same_level))
}

/// Whether the initiator's tile satisfies its level's requirement now.
///
/// # Errors
///
/// Returns [`WorldError::PlayerNotFound`] if no such player exists.
pub fn requirements_met(world: &World, initiator: PlayerId) -> Result<bool, WorldError> {
    let (position, level, same_level) = participants(world, initiator)?;
    let Some(req) = requirement(level) else {
        return Ok(false);
    };
    let count = u32::try_from(same_level.len()).unwrap_or(u32::MAX);
    let tile = world.map().tile(position)?;
    Ok(count >= req.players && tile.resources.covers(&req.stones))
}

/// Accept an `Incantation` and mark the initiator as elevating.
///
/// # Errors
///
/// Returns [`WorldError::MaxLevel`] at level 8, or
/// [`WorldError::RitualRequirementsNotMet`] if the tile does not qualify.
pub fn begin(world: &mut World, initiator: PlayerId) -> Result<RitualStart, WorldError> {
    let (position, level, same_level) = participants(world, initiator)?;
    if level >= MAX_LEVEL {
        return Err(WorldError::MaxLevel(initiator));
    }
    if !requirements_met(world, initiator)? {
        return Err(WorldError::RitualRequirementsNotMet { level, position });
    }
    world.player_mut(initiator)?.ritual = RitualPhase::Evaluating;
    debug!(player = %initiator, level, x = position.x, y = position.y, "ritual started");
    Ok(RitualStart {
        initiator,
        position,
        level,
        participants: same_level,
    })
}

/// Resolve a pending ritual against the world as it is now.
///
/// # Errors
///
/// Returns [`WorldError::PlayerNotFound`] if the initiator is gone.
pub fn resolve(world: &mut World, initiator: PlayerId) -> Result<RitualOutcome, WorldError> {
    let (position, level) = {
        let p = world.player(initiator)?;
        (p.position, p.level)
    };
    world.player_mut(initiator)?.ritual = RitualPhase::Idle;

    let met = level < MAX_LEVEL && requirements_met(world, initiator)?;
    let Some(req) = requirement(level).filter(|_| met) else {
        debug!(player = %initiator, level, "ritual failed");
        return Ok(RitualOutcome {
            initiator,
            position,
            phase: RitualPhase::Failed,
            level,
        });
    };

    let new_level = level.checked_add(1).ok_or(WorldError::ArithmeticOverflow)?;
    world.map_mut().tile_mut(position)?.resources.debit(&req.stones)?;
    world.player_mut(initiator)?.level = new_level;
    debug!(player = %initiator, level = new_level, "ritual succeeded");
    Ok(RitualOutcome {
        initiator,
        position,
        phase: RitualPhase::Succeeded,
        level: new_level,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use zappy_types::{Orientation, Resource};

    use super::*;
    use crate::world::tests::{place, world};

    #[test]
    fn table_covers_levels_one_to_seven() {
        assert_eq!(requirement(0), None);
        assert_eq!(requirement(1).unwrap().players, 1);
        assert_eq!(requirement(7).unwrap().stones.get(Resource::Thystame), 1);
        assert_eq!(requirement(8), None);
        for req in &REQUIREMENTS {
            assert_eq!(req.stones.get(Resource::Food), 0);
        }
    }

    #[test]
    fn level_one_without_linemate_is_refused() {
        let mut w = world(5, 5);
        let id = place(&mut w, 1, "red", 2, 2, Orientation::North);
        assert!(!requirements_met(&w, id).unwrap());
        assert!(matches!(
            begin(&mut w, id),
            Err(WorldError::RitualRequirementsNotMet { level: 1, .. })
        ));
        assert!(!w.player(id).unwrap().is_elevating());
    }

    #[test]
    fn failed_resolution_changes_nothing() {
        let mut w = world(5, 5);
        let id = place(&mut w, 1, "red", 2, 2, Orientation::North);
        let pos = Position::new(2, 2);
        w.map_mut().tile_mut(pos).unwrap().resources.add(Resource::Linemate, 1).unwrap();
        begin(&mut w, id).unwrap();

        // Someone walks off with the stone before resolution.
        w.map_mut().tile_mut(pos).unwrap().resources.remove(Resource::Linemate, 1).unwrap();
        w.map_mut().tile_mut(pos).unwrap().resources.add(Resource::Sibur, 4).unwrap();
        let before = w.map().tile(pos).unwrap().resources;

        let outcome = resolve(&mut w, id).unwrap();
        assert_eq!(outcome.phase, RitualPhase::Failed);
        assert_eq!(w.player(id).unwrap().ritual, RitualPhase::Idle);
        assert_eq!(outcome.level, 1);
        assert_eq!(w.player(id).unwrap().level, 1);
        assert_eq!(w.map().tile(pos).unwrap().resources, before);
        assert!(!w.player(id).unwrap().is_elevating());
    }

    #[test]
    fn success_debits_once_and_levels_initiator_only() {
        let mut w = world(5, 5);
        let a = place(&mut w, 1, "red", 1, 1, Orientation::North);
        let b = place(&mut w, 2, "red", 1, 1, Orientation::North);
        let pos = Position::new(1, 1);
        for id in [a, b] {
            w.player_mut(id).unwrap().level = 2;
        }
        {
            let tile = w.map_mut().tile_mut(pos).unwrap();
            tile.resources.add(Resource::Linemate, 2).unwrap();
            tile.resources.add(Resource::Deraumere, 1).unwrap();
            tile.resources.add(Resource::Sibur, 1).unwrap();
        }

        let start = begin(&mut w, a).unwrap();
        assert_eq!(start.participants, vec![a, b]);
        assert!(w.player(a).unwrap().is_elevating());

        let outcome = resolve(&mut w, a).unwrap();
        assert!(outcome.succeeded());
        assert_eq!(w.player(a).unwrap().ritual, RitualPhase::Idle);
        assert_eq!(w.player(a).unwrap().level, 3);
        assert_eq!(w.player(b).unwrap().level, 2);
        let left = w.map().tile(pos).unwrap().resources;
        assert_eq!(left.get(Resource::Linemate), 1);
        assert_eq!(left.get(Resource::Deraumere), 0);
        assert_eq!(left.get(Resource::Sibur), 0);
    }

    #[test]
    fn other_levels_do_not_count() {
        let mut w = world(5, 5);
        let a = place(&mut w, 1, "red", 0, 0, Orientation::North);
        let b = place(&mut w, 2, "red", 0, 0, Orientation::North);
        w.player_mut(a).unwrap().level = 2;
        w.player_mut(b).unwrap().level = 3;
        {
            let tile = w.map_mut().tile_mut(Position::new(0, 0)).unwrap();
            tile.resources.add(Resource::Linemate, 1).unwrap();
            tile.resources.add(Resource::Deraumere, 1).unwrap();
            tile.resources.add(Resource::Sibur, 1).unwrap();
        }
        assert!(!requirements_met(&w, a).unwrap());
    }

    #[test]
    fn max_level_cannot_start() {
        let mut w = world(5, 5);
        let id = place(&mut w, 1, "red", 0, 0, Orientation::North);
        w.player_mut(id).unwrap().level = MAX_LEVEL;
        assert_eq!(begin(&mut w, id).unwrap_err(), WorldError::MaxLevel(id));
    }
}
