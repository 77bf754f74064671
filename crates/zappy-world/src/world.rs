//! The world: one map, the player roster, the egg roster, and the teams.
//!
//! [`World`] is the only owner of players and eggs. Every mutation goes
//! through a method here so that the occupancy lists on tiles always match
//! player positions, and so that a failed operation changes nothing.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::debug;
use zappy_types::{EggId, Orientation, PlayerId, Position, Resource};

use crate::egg::{Egg, EggState};
use crate::error::WorldError;
use crate::map::Map;
use crate::player::Player;
use crate::team::Team;

/// Where a joining agent's player comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSource {
    /// A new player at a uniformly random tile.
    Fresh,
    /// Take over a claimable egg of the same team.
    FromEgg(EggId),
}

/// Result of an `Eject`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ejection {
    /// Direction the displaced players were pushed.
    pub direction: Orientation,
    /// Players pushed one tile, in tile order.
    pub moved: Vec<PlayerId>,
    /// Eggs on the tile that were destroyed.
    pub destroyed_eggs: Vec<EggId>,
}

/// Result of feeding a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meal {
    /// Every meal was eaten.
    Fed {
        /// Food left afterwards.
        remaining: u32,
    },
    /// Food ran out before the last meal. The player must die; its
    /// food is gone.
    Starved,
}

/// The complete game world.
#[derive(Debug, Clone)]
pub struct World {
    map: Map,
    players: BTreeMap<PlayerId, Player>,
    eggs: BTreeMap<EggId, Egg>,
    teams: Vec<Team>,
    next_egg: EggId,
    starting_food: u32,
}

impl World {
    /// Create an empty world.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] for a zero-sized map.
    pub fn new(width: u32, height: u32, teams: Vec<Team>, starting_food: u32) -> Result<Self, WorldError> {
        Ok(Self {
            map: Map::new(width, height)?,
            players: BTreeMap::new(),
            eggs: BTreeMap::new(),
            teams,
            next_egg: EggId(0),
            starting_food,
        })
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    /// The map.
    pub const fn map(&self) -> &Map {
        &self.map
    }

    /// The map, mutably. Used by the spawner and the ritual engine.
    pub const fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    /// Configured teams in boot order.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Team by name.
    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name == name)
    }

    /// A live player.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PlayerNotFound`] if no such player exists.
    pub fn player(&self, id: PlayerId) -> Result<&Player, WorldError> {
        self.players.get(&id).ok_or(WorldError::PlayerNotFound(id))
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, WorldError> {
        self.players.get_mut(&id).ok_or(WorldError::PlayerNotFound(id))
    }

    /// Every player in id order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Number of players in the roster.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Every egg in the roster, in id order.
    pub fn eggs(&self) -> impl Iterator<Item = &Egg> {
        self.eggs.values()
    }

    /// An egg in the roster.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EggNotFound`] if no such egg exists.
    pub fn egg(&self, id: EggId) -> Result<&Egg, WorldError> {
        self.eggs.get(&id).ok_or(WorldError::EggNotFound(id))
    }

    /// Players standing on `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `pos` is not wrapped.
    pub fn players_at(&self, pos: Position) -> Result<&[PlayerId], WorldError> {
        Ok(self.map.tile(pos)?.occupants())
    }

    // -----------------------------------------------------------------------
    // Teams and joining
    // -----------------------------------------------------------------------

    /// Live players of a team.
    pub fn live_players(&self, team: &str) -> u32 {
        let count = self.players.values().filter(|p| p.alive && p.team == team).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Claimable eggs of a team.
    pub fn pending_eggs(&self, team: &str) -> u32 {
        let count = self.eggs.values().filter(|e| e.team == team && e.is_claimable()).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Free slots: team capacity minus live players of that team.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownTeam`] if the team does not exist.
    pub fn free_slots(&self, team: &str) -> Result<u32, WorldError> {
        let capacity = self
            .team(team)
            .ok_or_else(|| WorldError::UnknownTeam(team.to_owned()))?
            .capacity;
        Ok(capacity.saturating_sub(self.live_players(team)))
    }

    /// Decide where a joining agent of `team` spawns.
    ///
    /// The oldest claimable egg of the team wins over a fresh spawn.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownTeam`] or [`WorldError::TeamFull`].
    pub fn resolve_spawn(&self, team: &str) -> Result<SpawnSource, WorldError> {
        if self.free_slots(team)? == 0 {
            let capacity = self.team(team).map_or(0, |t| t.capacity);
            return Err(WorldError::TeamFull {
                team: team.to_owned(),
                capacity,
            });
        }
        Ok(self
            .eggs
            .values()
            .find(|e| e.team == team && e.is_claimable())
            .map_or(SpawnSource::Fresh, |e| SpawnSource::FromEgg(e.id)))
    }

    /// Create the player for a joining agent.
    ///
    /// Claiming an egg hatches it if needed, connects it, and removes it
    /// from the roster.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicatePlayer`], [`WorldError::UnknownTeam`],
    /// [`WorldError::EggNotFound`] or [`WorldError::InvalidEggTransition`].
    /// Nothing is mutated on error.
    pub fn spawn_player<R: Rng + ?Sized>(
        &mut self,
        id: PlayerId,
        team: &str,
        source: SpawnSource,
        rng: &mut R,
    ) -> Result<&Player, WorldError> {
        if self.players.contains_key(&id) {
            return Err(WorldError::DuplicatePlayer(id));
        }
        if self.team(team).is_none() {
            return Err(WorldError::UnknownTeam(team.to_owned()));
        }
        let position = match source {
            SpawnSource::Fresh => self.map.random_position(rng),
            SpawnSource::FromEgg(egg_id) => {
                let egg = self.eggs.get(&egg_id).ok_or(WorldError::EggNotFound(egg_id))?;
                if egg.team != team {
                    return Err(WorldError::EggNotFound(egg_id));
                }
                let mut claimed = egg.clone();
                if claimed.state() == EggState::Laid {
                    claimed.transition(EggState::Hatched)?;
                }
                claimed.transition(EggState::Connected)?;
                self.eggs.remove(&egg_id);
                claimed.position
            }
        };

        self.map.tile_mut(position)?.add_occupant(id);
        let player = Player::new(id, team, position, Orientation::North, self.starting_food);
        debug!(player = %id, team, x = position.x, y = position.y, ?source, "player spawned");
        Ok(self.players.entry(id).or_insert(player))
    }

    /// Remove a player, spilling its inventory onto its tile.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PlayerNotFound`] if no such player exists.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<Player, WorldError> {
        let position = self.player(id)?.position;
        let spill = self.player(id)?.inventory;
        let tile = self.map.tile_mut(position)?;
        tile.resources.merge(&spill)?;
        tile.remove_occupant(id);
        let mut player = self.players.remove(&id).ok_or(WorldError::PlayerNotFound(id))?;
        player.inventory.take_all();
        player.alive = false;
        debug!(player = %id, x = position.x, y = position.y, "player removed");
        Ok(player)
    }

    // -----------------------------------------------------------------------
    // Movement
    // -----------------------------------------------------------------------

    fn relocate(&mut self, id: PlayerId, to: Position) -> Result<(), WorldError> {
        let from = self.player(id)?.position;
        self.map.tile(to)?;
        self.map.tile_mut(from)?.remove_occupant(id);
        self.map.tile_mut(to)?.add_occupant(id);
        self.player_mut(id)?.position = to;
        Ok(())
    }

    /// Step one tile in `direction`, wrapping.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PlayerNotFound`] if no such player exists.
    pub fn step(&mut self, id: PlayerId, direction: Orientation) -> Result<Position, WorldError> {
        let from = self.player(id)?.position;
        let (dx, dy) = direction.delta();
        let to = self.map.offset(from, dx, dy);
        self.relocate(id, to)?;
        Ok(to)
    }

    /// Step one tile forward (`Forward`).
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PlayerNotFound`] if no such player exists.
    pub fn move_forward(&mut self, id: PlayerId) -> Result<Position, WorldError> {
        let facing = self.player(id)?.orientation;
        self.step(id, facing)
    }

    /// Quarter turn clockwise (`Right`).
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PlayerNotFound`] if no such player exists.
    pub fn turn_right(&mut self, id: PlayerId) -> Result<Orientation, WorldError> {
        let player = self.player_mut(id)?;
        player.orientation = player.orientation.turn_right();
        Ok(player.orientation)
    }

    /// Quarter turn counter-clockwise (`Left`).
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PlayerNotFound`] if no such player exists.
    pub fn turn_left(&mut self, id: PlayerId) -> Result<Orientation, WorldError> {
        let player = self.player_mut(id)?;
        player.orientation = player.orientation.turn_left();
        Ok(player.orientation)
    }

    // -----------------------------------------------------------------------
    // Resources
    // -----------------------------------------------------------------------

    /// Move one unit of `resource` from the player's tile to the player.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::TileDepleted`] if the tile has none.
    pub fn take(&mut self, id: PlayerId, resource: Resource) -> Result<(), WorldError> {
        let position = self.player(id)?.position;
        let mut carried = self.player(id)?.inventory;
        carried.add(resource, 1)?;
        self.map
            .tile_mut(position)?
            .resources
            .remove(resource, 1)
            .map_err(|_| WorldError::TileDepleted { resource, position })?;
        self.player_mut(id)?.inventory = carried;
        Ok(())
    }

    /// Move one unit of `resource` from the player to its tile.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InventoryDepleted`] if the player has none.
    pub fn set(&mut self, id: PlayerId, resource: Resource) -> Result<(), WorldError> {
        let position = self.player(id)?.position;
        let mut ground = self.map.tile(position)?.resources;
        ground.add(resource, 1)?;
        self.player_mut(id)?
            .inventory
            .remove(resource, 1)
            .map_err(|_| WorldError::InventoryDepleted { player: id, resource })?;
        self.map.tile_mut(position)?.resources = ground;
        Ok(())
    }

    /// Eat `meals` food at once. If fewer are carried, the player starves
    /// and what it had is eaten.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PlayerNotFound`] if no such player exists.
    pub fn feed(&mut self, id: PlayerId, meals: u64) -> Result<Meal, WorldError> {
        let player = self.player_mut(id)?;
        let food = player.inventory.get(Resource::Food);
        let Some(meals) = u32::try_from(meals).ok().filter(|m| *m <= food) else {
            player.inventory.remove(Resource::Food, food)?;
            return Ok(Meal::Starved);
        };
        player.inventory.remove(Resource::Food, meals)?;
        Ok(Meal::Fed {
            remaining: player.inventory.get(Resource::Food),
        })
    }

    // -----------------------------------------------------------------------
    // Eject and eggs
    // -----------------------------------------------------------------------

    /// Push every other player on the caller's tile one step in the
    /// caller's facing direction and destroy the eggs lying there.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PlayerNotFound`] if no such player exists.
    pub fn eject(&mut self, id: PlayerId) -> Result<Ejection, WorldError> {
        let (position, direction) = {
            let p = self.player(id)?;
            (p.position, p.orientation)
        };
        let targets: Vec<PlayerId> = self
            .map
            .tile(position)?
            .occupants()
            .iter()
            .copied()
            .filter(|other| *other != id)
            .collect();
        for other in &targets {
            self.step(*other, direction)?;
        }

        let doomed: Vec<EggId> = self
            .eggs
            .values()
            .filter(|e| e.position == position)
            .map(|e| e.id)
            .collect();
        for egg_id in &doomed {
            if let Some(mut egg) = self.eggs.remove(egg_id) {
                egg.transition(EggState::Dead)?;
            }
        }

        Ok(Ejection {
            direction,
            moved: targets,
            destroyed_eggs: doomed,
        })
    }

    /// Lay an egg on the player's tile.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::TeamFull`] if the team's live players plus
    /// claimable eggs already reach its capacity.
    pub fn lay_egg(&mut self, id: PlayerId) -> Result<&Egg, WorldError> {
        let (team, position) = {
            let p = self.player(id)?;
            (p.team.clone(), p.position)
        };
        let capacity = self
            .team(&team)
            .ok_or_else(|| WorldError::UnknownTeam(team.clone()))?
            .capacity;
        let used = self.live_players(&team).saturating_add(self.pending_eggs(&team));
        if used >= capacity {
            return Err(WorldError::TeamFull { team, capacity });
        }
        let egg_id = self.next_egg;
        self.next_egg = egg_id.next().ok_or(WorldError::ArithmeticOverflow)?;
        debug!(egg = %egg_id, player = %id, team = %team, "egg laid");
        Ok(self
            .eggs
            .entry(egg_id)
            .or_insert_with(|| Egg::new(egg_id, team, position, Some(id))))
    }

    // -----------------------------------------------------------------------
    // Win condition
    // -----------------------------------------------------------------------

    /// First team, in boot order, with at least `players` live players at
    /// level `level` or above.
    pub fn winning_team(&self, level: u8, players: u32) -> Option<&str> {
        self.teams
            .iter()
            .find(|team| {
                let qualified = self
                    .players
                    .values()
                    .filter(|p| p.alive && p.team == team.name && p.level >= level)
                    .count();
                u32::try_from(qualified).unwrap_or(u32::MAX) >= players
            })
            .map(|team| team.name.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    pub(crate) fn world(width: u32, height: u32) -> World {
        World::new(width, height, vec![Team::new("red", 3), Team::new("blue", 2)], 10).unwrap()
    }

    /// Spawn a fresh player and teleport it to `(x, y)` facing `o`.
    pub(crate) fn place(world: &mut World, id: u64, team: &str, x: u32, y: u32, o: Orientation) -> PlayerId {
        let mut rng = SmallRng::seed_from_u64(id);
        let pid = PlayerId(id);
        world.spawn_player(pid, team, SpawnSource::Fresh, &mut rng).unwrap();
        world.relocate(pid, Position::new(x, y)).unwrap();
        world.player_mut(pid).unwrap().orientation = o;
        pid
    }

    fn assert_occupancy_consistent(world: &World) {
        for (pos, tile) in world.map().iter() {
            for id in tile.occupants() {
                assert_eq!(world.player(*id).unwrap().position, pos);
            }
        }
        for p in world.players() {
            let hits = world.map().iter().filter(|(_, t)| t.occupants().contains(&p.id)).count();
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn forward_from_center_facing_north() {
        let mut w = world(10, 10);
        let id = place(&mut w, 1, "red", 5, 5, Orientation::North);
        assert_eq!(w.move_forward(id).unwrap(), Position::new(5, 4));
        assert_occupancy_consistent(&w);
    }

    #[test]
    fn forward_wraps_on_every_edge() {
        let mut w = world(4, 3);
        let id = place(&mut w, 1, "red", 0, 0, Orientation::North);
        assert_eq!(w.move_forward(id).unwrap(), Position::new(0, 2));
        w.turn_left(id).unwrap();
        assert_eq!(w.move_forward(id).unwrap(), Position::new(3, 2));
        w.turn_left(id).unwrap();
        assert_eq!(w.move_forward(id).unwrap(), Position::new(3, 0));
        w.turn_left(id).unwrap();
        assert_eq!(w.move_forward(id).unwrap(), Position::new(0, 0));
        assert_occupancy_consistent(&w);
    }

    #[test]
    fn turning_keeps_position() {
        let mut w = world(5, 5);
        let id = place(&mut w, 1, "red", 2, 2, Orientation::West);
        assert_eq!(w.turn_right(id).unwrap(), Orientation::North);
        assert_eq!(w.turn_left(id).unwrap(), Orientation::West);
        assert_eq!(w.player(id).unwrap().position, Position::new(2, 2));
    }

    #[test]
    fn take_and_set_move_single_units() {
        let mut w = world(3, 3);
        let id = place(&mut w, 1, "red", 1, 1, Orientation::North);
        let pos = Position::new(1, 1);
        w.map_mut().tile_mut(pos).unwrap().resources.add(Resource::Linemate, 1).unwrap();

        w.take(id, Resource::Linemate).unwrap();
        assert_eq!(w.player(id).unwrap().inventory.get(Resource::Linemate), 1);
        assert_eq!(
            w.take(id, Resource::Linemate).unwrap_err(),
            WorldError::TileDepleted { resource: Resource::Linemate, position: pos }
        );

        w.set(id, Resource::Linemate).unwrap();
        assert_eq!(w.map().tile(pos).unwrap().resources.get(Resource::Linemate), 1);
        assert!(matches!(
            w.set(id, Resource::Linemate),
            Err(WorldError::InventoryDepleted { .. })
        ));
        assert_eq!(w.map().tile(pos).unwrap().resources.get(Resource::Linemate), 1);
    }

    #[test]
    fn eject_alone_moves_nobody() {
        let mut w = world(5, 5);
        let id = place(&mut w, 1, "red", 2, 2, Orientation::East);
        let ejection = w.eject(id).unwrap();
        assert!(ejection.moved.is_empty());
        assert_eq!(w.player(id).unwrap().position, Position::new(2, 2));
    }

    #[test]
    fn eject_pushes_in_facing_direction() {
        for (o, expected) in [
            (Orientation::North, Position::new(2, 1)),
            (Orientation::East, Position::new(3, 2)),
            (Orientation::South, Position::new(2, 3)),
            (Orientation::West, Position::new(1, 2)),
        ] {
            let mut w = world(5, 5);
            let pusher = place(&mut w, 1, "red", 2, 2, o);
            let pushed = place(&mut w, 2, "blue", 2, 2, Orientation::North);
            let ejection = w.eject(pusher).unwrap();
            assert_eq!(ejection.moved, vec![pushed]);
            assert_eq!(w.player(pushed).unwrap().position, expected);
            assert_eq!(w.player(pusher).unwrap().position, Position::new(2, 2));
            assert_occupancy_consistent(&w);
        }
    }

    #[test]
    fn eject_destroys_eggs_on_tile() {
        let mut w = world(5, 5);
        let layer = place(&mut w, 1, "red", 2, 2, Orientation::North);
        let egg = w.lay_egg(layer).unwrap().id;
        let ejection = w.eject(layer).unwrap();
        assert_eq!(ejection.destroyed_eggs, vec![egg]);
        assert!(w.egg(egg).is_err());
    }

    #[test]
    fn removal_spills_inventory() {
        let mut w = world(3, 3);
        let id = place(&mut w, 1, "red", 0, 1, Orientation::North);
        let before = w.map().tile(Position::new(0, 1)).unwrap().resources.get(Resource::Food);
        let removed = w.remove_player(id).unwrap();
        assert!(!removed.alive);
        let tile = w.map().tile(Position::new(0, 1)).unwrap();
        assert_eq!(tile.resources.get(Resource::Food), before + 10);
        assert!(!tile.is_occupied());
        assert!(w.player(id).is_err());
    }

    #[test]
    fn slots_follow_live_players() {
        let mut w = world(3, 3);
        assert_eq!(w.free_slots("blue").unwrap(), 2);
        place(&mut w, 1, "blue", 0, 0, Orientation::North);
        place(&mut w, 2, "blue", 0, 0, Orientation::North);
        assert_eq!(w.free_slots("blue").unwrap(), 0);
        assert!(matches!(w.resolve_spawn("blue"), Err(WorldError::TeamFull { .. })));
        assert!(matches!(w.resolve_spawn("green"), Err(WorldError::UnknownTeam(_))));
    }

    #[test]
    fn joining_prefers_eggs() {
        let mut w = world(6, 6);
        let layer = place(&mut w, 1, "red", 4, 1, Orientation::North);
        let egg = w.lay_egg(layer).unwrap().id;
        assert_eq!(w.pending_eggs("red"), 1);

        let source = w.resolve_spawn("red").unwrap();
        assert_eq!(source, SpawnSource::FromEgg(egg));
        let mut rng = SmallRng::seed_from_u64(9);
        let spawned = w.spawn_player(PlayerId(2), "red", source, &mut rng).unwrap();
        assert_eq!(spawned.position, Position::new(4, 1));
        assert_eq!(w.pending_eggs("red"), 0);
        assert_eq!(w.resolve_spawn("red").unwrap(), SpawnSource::Fresh);
        assert_occupancy_consistent(&w);
    }

    #[test]
    fn laying_respects_capacity() {
        let mut w = world(3, 3);
        let a = place(&mut w, 1, "blue", 0, 0, Orientation::North);
        w.lay_egg(a).unwrap();
        assert!(matches!(w.lay_egg(a), Err(WorldError::TeamFull { .. })));
    }

    #[test]
    fn egg_ids_are_monotonic() {
        let mut w = world(3, 3);
        let a = place(&mut w, 1, "red", 0, 0, Orientation::North);
        let first = w.lay_egg(a).unwrap().id;
        let second = w.lay_egg(a).unwrap().id;
        assert_eq!(first, EggId(0));
        assert_eq!(second, EggId(1));
    }

    #[test]
    fn feeding_counts_down_then_starves() {
        let mut w = world(3, 3);
        let id = place(&mut w, 1, "red", 0, 0, Orientation::North);
        for left in (0..10).rev() {
            assert_eq!(w.feed(id, 1).unwrap(), Meal::Fed { remaining: left });
        }
        assert_eq!(w.feed(id, 1).unwrap(), Meal::Starved);
    }

    #[test]
    fn feeding_many_meals_at_once() {
        let mut w = world(3, 3);
        let id = place(&mut w, 1, "red", 0, 0, Orientation::North);
        assert_eq!(w.feed(id, 0).unwrap(), Meal::Fed { remaining: 10 });
        assert_eq!(w.feed(id, 7).unwrap(), Meal::Fed { remaining: 3 });
        assert_eq!(w.feed(id, 3).unwrap(), Meal::Fed { remaining: 0 });

        let other = place(&mut w, 2, "red", 0, 0, Orientation::North);
        assert_eq!(w.feed(other, 11).unwrap(), Meal::Starved);
        assert_eq!(w.player(other).unwrap().inventory.get(Resource::Food), 0);
        assert_eq!(w.feed(other, u64::MAX).unwrap(), Meal::Starved);
    }

    #[test]
    fn winning_team_needs_enough_high_levels() {
        let mut w = World::new(3, 3, vec![Team::new("red", 6)], 10).unwrap();
        for i in 1..=6 {
            let id = place(&mut w, i, "red", 0, 0, Orientation::North);
            w.player_mut(id).unwrap().level = 8;
        }
        assert_eq!(w.winning_team(8, 6), Some("red"));
        w.player_mut(PlayerId(3)).unwrap().level = 7;
        assert_eq!(w.winning_team(8, 6), None);
    }
}
