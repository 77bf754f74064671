//! The game: world, sessions, clock, and observers behind one owner.
//!
//! [`Game`] is the single mutator of world state. The reactor feeds it
//! three kinds of input, all strictly sequentially:
//!
//! 1. [`Game::open_session`] / [`Game::close_session`] on connect and
//!    disconnect.
//! 2. [`Game::handle_line`] for every complete line a session sends
//!    (see `dispatch`).
//! 3. [`Game::tick`] on a fixed interval, which advances the clock, feeds
//!    players, refills the map, checks for a winner, and runs due actions
//!    (see `tick` and `execute`).
//!
//! Because nothing else touches the world, no action can observe another
//! one half-applied.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info, warn};
use zappy_types::{PlayerId, Position, SessionId};
use zappy_world::{Team, World, WorldError, spawner};

use crate::clock::{Cadence, GameClock};
use crate::config::ServerConfig;
use crate::error::GameError;
use crate::notify::{NotificationBus, ObserverEvent};
use crate::session::{Outbox, Role, Session, SessionRegistry};

/// Greeting sent to every new connection.
pub const GREETING: &str = "WELCOME";

/// Outcome of one [`Game::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickStatus {
    /// Simulation continues.
    Running,
    /// A team has won; the simulation is frozen.
    Finished {
        /// The winning team.
        winner: String,
    },
}

/// Complete server-side game state.
#[derive(Debug)]
pub struct Game {
    pub(crate) config: ServerConfig,
    pub(crate) clock: GameClock,
    pub(crate) cadence: Cadence,
    pub(crate) world: World,
    pub(crate) sessions: SessionRegistry,
    pub(crate) bus: NotificationBus,
    pub(crate) rng: SmallRng,
    pub(crate) winner: Option<String>,
}

impl Game {
    /// Build the world from `config` and fill the map once.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if the configuration is invalid.
    pub fn new(config: ServerConfig) -> Result<Self, GameError> {
        config.validate()?;
        let clock = GameClock::new(config.frequency)?;
        let teams = config
            .teams
            .iter()
            .map(|name| Team::new(name.clone(), config.clients_per_team))
            .collect();
        let mut world = World::new(config.width, config.height, teams, config.game.starting_food)?;
        let mut rng = config
            .seed
            .map_or_else(SmallRng::from_os_rng, SmallRng::seed_from_u64);
        let seeded = spawner::top_up(world.map_mut(), &mut rng)?;

        info!(
            width = config.width,
            height = config.height,
            teams = config.teams.len(),
            clients_per_team = config.clients_per_team,
            frequency = config.frequency,
            seed = ?config.seed,
            tiles_seeded = seeded.len(),
            "Game initialized"
        );

        Ok(Self {
            config,
            clock,
            cadence: Cadence::new(),
            world,
            sessions: SessionRegistry::new(),
            bus: NotificationBus::new(),
            rng,
            winner: None,
        })
    }

    /// The world.
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// The clock.
    pub const fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// The configuration the game was built from.
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The winning team, once there is one.
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    /// Whether a team has won.
    pub const fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    /// Live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Role of a session, if it exists.
    pub fn role(&self, id: SessionId) -> Option<&Role> {
        self.sessions.get(id).map(|s| &s.role)
    }

    /// Register a freshly accepted connection and greet it.
    pub fn open_session(&mut self, id: SessionId, outbox: Outbox) {
        outbox.send_line(GREETING);
        self.sessions.insert(Session::new(id, outbox));
        debug!(session = %id, "session opened");
    }

    /// Tear a session down: release its player, drop its pending actions,
    /// and close its connection. Unknown ids are ignored.
    pub fn close_session(&mut self, id: SessionId) {
        let Some(session) = self.sessions.remove(id) else {
            return;
        };
        let dropped = session.queue.len();
        match &session.role {
            Role::Agent { player, team } => {
                if let Err(e) = self.release_player(*player) {
                    warn!(session = %id, error = %e, "failed to release player");
                }
                info!(session = %id, team = %team, dropped_actions = dropped, "agent left");
            }
            Role::Observer => {
                self.bus.unsubscribe(id);
                info!(session = %id, "observer left");
            }
            Role::Unauthenticated => debug!(session = %id, "session closed before joining"),
        }
        session.outbox.close();
    }

    /// Close every session, discarding their pending actions.
    pub fn close_all(&mut self) {
        for id in self.sessions.ids() {
            self.close_session(id);
        }
    }

    fn release_player(&mut self, player: PlayerId) -> Result<(), WorldError> {
        let removed = self.world.remove_player(player)?;
        self.publish(&ObserverEvent::Death(player));
        self.publish_tile(removed.position)
    }

    // -----------------------------------------------------------------------
    // Output helpers
    // -----------------------------------------------------------------------

    pub(crate) fn reply(&self, id: SessionId, line: impl Into<String>) {
        if let Some(session) = self.sessions.get(id) {
            session.outbox.send_line(line);
        }
    }

    pub(crate) fn publish(&mut self, event: &ObserverEvent) {
        self.bus.publish(event);
    }

    pub(crate) fn tile_event(&self, position: Position) -> Result<ObserverEvent, WorldError> {
        Ok(ObserverEvent::TileContent {
            position,
            resources: self.world.map().tile(position)?.resources,
        })
    }

    pub(crate) fn publish_tile(&mut self, position: Position) -> Result<(), WorldError> {
        let event = self.tile_event(position)?;
        self.publish(&event);
        Ok(())
    }

    pub(crate) fn publish_position(&mut self, player: PlayerId) -> Result<(), WorldError> {
        let p = self.world.player(player)?;
        let event = ObserverEvent::PlayerPosition {
            player,
            position: p.position,
            orientation: p.orientation,
        };
        self.publish(&event);
        Ok(())
    }

    pub(crate) fn publish_inventory(&mut self, player: PlayerId) -> Result<(), WorldError> {
        let p = self.world.player(player)?;
        let event = ObserverEvent::PlayerInventory {
            player,
            position: p.position,
            inventory: p.inventory,
        };
        self.publish(&event);
        Ok(())
    }

    /// Every line a new observer receives, in order: map size, every
    /// tile, team names, live players, pending eggs, then the time unit.
    pub(crate) fn snapshot(&self) -> Vec<ObserverEvent> {
        let map = self.world.map();
        let mut events = vec![ObserverEvent::MapSize {
            width: map.width(),
            height: map.height(),
        }];
        events.extend(map.iter().map(|(position, tile)| ObserverEvent::TileContent {
            position,
            resources: tile.resources,
        }));
        events.extend(self.team_events());
        events.extend(self.world.players().map(|p| ObserverEvent::PlayerNew {
            player: p.id,
            position: p.position,
            orientation: p.orientation,
            level: p.level,
            team: p.team.clone(),
        }));
        events.extend(
            self.world
                .eggs()
                .filter(|e| e.is_claimable())
                .map(|e| ObserverEvent::EggLaid {
                    egg: e.id,
                    parent: e.parent,
                    position: e.position,
                }),
        );
        events.push(ObserverEvent::TimeUnit(self.clock.frequency()));
        events
    }

    pub(crate) fn team_events(&self) -> impl Iterator<Item = ObserverEvent> + '_ {
        self.world
            .teams()
            .iter()
            .map(|t| ObserverEvent::TeamName(t.name.clone()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc::UnboundedReceiver;
    use zappy_types::Resource;

    use super::*;
    use crate::session::Outbound;

    /// A small deterministic game whose players never starve and whose
    /// map is never refilled.
    pub(crate) fn game() -> Game {
        let config = ServerConfig {
            width: 10,
            height: 10,
            teams: vec!["red".to_owned(), "blue".to_owned()],
            clients_per_team: 6,
            frequency: 100,
            seed: Some(42),
            game: crate::config::GameConfig {
                food_interval: 1_000_000,
                refill_interval: 1_000_000,
                ..crate::config::GameConfig::default()
            },
            ..ServerConfig::default()
        };
        Game::new(config).unwrap()
    }

    pub(crate) fn connect(game: &mut Game, id: u64) -> UnboundedReceiver<Outbound> {
        let (outbox, mut rx) = Outbox::channel();
        game.open_session(SessionId(id), outbox);
        assert_eq!(next_line(&mut rx).as_deref(), Some(GREETING));
        rx
    }

    /// Connect and join `team`, swallowing the handshake replies.
    pub(crate) fn join(game: &mut Game, id: u64, team: &str) -> UnboundedReceiver<Outbound> {
        let mut rx = connect(game, id);
        game.handle_line(SessionId(id), team, Duration::ZERO);
        drain(&mut rx);
        rx
    }

    pub(crate) fn next_line(rx: &mut UnboundedReceiver<Outbound>) -> Option<String> {
        match rx.try_recv().ok()? {
            Outbound::Line(line) => Some(line),
            Outbound::Close => None,
        }
    }

    pub(crate) fn drain(rx: &mut UnboundedReceiver<Outbound>) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            if let Outbound::Line(line) = msg {
                lines.push(line);
            }
        }
        lines
    }

    #[test]
    fn new_game_fills_the_map() {
        let g = game();
        assert_eq!(g.world().map().resource_totals(), [50, 30, 15, 10, 10, 8, 5]);
        assert!(!g.is_finished());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ServerConfig {
            frequency: 0,
            ..ServerConfig::default()
        };
        assert!(matches!(Game::new(config), Err(GameError::Config { .. })));
    }

    #[test]
    fn same_seed_same_world() {
        let a = game();
        let b = game();
        assert_eq!(a.world().map(), b.world().map());
    }

    #[test]
    fn disconnect_spills_and_announces() {
        let mut g = game();
        let mut obs = connect(&mut g, 1);
        g.handle_line(SessionId(1), "GRAPHIC", Duration::ZERO);
        let _agent = join(&mut g, 2, "red");
        drain(&mut obs);

        let pos = g.world().player(PlayerId(2)).unwrap().position;
        let food_before = g.world().map().tile(pos).unwrap().resources.get(Resource::Food);
        g.close_session(SessionId(2));

        assert!(g.world().player(PlayerId(2)).is_err());
        let food_after = g.world().map().tile(pos).unwrap().resources.get(Resource::Food);
        assert_eq!(food_after, food_before + 10);
        let lines = drain(&mut obs);
        assert_eq!(lines.first().map(String::as_str), Some("pdi #2"));
        let tile = g.tile_event(pos).unwrap().to_string();
        assert!(lines.contains(&tile));
        assert_eq!(g.session_count(), 1);
    }

    #[test]
    fn closing_twice_is_harmless() {
        let mut g = game();
        let _rx = join(&mut g, 1, "blue");
        g.close_session(SessionId(1));
        g.close_session(SessionId(1));
        assert_eq!(g.world().player_count(), 0);
    }

    #[test]
    fn close_all_empties_the_registry() {
        let mut g = game();
        let mut agent = join(&mut g, 1, "red");
        let _obs = connect(&mut g, 2);
        g.handle_line(SessionId(1), "Forward", Duration::ZERO);
        g.close_all();
        assert_eq!(g.session_count(), 0);
        assert_eq!(g.world().player_count(), 0);
        assert_eq!(agent.try_recv().unwrap(), Outbound::Close);
    }
}
