//! Line dispatch: the handshake and both command grammars.
//!
//! - An unauthenticated session's first line is either
//!   [`OBSERVER_TOKEN`] or a team name.
//! - Agent lines are parsed, pre-checked where the protocol demands an
//!   immediate answer (`Incantation`), and queued with their delay.
//! - Observer lines are answered on the spot.

use std::time::Duration;

use tracing::{debug, info};
use zappy_types::{PlayerId, SessionId};
use zappy_world::{SpawnSource, WorldError, incantation};

use crate::command::{AgentCommand, OBSERVER_TOKEN, ObserverCommand, ParseError};
use crate::game::Game;
use crate::notify::ObserverEvent;
use crate::session::Role;

/// Generic success reply.
pub(crate) const OK: &str = "ok";

/// Generic failure reply.
pub(crate) const KO: &str = "ko";

/// Immediate answer to an accepted `Incantation`.
pub(crate) const ELEVATION_UNDERWAY: &str = "Elevation underway";

impl Game {
    /// Handle one complete line from session `id`, received at `now`.
    pub fn handle_line(&mut self, id: SessionId, line: &str, now: Duration) {
        let Some(session) = self.sessions.get(id) else {
            debug!(session = %id, "line from unknown session dropped");
            return;
        };
        match session.role.clone() {
            Role::Unauthenticated => self.authenticate(id, line),
            Role::Agent { player, .. } => self.dispatch_agent(id, player, line, now),
            Role::Observer => self.dispatch_observer(id, line),
        }
    }

    // -----------------------------------------------------------------------
    // Handshake
    // -----------------------------------------------------------------------

    fn authenticate(&mut self, id: SessionId, line: &str) {
        if line == OBSERVER_TOKEN {
            self.join_observer(id);
            return;
        }
        if let Err(e) = self.join_agent(id, line) {
            debug!(session = %id, team = line, error = %e, "join refused");
            self.reply(id, KO);
        }
    }

    fn join_observer(&mut self, id: SessionId) {
        let snapshot = self.snapshot();
        let Some(session) = self.sessions.get_mut(id) else {
            return;
        };
        session.role = Role::Observer;
        let outbox = session.outbox.clone();
        for event in &snapshot {
            outbox.send_line(event.to_string());
        }
        self.bus.subscribe(id, outbox);
        info!(session = %id, snapshot_lines = snapshot.len(), "observer joined");
    }

    fn join_agent(&mut self, id: SessionId, team: &str) -> Result<(), WorldError> {
        let source = self.world.resolve_spawn(team)?;
        let player_id = PlayerId::from(id);
        let player = self.world.spawn_player(player_id, team, source, &mut self.rng)?;
        let joined = ObserverEvent::PlayerNew {
            player: player_id,
            position: player.position,
            orientation: player.orientation,
            level: player.level,
            team: team.to_owned(),
        };

        if let SpawnSource::FromEgg(egg) = source {
            self.publish(&ObserverEvent::EggHatched(egg));
            self.publish(&ObserverEvent::EggConnected(egg));
        }
        self.publish(&joined);

        if let Some(session) = self.sessions.get_mut(id) {
            session.role = Role::Agent {
                player: player_id,
                team: team.to_owned(),
            };
        }
        let slots = self.world.free_slots(team)?;
        let map = self.world.map();
        self.reply(id, slots.to_string());
        self.reply(id, format!("{} {}", map.width(), map.height()));
        info!(session = %id, team, ?source, free_slots = slots, "agent joined");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Agent grammar
    // -----------------------------------------------------------------------

    fn dispatch_agent(&mut self, id: SessionId, player: PlayerId, line: &str, now: Duration) {
        let command = match AgentCommand::parse(line) {
            Ok(command) => command,
            Err(e) => {
                debug!(session = %id, error = %e, "agent command rejected");
                self.reply(id, KO);
                return;
            }
        };
        if self.is_finished() {
            self.reply(id, KO);
            return;
        }

        match command {
            AgentCommand::Incantation => match incantation::begin(&mut self.world, player) {
                Ok(start) => {
                    self.reply(id, ELEVATION_UNDERWAY);
                    self.publish(&ObserverEvent::RitualStart {
                        position: start.position,
                        level: start.level,
                        participants: start.participants,
                    });
                }
                Err(e) => {
                    debug!(session = %id, error = %e, "incantation refused");
                    self.reply(id, KO);
                    return;
                }
            },
            AgentCommand::Fork => self.publish(&ObserverEvent::EggLaying(player)),
            _ => {}
        }

        let delay = self.clock.units(command.duration());
        let verb = command.verb();
        if let Some(session) = self.sessions.get_mut(id) {
            let due = session.queue.push(command, now, delay);
            debug!(session = %id, command = verb, due_ms = due.as_millis(), "action queued");
        }
        self.drain_session(id, now);
    }

    // -----------------------------------------------------------------------
    // Observer grammar
    // -----------------------------------------------------------------------

    fn dispatch_observer(&mut self, id: SessionId, line: &str) {
        let command = match ObserverCommand::parse(line) {
            Ok(command) => command,
            Err(ParseError::Unknown(_)) => {
                self.reply(id, ObserverEvent::UnknownCommand.to_string());
                return;
            }
            Err(e @ ParseError::BadParameters { .. }) => {
                debug!(session = %id, error = %e, "observer command rejected");
                self.reply(id, ObserverEvent::BadParameters.to_string());
                return;
            }
        };

        let replies = match self.answer_observer(command) {
            Ok(events) => events,
            Err(e) => {
                debug!(session = %id, error = %e, "observer query failed");
                vec![ObserverEvent::BadParameters]
            }
        };
        for event in replies {
            self.reply(id, event.to_string());
        }
    }

    fn answer_observer(&mut self, command: ObserverCommand) -> Result<Vec<ObserverEvent>, WorldError> {
        let map = self.world.map();
        Ok(match command {
            ObserverCommand::MapSize => vec![ObserverEvent::MapSize {
                width: map.width(),
                height: map.height(),
            }],
            ObserverCommand::TileContent { x, y } => vec![self.tile_event(map.wrap(x, y))?],
            ObserverCommand::MapContent => map
                .iter()
                .map(|(position, tile)| ObserverEvent::TileContent {
                    position,
                    resources: tile.resources,
                })
                .collect(),
            ObserverCommand::TeamNames => self.team_events().collect(),
            ObserverCommand::PlayerPosition(id) => {
                let p = self.world.player(id)?;
                vec![ObserverEvent::PlayerPosition {
                    player: id,
                    position: p.position,
                    orientation: p.orientation,
                }]
            }
            ObserverCommand::PlayerLevel(id) => vec![ObserverEvent::PlayerLevel {
                player: id,
                level: self.world.player(id)?.level,
            }],
            ObserverCommand::PlayerInventory(id) => {
                let p = self.world.player(id)?;
                vec![ObserverEvent::PlayerInventory {
                    player: id,
                    position: p.position,
                    inventory: p.inventory,
                }]
            }
            ObserverCommand::GetTimeUnit => vec![ObserverEvent::TimeUnit(self.clock.frequency())],
            ObserverCommand::SetTimeUnit(frequency) => {
                if self.clock.set_frequency(frequency).is_err() {
                    return Ok(vec![ObserverEvent::BadParameters]);
                }
                info!(frequency, "time unit changed");
                vec![ObserverEvent::TimeUnitSet(frequency)]
            }
        })
    }
}
