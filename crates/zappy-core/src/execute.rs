//! Execution of due agent actions.
//!
//! Each action runs to completion against the world before the next one
//! is considered, so every effect below is atomic from every session's
//! point of view.

use std::time::Duration;

use tracing::debug;
use zappy_types::{PlayerId, SessionId};
use zappy_world::{VisionCone, WorldError, incantation, sound};

use crate::command::AgentCommand;
use crate::dispatch::{KO, OK};
use crate::game::Game;
use crate::notify::ObserverEvent;

impl Game {
    /// Run every due action at the head of session `id`'s queue.
    pub(crate) fn drain_session(&mut self, id: SessionId, now: Duration) {
        loop {
            let Some(session) = self.sessions.get_mut(id) else {
                return;
            };
            let Some(player) = session.player() else {
                return;
            };
            let Some(action) = session.queue.pop_ready(now) else {
                return;
            };
            self.execute(id, player, action.command);
        }
    }

    /// Apply one action and answer its session.
    pub(crate) fn execute(&mut self, id: SessionId, player: PlayerId, command: AgentCommand) {
        let verb = command.verb();
        let reply = match self.apply(player, command) {
            Ok(reply) => reply,
            Err(e) => {
                debug!(session = %id, command = verb, error = %e, "action failed");
                KO.to_owned()
            }
        };
        self.reply(id, reply);
    }

    fn apply(&mut self, player: PlayerId, command: AgentCommand) -> Result<String, WorldError> {
        match command {
            AgentCommand::Forward => {
                self.world.move_forward(player)?;
                self.publish_position(player)?;
                Ok(OK.to_owned())
            }
            AgentCommand::Right => {
                self.world.turn_right(player)?;
                self.publish_position(player)?;
                Ok(OK.to_owned())
            }
            AgentCommand::Left => {
                self.world.turn_left(player)?;
                self.publish_position(player)?;
                Ok(OK.to_owned())
            }
            AgentCommand::Look => VisionCone::of(&self.world, player)?.render(self.world.map()),
            AgentCommand::Inventory => Ok(self.world.player(player)?.inventory.describe()),
            AgentCommand::Broadcast(text) => self.broadcast(player, &text),
            AgentCommand::ConnectNbr => {
                let team = self.world.player(player)?.team.clone();
                Ok(self.world.free_slots(&team)?.to_string())
            }
            AgentCommand::Fork => {
                let egg = self.world.lay_egg(player)?;
                let event = ObserverEvent::EggLaid {
                    egg: egg.id,
                    parent: egg.parent,
                    position: egg.position,
                };
                self.publish(&event);
                Ok(OK.to_owned())
            }
            AgentCommand::Eject => self.eject(player),
            AgentCommand::Take(resource) => {
                self.world.take(player, resource)?;
                self.publish(&ObserverEvent::Collect { player, resource });
                self.after_exchange(player)?;
                Ok(OK.to_owned())
            }
            AgentCommand::Set(resource) => {
                self.world.set(player, resource)?;
                self.publish(&ObserverEvent::Drop { player, resource });
                self.after_exchange(player)?;
                Ok(OK.to_owned())
            }
            AgentCommand::Incantation => self.resolve_ritual(player),
        }
    }

    fn after_exchange(&mut self, player: PlayerId) -> Result<(), WorldError> {
        self.publish_inventory(player)?;
        let position = self.world.player(player)?.position;
        self.publish_tile(position)
    }

    fn broadcast(&mut self, speaker: PlayerId, text: &str) -> Result<String, WorldError> {
        let source = self.world.player(speaker)?.position;
        let map = self.world.map();
        for listener in self.world.players().filter(|p| p.id != speaker) {
            let k = sound::broadcast_direction(map, source, listener.position, listener.orientation);
            self.sessions.send_to_player(listener.id, format!("message {k}, {text}"));
        }
        self.publish(&ObserverEvent::Broadcast {
            player: speaker,
            message: text.to_owned(),
        });
        Ok(OK.to_owned())
    }

    fn eject(&mut self, pusher: PlayerId) -> Result<String, WorldError> {
        let ejection = self.world.eject(pusher)?;
        if !ejection.moved.is_empty() {
            self.publish(&ObserverEvent::Expulsion(pusher));
        }
        for pushed in &ejection.moved {
            let facing = self.world.player(*pushed)?.orientation;
            let k = sound::push_direction(ejection.direction, facing);
            self.sessions.send_to_player(*pushed, format!("eject: {k}"));
            self.publish_position(*pushed)?;
        }
        for egg in &ejection.destroyed_eggs {
            self.publish(&ObserverEvent::EggDied(*egg));
        }
        let reply = if ejection.moved.is_empty() { KO } else { OK };
        Ok(reply.to_owned())
    }

    fn resolve_ritual(&mut self, initiator: PlayerId) -> Result<String, WorldError> {
        let outcome = incantation::resolve(&mut self.world, initiator)?;
        self.publish(&ObserverEvent::RitualEnd {
            position: outcome.position,
            success: outcome.succeeded(),
        });
        if !outcome.succeeded() {
            return Ok(KO.to_owned());
        }
        self.publish(&ObserverEvent::PlayerLevel {
            player: initiator,
            level: outcome.level,
        });
        self.publish_inventory(initiator)?;
        self.publish_tile(outcome.position)?;
        Ok(format!("Current level: {}", outcome.level))
    }
}
