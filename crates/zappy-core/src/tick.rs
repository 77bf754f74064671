//! The periodic part of the game: time, food, refills, victory, actions.
//!
//! Each reactor tick:
//!
//! 1. Converts the wall time since the previous tick into whole time
//!    units.
//! 2. Counts the food-interval boundaries among those units and makes
//!    every player eat that many meals at once.
//! 3. If any refill-interval boundary was crossed, refills the map once
//!    and checks for a winner.
//! 4. Runs every due action of every session.
//!
//! The cost of a tick does not depend on how many units elapsed. Once a
//! team has won, ticks do nothing.

use std::ops::RangeInclusive;
use std::time::Duration;

use tracing::{info, warn};
use zappy_types::{PlayerId, SessionId};
use zappy_world::{Meal, spawner};

use crate::game::{Game, TickStatus};
use crate::notify::ObserverEvent;

/// Last line a starving agent receives.
pub const DEATH_NOTICE: &str = "dead";

impl Game {
    /// Advance the game to `now` (time since the reactor started).
    pub fn tick(&mut self, now: Duration) -> TickStatus {
        if let Some(winner) = &self.winner {
            return TickStatus::Finished {
                winner: winner.clone(),
            };
        }

        let units = self.cadence.advance(now, self.clock.time_unit());
        let meals = boundaries(&units, self.config.game.food_interval);
        if meals > 0 {
            self.feed_players(meals);
        }
        if boundaries(&units, self.config.game.refill_interval) > 0 {
            self.refill();
            if let Some(winner) = self.check_win() {
                return self.finish(winner);
            }
        }

        for id in self.sessions.ids() {
            self.drain_session(id, now);
        }
        TickStatus::Running
    }

    fn feed_players(&mut self, meals: u64) {
        let ids: Vec<PlayerId> = self.world.players().map(|p| p.id).collect();
        for id in ids {
            match self.world.feed(id, meals) {
                Ok(Meal::Fed { .. }) => {}
                Ok(Meal::Starved) => self.starve(id),
                Err(e) => warn!(player = %id, error = %e, "feeding failed"),
            }
        }
    }

    fn starve(&mut self, player: PlayerId) {
        let session = SessionId::from(player);
        info!(player = %player, "player starved");
        self.reply(session, DEATH_NOTICE);
        if self.sessions.get(session).is_some() {
            self.close_session(session);
            return;
        }
        if let Ok(removed) = self.world.remove_player(player) {
            self.publish(&ObserverEvent::Death(player));
            if let Err(e) = self.publish_tile(removed.position) {
                warn!(player = %player, error = %e, "failed to announce spill");
            }
        }
    }

    fn refill(&mut self) {
        match spawner::top_up(self.world.map_mut(), &mut self.rng) {
            Ok(touched) => {
                for position in touched {
                    if let Err(e) = self.publish_tile(position) {
                        warn!(error = %e, "failed to announce refill");
                    }
                }
            }
            Err(e) => warn!(error = %e, "refill failed"),
        }
    }

    fn check_win(&self) -> Option<String> {
        let game = &self.config.game;
        self.world
            .winning_team(game.win_level, game.win_players)
            .map(str::to_owned)
    }

    fn finish(&mut self, winner: String) -> TickStatus {
        info!(team = %winner, "team won, simulation stopped");
        self.publish(&ObserverEvent::GameEnd(winner.clone()));
        self.publish(&ObserverEvent::ServerMessage(format!("team {winner} won")));
        self.winner = Some(winner.clone());
        TickStatus::Finished { winner }
    }
}

/// Multiples of `interval` within `units`.
fn boundaries(units: &RangeInclusive<u64>, interval: u64) -> u64 {
    if units.is_empty() {
        return 0;
    }
    let through_end = units.end().checked_div(interval).unwrap_or(0);
    let before_start = units.start().saturating_sub(1).checked_div(interval).unwrap_or(0);
    through_end.saturating_sub(before_start)
}
