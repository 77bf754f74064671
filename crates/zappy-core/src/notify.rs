//! Observer notifications.
//!
//! Every world change an observer can see is an [`ObserverEvent`]. Its
//! [`Display`](core::fmt::Display) form is the wire line. The
//! [`NotificationBus`] renders each event once and fans it out to every
//! subscribed observer session.

use std::collections::BTreeMap;
use std::fmt;

use tracing::trace;
use zappy_types::{EggId, Inventory, Orientation, PlayerId, Position, Resource, SessionId};

use crate::session::Outbox;

/// A line pushed to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserverEvent {
    /// `msz X Y`
    MapSize {
        /// Map width.
        width: u32,
        /// Map height.
        height: u32,
    },
    /// `bct X Y q0 .. q6`
    TileContent {
        /// Tile.
        position: Position,
        /// Resources on it.
        resources: Inventory,
    },
    /// `tna N`
    TeamName(String),
    /// `pnw #n X Y O L N`
    PlayerNew {
        /// New player.
        player: PlayerId,
        /// Spawn tile.
        position: Position,
        /// Facing.
        orientation: Orientation,
        /// Level.
        level: u8,
        /// Team.
        team: String,
    },
    /// `ppo #n X Y O`
    PlayerPosition {
        /// Player.
        player: PlayerId,
        /// Tile.
        position: Position,
        /// Facing.
        orientation: Orientation,
    },
    /// `plv #n L`
    PlayerLevel {
        /// Player.
        player: PlayerId,
        /// Level.
        level: u8,
    },
    /// `pin #n X Y q0 .. q6`
    PlayerInventory {
        /// Player.
        player: PlayerId,
        /// Tile.
        position: Position,
        /// Carried resources.
        inventory: Inventory,
    },
    /// `pex #n`
    Expulsion(PlayerId),
    /// `pbc #n M`
    Broadcast {
        /// Speaker.
        player: PlayerId,
        /// Message text.
        message: String,
    },
    /// `pic X Y L #n #n ...`
    RitualStart {
        /// Ritual tile.
        position: Position,
        /// Level of the ritual.
        level: u8,
        /// Same-level players on the tile.
        participants: Vec<PlayerId>,
    },
    /// `pie X Y R`
    RitualEnd {
        /// Ritual tile.
        position: Position,
        /// Whether the ritual succeeded.
        success: bool,
    },
    /// `pfk #n`
    EggLaying(PlayerId),
    /// `pdr #n i`
    Drop {
        /// Player.
        player: PlayerId,
        /// Resource dropped.
        resource: Resource,
    },
    /// `pgt #n i`
    Collect {
        /// Player.
        player: PlayerId,
        /// Resource collected.
        resource: Resource,
    },
    /// `pdi #n`
    Death(PlayerId),
    /// `enw #e #n X Y`
    EggLaid {
        /// New egg.
        egg: EggId,
        /// Player that laid it.
        parent: Option<PlayerId>,
        /// Egg tile.
        position: Position,
    },
    /// `eht #e`
    EggHatched(EggId),
    /// `ebo #e`
    EggConnected(EggId),
    /// `edi #e`
    EggDied(EggId),
    /// `sgt T`
    TimeUnit(u32),
    /// `sst T`
    TimeUnitSet(u32),
    /// `seg N`
    GameEnd(String),
    /// `smg M`
    ServerMessage(String),
    /// `suc`
    UnknownCommand,
    /// `sbp`
    BadParameters,
}

impl fmt::Display for ObserverEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MapSize { width, height } => write!(f, "msz {width} {height}"),
            Self::TileContent { position, resources } => {
                write!(f, "bct {position} {}", resources.wire_counts())
            }
            Self::TeamName(name) => write!(f, "tna {name}"),
            Self::PlayerNew {
                player,
                position,
                orientation,
                level,
                team,
            } => write!(f, "pnw #{player} {position} {orientation} {level} {team}"),
            Self::PlayerPosition {
                player,
                position,
                orientation,
            } => write!(f, "ppo #{player} {position} {orientation}"),
            Self::PlayerLevel { player, level } => write!(f, "plv #{player} {level}"),
            Self::PlayerInventory {
                player,
                position,
                inventory,
            } => write!(f, "pin #{player} {position} {}", inventory.wire_counts()),
            Self::Expulsion(player) => write!(f, "pex #{player}"),
            Self::Broadcast { player, message } => write!(f, "pbc #{player} {message}"),
            Self::RitualStart {
                position,
                level,
                participants,
            } => {
                write!(f, "pic {position} {level}")?;
                for p in participants {
                    write!(f, " #{p}")?;
                }
                Ok(())
            }
            Self::RitualEnd { position, success } => {
                write!(f, "pie {position} {}", u8::from(*success))
            }
            Self::EggLaying(player) => write!(f, "pfk #{player}"),
            Self::Drop { player, resource } => write!(f, "pdr #{player} {}", resource.index()),
            Self::Collect { player, resource } => write!(f, "pgt #{player} {}", resource.index()),
            Self::Death(player) => write!(f, "pdi #{player}"),
            Self::EggLaid {
                egg,
                parent,
                position,
            } => match parent {
                Some(p) => write!(f, "enw #{egg} #{p} {position}"),
                None => write!(f, "enw #{egg} #-1 {position}"),
            },
            Self::EggHatched(egg) => write!(f, "eht #{egg}"),
            Self::EggConnected(egg) => write!(f, "ebo #{egg}"),
            Self::EggDied(egg) => write!(f, "edi #{egg}"),
            Self::TimeUnit(t) => write!(f, "sgt {t}"),
            Self::TimeUnitSet(t) => write!(f, "sst {t}"),
            Self::GameEnd(team) => write!(f, "seg {team}"),
            Self::ServerMessage(msg) => write!(f, "smg {msg}"),
            Self::UnknownCommand => f.write_str("suc"),
            Self::BadParameters => f.write_str("sbp"),
        }
    }
}

/// Fan-out of [`ObserverEvent`]s to observer sessions.
#[derive(Debug, Default)]
pub struct NotificationBus {
    subscribers: BTreeMap<SessionId, Outbox>,
}

impl NotificationBus {
    /// A bus with no subscribers.
    pub const fn new() -> Self {
        Self {
            subscribers: BTreeMap::new(),
        }
    }

    /// Start delivering events to `session`.
    pub fn subscribe(&mut self, session: SessionId, outbox: Outbox) {
        self.subscribers.insert(session, outbox);
    }

    /// Stop delivering events to `session`.
    pub fn unsubscribe(&mut self, session: SessionId) {
        self.subscribers.remove(&session);
    }

    /// Number of subscribed observers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Send `event` to every observer. Observers whose connection is gone
    /// are dropped.
    pub fn publish(&mut self, event: &ObserverEvent) {
        if self.subscribers.is_empty() {
            return;
        }
        let line = event.to_string();
        trace!(line = %line, "observer event");
        self.subscribers.retain(|_, outbox| outbox.send_line(line.clone()));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::Outbound;

    #[test]
    fn renders_wire_lines() {
        let pos = Position::new(3, 4);
        let cases = [
            (ObserverEvent::MapSize { width: 10, height: 8 }, "msz 10 8"),
            (
                ObserverEvent::TileContent {
                    position: pos,
                    resources: Inventory::from_counts([1, 0, 2, 0, 0, 0, 1]),
                },
                "bct 3 4 1 0 2 0 0 0 1",
            ),
            (
                ObserverEvent::PlayerNew {
                    player: PlayerId(2),
                    position: pos,
                    orientation: Orientation::South,
                    level: 1,
                    team: "red".to_owned(),
                },
                "pnw #2 3 4 3 1 red",
            ),
            (
                ObserverEvent::RitualStart {
                    position: pos,
                    level: 2,
                    participants: vec![PlayerId(1), PlayerId(5)],
                },
                "pic 3 4 2 #1 #5",
            ),
            (ObserverEvent::RitualEnd { position: pos, success: false }, "pie 3 4 0"),
            (
                ObserverEvent::Collect {
                    player: PlayerId(1),
                    resource: Resource::Sibur,
                },
                "pgt #1 3",
            ),
            (
                ObserverEvent::EggLaid {
                    egg: EggId(0),
                    parent: Some(PlayerId(7)),
                    position: pos,
                },
                "enw #0 #7 3 4",
            ),
            (ObserverEvent::GameEnd("red".to_owned()), "seg red"),
            (ObserverEvent::UnknownCommand, "suc"),
            (ObserverEvent::BadParameters, "sbp"),
        ];
        for (event, line) in cases {
            assert_eq!(event.to_string(), line);
        }
    }

    #[test]
    fn publish_reaches_every_subscriber_and_prunes_dead_ones() {
        let mut bus = NotificationBus::new();
        let (a, mut rx_a) = Outbox::channel();
        let (b, rx_b) = Outbox::channel();
        bus.subscribe(SessionId(1), a);
        bus.subscribe(SessionId(2), b);
        drop(rx_b);

        bus.publish(&ObserverEvent::TimeUnit(100));
        assert_eq!(rx_a.try_recv().unwrap(), Outbound::Line("sgt 100".to_owned()));
        assert_eq!(bus.subscriber_count(), 1);

        bus.unsubscribe(SessionId(1));
        bus.publish(&ObserverEvent::TimeUnit(50));
        assert!(rx_a.try_recv().is_err());
    }
}
