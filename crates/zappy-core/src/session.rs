//! Sessions: one per accepted connection.
//!
//! The game never touches sockets. Each session holds an [`Outbox`], the
//! sending half of an unbounded channel drained by the connection task,
//! so writes from the mutator never block.

use std::collections::BTreeMap;

use tokio::sync::mpsc;
use zappy_types::{PlayerId, SessionId};

use crate::scheduler::ActionQueue;

/// A message for the connection task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Write this line followed by `\n`.
    Line(String),
    /// Flush what was queued before, then close the socket.
    Close,
}

/// Write side of a session as seen by the game.
#[derive(Debug, Clone)]
pub struct Outbox {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl Outbox {
    /// Wrap an existing sender.
    pub const fn new(tx: mpsc::UnboundedSender<Outbound>) -> Self {
        Self { tx }
    }

    /// A fresh outbox and the receiver its connection task drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Queue one line. Returns `false` if the connection is gone.
    pub fn send_line(&self, line: impl Into<String>) -> bool {
        self.tx.send(Outbound::Line(line.into())).is_ok()
    }

    /// Ask the connection task to close after flushing.
    pub fn close(&self) {
        // A closed receiver means the socket is already gone.
        let _ = self.tx.send(Outbound::Close);
    }

    /// Whether the connection task has stopped listening.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// What a session is allowed to say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    /// Handshake not done yet.
    Unauthenticated,
    /// Controls one player.
    Agent {
        /// The owned player.
        player: PlayerId,
        /// The player's team.
        team: String,
    },
    /// Watches and queries.
    Observer,
}

/// One connection's game-side state.
#[derive(Debug)]
pub struct Session {
    /// Identity, assigned by the reactor.
    pub id: SessionId,
    /// Current role.
    pub role: Role,
    /// Where replies go.
    pub outbox: Outbox,
    /// Deferred agent actions.
    pub queue: ActionQueue,
}

impl Session {
    /// A new unauthenticated session.
    pub const fn new(id: SessionId, outbox: Outbox) -> Self {
        Self {
            id,
            role: Role::Unauthenticated,
            outbox,
            queue: ActionQueue::new(),
        }
    }

    /// The player this session controls, if it is an agent.
    pub const fn player(&self) -> Option<PlayerId> {
        match &self.role {
            Role::Agent { player, .. } => Some(*player),
            Role::Unauthenticated | Role::Observer => None,
        }
    }
}

/// All live sessions, keyed by id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: BTreeMap<SessionId, Session>,
}

impl SessionRegistry {
    /// An empty registry.
    pub const fn new() -> Self {
        Self {
            sessions: BTreeMap::new(),
        }
    }

    /// Register a session, replacing any stale one with the same id.
    pub fn insert(&mut self, session: Session) {
        self.sessions.insert(session.id, session);
    }

    /// Look up a session.
    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    /// Look up a session mutably.
    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(&id)
    }

    /// Deregister a session. Its action queue goes with it.
    pub fn remove(&mut self, id: SessionId) -> Option<Session> {
        self.sessions.remove(&id)
    }

    /// Ids of every session, in id order.
    pub fn ids(&self) -> Vec<SessionId> {
        self.sessions.keys().copied().collect()
    }

    /// Number of sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is registered.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Send a line to the session owning `player`, if any.
    pub fn send_to_player(&self, player: PlayerId, line: impl Into<String>) -> bool {
        self.get(SessionId::from(player))
            .is_some_and(|s| s.outbox.send_line(line))
    }
}
