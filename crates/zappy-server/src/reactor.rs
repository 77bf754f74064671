//! The connection reactor.
//!
//! One task owns the [`Game`] and is its only mutator. It waits on four
//! sources at once:
//!
//! - the listener, for new sessions;
//! - the event channel fed by every connection task;
//! - a poll interval, so time advances without any I/O;
//! - the shutdown future.
//!
//! After a win the reactor keeps serving observers for the configured
//! grace period, then exits.

use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinSet;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use zappy_core::{Game, Outbox, ServerConfig, TickStatus};
use zappy_types::SessionId;

use crate::connection::{Connection, Event};
use crate::error::ServerError;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The shutdown future completed.
    Interrupted,
    /// A team won and the grace period elapsed.
    Finished {
        /// The winning team.
        winner: String,
    },
}

/// A bound listener plus the game it serves.
#[derive(Debug)]
pub struct Reactor {
    listener: TcpListener,
    game: Game,
    events_tx: UnboundedSender<Event>,
    events_rx: UnboundedReceiver<Event>,
    next_session: Option<SessionId>,
    connections: JoinSet<()>,
}

impl Reactor {
    /// Build the game and bind `0.0.0.0:<port>`.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
        let game = Game::new(config)?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Ok(Self {
            listener,
            game,
            events_tx,
            events_rx,
            next_session: Some(SessionId(1)),
            connections: JoinSet::new(),
        })
    }

    /// The address actually bound, useful with port 0.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` completes or a finished game's grace period
    /// runs out.
    pub async fn run<F>(mut self, shutdown: F) -> Result<RunOutcome, ServerError>
    where
        F: Future<Output = ()>,
    {
        let network = self.game.config().network.clone();
        let start = Instant::now();
        let mut poll = tokio::time::interval(Duration::from_millis(network.poll_interval_ms));
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let grace_period = Duration::from_millis(network.shutdown_grace_ms);
        let grace = tokio::time::sleep(grace_period);
        tokio::pin!(grace, shutdown);
        let mut winner: Option<String> = None;

        info!(
            width = self.game.world().map().width(),
            height = self.game.world().map().height(),
            frequency = self.game.clock().frequency(),
            "reactor running"
        );

        let outcome = loop {
            tokio::select! {
                biased;

                () = &mut shutdown => {
                    info!("shutdown requested");
                    break RunOutcome::Interrupted;
                }
                () = &mut grace, if winner.is_some() => {
                    let winner = winner.take().unwrap_or_default();
                    break RunOutcome::Finished { winner };
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => self.accept(stream, peer),
                    Err(e) => warn!(error = %e, "accept failed"),
                },
                Some(event) = self.events_rx.recv() => {
                    self.handle(event, start.elapsed());
                }
                _ = poll.tick() => {
                    let status = self.game.tick(start.elapsed());
                    if let TickStatus::Finished { winner: team } = status {
                        if winner.is_none() {
                            info!(team = %team, grace_ms = network.shutdown_grace_ms, "game over");
                            let now = Instant::now();
                            grace.as_mut().reset(now.checked_add(grace_period).unwrap_or(now));
                            winner = Some(team);
                        }
                    }
                }
                Some(joined) = self.connections.join_next() => {
                    if let Err(e) = joined {
                        warn!(error = %e, "connection task failed");
                    }
                }
            }
        };

        self.game.close_all();
        let drain = async { while self.connections.join_next().await.is_some() {} };
        if tokio::time::timeout(grace_period, drain).await.is_err() {
            warn!("connections still open at exit, aborting them");
            self.connections.abort_all();
        }
        info!(outcome = ?outcome, "reactor stopped");
        Ok(outcome)
    }

    fn accept(&mut self, stream: TcpStream, peer: SocketAddr) {
        let Some(session) = self.next_session else {
            warn!(peer = %peer, "session ids exhausted, refusing connection");
            return;
        };
        self.next_session = session.next();
        if let Err(e) = stream.set_nodelay(true) {
            debug!(session = %session, error = %e, "failed to set TCP_NODELAY");
        }
        info!(session = %session, peer = %peer, "connection accepted");

        let (outbox, rx) = Outbox::channel();
        self.game.open_session(session, outbox);
        let connection = Connection::new(
            session,
            peer,
            stream,
            rx,
            self.events_tx.clone(),
            self.game.config().network.max_line_len,
        );
        self.connections.spawn(connection.run());
    }

    fn handle(&mut self, event: Event, now: Duration) {
        match event {
            Event::Line { session, line } => self.game.handle_line(session, &line, now),
            Event::Closed { session } => self.game.close_session(session),
        }
    }
}
