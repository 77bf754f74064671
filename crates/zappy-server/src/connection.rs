//! One task per accepted socket.
//!
//! The task owns the socket and nothing else. Complete lines go to the
//! reactor as [`Event::Line`]; replies come back through the session's
//! outbox. When the peer goes away the reactor hears [`Event::Closed`].
//! When the reactor closes the session, queued replies are flushed first.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};
use zappy_core::{LineBuffer, Outbound};
use zappy_types::SessionId;

/// What a connection tells the reactor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A complete line, without its terminator.
    Line {
        /// Sending session.
        session: SessionId,
        /// The line.
        line: String,
    },
    /// The socket is gone.
    Closed {
        /// The session that lost its socket.
        session: SessionId,
    },
}

/// Why a connection stopped reading.
#[derive(Debug)]
enum Ending {
    /// Peer hung up or broke the framing; the reactor must be told.
    Lost(&'static str),
    /// The reactor asked for the close, or is gone.
    Closed,
}

/// A socket bound to one session.
#[derive(Debug)]
pub struct Connection {
    session: SessionId,
    peer: SocketAddr,
    stream: TcpStream,
    outbox: UnboundedReceiver<Outbound>,
    events: UnboundedSender<Event>,
    max_line_len: usize,
}

impl Connection {
    /// Bind `stream` to `session`.
    pub const fn new(
        session: SessionId,
        peer: SocketAddr,
        stream: TcpStream,
        outbox: UnboundedReceiver<Outbound>,
        events: UnboundedSender<Event>,
        max_line_len: usize,
    ) -> Self {
        Self {
            session,
            peer,
            stream,
            outbox,
            events,
            max_line_len,
        }
    }

    /// Pump bytes both ways until either side closes.
    pub async fn run(self) {
        let Self {
            session,
            peer,
            stream,
            mut outbox,
            events,
            max_line_len,
        } = self;
        let (mut rd, mut wr) = stream.into_split();
        let mut buffer = LineBuffer::new(max_line_len);

        let ending = loop {
            tokio::select! {
                read = rd.read_buf(buffer.read_target()) => match read {
                    Ok(0) => break Ending::Lost("peer closed"),
                    Ok(_) => {
                        if let Err(ending) = forward_lines(session, &mut buffer, &events) {
                            break ending;
                        }
                    }
                    Err(e) => {
                        debug!(session = %session, error = %e, "read failed");
                        break Ending::Lost("read error");
                    }
                },
                out = outbox.recv() => match out {
                    Some(Outbound::Line(line)) => {
                        if let Err(e) = write_line(&mut wr, line).await {
                            debug!(session = %session, error = %e, "write failed");
                            break Ending::Lost("write error");
                        }
                    }
                    Some(Outbound::Close) | None => break Ending::Closed,
                },
            }
        };

        match ending {
            Ending::Lost(reason) => {
                debug!(session = %session, peer = %peer, reason, "connection lost");
                // The reactor may already be gone during shutdown.
                let _ = events.send(Event::Closed { session });
            }
            Ending::Closed => {
                if let Err(e) = wr.shutdown().await {
                    debug!(session = %session, error = %e, "shutdown failed");
                }
                debug!(session = %session, peer = %peer, "connection closed by server");
            }
        }
    }
}

/// Hand every complete buffered line to the reactor, in arrival order.
fn forward_lines(
    session: SessionId,
    buffer: &mut LineBuffer,
    events: &UnboundedSender<Event>,
) -> Result<(), Ending> {
    loop {
        match buffer.next_line() {
            Ok(Some(line)) => {
                if events.send(Event::Line { session, line }).is_err() {
                    return Err(Ending::Closed);
                }
            }
            Ok(None) => return Ok(()),
            Err(e) => {
                warn!(session = %session, error = %e, "dropping session");
                return Err(Ending::Lost("line too long"));
            }
        }
    }
}

async fn write_line(wr: &mut OwnedWriteHalf, mut line: String) -> std::io::Result<()> {
    line.push('\n');
    wr.write_all(line.as_bytes()).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tokio::io::{AsyncBufReadExt, BufReader};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    use super::*;

    async fn pair() -> (TcpStream, TcpStream, SocketAddr) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let client = TcpStream::connect(addr).await.unwrap();
        let (server, peer) = listener.accept().await.unwrap();
        (client, server, peer)
    }

    #[tokio::test]
    async fn lines_flow_both_ways() {
        let (client, server, peer) = pair().await;
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let (ev_tx, mut ev_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(Connection::new(SessionId(1), peer, server, out_rx, ev_tx, 64).run());

        let (rd, mut wr) = client.into_split();
        wr.write_all(b"Forward\r\nLook\nInv").await.unwrap();
        assert_eq!(
            ev_rx.recv().await.unwrap(),
            Event::Line { session: SessionId(1), line: "Forward".to_owned() }
        );
        assert_eq!(
            ev_rx.recv().await.unwrap(),
            Event::Line { session: SessionId(1), line: "Look".to_owned() }
        );

        out_tx.send(Outbound::Line("ok".to_owned())).unwrap();
        out_tx.send(Outbound::Close).unwrap();
        let mut lines = BufReader::new(rd).lines();
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("ok"));
        assert_eq!(lines.next_line().await.unwrap(), None);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn peer_close_is_reported() {
        let (client, server, peer) = pair().await;
        let (_out_tx, out_rx) = mpsc::unbounded_channel();
        let (ev_tx, mut ev_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(Connection::new(SessionId(7), peer, server, out_rx, ev_tx, 64).run());

        drop(client);
        assert_eq!(ev_rx.recv().await.unwrap(), Event::Closed { session: SessionId(7) });
        task.await.unwrap();
    }

    #[tokio::test]
    async fn overlong_line_drops_the_session() {
        let (mut client, server, peer) = pair().await;
        let (_out_tx, out_rx) = mpsc::unbounded_channel();
        let (ev_tx, mut ev_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(Connection::new(SessionId(3), peer, server, out_rx, ev_tx, 8).run());

        client.write_all(b"Broadcast far too long").await.unwrap();
        assert_eq!(ev_rx.recv().await.unwrap(), Event::Closed { session: SessionId(3) });
        task.await.unwrap();
    }
}
