//! # Relay Server
//!
//! The central process that rebroadcasts each received event line to all
//! other connected peers.
//!
//! ## Design
//!
//! - One receiver task + one sender task per connection
//! - The receiver reads framed lines and fans them out, byte-for-byte
//!   unmodified, onto every *other* peer's outbound queue
//! - The sender drains its queue, writing and flushing one line at a time
//! - The relay never decodes payloads and never validates them
//!
//! ## Failure semantics
//!
//! A read error or stream closure on one connection closes and removes
//! that connection only. No retry, no reconnect: clients own their own
//! life cycle.

mod registry;

pub use registry::{PeerId, QUEUE_WARN_DEPTH};

use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tokio::sync::mpsc;

use registry::{Peer, PeerRegistry};

/// The event relay.
///
/// Accepts peer connections and forwards every message received from one
/// peer, unmodified, to all other currently connected peers.
pub struct RelayServer {
    listener: TcpListener,
    registry: Arc<PeerRegistry>,
    next_peer_id: AtomicU64,
}

impl RelayServer {
    /// Binds the relay to the given address.
    pub async fn bind(addr: impl ToSocketAddrs) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            registry: Arc::new(PeerRegistry::default()),
            next_peer_id: AtomicU64::new(1),
        })
    }

    /// Returns the bound local address.
    ///
    /// Needed by callers that bind port 0 and want the assigned port.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Number of currently connected peers.
    #[must_use]
    pub fn peer_count(&self) -> usize {
        self.registry.len()
    }

    /// Runs the accept loop forever.
    ///
    /// Each accepted connection gets a registered peer record and a pair
    /// of tasks; the loop itself only accepts and hands off.
    pub async fn run(self) -> io::Result<()> {
        tracing::info!(addr = %self.local_addr()?, "relay listening");
        loop {
            let (stream, addr) = self.listener.accept().await?;
            let id = PeerId(self.next_peer_id.fetch_add(1, Ordering::Relaxed));
            self.accept_peer(id, stream, addr);
        }
    }

    /// Registers one accepted connection and spawns its task pair.
    fn accept_peer(&self, id: PeerId, stream: TcpStream, addr: SocketAddr) {
        let (read_half, write_half) = stream.into_split();
        let (tx, rx) = mpsc::unbounded_channel();
        let depth = Arc::new(AtomicUsize::new(0));

        self.registry.register(id, Peer::new(tx, Arc::clone(&depth)));
        tracing::info!(%id, %addr, peers = self.registry.len(), "peer connected");

        tokio::spawn(send_loop(id, write_half, rx, depth));
        tokio::spawn(receive_loop(id, read_half, Arc::clone(&self.registry)));
    }
}

/// Receiver half of one connection.
///
/// Reads framed lines until clean EOF or a read error, fanning each line
/// out to all other peers. On exit it removes the peer record, which
/// closes the outbound queue and lets the sender task finish.
async fn receive_loop(id: PeerId, read_half: OwnedReadHalf, registry: Arc<PeerRegistry>) {
    let mut reader = BufReader::new(read_half);
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            // Clean stream end.
            Ok(0) => {
                tracing::info!(%id, "peer closed connection");
                break;
            }
            Ok(_) => {
                let queued = registry.broadcast(&line, id);
                tracing::trace!(%id, queued, bytes = line.len(), "forwarded line");
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "read failed, dropping peer");
                break;
            }
        }
    }
    registry.remove(id);
    tracing::info!(%id, peers = registry.len(), "peer removed");
}

/// Sender half of one connection.
///
/// Drains the peer's outbound queue one message at a time, flushing each
/// write before dequeuing the next. Exits when the queue closes (peer
/// removed) or the stream reports closing.
async fn send_loop(
    id: PeerId,
    mut write_half: OwnedWriteHalf,
    mut rx: mpsc::UnboundedReceiver<String>,
    depth: Arc<AtomicUsize>,
) {
    while let Some(line) = rx.recv().await {
        depth.fetch_sub(1, Ordering::Relaxed);
        if let Err(e) = write_half.write_all(line.as_bytes()).await {
            tracing::debug!(%id, error = %e, "write failed, sender exiting");
            return;
        }
        if let Err(e) = write_half.flush().await {
            tracing::debug!(%id, error = %e, "flush failed, sender exiting");
            return;
        }
    }
    // Queue closed: receiver already unregistered us. Dropping the write
    // half closes the outbound stream.
    tracing::debug!(%id, "outbound queue closed, sender exiting");
}
