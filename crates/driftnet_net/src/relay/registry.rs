//! # Peer Registry
//!
//! The relay's shared set of connected peers.
//!
//! ## Discipline
//!
//! Registration, removal and broadcast iteration all happen under one
//! mutex, and the lock is never held across an await point: enqueueing
//! onto an unbounded channel is synchronous, so broadcast never suspends.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

/// Outbound queue depth at which the relay starts warning about a slow
/// consumer. The queue itself stays unbounded; this only makes the
/// growth observable.
pub const QUEUE_WARN_DEPTH: usize = 1024;

/// Unique identifier for a relay connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PeerId(pub u64);

impl std::fmt::Display for PeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "peer-{}", self.0)
    }
}

/// Connection record for one accepted peer.
///
/// Owns the sending side of the peer's outbound queue; the sender task
/// owns the receiving side. Dropping the record (on removal) closes the
/// queue, which terminates the sender task once it has drained.
#[derive(Debug)]
pub(crate) struct Peer {
    /// Outbound message queue (raw lines, exact bytes as received).
    tx: mpsc::UnboundedSender<String>,
    /// Current outbound queue depth.
    depth: Arc<AtomicUsize>,
}

impl Peer {
    pub(crate) fn new(tx: mpsc::UnboundedSender<String>, depth: Arc<AtomicUsize>) -> Self {
        Self { tx, depth }
    }

    /// Enqueues one line for this peer. Returns the new queue depth, or
    /// `None` if the peer's sender task is gone.
    fn enqueue(&self, line: String) -> Option<usize> {
        self.tx.send(line).ok()?;
        Some(self.depth.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// Shared mutable set of connected peers.
#[derive(Debug, Default)]
pub(crate) struct PeerRegistry {
    peers: Mutex<HashMap<PeerId, Peer>>,
}

impl PeerRegistry {
    /// Registers a newly accepted peer.
    pub(crate) fn register(&self, id: PeerId, peer: Peer) {
        self.peers.lock().insert(id, peer);
    }

    /// Removes a peer, closing its outbound queue.
    pub(crate) fn remove(&self, id: PeerId) {
        self.peers.lock().remove(&id);
    }

    /// Number of currently connected peers.
    pub(crate) fn len(&self) -> usize {
        self.peers.lock().len()
    }

    /// Enqueues `line` onto every peer's outbound queue except the
    /// sender's own. Returns the number of peers the line was queued for.
    pub(crate) fn broadcast(&self, line: &str, from: PeerId) -> usize {
        let peers = self.peers.lock();
        let mut queued = 0;
        for (id, peer) in peers.iter() {
            if *id == from {
                continue;
            }
            // A None here means the sender task is already gone; the
            // receiver cleanup will remove the record shortly.
            if let Some(depth) = peer.enqueue(line.to_owned()) {
                queued += 1;
                if depth == QUEUE_WARN_DEPTH {
                    tracing::warn!(%id, depth, "slow consumer: outbound queue growing");
                }
            }
        }
        queued
    }
}
