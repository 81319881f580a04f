//! # Client Bridge
//!
//! Per-process adapter pairing one relay connection with local
//! publish/collect queues.
//!
//! ## Design
//!
//! The application loop is synchronous; network I/O is not. The bridge
//! decouples the two with a pair of unbounded queues and a pair of tasks:
//!
//! - `reader` task: framed line → decoded [`Event`] → `inbound` queue.
//!   Malformed lines are logged, counted and discarded; the reader never
//!   dies over bad payload.
//! - `writer` task: `outbound` queue → encoded line → write + flush.
//!
//! [`EventBridge::publish`] and [`EventBridge::collect`] never block
//! beyond queue insertion/drain, so they are safe to call from a frame
//! loop. There is no auto-reconnect: once the stream closes, the bridge
//! stays unusable until a new one is opened.

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::sync::mpsc;

use driftnet_proto::{decode_line, encode_line, Event};

/// Errors from bridge operations.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The outgoing event could not be encoded.
    #[error(transparent)]
    Encode(#[from] driftnet_proto::WireError),

    /// The connection is gone; the bridge must be re-opened.
    #[error("bridge connection closed")]
    Closed,
}

/// Interface to the distributed event queue.
///
/// ```no_run
/// # async fn demo() -> std::io::Result<()> {
/// use driftnet_net::EventBridge;
/// use driftnet_proto::{Event, EntityId};
///
/// let mut bridge = EventBridge::connect("localhost:32100").await?;
/// bridge.publish(&Event::new(EntityId::from("42-1"), [200.0, 300.0])).ok();
/// for event in bridge.collect() {
///     println!("{event:?}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct EventBridge {
    /// Sending side of the outbound queue (pre-encoded lines).
    outbound_tx: mpsc::UnboundedSender<String>,
    /// Receiving side of the inbound queue (decoded events).
    inbound_rx: mpsc::UnboundedReceiver<Event>,
    /// Count of discarded malformed inbound lines.
    decode_failures: Arc<AtomicU64>,
}

impl EventBridge {
    /// Establishes one transport connection and starts the reader and
    /// writer tasks.
    pub async fn connect(addr: impl ToSocketAddrs) -> io::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        let (read_half, write_half) = stream.into_split();

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let decode_failures = Arc::new(AtomicU64::new(0));

        tokio::spawn(read_loop(read_half, inbound_tx, Arc::clone(&decode_failures)));
        tokio::spawn(write_loop(write_half, outbound_rx));

        Ok(Self {
            outbound_tx,
            inbound_rx,
            decode_failures,
        })
    }

    /// Queues an event for transmission. Non-blocking; no delivery
    /// confirmation.
    pub fn publish(&self, event: &Event) -> Result<(), BridgeError> {
        let line = encode_line(event)?;
        self.outbound_tx.send(line).map_err(|_| BridgeError::Closed)
    }

    /// Drains and returns every event currently buffered, in arrival
    /// order. Non-blocking: returns immediately once the buffer is
    /// observed empty, so a second call with no intervening traffic
    /// yields an empty vec.
    pub fn collect(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(event) = self.inbound_rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Number of malformed inbound lines discarded so far.
    #[must_use]
    pub fn decode_failures(&self) -> u64 {
        self.decode_failures.load(Ordering::Relaxed)
    }

    /// Whether the writer task is still alive.
    ///
    /// `false` after the stream reported closing; the bridge will accept
    /// no further publishes.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.outbound_tx.is_closed()
    }
}

/// Reader task: framed lines → decoded events → inbound queue.
async fn read_loop(
    read_half: OwnedReadHalf,
    inbound_tx: mpsc::UnboundedSender<Event>,
    decode_failures: Arc<AtomicU64>,
) {
    let mut reader = BufReader::new(read_half);
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => {
                tracing::info!("relay closed the stream");
                return;
            }
            Ok(_) => match decode_line(&line) {
                Ok(event) => {
                    if inbound_tx.send(event).is_err() {
                        // Bridge dropped; nobody left to collect.
                        return;
                    }
                }
                Err(e) => {
                    decode_failures.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(error = %e, "discarding malformed event line");
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "read failed, reader exiting");
                return;
            }
        }
    }
}

/// Writer task: outbound queue → write + flush, one message at a time.
async fn write_loop(mut write_half: OwnedWriteHalf, mut outbound_rx: mpsc::UnboundedReceiver<String>) {
    while let Some(line) = outbound_rx.recv().await {
        if let Err(e) = write_half.write_all(line.as_bytes()).await {
            tracing::warn!(error = %e, "write failed, writer exiting");
            return;
        }
        if let Err(e) = write_half.flush().await {
            tracing::warn!(error = %e, "flush failed, writer exiting");
            return;
        }
    }
}
