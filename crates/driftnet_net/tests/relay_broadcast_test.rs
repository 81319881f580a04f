//! # Relay Fan-Out Tests
//!
//! End-to-end checks of the broadcast contract over real sockets:
//! delivery to every other peer, byte-exact forwarding, per-connection
//! ordering, no echo, and failure containment.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};

use driftnet_net::RelayServer;

/// Binds a relay on an ephemeral port and runs it in the background.
async fn start_relay() -> SocketAddr {
    let server = RelayServer::bind("127.0.0.1:0").await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run());
    addr
}

/// A raw peer: no bridge, no decoding, byte-exact observation.
struct RawPeer {
    reader: BufReader<tokio::net::tcp::OwnedReadHalf>,
    writer: tokio::net::tcp::OwnedWriteHalf,
}

impl RawPeer {
    async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (read_half, write_half) = stream.into_split();
        Self {
            reader: BufReader::new(read_half),
            writer: write_half,
        }
    }

    async fn send(&mut self, line: &str) {
        self.writer.write_all(line.as_bytes()).await.unwrap();
        self.writer.flush().await.unwrap();
    }

    async fn recv(&mut self) -> String {
        let mut line = String::new();
        timeout(Duration::from_secs(2), self.reader.read_line(&mut line))
            .await
            .expect("timed out waiting for a line")
            .unwrap();
        line
    }

    /// Asserts nothing arrives within the grace window.
    async fn assert_silent(&mut self) {
        let mut line = String::new();
        let read = timeout(Duration::from_millis(200), self.reader.read_line(&mut line)).await;
        assert!(read.is_err(), "unexpected line received: {line:?}");
    }
}

/// Lets the relay's accept loop register freshly connected peers.
async fn settle() {
    sleep(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn message_reaches_every_other_peer_unmodified_and_in_order() {
    let addr = start_relay().await;
    let mut a = RawPeer::connect(addr).await;
    let mut b = RawPeer::connect(addr).await;
    let mut c = RawPeer::connect(addr).await;
    settle().await;

    a.send("{\"id\":\"A-1\",\"pos\":[1,2]}\n").await;
    a.send("{\"id\":\"A-1\",\"pos\":[3,4]}\n").await;

    for peer in [&mut b, &mut c] {
        assert_eq!(peer.recv().await, "{\"id\":\"A-1\",\"pos\":[1,2]}\n");
        assert_eq!(peer.recv().await, "{\"id\":\"A-1\",\"pos\":[3,4]}\n");
    }
}

#[tokio::test]
async fn sender_never_receives_its_own_message() {
    let addr = start_relay().await;
    let mut a = RawPeer::connect(addr).await;
    let mut b = RawPeer::connect(addr).await;
    settle().await;

    a.send("{\"id\":\"A-1\",\"pos\":[1,2]}\n").await;

    assert_eq!(b.recv().await, "{\"id\":\"A-1\",\"pos\":[1,2]}\n");
    a.assert_silent().await;
}

#[tokio::test]
async fn relay_forwards_payload_it_cannot_interpret() {
    // The relay performs no decoding: garbage lines are fanned out too.
    let addr = start_relay().await;
    let mut a = RawPeer::connect(addr).await;
    let mut b = RawPeer::connect(addr).await;
    settle().await;

    a.send("definitely not json\n").await;
    assert_eq!(b.recv().await, "definitely not json\n");
}

#[tokio::test]
async fn disconnect_affects_only_that_peer() {
    let addr = start_relay().await;
    let mut a = RawPeer::connect(addr).await;
    let mut b = RawPeer::connect(addr).await;
    let c = RawPeer::connect(addr).await;
    settle().await;

    drop(c);
    settle().await;

    a.send("{\"id\":\"A-1\",\"pos\":[5,6]}\n").await;
    assert_eq!(b.recv().await, "{\"id\":\"A-1\",\"pos\":[5,6]}\n");
}

#[tokio::test]
async fn late_joiner_misses_earlier_traffic() {
    let addr = start_relay().await;
    let mut a = RawPeer::connect(addr).await;
    let mut b = RawPeer::connect(addr).await;
    settle().await;

    a.send("{\"id\":\"A-1\",\"pos\":[1,1]}\n").await;
    assert_eq!(b.recv().await, "{\"id\":\"A-1\",\"pos\":[1,1]}\n");

    // No history: a peer connecting after the fact receives nothing.
    let mut late = RawPeer::connect(addr).await;
    settle().await;
    late.assert_silent().await;
}
