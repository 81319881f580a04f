//! # DRIFTNET Net - Event Distribution
//!
//! Networking for the distributed event queue: a central relay that fans
//! every received message out to all other connected peers, and a
//! per-process bridge that pairs one relay connection with local
//! publish/collect queues.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐  publish   ┌──────────────┐  line   ┌───────────────┐
//! │ App loop │───────────▶│ EventBridge  │────────▶│  RelayServer  │
//! │ (sync)   │◀───────────│ (2 queues,   │◀────────│  (fan-out to  │
//! └──────────┘  collect   │  2 tasks)    │  line   │  other peers) │
//!                         └──────────────┘         └───────────────┘
//! ```
//!
//! ## Guarantees
//!
//! - Per-connection FIFO end-to-end; no cross-peer ordering
//! - A peer never receives its own message back
//! - One connection's failure never touches another connection
//!
//! ## Non-guarantees
//!
//! - No delivery confirmation, no reconnection, no shutdown handshake
//! - Outbound queues are unbounded; depth is observable, not limited

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bridge;
pub mod relay;

pub use bridge::{BridgeError, EventBridge};
pub use relay::{PeerId, RelayServer, QUEUE_WARN_DEPTH};
