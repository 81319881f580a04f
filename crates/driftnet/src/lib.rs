//! # DRIFTNET
//!
//! A distributed event queue for peer state, and the machinery to make
//! sparse updates look like smooth motion.
//!
//! ## The pieces
//!
//! - [`driftnet_net::RelayServer`] — central relay, fans every line out
//!   to all other peers
//! - [`driftnet_net::EventBridge`] — per-process publish/collect adapter
//! - [`driftnet_sim::World`] — bouncing local entities, dead-reckoned
//!   remote entities, staleness eviction
//! - [`app`] — the headless loop that wires bridge and world together
//!
//! ## Data flow
//!
//! ```text
//! World ──tick──▶ events ──publish──▶ Bridge ──▶ Relay ──▶ other peers
//! World ◀──apply_remote── events ◀──collect── Bridge ◀── Relay
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod app;

pub use app::{run, AppConfig, AppError};
pub use driftnet_net::{EventBridge, RelayServer};
pub use driftnet_proto::{Event, EntityId, NetConfig};
pub use driftnet_sim::{SimClock, World};
