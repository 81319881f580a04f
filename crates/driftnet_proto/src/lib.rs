//! # DRIFTNET Proto
//!
//! Common types used by both peers and the relay.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - `tokio`
//! - Any socket or runtime crate
//!
//! The wire format is the contract between processes; keeping it free of
//! I/O concerns means every component (and every test) can encode and
//! decode events without a runtime.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod constants;
pub mod event;
pub mod id;
pub mod wire;

pub use config::{ConfigError, NetConfig};
pub use constants::{
    DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TICK_RATE, ENTITY_SIZE, PLANE_BOUNDS, PUBLISH_RATE_LIMIT,
    STALE_AFTER_SECS,
};
pub use event::Event;
pub use id::{EntityId, IdGenerator};
pub use wire::{decode_line, encode_line, WireError, WireResult};
