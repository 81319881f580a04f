//! # DRIFTNET Sim
//!
//! The entity synchronization model: what each peer simulates locally and
//! how it reconstructs smooth motion for everyone else.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         WORLD                               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐       │
//! │  │ Local        │  │ Remote       │  │ Staleness    │       │
//! │  │ (physics +   │  │ (dead        │  │ sweep        │       │
//! │  │  publish)    │  │  reckoning)  │  │ (10s evict)  │       │
//! │  └──────────────┘  └──────────────┘  └──────────────┘       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Local entities own authoritative state and publish it at a bounded
//! rate; remote entities are anchored on the last received event and
//! extrapolated linearly between updates. The world never touches the
//! network: [`World::tick`] returns the events that came due, and the
//! caller feeds received events back through [`World::apply_remote`].

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod clock;
pub mod entity;
pub mod world;

pub use clock::SimClock;
pub use entity::{Anchor, Entity, Role};
pub use world::World;
