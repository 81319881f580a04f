//! # Shared Constants
//!
//! Defaults shared by the relay, the peers and the demo loop.
//!
//! **NOTE:** These values are baked into the binaries. Changes require a
//! rebuild of every peer, so prefer overriding them through [`crate::NetConfig`]
//! or the builder methods where one exists.

// =============================================================================
// NETWORK CONFIGURATION
// =============================================================================

/// Default relay host for peer connections.
pub const DEFAULT_HOST: &str = "localhost";

/// Default relay TCP port.
pub const DEFAULT_PORT: u16 = 32100;

// =============================================================================
// SIMULATION CONFIGURATION
// =============================================================================

/// Bounded plane the entities bounce inside (width, height).
pub const PLANE_BOUNDS: [f32; 2] = [640.0, 480.0];

/// Bounding size of every entity.
pub const ENTITY_SIZE: f32 = 20.0;

/// Minimum seconds between two publishes of the same local entity (10 Hz).
///
/// Deliberately slower than the application tick rate: publish frequency
/// bounds bandwidth, extrapolation hides the gap on the receiving side.
pub const PUBLISH_RATE_LIMIT: f32 = 1.0 / 10.0;

/// Seconds without an applied update before a remote entity is evicted.
pub const STALE_AFTER_SECS: f32 = 10.0;

/// Default application tick rate (physics + render frames per second).
pub const DEFAULT_TICK_RATE: u32 = 30;
