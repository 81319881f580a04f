//! # Entity Identity
//!
//! Globally unique entity ids of the form `{base}-{counter}`.
//!
//! ## Design
//!
//! - The base is captured once per process (the process id), the counter
//!   is per-process and monotonically increasing.
//! - No two entities created by any process ever share an id for the
//!   lifetime of the system, as long as bases differ between processes.
//! - The generator is an explicit object with a thread-safe `next()`,
//!   owned by whoever spawns entities. No global mutable state.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Unique identifier for an entity, local or remote.
///
/// Opaque on the wire: the relay and the bridge treat it as a string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Process-owned generator of unique [`EntityId`]s.
///
/// Seeded once at startup; `next()` may be called from any thread.
#[derive(Debug)]
pub struct IdGenerator {
    /// Process-scoped base, shared by all ids from this generator.
    base: String,
    /// Monotonically increasing per-process counter.
    counter: AtomicU64,
}

impl IdGenerator {
    /// Creates a generator seeded with this process' id.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base(std::process::id().to_string())
    }

    /// Creates a generator with an explicit base (tests, tooling).
    #[must_use]
    pub fn with_base(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            counter: AtomicU64::new(0),
        }
    }

    /// Returns the next unique id.
    pub fn next(&self) -> EntityId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        EntityId(format!("{}-{}", self.base, n))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
