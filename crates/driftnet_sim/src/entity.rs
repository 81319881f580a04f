//! # Entities
//!
//! One entity record with a role tag, instead of a class hierarchy:
//!
//! - `Local`: owns authoritative position/velocity, advances via the
//!   physics tick, publishes its state at a bounded rate.
//! - `Remote`: owns a reconciled position for rendering; authoritative
//!   state lives in the originating process and arrives as events.

use driftnet_proto::{EntityId, Event};

/// The last applied event for a remote entity, tagged with the local
/// receipt time.
///
/// `pos`/`speed` are pulled out of the event once on application; the
/// event itself is kept verbatim so nothing the sender attached is lost.
#[derive(Clone, Debug)]
pub struct Anchor {
    /// The event as received, untouched.
    pub event: Event,
    /// Anchor position (the event's `pos`).
    pub pos: [f32; 2],
    /// Anchor velocity (the event's `speed`, or zero if absent).
    pub speed: [f32; 2],
    /// Local simulation time when the event was applied. Stamped by the
    /// receiving side; the sender's own `time` field is not trusted for
    /// extrapolation.
    pub t_recv: f32,
}

impl Anchor {
    /// Builds an anchor from a received event.
    #[must_use]
    pub fn from_event(event: Event, t_recv: f32) -> Self {
        let pos = event.pos;
        let speed = event.speed().unwrap_or([0.0, 0.0]);
        Self {
            event,
            pos,
            speed,
            t_recv,
        }
    }
}

/// Role-specific state of an entity.
#[derive(Clone, Debug)]
pub enum Role {
    /// Simulated and published by this process.
    Local {
        /// Simulation time of the last publish.
        last_publish: f32,
    },
    /// Mirrored from another process.
    Remote {
        /// Last applied event plus receipt time.
        anchor: Anchor,
    },
}

/// A moving entity on the bounded plane.
#[derive(Clone, Debug)]
pub struct Entity {
    /// Globally unique id.
    pub id: EntityId,
    /// Current position (for local entities: authoritative; for remote
    /// entities: the reconciled render position).
    pub pos: [f32; 2],
    /// Current velocity.
    pub speed: [f32; 2],
    /// Bounding size.
    pub size: f32,
    /// Local or remote behavior.
    pub role: Role,
}

impl Entity {
    /// Creates a local entity.
    #[must_use]
    pub fn local(id: EntityId, pos: [f32; 2], speed: [f32; 2], size: f32) -> Self {
        Self {
            id,
            pos,
            speed,
            size,
            role: Role::Local { last_publish: 0.0 },
        }
    }

    /// Creates a remote entity anchored on its first event.
    #[must_use]
    pub fn remote(event: Event, size: f32, t_recv: f32) -> Self {
        let anchor = Anchor::from_event(event, t_recv);
        Self {
            id: anchor.event.id.clone(),
            pos: anchor.pos,
            speed: anchor.speed,
            size,
            role: Role::Remote { anchor },
        }
    }

    /// Returns true for locally simulated entities.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self.role, Role::Local { .. })
    }

    /// Returns true for mirrored remote entities.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self.role, Role::Remote { .. })
    }

    /// Local physics tick: integrate velocity, reflect off the plane
    /// edges.
    ///
    /// Reflection is elastic and approximate: the velocity component is
    /// pointed back inward and the position clamped into
    /// `[0, bound - size]`, so the containment invariant holds after
    /// every tick. No-op for remote entities.
    pub fn advance(&mut self, dt: f32, bounds: [f32; 2]) {
        if !self.is_local() {
            return;
        }
        for axis in 0..2 {
            self.pos[axis] += self.speed[axis] * dt;
            let max = bounds[axis] - self.size;
            if self.pos[axis] < 0.0 {
                self.speed[axis] = self.speed[axis].abs();
                self.pos[axis] = 0.0;
            } else if self.pos[axis] > max {
                self.speed[axis] = -self.speed[axis].abs();
                self.pos[axis] = max;
            }
        }
    }

    /// Dead reckoning: recompute the render position forward from the
    /// anchor. No-op for local entities.
    ///
    /// `pos = anchor.pos + anchor.speed * (now - t_recv)` — linear
    /// extrapolation from the last known state. Drifts as update latency
    /// grows or the remote changes direction; the next applied event
    /// resets the anchor.
    pub fn extrapolate(&mut self, now: f32) {
        if let Role::Remote { anchor } = &self.role {
            let dt = now - anchor.t_recv;
            self.pos = [
                anchor.pos[0] + anchor.speed[0] * dt,
                anchor.pos[1] + anchor.speed[1] * dt,
            ];
            self.speed = anchor.speed;
        }
    }

    /// Replaces the anchor of a remote entity with a newly received
    /// event. The position snaps to the new anchor; no blending.
    ///
    /// Ignored for local entities: nothing on the wire may override
    /// authoritative local state.
    pub fn apply_event(&mut self, event: Event, t_recv: f32) {
        if let Role::Remote { anchor } = &mut self.role {
            *anchor = Anchor::from_event(event, t_recv);
            self.pos = anchor.pos;
            self.speed = anchor.speed;
        }
    }

    /// Seconds since the last applied event, or `None` for local
    /// entities. Never negative for a monotonic `now`.
    #[must_use]
    pub fn age(&self, now: f32) -> Option<f32> {
        match &self.role {
            Role::Local { .. } => None,
            Role::Remote { anchor } => Some(now - anchor.t_recv),
        }
    }

    /// Returns the publish event if this local entity's rate limit has
    /// elapsed, updating the last-publish time.
    ///
    /// The event carries `{id, pos, speed, time}` with `time` being the
    /// sender's simulation clock at publish time.
    pub fn due_publish(&mut self, now: f32, interval: f32) -> Option<Event> {
        let Role::Local { last_publish } = &mut self.role else {
            return None;
        };
        if now - *last_publish <= interval {
            return None;
        }
        *last_publish = now;
        Some(
            Event::new(self.id.clone(), self.pos)
                .with_speed(self.speed)
                .with_time(now),
        )
    }
}
