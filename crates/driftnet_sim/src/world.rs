//! # World
//!
//! The active entity set and the three per-frame operations the
//! application loop drives: tick, reconcile, sweep.

use std::collections::HashMap;

use rand::Rng;

use driftnet_proto::{
    EntityId, Event, IdGenerator, ENTITY_SIZE, PLANE_BOUNDS, PUBLISH_RATE_LIMIT, STALE_AFTER_SECS,
};

use crate::entity::Entity;

/// Spawn position of every local entity.
const SPAWN_POS: [f32; 2] = [42.0, 200.0];

/// Range of the uniform spawn velocity per axis.
const SPAWN_SPEED_MIN: f32 = 50.0;
const SPAWN_SPEED_MAX: f32 = 110.0;

/// The bounded plane and every entity on it.
///
/// Owns the process' [`IdGenerator`]; never touches the network. The
/// caller wires [`World::tick`]'s returned events to the bridge and
/// feeds collected events into [`World::apply_remote`].
pub struct World {
    bounds: [f32; 2],
    entities: HashMap<EntityId, Entity>,
    publish_interval: f32,
    stale_after: f32,
    ids: IdGenerator,
}

impl World {
    /// Creates an empty world with the default plane bounds, publish
    /// rate limit and staleness threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::with_bounds(PLANE_BOUNDS)
    }

    /// Creates an empty world on a custom plane.
    #[must_use]
    pub fn with_bounds(bounds: [f32; 2]) -> Self {
        Self {
            bounds,
            entities: HashMap::new(),
            publish_interval: PUBLISH_RATE_LIMIT,
            stale_after: STALE_AFTER_SECS,
            ids: IdGenerator::new(),
        }
    }

    /// Overrides the minimum seconds between publishes of one entity.
    #[must_use]
    pub fn with_publish_interval(mut self, interval: f32) -> Self {
        self.publish_interval = interval;
        self
    }

    /// Overrides the staleness eviction threshold.
    #[must_use]
    pub fn with_stale_after(mut self, secs: f32) -> Self {
        self.stale_after = secs;
        self
    }

    /// Overrides the id generator (tests, fixed process bases).
    #[must_use]
    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Spawns `count` local entities with randomized velocities.
    ///
    /// Called once at process start; local entities live for the process
    /// lifetime.
    pub fn spawn_local(&mut self, count: usize, rng: &mut impl Rng) {
        for _ in 0..count {
            let id = self.ids.next();
            let speed = [
                rng.gen_range(SPAWN_SPEED_MIN..SPAWN_SPEED_MAX),
                rng.gen_range(SPAWN_SPEED_MIN..SPAWN_SPEED_MAX),
            ];
            self.entities
                .insert(id.clone(), Entity::local(id, SPAWN_POS, speed, ENTITY_SIZE));
        }
    }

    /// One physics tick over every entity.
    ///
    /// Local entities integrate and bounce; remote entities extrapolate
    /// from their anchors. Returns the publish events that came due this
    /// tick, in no particular order.
    pub fn tick(&mut self, dt: f32, now: f32) -> Vec<Event> {
        let mut due = Vec::new();
        for entity in self.entities.values_mut() {
            entity.advance(dt, self.bounds);
            entity.extrapolate(now);
            if let Some(event) = entity.due_publish(now, self.publish_interval) {
                due.push(event);
            }
        }
        due
    }

    /// Applies one received event.
    ///
    /// Unseen id → a new remote entity anchored on the event. Known
    /// remote id → anchor reset. Local ids are ignored; nothing on the
    /// wire overrides authoritative local state.
    pub fn apply_remote(&mut self, event: Event, now: f32) {
        match self.entities.get_mut(&event.id) {
            Some(entity) if entity.is_local() => {
                tracing::debug!(id = %event.id, "ignoring event for local entity");
            }
            Some(entity) => entity.apply_event(event, now),
            None => {
                tracing::debug!(id = %event.id, "adding new remote entity");
                let entity = Entity::remote(event, ENTITY_SIZE, now);
                self.entities.insert(entity.id.clone(), entity);
            }
        }
    }

    /// Staleness sweep: evicts every remote entity whose age exceeds the
    /// threshold. Returns the evicted ids.
    pub fn sweep(&mut self, now: f32) -> Vec<EntityId> {
        let stale: Vec<EntityId> = self
            .entities
            .values()
            .filter(|e| e.age(now).is_some_and(|age| age > self.stale_after))
            .map(|e| e.id.clone())
            .collect();
        for id in &stale {
            tracing::debug!(%id, "removing stale remote entity");
            self.entities.remove(id);
        }
        stale
    }

    /// Iterates over the active entities, for rendering.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Looks up one entity by id.
    #[must_use]
    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Total number of active entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the world holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of locally simulated entities.
    #[must_use]
    pub fn local_count(&self) -> usize {
        self.entities.values().filter(|e| e.is_local()).count()
    }

    /// Number of mirrored remote entities.
    #[must_use]
    pub fn remote_count(&self) -> usize {
        self.entities.values().filter(|e| e.is_remote()).count()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn seeded_world(base: &str) -> World {
        World::new().with_id_generator(IdGenerator::with_base(base))
    }

    fn remote_event(id: &str, pos: [f32; 2]) -> Event {
        Event::new(EntityId::from(id), pos).with_speed([5.0, 0.0])
    }

    #[test]
    fn test_spawn_local_fixed_count() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let mut world = seeded_world("a");
        world.spawn_local(10, &mut rng);
        assert_eq!(world.local_count(), 10);
        assert_eq!(world.remote_count(), 0);
        for e in world.entities() {
            assert_eq!(e.pos, [42.0, 200.0]);
            for axis in 0..2 {
                assert!(e.speed[axis] >= 50.0 && e.speed[axis] < 110.0);
            }
        }
    }

    #[test]
    fn test_publish_count_independent_of_tick_rate() {
        // 2 simulated seconds at 1 kHz with a 0.1 s rate limit:
        // ⌊2 / 0.1⌋ = 20 publishes, ±1.
        let mut rng = rand::rngs::StdRng::seed_from_u64(2);
        let mut world = seeded_world("b");
        world.spawn_local(1, &mut rng);

        let dt = 0.001;
        let mut now = 0.0;
        let mut publishes = 0;
        for _ in 0..2000 {
            now += dt;
            publishes += world.tick(dt, now).len();
        }
        assert!((19..=21).contains(&publishes), "got {publishes} publishes");
    }

    #[test]
    fn test_publish_count_same_at_higher_tick_rate() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let mut world = seeded_world("c");
        world.spawn_local(1, &mut rng);

        let dt = 0.002; // 500 Hz
        let mut now = 0.0;
        let mut publishes = 0;
        for _ in 0..1000 {
            now += dt;
            publishes += world.tick(dt, now).len();
        }
        assert!((19..=21).contains(&publishes), "got {publishes} publishes");
    }

    #[test]
    fn test_unseen_id_creates_remote_entity() {
        let mut world = seeded_world("d");
        world.apply_remote(remote_event("99-1", [10.0, 10.0]), 0.0);
        assert_eq!(world.remote_count(), 1);
        let entity = world.get(&EntityId::from("99-1")).unwrap();
        assert_eq!(entity.pos, [10.0, 10.0]);
    }

    #[test]
    fn test_remote_extrapolates_between_updates() {
        let mut world = seeded_world("e");
        world.apply_remote(remote_event("99-1", [10.0, 10.0]), 0.0);
        world.tick(1.0 / 30.0, 2.0);
        let entity = world.get(&EntityId::from("99-1")).unwrap();
        assert_eq!(entity.pos, [20.0, 10.0]);
    }

    #[test]
    fn test_staleness_eviction_boundary() {
        let mut world = seeded_world("f");
        world.apply_remote(remote_event("99-1", [0.0, 0.0]), 5.0);

        assert!(world.sweep(5.0 + 9.9).is_empty());
        assert_eq!(world.remote_count(), 1);

        let evicted = world.sweep(5.0 + 10.1);
        assert_eq!(evicted, vec![EntityId::from("99-1")]);
        assert_eq!(world.remote_count(), 0);
    }

    #[test]
    fn test_fresh_update_resets_staleness() {
        let mut world = seeded_world("g");
        world.apply_remote(remote_event("99-1", [0.0, 0.0]), 0.0);
        world.apply_remote(remote_event("99-1", [1.0, 1.0]), 9.0);
        assert!(world.sweep(10.5).is_empty());
        assert_eq!(world.remote_count(), 1);
    }

    #[test]
    fn test_sweep_never_evicts_locals() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(4);
        let mut world = seeded_world("h");
        world.spawn_local(3, &mut rng);
        assert!(world.sweep(1e6).is_empty());
        assert_eq!(world.local_count(), 3);
    }

    #[test]
    fn test_event_for_local_id_is_ignored() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let mut world = seeded_world("i");
        world.spawn_local(1, &mut rng);
        let id = world.entities().next().unwrap().id.clone();
        let before = world.get(&id).unwrap().pos;

        world.apply_remote(Event::new(id.clone(), [999.0, 999.0]), 0.0);
        assert_eq!(world.get(&id).unwrap().pos, before);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_containment_holds_for_whole_world() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(6);
        let mut world = seeded_world("j");
        world.spawn_local(10, &mut rng);

        let dt = 1.0 / 30.0;
        let mut now = 0.0;
        for _ in 0..3000 {
            now += dt;
            world.tick(dt, now);
            for e in world.entities() {
                for axis in 0..2 {
                    assert!(e.pos[axis] >= 0.0);
                    assert!(e.pos[axis] <= PLANE_BOUNDS[axis] - e.size);
                }
            }
        }
    }
}
