//! # Application Loop
//!
//! The headless peer loop: the synchronous frame loop a renderer would
//! hook into, minus the renderer.
//!
//! Per frame, in order:
//!
//! 1. `collect()` received events, stamp each with the local receipt
//!    time by applying it to the world
//! 2. `tick(dt, now)` the world; publish every event that came due
//! 3. `sweep(now)` stale remote entities
//!
//! The async side (bridge tasks) runs on a runtime owned by this loop;
//! the loop itself never awaits.

use std::io;
use std::time::Duration;

use rand::SeedableRng;
use thiserror::Error;

use driftnet_net::{BridgeError, EventBridge};
use driftnet_proto::DEFAULT_TICK_RATE;
use driftnet_sim::{SimClock, World};

/// Errors that end the application loop.
#[derive(Error, Debug)]
pub enum AppError {
    /// Runtime construction or connection failure.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// The bridge closed; the loop cannot continue without re-opening.
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Configuration for one peer process.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Relay `host:port` to connect to.
    pub relay_addr: String,
    /// Number of local entities to spawn at start.
    pub local_entities: usize,
    /// Frame rate of the application loop.
    pub tick_rate: u32,
    /// Stop after this many seconds; `None` runs until the connection
    /// drops or the process is killed.
    pub duration: Option<f32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            relay_addr: driftnet_proto::NetConfig::default().addr(),
            local_entities: 10,
            tick_rate: DEFAULT_TICK_RATE,
            duration: None,
        }
    }
}

/// Runs the peer loop until the duration elapses or the bridge closes.
pub fn run(config: &AppConfig) -> Result<(), AppError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_io()
        .build()?;
    let mut bridge = runtime.block_on(EventBridge::connect(&config.relay_addr))?;
    tracing::info!(relay = %config.relay_addr, "connected to relay");

    let mut world = World::new();
    let mut rng = rand::rngs::StdRng::from_entropy();
    world.spawn_local(config.local_entities, &mut rng);
    tracing::info!(entities = config.local_entities, "spawned local entities");

    let clock = SimClock::new();
    let frame = Duration::from_secs_f32(1.0 / config.tick_rate as f32);
    let status_every = u64::from(config.tick_rate.max(1));

    let mut last = clock.now();
    let mut frames: u64 = 0;
    loop {
        std::thread::sleep(frame);
        let now = clock.now();
        let dt = now - last;
        last = now;

        for event in bridge.collect() {
            world.apply_remote(event, now);
        }

        for event in world.tick(dt, now) {
            bridge.publish(&event)?;
        }

        let evicted = world.sweep(now);
        for id in &evicted {
            tracing::info!(%id, "remote entity aged out");
        }

        frames += 1;
        if frames % status_every == 0 {
            tracing::info!(
                t = f64::from(now),
                local = world.local_count(),
                remote = world.remote_count(),
                decode_failures = bridge.decode_failures(),
                "status"
            );
        }

        if !bridge.is_open() {
            tracing::warn!("bridge closed, stopping");
            return Err(AppError::Bridge(BridgeError::Closed));
        }
        if let Some(limit) = config.duration {
            if now >= limit {
                tracing::info!("duration reached, stopping");
                return Ok(());
            }
        }
    }
}
