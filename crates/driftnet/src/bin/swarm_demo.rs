//! # Swarm Demo
//!
//! Headless peer: bouncing entities published through the relay,
//! remote entities dead-reckoned between updates. Run one relay and a
//! few of these side by side and watch the counts.
//!
//! ## Usage
//!
//! ```bash
//! swarm_demo --relay localhost:32100 --entities 10
//! ```

use driftnet::AppConfig;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments (simple parsing, no external deps)
    let args: Vec<String> = std::env::args().collect();
    let mut config = AppConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--relay" | "-r" => {
                if i + 1 < args.len() {
                    config.relay_addr = args[i + 1].clone();
                    i += 1;
                }
            }
            "--entities" | "-e" => {
                if i + 1 < args.len() {
                    config.local_entities = args[i + 1].parse().unwrap_or(config.local_entities);
                    i += 1;
                }
            }
            "--tick-rate" | "-t" => {
                if i + 1 < args.len() {
                    config.tick_rate = args[i + 1].parse().unwrap_or(config.tick_rate);
                    i += 1;
                }
            }
            "--duration" | "-d" => {
                if i + 1 < args.len() {
                    config.duration = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Usage: swarm_demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -r, --relay <ADDR>       Relay address (default: localhost:32100)");
                println!("  -e, --entities <NUM>     Local entities to spawn (default: 10)");
                println!("  -t, --tick-rate <RATE>   Frame rate in Hz (default: 30)");
                println!("  -d, --duration <SECS>    Run for N seconds then exit");
                println!("  -h, --help               Show this help");
                return;
            }
            _ => {}
        }
        i += 1;
    }

    if let Err(e) = driftnet::run(&config) {
        tracing::error!(error = %e, "peer loop ended");
        std::process::exit(1);
    }
}
