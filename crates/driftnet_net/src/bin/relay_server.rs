//! # Relay Server Binary
//!
//! The central event relay. Headless, runs until killed.
//!
//! ## Usage
//!
//! ```bash
//! relay_server --port 32100
//! relay_server --config driftnet.toml
//! ```

use driftnet_net::RelayServer;
use driftnet_proto::NetConfig;

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments (simple parsing, no external deps)
    let args: Vec<String> = std::env::args().collect();
    let mut config = NetConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    config.port = args[i + 1].parse().unwrap_or(config.port);
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    let doc = std::fs::read_to_string(&args[i + 1])?;
                    config = NetConfig::from_toml_str(&doc)
                        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Usage: relay_server [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -p, --port <PORT>      TCP port to bind (default: 32100)");
                println!("  -c, --config <FILE>    Load host/port from a TOML file");
                println!("  -h, --help             Show this help");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_io()
        .build()?;

    runtime.block_on(async {
        let server = RelayServer::bind(config.bind_addr()).await?;
        tracing::info!(addr = %server.local_addr()?, "relay server starting");
        server.run().await
    })
}
