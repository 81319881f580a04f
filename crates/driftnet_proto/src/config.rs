//! # Startup Configuration
//!
//! Where the relay lives. Loaded once at startup from a small TOML file,
//! or defaulted for local development.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_HOST, DEFAULT_PORT};

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Network configuration shared by peers and the relay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetConfig {
    /// Hostname of the relay, or `localhost` for local development.
    pub host: String,
    /// TCP port the relay listens on.
    pub port: u16,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

impl NetConfig {
    /// Parses a configuration from a TOML document.
    ///
    /// Missing fields fall back to the defaults.
    pub fn from_toml_str(doc: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(doc)?)
    }

    /// Returns the `host:port` connect address.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the `0.0.0.0:port` bind address for the relay.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
