//! Server configuration

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

/// Environment variable holding the bind address.
pub const BIND_ADDR_ENV: &str = "CATALOG_BIND_ADDR";
/// Environment variable toggling sample data (`true`/`false`/`1`/`0`).
pub const SEED_ENV: &str = "CATALOG_SEED";

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 3000);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a socket address: {value:?}")]
    InvalidAddr { var: &'static str, value: String },
    #[error("{var} is not a boolean: {value:?}")]
    InvalidBool { var: &'static str, value: String },
}

/// Server configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,

    /// Preload the sample items and subscribers
    pub seed_sample_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            seed_sample_data: true,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `CATALOG_BIND_ADDR` and `CATALOG_SEED` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(BIND_ADDR_ENV) {
            config.bind_addr = value.parse().map_err(|_| ConfigError::InvalidAddr {
                var: BIND_ADDR_ENV,
                value,
            })?;
        }

        if let Some(value) = lookup(SEED_ENV) {
            config.seed_sample_data = match value.as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => return Err(ConfigError::InvalidBool { var: SEED_ENV, value }),
            };
        }

        Ok(config)
    }

    /// Set the bind address
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Enable or disable sample data
    pub fn seed_sample_data(mut self, seed: bool) -> Self {
        self.seed_sample_data = seed;
        self
    }
}
