//! # Relayer Configuration
//!
//! Layered configuration: built-in defaults, then an optional TOML file, then
//! environment variables, then CLI flags (applied by the caller).
//!
//! ```toml
//! [http]
//! host = "127.0.0.1"
//! port = 6500
//!
//! [store]
//! backend = "redis"
//! redis_url = "redis://127.0.0.1:6379/0"
//! timeout_ms = 5000
//!
//! [[chains]]
//! id = 2
//! name = "Ethereum"
//! ```

use serde::{Deserialize, Serialize};
use shared_bus::DEFAULT_STORE_TIMEOUT_MS;
use shared_types::ChainDescriptor;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        /// File requested.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override could not be parsed.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },

    /// No chains to sample.
    #[error("Chain set is empty")]
    EmptyChainSet,

    /// Two chains share an id.
    #[error("Duplicate chain id {0}")]
    DuplicateChain(u64),

    /// Store calls would fail immediately.
    #[error("Store timeout must be greater than zero")]
    ZeroTimeout,

    /// Host/port do not form a socket address.
    #[error("Invalid listen address {0:?}")]
    InvalidAddress(String),
}

/// Complete relayer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayerConfig {
    /// HTTP front door.
    pub http: HttpConfig,
    /// Shared store.
    pub store: StoreConfig,
    /// Chains sampled by the health sampler.
    pub chains: Vec<ChainDescriptor>,
}

impl Default for RelayerConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            store: StoreConfig::default(),
            chains: default_chains(),
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind host, an IP literal.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 6500,
        }
    }
}

/// Which store implementation backs the correction bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local; records vanish on exit.
    Memory,
    /// Redis shared with relay workers.
    Redis,
}

/// Shared store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend selection.
    pub backend: StoreBackend,
    /// Redis URL, used by the `redis` backend.
    pub redis_url: String,
    /// Deadline for each operator-facing store call, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            redis_url: "redis://127.0.0.1:6379/0".to_string(),
            timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
        }
    }
}

fn default_chains() -> Vec<ChainDescriptor> {
    vec![
        ChainDescriptor::new(0, "Poly"),
        ChainDescriptor::new(2, "Ethereum"),
        ChainDescriptor::new(6, "BSC"),
        ChainDescriptor::new(7, "Heco"),
        ChainDescriptor::new(12, "OKExChain"),
        ChainDescriptor::new(17, "Polygon"),
    ]
}

impl RelayerConfig {
    /// Parse a TOML document. Missing sections take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Defaults, then `path` if given, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml_str(&text)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Apply `RELAYER_*` overrides read through `lookup`.
    ///
    /// - `RELAYER_HOST`
    /// - `RELAYER_PORT`
    /// - `RELAYER_REDIS_URL` (also selects the redis backend)
    /// - `RELAYER_STORE_TIMEOUT_MS`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("RELAYER_HOST") {
            self.http.host = host;
        }
        if let Some(port) = lookup("RELAYER_PORT") {
            self.http.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: "RELAYER_PORT",
                value: port,
            })?;
        }
        if let Some(url) = lookup("RELAYER_REDIS_URL") {
            self.store.redis_url = url;
            self.store.backend = StoreBackend::Redis;
        }
        if let Some(ms) = lookup("RELAYER_STORE_TIMEOUT_MS") {
            self.store.timeout_ms = ms.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: "RELAYER_STORE_TIMEOUT_MS",
                value: ms,
            })?;
        }
        Ok(())
    }

    /// Reject configurations the runtime cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chains.is_empty() {
            return Err(ConfigError::EmptyChainSet);
        }
        let mut seen = HashSet::new();
        for chain in &self.chains {
            if !seen.insert(chain.id) {
                return Err(ConfigError::DuplicateChain(chain.id.0));
            }
        }
        if self.store.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        self.http_addr()?;
        Ok(())
    }

    /// Deadline for operator-facing store calls.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store.timeout_ms)
    }

    /// Socket address the HTTP front door binds.
    pub fn http_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.http.host, self.http.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddress(addr))
    }
}
