//! Configuration types for the connector
//!
//! [`ConnectorConfig`] is the flat configuration bag supplied once at
//! construction. It deserializes from the camelCase keys hosts usually hand
//! over (`host`, `connectionTimeout`, `isClusterConnection`, ...) and is
//! normalised into [`ConnectionOptions`] before any connection is made.

use crate::error::{ConnectorError, ConnectorResult};
use crate::types::{parse_addresses, ServerAddress};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sentinel used by the configuration bag for "not configured"
pub const UNSET: i64 = -1;

fn unset() -> i64 {
    UNSET
}

/// How connections are established and shared, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// One shared connection to a single server
    StandaloneDirect,
    /// A bounded pool of connections to a single server
    StandalonePooled,
    /// One shared cluster connection
    ClusterDirect,
    /// A bounded pool of cluster connections
    ClusterPooled,
}

impl ConnectionMode {
    /// Select the mode from the two configuration switches
    #[must_use]
    pub const fn from_flags(is_cluster: bool, pooling: bool) -> Self {
        match (is_cluster, pooling) {
            (false, false) => Self::StandaloneDirect,
            (false, true) => Self::StandalonePooled,
            (true, false) => Self::ClusterDirect,
            (true, true) => Self::ClusterPooled,
        }
    }

    /// Whether the mode talks to a Redis Cluster
    #[must_use]
    pub const fn is_cluster(self) -> bool {
        matches!(self, Self::ClusterDirect | Self::ClusterPooled)
    }

    /// Whether connections are borrowed from a pool per call
    #[must_use]
    pub const fn is_pooled(self) -> bool {
        matches!(self, Self::StandalonePooled | Self::ClusterPooled)
    }
}

/// Configuration for connection pooling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PoolConfig {
    /// Maximum number of connections in the pool
    pub max_size: u32,
    /// Idle connections kept open, and opened eagerly at construction
    pub min_idle: u32,
    /// How long a borrower waits for a free connection
    pub max_wait_millis: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: 8,
            min_idle: 1,
            max_wait_millis: 30_000,
        }
    }
}

impl PoolConfig {
    /// Borrow timeout as a duration
    #[must_use]
    pub const fn max_wait(&self) -> Duration {
        Duration::from_millis(self.max_wait_millis)
    }

    fn validate(&self) -> ConnectorResult<()> {
        if self.max_size == 0 {
            return Err(ConnectorError::Configuration(
                "pool maxSize must be greater than zero".to_string(),
            ));
        }
        if self.min_idle > self.max_size {
            return Err(ConnectorError::Configuration(format!(
                "pool minIdle ({}) must not exceed maxSize ({})",
                self.min_idle, self.max_size
            )));
        }
        if self.max_wait_millis == 0 {
            return Err(ConnectorError::Configuration(
                "pool maxWaitMillis must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-connection options, normalised from the configuration bag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionOptions {
    /// Database index to select
    pub database: Option<i64>,
    /// Connect and response timeout
    pub connection_timeout: Option<Duration>,
    /// Name announced with `CLIENT SETNAME`
    pub client_name: Option<String>,
    /// Use TLS
    pub ssl: bool,
    /// Request a STARTTLS-style upgrade
    pub start_tls: bool,
    /// Verify the server certificate and host name
    pub verify_peer: bool,
}

/// Flat configuration bag for a connector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorConfig {
    /// Comma separated `host[:port]` list
    pub host: String,

    /// Optional password for authentication
    #[serde(default)]
    pub password: Option<String>,

    /// Database index, `-1` leaves the server default
    #[serde(default = "unset")]
    pub database: i64,

    /// Timeout in milliseconds, `-1` leaves the library default
    #[serde(default = "unset")]
    pub connection_timeout: i64,

    /// Connection label, empty for none
    #[serde(default)]
    pub client_name: String,

    /// Connect to a Redis Cluster instead of a standalone server
    #[serde(default)]
    pub is_cluster_connection: bool,

    /// Borrow connections from a pool per call
    #[serde(default)]
    pub connection_pooling: bool,

    /// Use TLS
    #[serde(default)]
    pub ssl: bool,

    /// Request a STARTTLS-style upgrade
    #[serde(default)]
    pub start_tls: bool,

    /// Verify the server certificate
    #[serde(default)]
    pub verify_peer: bool,

    /// Pool configuration, used only when pooling is enabled
    #[serde(default)]
    pub pool: PoolConfig,
}

impl ConnectorConfig {
    /// Create a new configuration for the given host list
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            password: None,
            database: UNSET,
            connection_timeout: UNSET,
            client_name: String::new(),
            is_cluster_connection: false,
            connection_pooling: false,
            ssl: false,
            start_tls: false,
            verify_peer: false,
            pool: PoolConfig::default(),
        }
    }

    /// Deserialize a configuration bag from JSON
    pub fn from_json(json: &str) -> ConnectorResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ConnectorError::Configuration(format!("malformed configuration: {e}")))
    }

    /// Set the password for authentication
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the database index
    #[must_use]
    pub fn with_database(mut self, database: i64) -> Self {
        self.database = database;
        self
    }

    /// Set the connection timeout
    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = i64::try_from(timeout.as_millis()).unwrap_or(i64::MAX);
        self
    }

    /// Set the client name
    #[must_use]
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    /// Select cluster or standalone
    #[must_use]
    pub fn with_cluster(mut self, is_cluster: bool) -> Self {
        self.is_cluster_connection = is_cluster;
        self
    }

    /// Select pooled or direct
    #[must_use]
    pub fn with_pooling(mut self, pooling: bool) -> Self {
        self.connection_pooling = pooling;
        self
    }

    /// Set the TLS flags
    #[must_use]
    pub fn with_tls(mut self, ssl: bool, start_tls: bool, verify_peer: bool) -> Self {
        self.ssl = ssl;
        self.start_tls = start_tls;
        self.verify_peer = verify_peer;
        self
    }

    /// Set the pool configuration
    #[must_use]
    pub fn with_pool_config(mut self, pool: PoolConfig) -> Self {
        self.pool = pool;
        self
    }

    /// Connection mode selected by this configuration
    #[must_use]
    pub const fn mode(&self) -> ConnectionMode {
        ConnectionMode::from_flags(self.is_cluster_connection, self.connection_pooling)
    }

    /// Password, if one is configured and not blank
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password
            .as_deref()
            .filter(|password| !password.trim().is_empty())
    }

    /// Normalise the bag into connection options
    #[must_use]
    pub fn options(&self) -> ConnectionOptions {
        let connection_timeout = u64::try_from(self.connection_timeout)
            .ok()
            .map(Duration::from_millis);
        let client_name = Some(self.client_name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        ConnectionOptions {
            database: (self.database >= 0).then_some(self.database),
            connection_timeout,
            client_name,
            ssl: self.ssl,
            start_tls: self.start_tls,
            verify_peer: self.verify_peer,
        }
    }

    /// Parse the host list, enforcing a single address for standalone modes
    pub fn addresses(&self) -> ConnectorResult<Vec<ServerAddress>> {
        let addresses = parse_addresses(&self.host)?;
        if !self.is_cluster_connection && addresses.len() > 1 {
            return Err(ConnectorError::Configuration(
                "multiple hosts not supported for standalone connections".to_string(),
            ));
        }
        Ok(addresses)
    }

    /// Validate the whole bag, returning the parsed addresses
    pub fn validate(&self) -> ConnectorResult<Vec<ServerAddress>> {
        if self.connection_pooling {
            self.pool.validate()?;
        }
        self.addresses()
    }
}
