//! Connection management and mode selection
//!
//! [`ConnectionManager`] selects one of four strategies when it is built and
//! keeps it for its whole lifetime:
//!
//! | cluster | pooling | backend |
//! |---|---|---|
//! | no | no | one shared connection |
//! | no | yes | r2d2 pool of connections |
//! | yes | no | one shared cluster connection |
//! | yes | yes | r2d2 pool of cluster connections |
//!
//! Command handles are obtained through one accessor per command family.

use crate::commands::{
    ConnectionCommands, HashCommands, KeyCommands, ListCommands, SetCommands, SortedSetCommands,
    StringCommands,
};
use crate::error::{translate_init, translate_pool};
use crate::handle::Lease;
use crate::pool::{build_pool, ClusterConnector, PoolState, StandaloneConnector};
use crate::target::ConnectionTarget;
use parking_lot::Mutex;
use r2d2::{ManageConnection, Pool};
use redis::cluster::ClusterConnection;
use redis_connector_core::{
    config::{ConnectionMode, ConnectorConfig},
    error::{ConnectorError, ConnectorResult},
};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

enum Backend {
    StandaloneDirect(Mutex<redis::Connection>),
    StandalonePooled(Pool<StandaloneConnector>),
    ClusterDirect(Mutex<ClusterConnection>),
    ClusterPooled(Pool<ClusterConnector>),
}

/// Owner of the connection, cluster connection or pool used by every command
///
/// `ConnectionManager` is `Send + Sync`; share it between threads by
/// reference or inside an `Arc`.
///
/// A thread should hold one command handle at a time. Taking a second handle
/// while the first is still alive (for example inside the argument list of a
/// call on the first) waits for the first to be released; after
/// `pool.maxWaitMillis` it fails with a resource error, in direct modes as in
/// pooled ones.
pub struct ConnectionManager {
    mode: ConnectionMode,
    backend: Backend,
    read_timeout: Option<Duration>,
    lock_wait: Duration,
}

impl ConnectionManager {
    /// Connect using the given configuration
    ///
    /// Configuration problems (bad host list, several hosts for a standalone
    /// server, TLS without TLS support) are reported before any network I/O.
    /// Failing to reach the server is an initialization error and no manager
    /// is returned.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use redis_connector::{ConnectionManager, ConnectorConfig};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ConnectorConfig::new("localhost:6379").with_pooling(true);
    /// let manager = ConnectionManager::connect(&config)?;
    /// assert_eq!(manager.connection()?.ping()?, "PONG");
    /// # Ok(())
    /// # }
    /// ```
    pub fn connect(config: &ConnectorConfig) -> ConnectorResult<Self> {
        let addresses = config.validate()?;
        let targets =
            ConnectionTarget::for_addresses(&addresses, config.password(), &config.options());
        for target in &targets {
            target.ensure_supported()?;
        }

        let mode = config.mode();
        let read_timeout = targets.first().and_then(ConnectionTarget::effective_timeout);
        info!("Connecting to Redis at {} ({:?})", config.host, mode);

        let backend = match mode {
            ConnectionMode::StandaloneDirect => {
                let connector = Self::standalone_connector(targets)?;
                let conn = connector
                    .connect()
                    .map_err(|e| translate_init(&connector.target().address.to_string(), &e))?;
                Backend::StandaloneDirect(Mutex::new(conn))
            }
            ConnectionMode::StandalonePooled => {
                let connector = Self::standalone_connector(targets)?;
                Backend::StandalonePooled(build_pool(connector, &config.pool)?)
            }
            ConnectionMode::ClusterDirect => {
                let connector = ClusterConnector::new(&targets)?;
                let conn = connector
                    .connect()
                    .map_err(|e| translate_init(&config.host, &e))?;
                Backend::ClusterDirect(Mutex::new(conn))
            }
            ConnectionMode::ClusterPooled => {
                let connector = ClusterConnector::new(&targets)?;
                Backend::ClusterPooled(build_pool(connector, &config.pool)?)
            }
        };

        debug!("Connected in {:?} mode", mode);
        Ok(Self {
            mode,
            backend,
            read_timeout,
            lock_wait: config.pool.max_wait(),
        })
    }

    fn standalone_connector(targets: Vec<ConnectionTarget>) -> ConnectorResult<StandaloneConnector> {
        let target = targets.into_iter().next().ok_or_else(|| {
            ConnectorError::Configuration("no host configured".to_string())
        })?;
        StandaloneConnector::new(target)
    }

    /// Mode selected at construction
    #[must_use]
    pub const fn mode(&self) -> ConnectionMode {
        self.mode
    }

    /// Whether commands are routed through a Redis Cluster
    #[must_use]
    pub const fn is_cluster(&self) -> bool {
        self.mode.is_cluster()
    }

    /// Whether connections are borrowed from a pool per command
    #[must_use]
    pub const fn is_pooled(&self) -> bool {
        self.mode.is_pooled()
    }

    /// Occupancy of the pool, `None` in direct modes
    #[must_use]
    pub fn pool_state(&self) -> Option<PoolState> {
        match &self.backend {
            Backend::StandalonePooled(pool) => Some(pool.state().into()),
            Backend::ClusterPooled(pool) => Some(pool.state().into()),
            Backend::StandaloneDirect(_) | Backend::ClusterDirect(_) => None,
        }
    }

    /// Acquire the connection for one command
    ///
    /// Pooled modes borrow from the pool and direct modes lock the shared
    /// connection. Both wait at most the pool's maximum wait.
    fn lease(&self) -> ConnectorResult<Lease<'_>> {
        let timeout = self.read_timeout;
        match &self.backend {
            Backend::StandaloneDirect(conn) => conn
                .try_lock_for(self.lock_wait)
                .map(|guard| Lease::shared(guard, timeout))
                .ok_or_else(|| self.still_in_use()),
            Backend::ClusterDirect(conn) => conn
                .try_lock_for(self.lock_wait)
                .map(|guard| Lease::shared_cluster(guard, timeout))
                .ok_or_else(|| self.still_in_use()),
            Backend::StandalonePooled(pool) => pool
                .get()
                .map(|conn| Lease::pooled(conn, timeout))
                .map_err(|e| translate_pool(&e)),
            Backend::ClusterPooled(pool) => pool
                .get()
                .map(|conn| Lease::pooled_cluster(conn, timeout))
                .map_err(|e| translate_pool(&e)),
        }
    }

    fn still_in_use(&self) -> ConnectorError {
        ConnectorError::Resource(format!(
            "shared connection still in use after {:?}; release the previous command handle first",
            self.lock_wait
        ))
    }

    /// Handle for string commands
    pub fn strings(&self) -> ConnectorResult<StringCommands<'_>> {
        self.lease().map(StringCommands::new)
    }

    /// Handle for list commands
    pub fn lists(&self) -> ConnectorResult<ListCommands<'_>> {
        self.lease().map(ListCommands::new)
    }

    /// Handle for set commands
    pub fn sets(&self) -> ConnectorResult<SetCommands<'_>> {
        self.lease().map(SetCommands::new)
    }

    /// Handle for sorted set commands
    pub fn sorted_sets(&self) -> ConnectorResult<SortedSetCommands<'_>> {
        self.lease().map(SortedSetCommands::new)
    }

    /// Handle for hash commands
    pub fn hashes(&self) -> ConnectorResult<HashCommands<'_>> {
        self.lease().map(HashCommands::new)
    }

    /// Handle for key commands
    pub fn keys(&self) -> ConnectorResult<KeyCommands<'_>> {
        self.lease().map(KeyCommands::new)
    }

    /// Handle for connection commands
    pub fn connection(&self) -> ConnectorResult<ConnectionCommands<'_>> {
        self.lease().map(ConnectionCommands::new)
    }

    /// Shut the connector down
    ///
    /// The shared standalone connection is sent `QUIT`; pools and cluster
    /// connections close their sockets when dropped.
    pub fn close(self) -> ConnectorResult<()> {
        info!("Closing Redis connector ({:?})", self.mode);
        match self.backend {
            Backend::StandaloneDirect(conn) => {
                let mut conn = conn.into_inner();
                if let Err(e) = redis::cmd("QUIT").query::<()>(&mut conn) {
                    warn!("QUIT failed while closing connection: {}", e);
                }
            }
            Backend::StandalonePooled(pool) => drop(pool),
            Backend::ClusterDirect(conn) => drop(conn),
            Backend::ClusterPooled(pool) => drop(pool),
        }
        Ok(())
    }
}

impl fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("mode", &self.mode)
            .field("pool", &self.pool_state())
            .finish()
    }
}
