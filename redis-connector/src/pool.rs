//! Connection factories and pooling
//!
//! This module provides the two connection factories used by every mode:
//! - [`StandaloneConnector`]: connections to a single server
//! - [`ClusterConnector`]: topology-aware connections to a Redis Cluster
//!
//! Both implement [`r2d2::ManageConnection`], so pooled modes hand them to an
//! r2d2 pool while direct modes call [`r2d2::ManageConnection::connect`] once.

use crate::error::translate_init;
use crate::target::ConnectionTarget;
use r2d2::ManageConnection;
use redis::cluster::{ClusterClient, ClusterClientBuilder, ClusterConnection};
use redis::{ConnectionLike, RedisResult};
use redis_connector_core::{
    config::PoolConfig,
    error::{ConnectorError, ConnectorResult},
};
use tracing::debug;

/// Occupancy snapshot of a connection pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolState {
    /// Connections currently open, borrowed or idle
    pub connections: u32,
    /// Connections waiting in the pool
    pub idle_connections: u32,
}

impl PoolState {
    /// Connections currently borrowed
    #[must_use]
    pub const fn in_use(&self) -> u32 {
        self.connections.saturating_sub(self.idle_connections)
    }
}

impl From<r2d2::State> for PoolState {
    fn from(state: r2d2::State) -> Self {
        Self {
            connections: state.connections,
            idle_connections: state.idle_connections,
        }
    }
}

/// Opens connections to one standalone server
#[derive(Debug, Clone)]
pub struct StandaloneConnector {
    client: redis::Client,
    target: ConnectionTarget,
}

impl StandaloneConnector {
    /// Create a factory for the given target
    pub fn new(target: ConnectionTarget) -> ConnectorResult<Self> {
        let client = target.client()?;
        Ok(Self { client, target })
    }

    /// Target this factory connects to
    pub fn target(&self) -> &ConnectionTarget {
        &self.target
    }
}

impl ManageConnection for StandaloneConnector {
    type Connection = redis::Connection;
    type Error = redis::RedisError;

    fn connect(&self) -> RedisResult<redis::Connection> {
        debug!("Opening connection to {}", self.target.address);
        self.target.open(&self.client)
    }

    fn is_valid(&self, conn: &mut redis::Connection) -> RedisResult<()> {
        redis::cmd("PING").query(conn)
    }

    fn has_broken(&self, conn: &mut redis::Connection) -> bool {
        !conn.is_open()
    }
}

/// Opens connections to a Redis Cluster seeded from every configured node
#[derive(Clone)]
pub struct ClusterConnector {
    client: ClusterClient,
    client_name: Option<String>,
    seeds: usize,
}

impl ClusterConnector {
    /// Create a factory seeded with one target per configured node
    pub fn new(targets: &[ConnectionTarget]) -> ConnectorResult<Self> {
        let first = targets.first().ok_or_else(|| {
            ConnectorError::Configuration("no cluster nodes configured".to_string())
        })?;

        if let Some(db) = first.database.filter(|db| *db != 0) {
            return Err(ConnectorError::Configuration(format!(
                "database {db} requested but Redis Cluster only supports database 0"
            )));
        }

        let nodes: Vec<_> = targets.iter().map(ConnectionTarget::connection_info).collect();
        let mut builder = ClusterClientBuilder::new(nodes);
        if let Some(timeout) = first.effective_timeout() {
            builder = builder.connection_timeout(timeout).response_timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| translate_init("cluster seed nodes", &e))?;

        Ok(Self {
            client,
            client_name: first.client_name.clone(),
            seeds: targets.len(),
        })
    }
}

impl ManageConnection for ClusterConnector {
    type Connection = ClusterConnection;
    type Error = redis::RedisError;

    fn connect(&self) -> RedisResult<ClusterConnection> {
        debug!("Opening cluster connection from {} seed nodes", self.seeds);
        let mut conn = self.client.get_connection()?;

        // CLIENT SETNAME is routed to every node by the cluster client
        if let Some(ref name) = self.client_name {
            redis::cmd("CLIENT")
                .arg("SETNAME")
                .arg(name)
                .query::<()>(&mut conn)?;
        }

        Ok(conn)
    }

    fn is_valid(&self, conn: &mut ClusterConnection) -> RedisResult<()> {
        if conn.check_connection() {
            Ok(())
        } else {
            redis::cmd("PING").query(conn)
        }
    }

    fn has_broken(&self, conn: &mut ClusterConnection) -> bool {
        !conn.is_open()
    }
}

/// Build a bounded pool and prove it can hand out a working connection
pub fn build_pool<M>(manager: M, config: &PoolConfig) -> ConnectorResult<r2d2::Pool<M>>
where
    M: ManageConnection<Error = redis::RedisError>,
{
    debug!(
        "Creating connection pool (max size: {}, min idle: {})",
        config.max_size, config.min_idle
    );

    let pool = r2d2::Pool::builder()
        .max_size(config.max_size)
        .min_idle(Some(config.min_idle))
        .connection_timeout(config.max_wait())
        // one borrow carries one command; dead sockets are caught by has_broken
        .test_on_check_out(false)
        .build(manager)
        .map_err(|e| ConnectorError::Initialization(format!("connection pool: {e}")))?;

    // surfaces connection failures even when min_idle is zero
    pool.get()
        .map_err(|e| ConnectorError::Initialization(format!("connection pool: {e}")))?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use redis_connector_core::{config::ConnectionOptions, types::ServerAddress};

    fn target(host: &str, port: u16, database: Option<i64>) -> ConnectionTarget {
        let options = ConnectionOptions {
            database,
            ..Default::default()
        };
        ConnectionTarget::new(ServerAddress::new(host, port), None, &options)
    }

    #[test]
    fn test_pool_state_in_use() {
        let state = PoolState {
            connections: 5,
            idle_connections: 2,
        };
        assert_eq!(state.in_use(), 3);
    }

    #[test]
    fn test_standalone_connector_keeps_target() {
        let connector = StandaloneConnector::new(target("localhost", 6379, Some(1))).unwrap();
        assert_eq!(connector.target().address, ServerAddress::new("localhost", 6379));
        assert_eq!(connector.target().database, Some(1));
    }

    #[test]
    fn test_cluster_connector_requires_nodes() {
        let err = ClusterConnector::new(&[]).err().unwrap();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_cluster_connector_rejects_non_zero_database() {
        let err = ClusterConnector::new(&[target("n1", 7000, Some(2))])
            .err()
            .unwrap();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("database 2"));

        assert!(ClusterConnector::new(&[target("n1", 7000, Some(0)), target("n2", 7001, Some(0))]).is_ok());
    }
}
