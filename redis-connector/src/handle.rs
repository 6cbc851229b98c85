//! Scoped command handles
//!
//! A [`Lease`] is the connection a single command runs on. Pooled modes hold
//! an [`r2d2::PooledConnection`] that goes back to the pool when the lease is
//! dropped; direct modes hold the lock on the shared connection, so dropping
//! the lease only unlocks it. Release therefore happens on every path out of a
//! command, including errors and unwinding.
//!
//! Blocking commands widen the socket read timeout for their own call only;
//! the configured timeout is put back when the lease is dropped.

use crate::error::translate;
use crate::pool::{ClusterConnector, StandaloneConnector};
use parking_lot::MutexGuard;
use r2d2::PooledConnection;
use redis::cluster::ClusterConnection;
use redis::{Cmd, ConnectionLike, FromRedisValue, RedisResult};
use redis_connector_core::error::ConnectorResult;
use std::time::Duration;
use tracing::{enabled, trace, warn, Level};

/// Connection borrowed for exactly one command
pub struct Lease<'a> {
    inner: Inner<'a>,
    read_timeout: Option<Duration>,
    widened: bool,
}

enum Inner<'a> {
    Shared(MutexGuard<'a, redis::Connection>),
    SharedCluster(MutexGuard<'a, ClusterConnection>),
    Pooled(PooledConnection<StandaloneConnector>),
    PooledCluster(PooledConnection<ClusterConnector>),
    #[cfg(test)]
    Detached(&'a mut dyn ConnectionLike),
}

impl<'a> Lease<'a> {
    pub(crate) fn shared(guard: MutexGuard<'a, redis::Connection>, read_timeout: Option<Duration>) -> Self {
        Self::with_timeout(Inner::Shared(guard), read_timeout)
    }

    pub(crate) fn shared_cluster(guard: MutexGuard<'a, ClusterConnection>, read_timeout: Option<Duration>) -> Self {
        Self::with_timeout(Inner::SharedCluster(guard), read_timeout)
    }

    pub(crate) fn pooled(conn: PooledConnection<StandaloneConnector>, read_timeout: Option<Duration>) -> Self {
        Self::with_timeout(Inner::Pooled(conn), read_timeout)
    }

    pub(crate) fn pooled_cluster(conn: PooledConnection<ClusterConnector>, read_timeout: Option<Duration>) -> Self {
        Self::with_timeout(Inner::PooledCluster(conn), read_timeout)
    }

    /// Lease over a caller-supplied connection
    #[cfg(test)]
    pub(crate) fn detached(conn: &'a mut dyn ConnectionLike) -> Self {
        Self::with_timeout(Inner::Detached(conn), None)
    }

    fn with_timeout(inner: Inner<'a>, read_timeout: Option<Duration>) -> Self {
        Self {
            inner,
            read_timeout,
            widened: false,
        }
    }

    /// Whether dropping this lease returns a connection to a pool
    #[must_use]
    pub fn is_pooled(&self) -> bool {
        matches!(self.inner, Inner::Pooled(_) | Inner::PooledCluster(_))
    }

    fn connection(&mut self) -> &mut dyn ConnectionLike {
        match &mut self.inner {
            Inner::Shared(guard) => &mut **guard,
            Inner::SharedCluster(guard) => &mut **guard,
            Inner::Pooled(conn) => &mut **conn,
            Inner::PooledCluster(conn) => &mut **conn,
            #[cfg(test)]
            Inner::Detached(conn) => &mut **conn,
        }
    }

    /// Send one command and convert its reply
    pub(crate) fn query<T: FromRedisValue>(&mut self, cmd: &Cmd) -> ConnectorResult<T> {
        if enabled!(Level::TRACE) {
            if let Some(redis::Arg::Simple(name)) = cmd.args_iter().next() {
                trace!(pooled = self.is_pooled(), "Sending {}", String::from_utf8_lossy(name));
            }
        }
        cmd.query(self.connection()).map_err(|e| translate(&e))
    }

    /// Send a command the server may hold for up to `block_secs` seconds
    ///
    /// A `block_secs` of zero blocks until data arrives, so the read timeout
    /// is lifted entirely for this call.
    pub(crate) fn query_blocking<T: FromRedisValue>(
        &mut self,
        cmd: &Cmd,
        block_secs: u64,
    ) -> ConnectorResult<T> {
        if let Some(base) = self.read_timeout {
            let widened = (block_secs > 0).then(|| base + Duration::from_secs(block_secs));
            self.widened = true;
            self.set_read_timeout(widened).map_err(|e| translate(&e))?;
        }
        self.query(cmd)
    }

    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> RedisResult<()> {
        match &mut self.inner {
            Inner::Shared(conn) => conn.set_read_timeout(timeout),
            Inner::SharedCluster(conn) => conn.set_read_timeout(timeout),
            Inner::Pooled(conn) => conn.set_read_timeout(timeout),
            Inner::PooledCluster(conn) => conn.set_read_timeout(timeout),
            #[cfg(test)]
            Inner::Detached(_) => Ok(()),
        }
    }
}

impl Drop for Lease<'_> {
    fn drop(&mut self) {
        if self.widened {
            let timeout = self.read_timeout;
            if let Err(e) = self.set_read_timeout(timeout) {
                warn!("Could not restore read timeout after blocking command: {}", e);
            }
        }
    }
}
