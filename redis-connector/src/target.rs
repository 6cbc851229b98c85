//! Connection targets
//!
//! A [`ConnectionTarget`] fully describes one endpoint: the server address,
//! the credentials and every per-connection option. Options that were not
//! configured stay `None` and are left to the client library; options that
//! were configured are always applied.

use crate::error::translate;
use redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo, RedisResult};
use redis_connector_core::{
    config::ConnectionOptions,
    error::{ConnectorError, ConnectorResult},
    types::ServerAddress,
};
use std::time::Duration;
use tracing::{debug, warn};

/// Descriptor for one Redis endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    /// Server address
    pub address: ServerAddress,
    /// Password sent with `AUTH`
    pub password: Option<String>,
    /// Database selected after connecting
    pub database: Option<i64>,
    /// Connect and response timeout
    pub timeout: Option<Duration>,
    /// Name announced with `CLIENT SETNAME`
    pub client_name: Option<String>,
    /// Use TLS
    pub ssl: bool,
    /// STARTTLS requested
    pub start_tls: bool,
    /// Verify the server certificate and host name
    pub verify_peer: bool,
}

impl ConnectionTarget {
    /// Build the target for one address
    pub fn new(address: ServerAddress, password: Option<&str>, options: &ConnectionOptions) -> Self {
        let password = password
            .filter(|password| !password.trim().is_empty())
            .map(str::to_string);

        if options.start_tls && !options.ssl {
            warn!(
                "startTls has no effect for {} because ssl is disabled",
                address
            );
        }

        debug!(
            "Built connection target {} (ssl: {}, verify peer: {})",
            address, options.ssl, options.verify_peer
        );

        Self {
            address,
            password,
            database: options.database.filter(|db| *db >= 0),
            timeout: options.connection_timeout,
            client_name: options
                .client_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            ssl: options.ssl,
            start_tls: options.start_tls,
            verify_peer: options.verify_peer,
        }
    }

    /// Build one target per address, all sharing the same options
    pub fn for_addresses(
        addresses: &[ServerAddress],
        password: Option<&str>,
        options: &ConnectionOptions,
    ) -> Vec<Self> {
        addresses
            .iter()
            .map(|address| Self::new(address.clone(), password, options))
            .collect()
    }

    /// Timeout to apply to sockets, a zero duration meaning none
    #[must_use]
    pub fn effective_timeout(&self) -> Option<Duration> {
        self.timeout.filter(|timeout| !timeout.is_zero())
    }

    /// Address in the client library's representation
    #[must_use]
    pub fn connection_addr(&self) -> ConnectionAddr {
        let host = self.address.host.clone();
        let port = self.address.port;
        if self.ssl {
            ConnectionAddr::TcpTls {
                host,
                port,
                insecure: !self.verify_peer,
                tls_params: None,
            }
        } else {
            ConnectionAddr::Tcp(host, port)
        }
    }

    /// Full connection info in the client library's representation
    #[must_use]
    pub fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            addr: self.connection_addr(),
            redis: RedisConnectionInfo {
                db: self.database.unwrap_or(0),
                password: self.password.clone(),
                ..Default::default()
            },
        }
    }

    /// Reject targets this build cannot connect to
    pub fn ensure_supported(&self) -> ConnectorResult<()> {
        if self.connection_addr().is_supported() {
            Ok(())
        } else {
            Err(ConnectorError::Configuration(format!(
                "ssl requested for {} but TLS support is not compiled in (enable the `tls` feature)",
                self.address
            )))
        }
    }

    /// Open a standalone connection to this target and apply its options
    pub fn open(&self, client: &redis::Client) -> RedisResult<redis::Connection> {
        let timeout = self.effective_timeout();
        let mut conn = match timeout {
            Some(timeout) => client.get_connection_with_timeout(timeout)?,
            None => client.get_connection()?,
        };

        if timeout.is_some() {
            conn.set_read_timeout(timeout)?;
            conn.set_write_timeout(timeout)?;
        }

        if let Some(ref name) = self.client_name {
            redis::cmd("CLIENT")
                .arg("SETNAME")
                .arg(name)
                .query::<()>(&mut conn)?;
        }

        Ok(conn)
    }

    /// Create the client library handle for this target
    pub fn client(&self) -> ConnectorResult<redis::Client> {
        redis::Client::open(self.connection_info()).map_err(|e| translate(&e))
    }
}
