//! Connection commands for Redis

use crate::handle::Lease;
use redis_connector_core::error::{ArgumentKind, ConnectorError, ConnectorResult};

/// Handle for one Connection command
pub struct ConnectionCommands<'a> {
    lease: Lease<'a>,
}

impl<'a> ConnectionCommands<'a> {
    pub(crate) fn new(lease: Lease<'a>) -> Self {
        Self { lease }
    }

    /// AUTH - Authenticate the current connection
    ///
    /// Only the connection serving this command is authenticated. In pooled
    /// modes configure the password on the connector instead.
    pub fn auth(mut self, password: &str) -> ConnectorResult<String> {
        if password.trim().is_empty() {
            return Err(ConnectorError::argument(
                ArgumentKind::Password,
                "password must not be empty",
            ));
        }
        self.lease.query(redis::cmd("AUTH").arg(password))
    }

    /// ECHO - Return `message` unchanged
    pub fn echo(mut self, message: &str) -> ConnectorResult<String> {
        self.lease.query(redis::cmd("ECHO").arg(message))
    }

    /// PING - `PONG` when the server is reachable
    pub fn ping(mut self) -> ConnectorResult<String> {
        self.lease.query(&redis::cmd("PING"))
    }
}
