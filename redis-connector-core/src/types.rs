//! Server addressing

use crate::error::{ConnectorError, ConnectorResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Port used when a host token carries none
pub const DEFAULT_PORT: u16 = 6379;

/// One configured Redis server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServerAddress {
    /// Host name or IP address
    pub host: String,
    /// Port number
    pub port: u16,
}

impl ServerAddress {
    /// Create a new server address
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse a single `host[:port]` token
    pub fn parse(token: &str) -> ConnectorResult<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ConnectorError::Configuration(
                "empty host entry in host list".to_string(),
            ));
        }

        let parse_port = |port: &str| {
            port.trim().parse::<u16>().map_err(|_| {
                ConnectorError::Configuration(format!("invalid port in host entry '{token}'"))
            })
        };

        // `[v6]` or `[v6]:port`
        let (host, port) = if let Some(bracketed) = token.strip_prefix('[') {
            let (host, rest) = bracketed.split_once(']').ok_or_else(|| {
                ConnectorError::Configuration(format!("unclosed '[' in host entry '{token}'"))
            })?;
            let port = match rest {
                "" => DEFAULT_PORT,
                _ => match rest.strip_prefix(':') {
                    Some(port) => parse_port(port)?,
                    None => {
                        return Err(ConnectorError::Configuration(format!(
                            "unexpected text after ']' in host entry '{token}'"
                        )))
                    }
                },
            };
            (host.trim(), port)
        } else {
            match token.rsplit_once(':') {
                Some((host, port)) => (host.trim(), parse_port(port)?),
                None => (token, DEFAULT_PORT),
            }
        };

        if host.is_empty() {
            return Err(ConnectorError::Configuration(format!(
                "missing host name in host entry '{token}'"
            )));
        }

        Ok(Self::new(host, port))
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Parse a comma separated `host[:port]` list, keeping input order
pub fn parse_addresses(hosts: &str) -> ConnectorResult<Vec<ServerAddress>> {
    if hosts.trim().is_empty() {
        return Err(ConnectorError::Configuration(
            "host must not be empty".to_string(),
        ));
    }

    hosts.split(',').map(ServerAddress::parse).collect()
}
