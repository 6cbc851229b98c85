//! Core types for the redis-connector crate
//!
//! This crate provides the configuration bag, server addressing and the
//! error taxonomy shared by the connector.

#![deny(warnings)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{ConnectionMode, ConnectionOptions, ConnectorConfig, PoolConfig};
pub use error::{ArgumentKind, ConnectorError, ConnectorResult, SERVER_ERROR_PREFIX};
pub use types::{parse_addresses, ServerAddress, DEFAULT_PORT};
