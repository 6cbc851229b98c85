//! Blocking Redis connector for standalone servers and clusters
//!
//! `redis-connector` exposes the Redis data-structure commands (strings,
//! lists, sets, sorted sets, hashes, keys and connection commands) on top of
//! the `redis` crate. One [`ConnectionManager`] owns the connection resources
//! and picks a strategy from two flags in its configuration:
//!
//! - standalone or cluster topology
//! - a single shared connection or an `r2d2` pool
//!
//! Every command borrows a connection for exactly its own duration and gives
//! it back on every exit path. Failures are always reported as a
//! [`ConnectorError`].
//!
//! # Quick Start
//!
//! ```no_run
//! use redis_connector::{ConnectionManager, ConnectorConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConnectorConfig::new("localhost:6379").with_pooling(true);
//!     let manager = ConnectionManager::connect(&config)?;
//!
//!     manager.strings()?.set("mykey", "myvalue")?;
//!     let value = manager.strings()?.get("mykey")?;
//!     println!("Value: {:?}", value);
//!
//!     manager.close()?;
//!     Ok(())
//! }
//! ```

#![deny(warnings)]
#![warn(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::significant_drop_tightening)]
#![allow(clippy::large_enum_variant)]

pub mod commands;
pub mod connection;
pub mod error;
pub mod handle;
pub mod pool;
pub mod target;

#[cfg(test)]
mod testing;

pub use commands::{
    ConnectionCommands, HashCommands, InsertPosition, KeyCommands, ListCommands, SetCommands,
    SortedSetCommands, StringCommands,
};
pub use connection::ConnectionManager;
pub use error::{translate, translate_init, translate_pool};
pub use handle::Lease;
pub use pool::PoolState;
pub use target::ConnectionTarget;

pub use redis_connector_core::{
    config::{ConnectionMode, ConnectionOptions, ConnectorConfig, PoolConfig},
    error::{ArgumentKind, ConnectorError, ConnectorResult, SERVER_ERROR_PREFIX},
    types::{parse_addresses, ServerAddress, DEFAULT_PORT},
};
