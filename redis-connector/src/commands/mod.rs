//! Command families
//!
//! Each family is a handle over one [`Lease`](crate::handle::Lease). Every
//! command method takes the handle by value: one handle serves one command,
//! and the connection is released as soon as the method returns.

pub mod connection;
pub mod hash;
pub mod key;
pub mod list;
pub mod set;
pub mod sorted_set;
pub mod string;

pub use connection::ConnectionCommands;
pub use hash::HashCommands;
pub use key::KeyCommands;
pub use list::{InsertPosition, ListCommands};
pub use set::SetCommands;
pub use sorted_set::SortedSetCommands;
pub use string::StringCommands;

use redis_connector_core::error::{ArgumentKind, ConnectorError, ConnectorResult};

pub(crate) fn check_key(key: &str) -> ConnectorResult<()> {
    if key.is_empty() {
        return Err(ConnectorError::argument(
            ArgumentKind::Key,
            "key must not be empty",
        ));
    }
    Ok(())
}

pub(crate) fn check_keys(keys: &[&str]) -> ConnectorResult<()> {
    if keys.is_empty() {
        return Err(ConnectorError::argument(
            ArgumentKind::Keys,
            "at least one key is required",
        ));
    }
    if keys.iter().any(|key| key.is_empty()) {
        return Err(ConnectorError::argument(
            ArgumentKind::Keys,
            "keys must not be empty",
        ));
    }
    Ok(())
}

pub(crate) fn check_args(count: usize, what: &str) -> ConnectorResult<()> {
    if count == 0 {
        return Err(ConnectorError::argument(
            ArgumentKind::Arguments,
            format!("at least one {what} is required"),
        ));
    }
    Ok(())
}

// Redis score bounds: infinities must be sent as `-inf` / `+inf`
pub(crate) fn score_bound(score: f64) -> String {
    if score == f64::INFINITY {
        "+inf".to_string()
    } else if score == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        score.to_string()
    }
}
