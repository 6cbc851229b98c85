//! Translation of client-library failures into connector errors
//!
//! Every failure leaving the connector is a [`ConnectorError`]; raw
//! `redis::RedisError` and `r2d2::Error` values never cross the public API.

use redis::{ErrorKind, RedisError};
use redis_connector_core::error::ConnectorError;

/// Translate a client-library error raised while executing a command
pub fn translate(err: &RedisError) -> ConnectorError {
    match err.kind() {
        ErrorKind::InvalidClientConfig => ConnectorError::Configuration(err.to_string()),
        // conversion of a well-formed reply into the requested Rust type failed
        ErrorKind::TypeError | ErrorKind::ClientError => {
            ConnectorError::Unexpected(err.to_string())
        }
        _ => ConnectorError::server(err.code().map(str::to_string), server_message(err)),
    }
}

/// Translate an error raised while establishing the connector
pub fn translate_init(context: &str, err: &RedisError) -> ConnectorError {
    match err.kind() {
        ErrorKind::InvalidClientConfig => {
            ConnectorError::Configuration(format!("{context}: {err}"))
        }
        _ => ConnectorError::Initialization(format!("{context}: {err}")),
    }
}

/// Translate a pool failure
pub fn translate_pool(err: &r2d2::Error) -> ConnectorError {
    ConnectorError::Resource(format!("could not borrow a pooled connection: {err}"))
}

fn server_message(err: &RedisError) -> String {
    match (err.code(), err.detail()) {
        (Some(code), Some(detail)) => format!("{code} {detail}"),
        (None, Some(detail)) => detail.to_string(),
        _ => err.to_string(),
    }
}
