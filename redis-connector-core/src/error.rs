//! Error types for connector operations

use std::fmt;
use thiserror::Error;

/// Prefix carried by every server-side failure message
pub const SERVER_ERROR_PREFIX: &str = "Redis server error: ";

/// Result type for connector operations
pub type ConnectorResult<T> = Result<T, ConnectorError>;

/// Class of command argument that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// A single key
    Key,
    /// A list of keys
    Keys,
    /// Values, fields or members passed alongside a key
    Arguments,
    /// An authentication credential
    Password,
}

impl fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Key => "key",
            Self::Keys => "keys",
            Self::Arguments => "arguments",
            Self::Password => "password",
        };
        f.write_str(name)
    }
}

/// Error type for every connector operation
#[derive(Error, Debug)]
pub enum ConnectorError {
    /// Invalid configuration, raised before any network I/O
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A connection could not be established while constructing the connector
    #[error("Initialization failed: {0}")]
    Initialization(String),

    /// A command argument failed validation
    #[error("Invalid {kind}: {message}")]
    Argument {
        /// Which argument class was invalid
        kind: ArgumentKind,
        /// Human-readable reason
        message: String,
    },

    /// The server returned an error reply or the request failed on the network
    #[error("Redis server error: {message}")]
    Server {
        /// Redis error code (`WRONGTYPE`, `ERR`, ...) when the server sent one
        code: Option<String>,
        /// Original message
        message: String,
    },

    /// A pooled connection could not be borrowed
    #[error("Pool error: {0}")]
    Resource(String),

    /// Any other failure
    #[error("Connector error: {0}")]
    Unexpected(String),
}

impl ConnectorError {
    /// Build an argument validation error
    pub fn argument(kind: ArgumentKind, message: impl Into<String>) -> Self {
        Self::Argument {
            kind,
            message: message.into(),
        }
    }

    /// Build a server error
    pub fn server(code: Option<String>, message: impl Into<String>) -> Self {
        Self::Server {
            code,
            message: message.into(),
        }
    }

    /// Check if this error is a configuration error
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Check if this error is an argument validation error
    #[must_use]
    pub const fn is_argument_error(&self) -> bool {
        matches!(self, Self::Argument { .. })
    }

    /// Check if this error came from the server or the network
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// Check if this error is a pool borrow failure
    #[must_use]
    pub const fn is_resource_error(&self) -> bool {
        matches!(self, Self::Resource(_))
    }

    /// Get the invalid argument class from an argument error
    #[must_use]
    pub const fn argument_kind(&self) -> Option<ArgumentKind> {
        match self {
            Self::Argument { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Get the Redis error code from a server error
    #[must_use]
    pub fn server_code(&self) -> Option<&str> {
        match self {
            Self::Server { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
