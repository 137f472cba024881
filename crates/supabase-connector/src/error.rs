//! Error types for supabase-connector.

use table_core::TransportError;
use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur when talking to the hosted backend.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Missing or invalid credentials.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A caller-supplied argument was rejected before any request was made.
    #[error("invalid argument: {0}")]
    Validation(#[from] ValidationError),

    /// The request failed in transport or on the server.
    #[error("failed to {operation}: {source}")]
    Remote {
        operation: String,
        #[source]
        source: TransportError,
    },
}

impl ConnectorError {
    /// Build a remote error for the named operation.
    pub fn remote(operation: impl Into<String>, source: TransportError) -> Self {
        Self::Remote {
            operation: operation.into(),
            source,
        }
    }

    /// Whether this error was raised before contacting the backend.
    pub fn is_validation(&self) -> bool {
        matches!(self, ConnectorError::Validation(_))
    }
}

/// Result type for connector operations.
pub type Result<T> = std::result::Result<T, ConnectorError>;
