//! The transport trait.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::{Row, TableRequest};

/// A backend capable of executing table requests.
///
/// Implementations must be shareable across tasks; the connector keeps a
/// single instance behind an `Arc` and reuses it for every call.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a request and return the rows the backend sent back.
    ///
    /// Selects return the matching rows, inserts return the stored rows and
    /// deletes return an empty list.
    async fn execute(&self, request: TableRequest) -> Result<Vec<Row>, TransportError>;

    /// Perform a lightweight authenticated call to check connectivity.
    async fn probe(&self) -> Result<(), TransportError>;

    /// Name of this transport, for logging.
    fn name(&self) -> &str;
}
