//! In-memory table backend for testing.
//!
//! This crate provides a [`Transport`] implementation that keeps tables in
//! memory and evaluates queries itself:
//! - `MemoryTransport` - Seeded tables, server-assigned ids, outage injection
//!
//! For a real backend, use the `supabase-connector` crate's HTTP transport.
//!
//! # Example
//!
//! ```rust
//! use mock_table::{MemoryTransport, Query, TableRef, TableRequest, Transport};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_table::TransportError> {
//!     let services = TableRef::new("services");
//!     let backend = MemoryTransport::new().with_rows(
//!         services.clone(),
//!         vec![json!({"id": 1, "name": "Facial", "is_active": true})],
//!     );
//!
//!     let rows = backend
//!         .execute(TableRequest::Select {
//!             table: services,
//!             query: Query::new().eq("is_active", true),
//!         })
//!         .await?;
//!     assert_eq!(rows.len(), 1);
//!     Ok(())
//! }
//! ```

mod eval;
mod memory;

// Re-export table-core types for convenience
pub use table_core::{async_trait, Predicate, Query, Row, TableRef, TableRequest, Transport, TransportError};

pub use eval::{apply_query, like_match, row_matches};
pub use memory::MemoryTransport;
