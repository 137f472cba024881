//! Core query model and transport trait for hosted table backends.
//!
//! This crate provides the shared interface between the record accessors
//! and whatever actually talks to the backend. It defines:
//!
//! - [`Query`] / [`Predicate`] - Filter composition in a fixed, inspectable order
//! - [`TableRef`] / [`TableRequest`] - What to read, insert or delete
//! - [`Transport`] - The trait that every backend transport implements
//! - [`TransportError`] - Errors raised while executing a request
//!
//! # Example
//!
//! ```rust
//! use table_core::{Row, TableRequest, Transport, TransportError};
//! use async_trait::async_trait;
//!
//! struct EmptyBackend;
//!
//! #[async_trait]
//! impl Transport for EmptyBackend {
//!     async fn execute(&self, _request: TableRequest) -> Result<Vec<Row>, TransportError> {
//!         Ok(Vec::new())
//!     }
//!
//!     async fn probe(&self) -> Result<(), TransportError> {
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "EmptyBackend"
//!     }
//! }
//! ```

mod error;
mod query;
mod request;
mod transport;

pub use error::TransportError;
pub use query::{Predicate, Query};
pub use request::{Row, TableRef, TableRequest};
pub use transport::Transport;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
