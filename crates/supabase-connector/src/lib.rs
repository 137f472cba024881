//! Supabase table client library.
//!
//! This crate provides convenience functions for three tables of a hosted
//! Supabase project:
//!
//! - `conversation_history` - Append, read and delete chat messages by session
//! - `services` - Filtered catalog queries and summary statistics
//! - `info` - The single business-information row
//!
//! Every function takes a [`SupabaseConnector`], so tests can swap the HTTP
//! transport for an in-memory one.
//!
//! # Example
//!
//! ```no_run
//! use supabase_connector::{services, summary, ServiceFilter, SupabaseConnector};
//!
//! # async fn example() -> Result<(), supabase_connector::ConnectorError> {
//! // Reads SUPABASE_URL and SUPABASE_ANON_KEY
//! let connector = SupabaseConnector::from_env()?;
//!
//! if !connector.probe().await {
//!     eprintln!("Supabase is not reachable");
//! }
//!
//! // Active massages, at most 10, sorted by name
//! let filter = ServiceFilter::new().with_name("massage").with_active(true).with_limit(10);
//! for service in services::get_services(&connector, &filter).await? {
//!     println!("{}: {:?}", service.name, service.price);
//! }
//!
//! let stats = summary::get_services_summary(&connector).await?;
//! println!("{} of {} services active", stats.active_services, stats.total_services);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod connector;
pub mod conversation;
pub mod error;
pub mod http;
pub mod info;
pub mod models;
pub mod services;
pub mod summary;
pub mod tables;
pub mod validation;

pub use config::ConnectorConfig;
pub use connector::{global, set_global, SupabaseConnector};
pub use error::{ConnectorError, Result};
pub use http::HttpTransport;
pub use models::{
    ConversationRecord, InfoRecord, ServiceFilter, ServiceRecord, ServicesSummary, TableInfo,
};
pub use validation::ValidationError;

// Re-export the transport seam so callers can plug in their own backend
pub use table_core::{Query, TableRef, TableRequest, Transport, TransportError};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
