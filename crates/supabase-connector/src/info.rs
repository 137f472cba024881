//! Access to the single-row business information table.
//!
//! The table holds at most one row. An empty table is a normal state and is
//! reported as `None`.
//!
//! [`fetch_info`] propagates transport errors like every other accessor.
//! [`get_info`] and the per-field helpers are best-effort: they log the error
//! and report `None`.

use chrono::{DateTime, Utc};
use table_core::{Query, TableRef, TableRequest};
use tracing::warn;

use crate::connector::SupabaseConnector;
use crate::error::Result;
use crate::models::InfoRecord;

/// Name of the info table.
pub const INFO_TABLE: &str = "info";

/// Reference to the info table.
pub fn info_table() -> TableRef {
    TableRef::new(INFO_TABLE)
}

/// Fetch the info record, propagating failures.
pub async fn fetch_info(connector: &SupabaseConnector) -> Result<Option<InfoRecord>> {
    let records: Vec<InfoRecord> = connector
        .fetch(
            "retrieve info",
            TableRequest::Select {
                table: info_table(),
                query: Query::new(),
            },
        )
        .await?;

    Ok(records.into_iter().next())
}

/// Fetch the info record, treating any failure as absent.
pub async fn get_info(connector: &SupabaseConnector) -> Option<InfoRecord> {
    match fetch_info(connector).await {
        Ok(info) => info,
        Err(e) => {
            warn!("Error retrieving info: {}", e);
            None
        }
    }
}

/// Business name.
pub async fn get_info_name(connector: &SupabaseConnector) -> Option<String> {
    get_info(connector).await.and_then(|info| info.name)
}

/// Contact phone number.
pub async fn get_info_phone(connector: &SupabaseConnector) -> Option<String> {
    get_info(connector).await.and_then(|info| info.phone)
}

/// Physical address.
pub async fn get_info_address(connector: &SupabaseConnector) -> Option<String> {
    get_info(connector).await.and_then(|info| info.address)
}

/// Contact email.
pub async fn get_info_email(connector: &SupabaseConnector) -> Option<String> {
    get_info(connector).await.and_then(|info| info.email)
}

/// General description.
pub async fn get_info_description(connector: &SupabaseConnector) -> Option<String> {
    get_info(connector).await.and_then(|info| info.description)
}

/// Creation timestamp of the record.
pub async fn get_info_created_at(connector: &SupabaseConnector) -> Option<DateTime<Utc>> {
    get_info(connector).await.and_then(|info| info.created_at)
}

/// Row ID.
pub async fn get_info_id(connector: &SupabaseConnector) -> Option<i64> {
    get_info(connector).await.and_then(|info| info.id)
}
