//! Table discovery helpers.

use serde_json::Value;
use table_core::{Query, TableRef, TableRequest};
use tracing::debug;

use crate::connector::SupabaseConnector;
use crate::conversation::CONVERSATION_TABLE;
use crate::info::INFO_TABLE;
use crate::models::TableInfo;
use crate::services::SERVICES_TABLE;

/// Table names checked by [`list_available_tables`].
pub const COMMON_TABLES: &[&str] = &[
    CONVERSATION_TABLE,
    SERVICES_TABLE,
    INFO_TABLE,
    "users",
    "profiles",
    "messages",
    "chat",
    "sessions",
    "logs",
    "settings",
    "test",
];

fn resolve_table(connector: &SupabaseConnector, table: &str) -> TableRef {
    if table == CONVERSATION_TABLE {
        connector.config().conversation_table(table)
    } else {
        TableRef::new(table)
    }
}

async fn sample(connector: &SupabaseConnector, table: &str) -> Option<Vec<Value>> {
    let request = TableRequest::Select {
        table: resolve_table(connector, table),
        query: Query::new().limit(1),
    };

    match connector.execute(&format!("sample table {}", table), request).await {
        Ok(rows) => Some(rows.into_iter().map(Value::Object).collect()),
        Err(e) => {
            debug!("Table {} not accessible: {}", table, e);
            None
        }
    }
}

/// Whether a table exists and is readable with the configured key.
pub async fn table_exists(connector: &SupabaseConnector, table: &str) -> bool {
    sample(connector, table).await.is_some()
}

/// Read one row of a table to describe it. `None` if it is not accessible.
pub async fn get_table_info(connector: &SupabaseConnector, table: &str) -> Option<TableInfo> {
    let rows = sample(connector, table).await?;

    Some(TableInfo {
        table_name: table.to_string(),
        exists: true,
        record_count: rows.len(),
        sample_record: rows.into_iter().next(),
    })
}

/// Probe [`COMMON_TABLES`] and return the ones that are accessible.
pub async fn list_available_tables(connector: &SupabaseConnector) -> Vec<String> {
    let mut available = Vec::new();
    for table in COMMON_TABLES {
        if table_exists(connector, table).await {
            available.push(table.to_string());
        }
    }
    available
}
