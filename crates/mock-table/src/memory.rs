//! In-memory transport implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;
use table_core::{Row, TableRef, TableRequest, Transport, TransportError};
use tracing::debug;

use crate::eval::{apply_query, row_matches};

/// A transport that keeps tables in memory.
///
/// Tables must be registered (with [`with_table`](Self::with_table) or
/// [`with_rows`](Self::with_rows)) before use; requests against unknown tables
/// fail with a 404 status the way the hosted backend does. Inserted rows get a
/// server-assigned `id` and `created_at` when the caller did not supply them.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    tables: Mutex<HashMap<TableRef, Vec<Row>>>,
    requests: Mutex<Vec<TableRequest>>,
    unavailable: AtomicBool,
}

impl MemoryTransport {
    /// Create a transport with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty table.
    pub fn with_table(self, table: TableRef) -> Self {
        self.lock_tables().entry(table).or_default();
        self
    }

    /// Register a table seeded with rows. Non-object values are skipped.
    pub fn with_rows(self, table: TableRef, rows: impl IntoIterator<Item = Value>) -> Self {
        self.seed(table, rows);
        self
    }

    /// Append rows to a table as-is, registering it if needed.
    pub fn seed(&self, table: TableRef, rows: impl IntoIterator<Item = Value>) {
        let rows = rows.into_iter().filter_map(|v| match v {
            Value::Object(map) => Some(map),
            _ => None,
        });
        self.lock_tables().entry(table).or_default().extend(rows);
    }

    /// Snapshot of a table's rows.
    pub fn rows(&self, table: &TableRef) -> Vec<Row> {
        self.lock_tables().get(table).cloned().unwrap_or_default()
    }

    /// Every request executed so far, in order.
    pub fn requests(&self) -> Vec<TableRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Simulate an outage: every call fails until availability is restored.
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    fn lock_tables(&self) -> MutexGuard<'_, HashMap<TableRef, Vec<Row>>> {
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_available(&self) -> Result<(), TransportError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(TransportError::Unavailable(
                "memory backend is offline".to_string(),
            ));
        }
        Ok(())
    }
}

fn missing_table(table: &TableRef) -> TransportError {
    TransportError::Status {
        status: 404,
        body: format!("relation \"{}\" does not exist", table),
    }
}

fn next_id(rows: &[Row]) -> i64 {
    rows.iter()
        .filter_map(|row| row.get("id").and_then(Value::as_i64))
        .max()
        .unwrap_or(0)
        + 1
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn execute(&self, request: TableRequest) -> Result<Vec<Row>, TransportError> {
        self.check_available()?;
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        debug!("Memory {} on {}", request.kind(), request.table());

        let mut tables = self.lock_tables();
        match request {
            TableRequest::Select { table, query } => {
                let rows = tables.get(&table).ok_or_else(|| missing_table(&table))?;
                Ok(apply_query(rows, &query))
            }
            TableRequest::Insert { table, rows } => {
                let existing = tables.get_mut(&table).ok_or_else(|| missing_table(&table))?;
                let mut stored = Vec::with_capacity(rows.len());
                for mut row in rows {
                    if !row.contains_key("id") {
                        row.insert("id".to_string(), Value::from(next_id(existing)));
                    }
                    if !row.contains_key("created_at") {
                        row.insert(
                            "created_at".to_string(),
                            Value::from(chrono::Utc::now().to_rfc3339()),
                        );
                    }
                    existing.push(row.clone());
                    stored.push(row);
                }
                Ok(stored)
            }
            TableRequest::Delete { table, query } => {
                let existing = tables.get_mut(&table).ok_or_else(|| missing_table(&table))?;
                existing.retain(|row| !row_matches(row, &query));
                Ok(Vec::new())
            }
        }
    }

    async fn probe(&self) -> Result<(), TransportError> {
        self.check_available()
    }

    fn name(&self) -> &str {
        "MemoryTransport"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use table_core::Query;

    fn conversations() -> TableRef {
        TableRef::new("conversation_history")
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamp() {
        let backend = MemoryTransport::new().with_table(conversations());

        let mut row = Row::new();
        row.insert("session_id".to_string(), json!("abc"));

        let stored = backend
            .execute(TableRequest::Insert {
                table: conversations(),
                rows: vec![row.clone(), row],
            })
            .await
            .unwrap();

        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].get("id"), Some(&json!(1)));
        assert_eq!(stored[1].get("id"), Some(&json!(2)));
        assert!(stored[0].contains_key("created_at"));
        assert_eq!(backend.rows(&conversations()).len(), 2);
    }

    #[tokio::test]
    async fn test_delete_removes_matching_rows() {
        let backend = MemoryTransport::new().with_rows(
            conversations(),
            vec![
                json!({"id": 1, "session_id": "a"}),
                json!({"id": 2, "session_id": "b"}),
                json!({"id": 3, "session_id": "a"}),
            ],
        );

        let result = backend
            .execute(TableRequest::Delete {
                table: conversations(),
                query: Query::new().eq("session_id", "a"),
            })
            .await
            .unwrap();

        assert!(result.is_empty());
        let remaining = backend.rows(&conversations());
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].get("session_id"), Some(&json!("b")));
    }

    #[tokio::test]
    async fn test_unknown_table_is_404() {
        let backend = MemoryTransport::new();
        let err = backend
            .execute(TableRequest::Select {
                table: TableRef::new("missing"),
                query: Query::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_schemas_are_separate_tables() {
        let backend = MemoryTransport::new()
            .with_rows(TableRef::new("conversation_history"), vec![json!({"id": 1})])
            .with_table(TableRef::in_schema("chatbot", "conversation_history"));

        let rows = backend
            .execute(TableRequest::Select {
                table: TableRef::in_schema("chatbot", "conversation_history"),
                query: Query::new(),
            })
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_outage() {
        let backend = MemoryTransport::new().with_table(conversations());
        assert!(backend.probe().await.is_ok());

        backend.set_available(false);
        assert!(backend.probe().await.is_err());
        let err = backend
            .execute(TableRequest::Select {
                table: conversations(),
                query: Query::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Unavailable(_)));
        assert!(backend.requests().is_empty());

        backend.set_available(true);
        assert!(backend.probe().await.is_ok());
    }
}
