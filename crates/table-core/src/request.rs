//! Table references and request types.

use std::fmt;

use crate::query::Query;

/// A single record as returned by the backend.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// A table, optionally qualified by a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    /// Schema name. `None` means the backend's default schema.
    pub schema: Option<String>,
    /// Table name.
    pub name: String,
}

impl TableRef {
    /// Reference a table in the default schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    /// Reference a table in a specific schema.
    pub fn in_schema(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A request to execute against a table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRequest {
    /// Read rows matching a query.
    Select { table: TableRef, query: Query },
    /// Insert rows; the backend echoes the stored rows back.
    Insert { table: TableRef, rows: Vec<Row> },
    /// Delete rows matching a query.
    Delete { table: TableRef, query: Query },
}

impl TableRequest {
    /// The table this request targets.
    pub fn table(&self) -> &TableRef {
        match self {
            TableRequest::Select { table, .. }
            | TableRequest::Insert { table, .. }
            | TableRequest::Delete { table, .. } => table,
        }
    }

    /// Short verb for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            TableRequest::Select { .. } => "select",
            TableRequest::Insert { .. } => "insert",
            TableRequest::Delete { .. } => "delete",
        }
    }

    /// Whether the request modifies data.
    pub fn is_write(&self) -> bool {
        !matches!(self, TableRequest::Select { .. })
    }
}
