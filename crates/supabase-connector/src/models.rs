//! Record and filter types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A row of the conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    /// Server-assigned ID.
    pub id: i64,
    /// Session the message belongs to.
    pub session_id: String,
    /// Opaque message payload (always a JSON object when written by this crate).
    pub message: Value,
    /// Server-assigned creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A row of the services catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Server-assigned ID.
    pub id: i64,
    /// Display name
    pub name: String,
    /// Category (e.g., "spa", "consultation")
    #[serde(default)]
    pub category: Option<String>,
    /// Price, if set.
    #[serde(default)]
    pub price: Option<f64>,
    /// Duration in minutes, if set.
    #[serde(default)]
    pub duration_minutes: Option<f64>,
    /// Whether the service is currently offered. Missing or null counts as inactive.
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_active: bool,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// The single business-information row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Optional filters for querying services.
///
/// Unset fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceFilter {
    /// Exact service ID.
    pub id: Option<i64>,
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    /// Exact category.
    pub category: Option<String>,
    /// Exact active flag.
    pub is_active: Option<bool>,
    /// Maximum number of rows.
    pub limit: Option<usize>,
}

impl ServiceFilter {
    /// Create a filter that matches every service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by ID.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Filter by name substring.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Filter by category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by active flag.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Limit the number of rows.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Aggregate statistics over the services catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServicesSummary {
    pub total_services: usize,
    pub active_services: usize,
    /// Always `total_services - active_services`.
    pub inactive_services: usize,
    /// Number of distinct non-empty categories.
    pub total_categories: usize,
    /// Distinct non-empty categories, sorted.
    pub categories: Vec<String>,
    /// Service count per category; services without one count as "Unknown".
    pub services_by_category: BTreeMap<String, usize>,
    /// Mean price over active services (missing prices count as 0).
    pub average_price: f64,
    /// Mean duration over active services (missing durations count as 0).
    pub average_duration: f64,
}

/// What a one-row probe learned about a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    pub table_name: String,
    pub exists: bool,
    /// First row, if the table has any.
    pub sample_record: Option<Value>,
    /// Rows seen by the probe (0 or 1).
    pub record_count: usize,
}
