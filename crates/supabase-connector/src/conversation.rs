//! Conversation log operations.

use serde_json::Value;
use table_core::{Query, Row, TableRef, TableRequest};

use crate::connector::SupabaseConnector;
use crate::error::Result;
use crate::models::ConversationRecord;
use crate::validation::{require_mapping, require_non_empty};

/// Name of the conversation log table.
pub const CONVERSATION_TABLE: &str = "conversation_history";

fn conversation_table(connector: &SupabaseConnector) -> TableRef {
    connector.config().conversation_table(CONVERSATION_TABLE)
}

/// Get every conversation record.
pub async fn get_conversation_history(
    connector: &SupabaseConnector,
) -> Result<Vec<ConversationRecord>> {
    connector
        .fetch(
            "retrieve conversation history",
            TableRequest::Select {
                table: conversation_table(connector),
                query: Query::new(),
            },
        )
        .await
}

/// Append a message to a session's history.
///
/// The session ID is trimmed before storage. Returns the stored row(s) as
/// echoed by the backend.
pub async fn add_conversation_history(
    connector: &SupabaseConnector,
    session_id: &str,
    message: &Value,
) -> Result<Vec<ConversationRecord>> {
    let session_id = require_non_empty("session_id", session_id)?;
    let message = require_mapping("message", message)?;

    let mut row = Row::new();
    row.insert("session_id".to_string(), Value::from(session_id));
    row.insert("message".to_string(), Value::Object(message.clone()));

    connector
        .fetch(
            "add conversation history",
            TableRequest::Insert {
                table: conversation_table(connector),
                rows: vec![row],
            },
        )
        .await
}

/// Get the history of one session. An unknown session yields an empty list.
pub async fn get_conversation_by_session(
    connector: &SupabaseConnector,
    session_id: &str,
) -> Result<Vec<ConversationRecord>> {
    let session_id = require_non_empty("session_id", session_id)?;

    connector
        .fetch(
            &format!("retrieve conversation for session {}", session_id),
            TableRequest::Select {
                table: conversation_table(connector),
                query: Query::new().eq("session_id", session_id),
            },
        )
        .await
}

/// Delete a session's history.
///
/// Returns `true` once the backend accepts the request, whether or not any
/// rows matched.
pub async fn delete_conversation_history(
    connector: &SupabaseConnector,
    session_id: &str,
) -> Result<bool> {
    let session_id = require_non_empty("session_id", session_id)?;

    connector
        .execute(
            &format!("delete conversation history for session {}", session_id),
            TableRequest::Delete {
                table: conversation_table(connector),
                query: Query::new().eq("session_id", session_id),
            },
        )
        .await?;

    Ok(true)
}
