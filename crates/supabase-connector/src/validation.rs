//! Argument validation, run before any request leaves the process.

use std::fmt;

use serde_json::{Map, Value};

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty (or whitespace-only) value where one is required.
    Empty(String),
    /// Identifier that must be a positive integer.
    NotPositive { field: String, value: i64 },
    /// Value that must be a JSON object.
    NotAMapping(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
            ValidationError::NotPositive { field, value } => {
                write!(f, "{} must be a positive integer (got {})", field, value)
            }
            ValidationError::NotAMapping(field) => {
                write!(f, "{} must be a key-value mapping", field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Require a non-blank value, returning it trimmed.
pub fn require_non_empty<'a>(field: &str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty(field.to_string()));
    }
    Ok(trimmed)
}

/// Require a strictly positive identifier.
pub fn require_positive(field: &str, value: i64) -> Result<i64, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NotPositive {
            field: field.to_string(),
            value,
        });
    }
    Ok(value)
}

/// Require a JSON object.
pub fn require_mapping<'a>(
    field: &str,
    value: &'a Value,
) -> Result<&'a Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::NotAMapping(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_empty_trims() {
        assert_eq!(require_non_empty("session_id", "  abc \n"), Ok("abc"));
    }

    #[test]
    fn test_non_empty_rejects_blank() {
        assert_eq!(
            require_non_empty("session_id", ""),
            Err(ValidationError::Empty("session_id".to_string()))
        );
        assert_eq!(
            require_non_empty("session_id", " \t "),
            Err(ValidationError::Empty("session_id".to_string()))
        );
    }

    #[test]
    fn test_positive() {
        assert_eq!(require_positive("service_id", 1), Ok(1));
        assert!(require_positive("service_id", 0).is_err());
        assert_eq!(
            require_positive("service_id", -5),
            Err(ValidationError::NotPositive {
                field: "service_id".to_string(),
                value: -5,
            })
        );
    }

    #[test]
    fn test_mapping() {
        assert!(require_mapping("message", &json!({"role": "user"})).is_ok());
        assert!(require_mapping("message", &json!({})).is_ok());
        assert_eq!(
            require_mapping("message", &json!("not a mapping")),
            Err(ValidationError::NotAMapping("message".to_string()))
        );
        assert!(require_mapping("message", &json!([1, 2])).is_err());
        assert!(require_mapping("message", &Value::Null).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ValidationError::Empty("category".to_string()).to_string(),
            "category cannot be empty"
        );
        assert_eq!(
            ValidationError::NotPositive {
                field: "service_id".to_string(),
                value: 0
            }
            .to_string(),
            "service_id must be a positive integer (got 0)"
        );
    }
}
