//! Configuration for connecting to a hosted Supabase project.

use secrecy::{ExposeSecret, SecretString};
use std::env;
use table_core::TableRef;

use crate::error::{ConnectorError, Result};

/// Environment variable holding the project URL.
pub const URL_ENV: &str = "SUPABASE_URL";

/// Environment variable holding the anonymous API key.
pub const KEY_ENV: &str = "SUPABASE_ANON_KEY";

/// Environment variable naming the schema of the conversation table.
pub const CONVERSATION_SCHEMA_ENV: &str = "SUPABASE_CONVERSATION_SCHEMA";

/// Configuration for connecting to a Supabase project.
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// Project URL (e.g., "https://abcdefgh.supabase.co").
    pub url: String,
    /// Schema holding the conversation table.
    /// If None, the project's default schema is used.
    pub conversation_schema: Option<String>,
    /// API key sent with every request.
    key: SecretString,
}

impl ConnectorConfig {
    /// Create a configuration with explicit credentials.
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            conversation_schema: None,
            key: SecretString::from(key.into()),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Required:
    /// - `SUPABASE_URL` - Project URL
    /// - `SUPABASE_ANON_KEY` - Anonymous API key
    ///
    /// Optional:
    /// - `SUPABASE_CONVERSATION_SCHEMA` - Schema of the conversation table
    ///
    /// Blank values count as missing.
    pub fn from_env() -> Result<Self> {
        let url = read_env(URL_ENV).ok_or_else(|| missing_var(URL_ENV))?;
        let key = read_env(KEY_ENV).ok_or_else(|| missing_var(KEY_ENV))?;

        let mut config = Self::new(url, key);
        config.conversation_schema = read_env(CONVERSATION_SCHEMA_ENV);
        Ok(config)
    }

    /// Builder method to set the conversation table schema.
    pub fn with_conversation_schema(mut self, schema: impl Into<String>) -> Self {
        self.conversation_schema = Some(schema.into());
        self
    }

    /// Check that both credentials are present and the URL is usable.
    pub fn validate(&self) -> Result<()> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ConnectorError::Configuration(
                "Supabase URL is empty".to_string(),
            ));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConnectorError::Configuration(format!(
                "Supabase URL must start with http:// or https:// (got {})",
                url
            )));
        }
        if self.key.expose_secret().trim().is_empty() {
            return Err(ConnectorError::Configuration(
                "Supabase API key is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the API key (exposes the secret).
    pub(crate) fn key(&self) -> &str {
        self.key.expose_secret()
    }

    /// Get the REST endpoint root.
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url.trim().trim_end_matches('/'))
    }

    /// Get the endpoint URL for a table.
    pub fn table_url(&self, table: &TableRef) -> String {
        format!("{}/{}", self.rest_url(), table.name)
    }

    /// Reference to a table in the conversation schema.
    pub fn conversation_table(&self, name: &str) -> TableRef {
        match &self.conversation_schema {
            Some(schema) => TableRef::in_schema(schema.clone(), name),
            None => TableRef::new(name),
        }
    }
}

fn read_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn missing_var(name: &str) -> ConnectorError {
    ConnectorError::Configuration(format!(
        "{} not set. Provide credentials explicitly or set {} and {}",
        name, URL_ENV, KEY_ENV
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let config = ConnectorConfig::new("https://demo.supabase.co/", "anon");
        assert_eq!(config.rest_url(), "https://demo.supabase.co/rest/v1");
        assert_eq!(
            config.table_url(&TableRef::new("services")),
            "https://demo.supabase.co/rest/v1/services"
        );
    }

    #[test]
    fn test_conversation_table_schema() {
        let config = ConnectorConfig::new("https://demo.supabase.co", "anon");
        assert_eq!(
            config.conversation_table("conversation_history"),
            TableRef::new("conversation_history")
        );

        let config = config.with_conversation_schema("chatbot");
        assert_eq!(
            config.conversation_table("conversation_history"),
            TableRef::in_schema("chatbot", "conversation_history")
        );
    }

    #[test]
    fn test_validate() {
        assert!(ConnectorConfig::new("https://demo.supabase.co", "anon")
            .validate()
            .is_ok());
        assert!(matches!(
            ConnectorConfig::new("", "anon").validate(),
            Err(ConnectorError::Configuration(_))
        ));
        assert!(matches!(
            ConnectorConfig::new("https://demo.supabase.co", "  ").validate(),
            Err(ConnectorError::Configuration(_))
        ));
        assert!(matches!(
            ConnectorConfig::new("demo.supabase.co", "anon").validate(),
            Err(ConnectorError::Configuration(_))
        ));
    }

    #[test]
    fn test_debug_hides_key() {
        let config = ConnectorConfig::new("https://demo.supabase.co", "super-secret-key");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret-key"));
        assert_eq!(config.key(), "super-secret-key");
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_supabase_vars() {
            std::env::remove_var(URL_ENV);
            std::env::remove_var(KEY_ENV);
            std::env::remove_var(CONVERSATION_SCHEMA_ENV);
        }

        // Scenario 1: nothing set
        clear_all_supabase_vars();
        match ConnectorConfig::from_env() {
            Err(ConnectorError::Configuration(msg)) => assert!(msg.contains(URL_ENV)),
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        // Scenario 2: key missing
        std::env::set_var(URL_ENV, "https://env.supabase.co");
        match ConnectorConfig::from_env() {
            Err(ConnectorError::Configuration(msg)) => assert!(msg.contains(KEY_ENV)),
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        // Scenario 3: blank key counts as missing
        std::env::set_var(KEY_ENV, "   ");
        assert!(ConnectorConfig::from_env().is_err());

        // Scenario 4: everything set
        std::env::set_var(KEY_ENV, "env-key");
        std::env::set_var(CONVERSATION_SCHEMA_ENV, "chatbot");
        let config = ConnectorConfig::from_env().unwrap();
        assert_eq!(config.url, "https://env.supabase.co");
        assert_eq!(config.key(), "env-key");
        assert_eq!(config.conversation_schema, Some("chatbot".to_string()));

        clear_all_supabase_vars();
    }
}
