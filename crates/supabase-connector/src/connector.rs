//! The connector context object.

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde_json::Value;
use table_core::{Row, TableRequest, Transport, TransportError};
use tracing::{debug, info, warn};

use crate::config::ConnectorConfig;
use crate::error::{ConnectorError, Result};
use crate::http::HttpTransport;

/// Handle to a Supabase project.
///
/// Every accessor takes a `&SupabaseConnector`. Cloning is cheap; clones share
/// the same transport.
#[derive(Clone)]
pub struct SupabaseConnector {
    config: ConnectorConfig,
    transport: Arc<dyn Transport>,
}

impl SupabaseConnector {
    /// Create a connector that talks to the project over HTTP.
    pub fn new(config: ConnectorConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.clone())?;
        info!("Supabase connector ready for {}", config.url);
        Ok(Self {
            config,
            transport: Arc::new(transport),
        })
    }

    /// Create a connector from `SUPABASE_URL` / `SUPABASE_ANON_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::new(ConnectorConfig::from_env()?)
    }

    /// Create a connector backed by a custom transport.
    ///
    /// Credentials are still validated so configuration mistakes surface the
    /// same way regardless of transport.
    pub fn with_transport(config: ConnectorConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        info!(
            "Supabase connector ready for {} via {}",
            config.url,
            transport.name()
        );
        Ok(Self { config, transport })
    }

    /// Check connectivity. Failures are reported as `false`, never as errors.
    pub async fn probe(&self) -> bool {
        match self.transport.probe().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Supabase probe failed: {}", e);
                false
            }
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Get the underlying transport.
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Execute a request, tagging failures with the operation name.
    pub(crate) async fn execute(&self, operation: &str, request: TableRequest) -> Result<Vec<Row>> {
        debug!("{} {} ({})", request.kind(), request.table(), operation);
        self.transport
            .execute(request)
            .await
            .map_err(|e| ConnectorError::remote(operation, e))
    }

    /// Execute a request and decode every returned row.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: TableRequest,
    ) -> Result<Vec<T>> {
        let rows = self.execute(operation, request).await?;
        decode_rows(operation, rows)
    }
}

impl std::fmt::Debug for SupabaseConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConnector")
            .field("config", &self.config)
            .field("transport", &self.transport.name())
            .finish()
    }
}

fn decode_rows<T: DeserializeOwned>(operation: &str, rows: Vec<Row>) -> Result<Vec<T>> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(Value::Object(row))
                .map_err(|e| ConnectorError::remote(operation, TransportError::Decode(e)))
        })
        .collect()
}

static GLOBAL: Mutex<Option<Arc<SupabaseConnector>>> = Mutex::new(None);

/// Get the process-wide connector, building it from the environment on
/// first use.
///
/// Initialization happens at most once even under concurrent first use. A
/// failed initialization is not cached, so a later call can succeed once the
/// environment is fixed.
pub fn global() -> Result<Arc<SupabaseConnector>> {
    let mut slot = GLOBAL
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(connector) = slot.as_ref() {
        return Ok(Arc::clone(connector));
    }

    let connector = Arc::new(SupabaseConnector::from_env()?);
    *slot = Some(Arc::clone(&connector));
    Ok(connector)
}

/// Install a connector as the process-wide instance, replacing any existing one.
pub fn set_global(connector: SupabaseConnector) -> Arc<SupabaseConnector> {
    let connector = Arc::new(connector);
    *GLOBAL
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(Arc::clone(&connector));
    connector
}
