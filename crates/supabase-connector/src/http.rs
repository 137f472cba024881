//! PostgREST transport over HTTP.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response};
use table_core::{Row, TableRef, TableRequest, Transport, TransportError};
use tracing::debug;

use crate::config::ConnectorConfig;
use crate::error::{ConnectorError, Result};

/// Transport that talks to the project's REST endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    config: ConnectorConfig,
}

impl HttpTransport {
    /// Build a transport for the given configuration.
    ///
    /// The API key is attached to every request as both the `apikey` header
    /// and a bearer token.
    pub fn new(config: ConnectorConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(config.key())
            .map_err(|e| ConnectorError::Configuration(format!("invalid API key: {}", e)))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.key()))
            .map_err(|e| ConnectorError::Configuration(format!("invalid API key: {}", e)))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ConnectorError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    fn with_profile(builder: RequestBuilder, table: &TableRef, write: bool) -> RequestBuilder {
        match &table.schema {
            Some(schema) if write => builder.header("Content-Profile", schema),
            Some(schema) => builder.header("Accept-Profile", schema),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> std::result::Result<Response, TransportError> {
        let response = builder.send().await.map_err(TransportError::request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn rows(response: Response) -> std::result::Result<Vec<Row>, TransportError> {
        let bytes = response.bytes().await.map_err(TransportError::request)?;
        if bytes.is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: TableRequest) -> std::result::Result<Vec<Row>, TransportError> {
        let url = self.config.table_url(request.table());
        let write = request.is_write();

        let builder = match &request {
            TableRequest::Select { query, .. } => {
                let params = query.to_params();
                debug!("GET {} ({} params)", url, params.len());
                self.http.get(&url).query(&params)
            }
            TableRequest::Insert { rows, .. } => {
                debug!("POST {} ({} rows)", url, rows.len());
                self.http
                    .post(&url)
                    .header("Prefer", "return=representation")
                    .json(rows)
            }
            TableRequest::Delete { query, .. } => {
                let params = query.filter_params();
                debug!("DELETE {} ({} params)", url, params.len());
                self.http
                    .delete(&url)
                    .header("Prefer", "return=minimal")
                    .query(&params)
            }
        };

        let builder = Self::with_profile(builder, request.table(), write);
        let response = Self::send(builder).await?;
        Self::rows(response).await
    }

    async fn probe(&self) -> std::result::Result<(), TransportError> {
        let url = format!("{}/", self.config.rest_url());
        debug!("Probe: {}", url);
        Self::send(self.http.get(&url)).await.map(|_| ())
    }

    fn name(&self) -> &str {
        "HttpTransport"
    }
}
