//! HTTP transport built on `reqwest`.

use async_trait::async_trait;
use serde_json::Value;

use super::client::{ClusterClient, ClusterRequest, Method};
use super::config::ClusterConfig;
use crate::error::ClusterError;

/// Cluster client speaking plain HTTP(S) to the REST API.
pub struct HttpClusterClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClusterClient {
    /// Creates a client from connection configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::InvalidConfig`] if the HTTP client cannot be
    /// built.
    pub fn new(config: &ClusterConfig) -> Result<Self, ClusterError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClusterError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.url.clone(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl ClusterClient for HttpClusterClient {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn send(&self, request: &ClusterRequest) -> Result<Value, ClusterError> {
        let url = self.url_for(&request.path);
        tracing::debug!(method = request.method.as_str(), %url, "cluster request");

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClusterError::Transport(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClusterError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ClusterError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        // Some endpoints (hot threads) answer with plain text.
        Ok(serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text)))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_path() {
        let config = ClusterConfig::builder().url("http://example:9200/").build();
        let client = HttpClusterClient::new(&config).unwrap_or_else(|e| panic!("client build failed: {e}"));
        assert_eq!(client.url_for("/_cat/indices"), "http://example:9200/_cat/indices");
        assert_eq!(client.name(), "http");
    }
}
