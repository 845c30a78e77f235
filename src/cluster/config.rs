//! Cluster connection configuration with builder and environment support.
//!
//! Configuration is resolved in order: explicit values → environment variables → defaults.

use std::time::Duration;

/// Default cluster endpoint.
pub const DEFAULT_URL: &str = "http://localhost:9200";
/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the cluster transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterConfig {
    /// Base URL of the cluster, without trailing slash.
    pub url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClusterConfig {
    /// Creates a new builder for `ClusterConfig`.
    #[must_use]
    pub fn builder() -> ClusterConfigBuilder {
        ClusterConfigBuilder::default()
    }

    /// Creates configuration from environment variables with defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::builder().from_env().build()
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`ClusterConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClusterConfigBuilder {
    url: Option<String>,
    timeout: Option<Duration>,
}

impl ClusterConfigBuilder {
    /// Populates unset fields from environment variables.
    #[must_use]
    pub fn from_env(mut self) -> Self {
        if self.url.is_none() {
            self.url = std::env::var("OPENSEARCH_URL").ok();
        }
        if self.timeout.is_none() {
            self.timeout = std::env::var("OPENSEARCH_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs);
        }
        self
    }

    /// Sets the cluster URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Builds the [`ClusterConfig`].
    #[must_use]
    pub fn build(self) -> ClusterConfig {
        let url = self.url.unwrap_or_else(|| DEFAULT_URL.to_string());
        ClusterConfig {
            url: url.trim_end_matches('/').to_string(),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}
