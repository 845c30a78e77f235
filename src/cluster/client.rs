//! Pluggable cluster client trait.
//!
//! Tools describe each REST call as a [`ClusterRequest`] and hand it to a
//! [`ClusterClient`]; the transport behind it is interchangeable.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClusterError;

/// HTTP method of a cluster request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl Method {
    /// Returns the method as an uppercase string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// A single REST call against the cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterRequest {
    /// HTTP method.
    pub method: Method,
    /// Path beginning with `/`, e.g. `/_cat/indices`.
    pub path: String,
    /// Query-string parameters, in order.
    pub params: Vec<(String, String)>,
    /// Optional JSON body.
    pub body: Option<Value>,
}

impl ClusterRequest {
    /// Creates a `GET` request for `path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            params: Vec::new(),
            body: None,
        }
    }

    /// Creates a `POST` request for `path` with a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            params: Vec::new(),
            body: Some(body),
        }
    }

    /// Appends a query-string parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Shorthand for `format=json`, used by the `_cat` APIs.
    #[must_use]
    pub fn json_format(self) -> Self {
        self.param("format", "json")
    }
}

/// Trait for cluster transports.
///
/// Implementations perform the network call; JSON responses come back as
/// [`Value`], plain-text responses as [`Value::String`].
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Transport name for logging.
    fn name(&self) -> &'static str;

    /// Sends one request.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError`] on connection failures or non-success
    /// statuses.
    async fn send(&self, request: &ClusterRequest) -> Result<Value, ClusterError>;
}
