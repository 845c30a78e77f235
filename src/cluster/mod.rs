//! Cluster access for tool handlers.
//!
//! # Architecture
//!
//! ```text
//! Tool handler
//!   ↓ ClusterRequest (method, path, params, body)
//! dyn ClusterClient
//!   └── HttpClusterClient (reqwest) → OpenSearch REST API
//!   ↓
//! serde_json::Value (or Value::String for text endpoints)
//! ```

pub mod client;
pub mod config;
pub mod http;
#[cfg(test)]
pub mod mock;

pub use client::{ClusterClient, ClusterRequest, Method};
pub use config::ClusterConfig;
pub use http::HttpClusterClient;

use crate::error::ClusterError;

/// Creates the default HTTP-backed [`ClusterClient`].
///
/// # Errors
///
/// Returns [`ClusterError::InvalidConfig`] if the transport cannot be built.
pub fn create_client(config: &ClusterConfig) -> Result<Box<dyn ClusterClient>, ClusterError> {
    Ok(Box::new(HttpClusterClient::new(config)?))
}
