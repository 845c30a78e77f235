//! In-memory cluster client for tests.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use super::client::{ClusterClient, ClusterRequest};
use crate::error::ClusterError;

/// Records every request and answers with a canned response.
pub struct MockClusterClient {
    response: Result<Value, String>,
    requests: Mutex<Vec<ClusterRequest>>,
}

impl MockClusterClient {
    /// Client answering every request with `response`.
    pub fn returning(response: Value) -> Self {
        Self {
            response: Ok(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Client failing every request with a transport error.
    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<ClusterRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The only request seen; panics if there were zero or several.
    pub fn single_request(&self) -> ClusterRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests[0].clone()
    }
}

#[async_trait]
impl ClusterClient for MockClusterClient {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn send(&self, request: &ClusterRequest) -> Result<Value, ClusterError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.response
            .clone()
            .map_err(ClusterError::Transport)
    }
}
