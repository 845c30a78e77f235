//! MCP server implementation.
//!
//! The tool set is not fixed at compile time (display names and
//! descriptions come from configuration), so `list_tools` and `call_tool`
//! are implemented by hand against the shared [`ToolStore`] instead of
//! through the `#[tool_router]` macros.

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use serde_json::{Map, Value};

use crate::cluster::ClusterClient;
use crate::error::ToolError;
use crate::tools::{ToolStore, call_tool};

/// OpenSearch MCP server.
///
/// Cheap to clone; every clone shares the same tool store and cluster
/// client.
#[derive(Clone)]
pub struct OpenSearchMcpServer {
    store: Arc<ToolStore>,
    client: Arc<dyn ClusterClient>,
}

impl OpenSearchMcpServer {
    /// Creates a server publishing the tools in `store`.
    #[must_use]
    pub fn new(store: Arc<ToolStore>, client: Arc<dyn ClusterClient>) -> Self {
        Self { store, client }
    }

    /// Tools as advertised to clients, under their display names.
    #[must_use]
    pub fn tool_list(&self) -> Vec<Tool> {
        self.store
            .tools()
            .into_iter()
            .map(|t| Tool::new(t.display_name, t.description, Arc::new(t.input_schema)))
            .collect()
    }

    /// Runs the tool published as `name`.
    ///
    /// Unknown tools and malformed arguments are protocol errors; failures
    /// while talking to the cluster come back as an error-flagged result.
    ///
    /// # Errors
    ///
    /// Returns `invalid_params` if no tool is published as `name` or the
    /// arguments do not match its schema.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<CallToolResult, McpError> {
        let Some(tool) = self.store.resolve(name) else {
            let err = ToolError::UnknownTool {
                name: name.to_string(),
            };
            return Err(McpError::invalid_params(err.to_string(), None));
        };

        let arguments = arguments.unwrap_or_default();
        match call_tool(&tool, self.client.as_ref(), &arguments).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(err @ ToolError::InvalidArguments { .. }) => {
                Err(McpError::invalid_params(err.to_string(), None))
            }
            Err(err) => {
                tracing::warn!(tool = %tool.name, error = %err, "tool call failed");
                Ok(CallToolResult::error(vec![Content::text(err.to_string())]))
            }
        }
    }
}

impl ServerHandler for OpenSearchMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "opensearch-mcp-rs".to_string(),
                title: Some("OpenSearch MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "OpenSearch MCP server: inspect indices, mappings, shards, segments, nodes and \
                 tasks, and run query DSL searches. Search results can be returned as CSV."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_list(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(&request.name, request.arguments).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::cluster::mock::MockClusterClient;
    use crate::tools::ToolRegistry;

    fn server_with(client: MockClusterClient) -> OpenSearchMcpServer {
        OpenSearchMcpServer::new(Arc::new(ToolStore::with_default_tools()), Arc::new(client))
    }

    fn text_of(result: &CallToolResult) -> String {
        result
            .content
            .iter()
            .filter_map(|c| c.as_text().map(|t| t.text.clone()))
            .collect()
    }

    fn object(value: Value) -> Option<Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    #[test]
    fn test_tool_list_uses_display_names() {
        let store = Arc::new(ToolStore::with_default_tools());
        let mut custom = store.snapshot();
        if let Some(tool) = custom.get_mut("ListIndexTool") {
            tool.display_name = "list_indices".to_string();
            tool.description = "Custom".to_string();
        }
        store.update(&custom);
        let server = OpenSearchMcpServer::new(
            store,
            Arc::new(MockClusterClient::returning(json!([]))),
        );

        let tools = server.tool_list();
        assert_eq!(tools.len(), ToolRegistry::default_tools().len());
        let listed = tools
            .iter()
            .find(|t| t.name == "list_indices")
            .unwrap_or_else(|| panic!("renamed tool not listed"));
        assert_eq!(listed.description.as_deref(), Some("Custom"));
        assert!(tools.iter().all(|t| t.name != "ListIndexTool"));
    }

    #[test]
    fn test_get_info_enables_tools() {
        let server = server_with(MockClusterClient::returning(json!({})));
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert_eq!(info.server_info.name, "opensearch-mcp-rs");
    }

    #[tokio::test]
    async fn test_dispatch_success() {
        let server = server_with(MockClusterClient::returning(json!({"m": 1})));
        let result = server
            .dispatch("IndexMappingTool", object(json!({"index": "logs"})))
            .await
            .unwrap_or_else(|e| panic!("dispatch failed: {e:?}"));
        assert_ne!(result.is_error, Some(true));
        assert!(text_of(&result).starts_with("Mapping for logs:"));
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool_is_protocol_error() {
        let server = server_with(MockClusterClient::returning(json!({})));
        let err = server.dispatch("NoSuchTool", None).await;
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn test_dispatch_missing_argument_is_protocol_error() {
        let server = server_with(MockClusterClient::returning(json!({})));
        let err = server.dispatch("GetShardsTool", None).await;
        let err = match err {
            Err(e) => e,
            Ok(r) => panic!("expected error, got {r:?}"),
        };
        assert!(err.message.contains("Missing required field(s): 'index'"));
    }

    #[tokio::test]
    async fn test_dispatch_cluster_failure_is_error_result() {
        let server = server_with(MockClusterClient::failing("Test error"));
        let result = server
            .dispatch("GetAllocationTool", None)
            .await
            .unwrap_or_else(|e| panic!("dispatch failed: {e:?}"));
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text_of(&result),
            "Error getting allocation information: Test error"
        );
    }
}
