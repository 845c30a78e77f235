//! MCP (Model Context Protocol) server for OpenSearch.
//!
//! Publishes the customized tool set from the shared
//! [`ToolStore`](crate::tools::ToolStore) and forwards calls to the cluster.
//!
//! # Architecture
//!
//! ```text
//! MCP Client (agent)
//!   ↓ tools/call { name: <display name>, arguments }
//! OpenSearchMcpServer
//!   ↓ ToolStore::resolve → ToolDescriptor
//! tools::call_tool
//!   ↓ ClusterRequest
//! dyn ClusterClient → OpenSearch
//!   ↓
//! text result → MCP Client
//! ```
//!
//! # Transports
//!
//! - stdio: [`serve_stdio`]
//! - streamable HTTP at `/mcp`: `serve_http` (feature `http-transport`)

pub mod server;
pub mod transport;

pub use server::OpenSearchMcpServer;
#[cfg(feature = "http-transport")]
pub use transport::serve_http;
pub use transport::serve_stdio;
