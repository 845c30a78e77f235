//! # opensearch-mcp-rs
//!
//! An MCP (Model Context Protocol) server that exposes OpenSearch cluster
//! administration and search as agent tools.
//!
//! ## Modules
//!
//! - [`core`]: pure JSON transforms (float normalization, CSV rendering)
//! - [`cluster`]: the [`ClusterClient`](cluster::ClusterClient) seam and its
//!   HTTP implementation
//! - [`tools`]: tool registry, override merger and handlers
//! - [`mcp`]: rmcp server and transports
//! - [`cli`]: command-line interface
//!
//! ## Tool customization
//!
//! ```text
//! tools:
//!   ListIndexTool:
//!     display_name: list_indices
//!     args:
//!       index: Index to inspect
//! ```
//!
//! A configuration file with a `tools` section replaces CLI overrides
//! (`-o tool.ListIndexTool.display_name=list_indices`) entirely.

pub mod cli;
pub mod cluster;
pub mod core;
pub mod error;
pub mod mcp;
pub mod tools;

pub use error::{ClusterError, CommandError, ConfigError, Error, Result, ToolError};
