//! The OpenSearch tool set.
//!
//! # Architecture
//!
//! ```text
//! ToolRegistry::default_tools()      (14 built-in descriptors)
//!   ↓ apply_tool_config()            (file overrides > CLI overrides)
//! ToolStore                          (shared, read by the MCP server)
//!   ↓ resolve(display_name)
//! handlers::call_tool() → ClusterClient
//! ```

pub mod config;
pub mod handlers;
pub mod params;
pub mod registry;

pub use config::{
    ArgOverride, DISPLAY_NAME_PATTERN, ToolOverride, apply_tool_config, is_valid_display_name,
};
pub use handlers::call_tool;
pub use registry::{ArgSpec, ToolDescriptor, ToolKind, ToolRegistry, ToolStore};
