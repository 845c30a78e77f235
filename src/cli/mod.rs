//! CLI layer for opensearch-mcp-rs.
//!
//! Provides the command-line interface using clap, with commands for
//! serving MCP and inspecting the customized tool set.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
