//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cluster::config::DEFAULT_URL;
use crate::error::CommandError;

/// OpenSearch MCP server.
///
/// Exposes cluster administration and search as MCP tools. Tool names and
/// descriptions can be customized from a YAML file or with `-o` overrides.
#[derive(Parser, Debug)]
#[command(name = "opensearch-mcp-rs")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the OpenSearch cluster.
    #[arg(long, env = "OPENSEARCH_URL", default_value = DEFAULT_URL, global = true)]
    pub url: String,

    /// Request timeout in seconds.
    #[arg(long, env = "OPENSEARCH_TIMEOUT", global = true)]
    pub timeout_secs: Option<u64>,

    /// YAML file with a top-level `tools` section.
    ///
    /// When it provides tool settings, `--override` values are ignored.
    #[arg(short, long, env = "OPENSEARCH_MCP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Tool override as `tool.<Tool>.<field>=<value>`; repeatable.
    #[arg(short = 'o', long = "override", value_name = "KEY=VALUE", global = true)]
    pub overrides: Vec<String>,

    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Splits `--override` values into a key → value map.
    ///
    /// Later occurrences of a key win.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidOverride`] for values without `=`.
    pub fn override_map(&self) -> Result<BTreeMap<String, String>, CommandError> {
        self.overrides
            .iter()
            .map(|pair| {
                pair.split_once('=')
                    .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                    .ok_or_else(|| CommandError::InvalidOverride(pair.clone()))
            })
            .collect()
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start MCP server with stdio transport.
    ///
    /// Reads JSON-RPC messages from stdin, writes responses to stdout.
    #[command(after_help = r#"Examples:
  opensearch-mcp-rs stdio
  opensearch-mcp-rs --url https://search:9200 stdio
  opensearch-mcp-rs -o tool.ListIndexTool.display_name=list_indices stdio
"#)]
    Stdio,

    /// Start MCP server with streamable HTTP transport at `/mcp`.
    #[cfg(feature = "http-transport")]
    #[command(after_help = r#"Examples:
  opensearch-mcp-rs http                            # Listen on 127.0.0.1:9900
  opensearch-mcp-rs http --host 0.0.0.0 --port 8080
"#)]
    Http {
        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to.
        #[arg(long, default_value = "9900")]
        port: u16,
    },

    /// Print the effective tool list after customization.
    #[command(after_help = r#"Examples:
  opensearch-mcp-rs tools
  opensearch-mcp-rs --config tools.yml tools --format json
"#)]
    Tools {
        /// Output format (text, json).
        #[arg(long, default_value = "text")]
        format: String,
    },
}
