//! CLI command implementations.

use std::sync::Arc;
use std::time::Duration;

use crate::cli::output::{OutputFormat, format_tools};
use crate::cli::parser::{Cli, Commands};
use crate::cluster::{ClusterConfig, create_client};
use crate::error::{CommandError, Result};
use crate::mcp::OpenSearchMcpServer;
use crate::tools::{ToolRegistry, ToolStore, apply_tool_config};

/// Executes the CLI command.
///
/// Tool customization is applied before any command runs, so invalid
/// overrides fail fast even for `tools`.
///
/// # Errors
///
/// Returns an error if the tool configuration is invalid or the command
/// fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let store = Arc::new(ToolStore::with_default_tools());
    configure_tools(cli, &store)?;

    match &cli.command {
        Commands::Tools { format } => Ok(cmd_tools(&store, OutputFormat::parse(format))),
        _ => cmd_serve(cli, store),
    }
}

/// Applies file or CLI overrides to `store`.
fn configure_tools(cli: &Cli, store: &ToolStore) -> Result<()> {
    let overrides = cli.override_map()?;
    let registry = ToolRegistry::default_tools();
    apply_tool_config(&registry, store, cli.config.as_deref(), &overrides)?;
    Ok(())
}

fn cmd_tools(store: &ToolStore, format: OutputFormat) -> String {
    format_tools(&store.tools(), format)
}

fn cmd_serve(cli: &Cli, store: Arc<ToolStore>) -> Result<String> {
    use crate::mcp::serve_stdio;

    let mut builder = ClusterConfig::builder().url(&cli.url);
    if let Some(secs) = cli.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let config = builder.from_env().build();
    let client = create_client(&config)?;
    tracing::info!(url = %config.url, client = client.name(), "cluster client ready");

    let server = OpenSearchMcpServer::new(store, Arc::from(client));

    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        CommandError::ExecutionFailed(format!("Failed to create async runtime: {e}"))
    })?;

    rt.block_on(async {
        match &cli.command {
            #[cfg(feature = "http-transport")]
            Commands::Http { host, port } => crate::mcp::serve_http(server, host, *port).await,
            _ => serve_stdio(server).await,
        }
    })
    .map_err(|e| CommandError::ExecutionFailed(format!("MCP server error: {e}")))?;

    Ok(String::new())
}
