//! opensearch-mcp-rs binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use opensearch_mcp_rs::cli::{Cli, execute};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(&cli) {
        Ok(output) => {
            if !output.is_empty() {
                #[allow(clippy::print_stdout)]
                {
                    println!("{}", output.trim_end());
                }
            }
        }
        Err(e) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Error: {e}");
            }
            std::process::exit(1);
        }
    }
}

/// Logs go to stderr; stdout carries the stdio MCP protocol.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
