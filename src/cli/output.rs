//! Output formatting for CLI commands.

use std::fmt::Write;

use crate::tools::ToolDescriptor;

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON.
    Json,
}

impl OutputFormat {
    /// Parses a format name; anything unrecognized is text.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats the tool list.
#[must_use]
pub fn format_tools(tools: &[ToolDescriptor], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(tools).unwrap_or_default(),
        OutputFormat::Text => {
            let mut out = String::new();
            for tool in tools {
                if tool.display_name == tool.name {
                    let _ = writeln!(out, "{}", tool.name);
                } else {
                    let _ = writeln!(out, "{} (was {})", tool.display_name, tool.name);
                }
                let _ = writeln!(out, "  {}", tool.description);
                if let Some(limit) = tool.max_size_limit {
                    let _ = writeln!(out, "  max_size_limit: {limit}");
                }
                for arg in &tool.args {
                    let required = if arg.required { ", required" } else { "" };
                    let _ = writeln!(
                        out,
                        "  - {} ({}{required}): {}",
                        arg.name, arg.kind, arg.description
                    );
                }
            }
            out
        }
    }
}
