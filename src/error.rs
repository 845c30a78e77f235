//! Error types for opensearch-mcp-rs.
//!
//! Each layer has its own error enum; [`Error`] unifies them for the CLI.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Tool configuration could not be applied.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A request against the cluster failed.
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    /// A tool invocation failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// A CLI command failed.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while parsing or validating tool overrides.
///
/// Any of these aborts the whole configuration pass; the registry is left
/// untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The override targets a tool that is not registered.
    #[error("Tool '{tool}' is not a valid tool name.")]
    UnknownTool {
        /// Canonical tool name from the override.
        tool: String,
    },

    /// A config-file entry used a field other than the supported ones.
    #[error(
        "Invalid field '{field}' for tool '{tool}' in config file. Supported fields: display_name, description, max_size_limit, args."
    )]
    UnknownField {
        /// Offending field name.
        field: String,
        /// Tool the field was set on.
        tool: String,
    },

    /// Two tools would end up sharing a name.
    #[error("Display name '{display_name}' conflicts with another tool.")]
    DisplayNameConflict {
        /// Requested display name.
        display_name: String,
    },

    /// The display name does not match `^[a-zA-Z0-9_-]+$`.
    #[error(
        "Display name '{display_name}' for tool '{tool}' does not follow the required pattern '{pattern}'."
    )]
    InvalidDisplayName {
        /// Requested display name.
        display_name: String,
        /// Tool being renamed.
        tool: String,
        /// Pattern the name must match.
        pattern: &'static str,
    },

    /// The override names an argument the tool does not declare.
    #[error("Argument '{arg}' does not exist on tool '{tool}'.")]
    UnknownArgument {
        /// Argument name from the override.
        arg: String,
        /// Tool the argument was looked up on.
        tool: String,
    },

    /// An argument description was not a string.
    #[error("Description for argument '{arg}' in tool '{tool}' must be a string.")]
    ArgumentDescriptionNotString {
        /// Argument name.
        arg: String,
        /// Tool name.
        tool: String,
    },

    /// A tool-level field had a value of the wrong shape.
    #[error("Invalid value for '{field}' on tool '{tool}': {reason}")]
    InvalidValue {
        /// Field name.
        field: String,
        /// Tool name.
        tool: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The `tools` section of a config file is not a mapping.
    #[error("Invalid tool configuration: {0}")]
    InvalidSection(String),
}

/// Errors from the cluster transport.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// The HTTP request could not be sent or its body read.
    #[error("{0}")]
    Transport(String),

    /// The cluster answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body as text.
        body: String,
    },

    /// The client could not be constructed.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

/// Errors surfaced while running a tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool is registered under the requested name.
    #[error("Unknown tool: {name}")]
    UnknownTool {
        /// Name requested by the caller.
        name: String,
    },

    /// The supplied arguments do not match the tool's schema.
    #[error("{message}")]
    InvalidArguments {
        /// Human-readable explanation.
        message: String,
    },

    /// The cluster request failed; `context` is the tool's error prefix.
    #[error("{context}: {source}")]
    Cluster {
        /// Prefix describing what the tool was doing.
        context: &'static str,
        /// Underlying failure.
        #[source]
        source: ClusterError,
    },

    /// The request body could not be parsed or prepared.
    #[error("{context}: {message}")]
    Request {
        /// Prefix describing what the tool was doing.
        context: &'static str,
        /// What went wrong.
        message: String,
    },
}

/// Errors from CLI command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Generic execution failure.
    #[error("{0}")]
    ExecutionFailed(String),

    /// A `KEY=VALUE` override was malformed.
    #[error("Invalid override '{0}': expected KEY=VALUE")]
    InvalidOverride(String),
}
