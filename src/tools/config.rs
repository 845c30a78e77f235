//! Tool customization.
//!
//! Tools can be renamed and re-described from two sources:
//!
//! - a YAML file with a top-level `tools` mapping:
//!
//!   ```yaml
//!   tools:
//!     ListIndexTool:
//!       display_name: list_indices
//!       description: Lists indices
//!       args:
//!         index: Index to inspect
//!   ```
//!
//! - CLI pairs such as `tool.ListIndexTool.display_name=list_indices` or
//!   `tool.SearchIndexTool.args.query.description=DSL query`.
//!
//! A readable file with a non-empty `tools` section wins outright; CLI
//! overrides are then ignored even for tools the file does not mention.
//! All overrides are validated together before the registry is touched, so a
//! single bad entry leaves everything as it was.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::registry::{ToolRegistry, ToolStore};
use crate::error::ConfigError;

/// Pattern every display name must match.
pub const DISPLAY_NAME_PATTERN: &str = r"^[a-zA-Z0-9_-]+$";

const DISPLAY_NAME: &str = "display_name";
const DESCRIPTION: &str = "description";
const ARGS: &str = "args";
const MAX_SIZE_LIMIT: &str = "max_size_limit";

static DISPLAY_NAME_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(DISPLAY_NAME_PATTERN));

/// Whether `name` is usable as a display name.
#[must_use]
pub fn is_valid_display_name(name: &str) -> bool {
    DISPLAY_NAME_RE
        .as_ref()
        .is_ok_and(|re| re.is_match(name))
}

/// Override of a single argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgOverride {
    /// New argument description.
    pub description: Option<String>,
}

/// Overrides for one tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOverride {
    /// New display name.
    pub display_name: Option<String>,
    /// New tool description.
    pub description: Option<String>,
    /// New result-size cap.
    pub max_size_limit: Option<u64>,
    /// Per-argument overrides.
    pub args: BTreeMap<String, ArgOverride>,
}

/// Canonical tool name → overrides.
pub type Overrides = BTreeMap<String, ToolOverride>;

/// Parses the `tools` section of a configuration file.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownField`] for fields other than
/// `display_name`, `description`, `args` and `max_size_limit`,
/// [`ConfigError::ArgumentDescriptionNotString`] when an argument
/// description is not a string, and [`ConfigError::InvalidValue`] or
/// [`ConfigError::InvalidSection`] for values of the wrong shape.
pub fn parse_file_overrides(tools: &Value) -> Result<Overrides, ConfigError> {
    let Value::Object(tools) = tools else {
        return Err(ConfigError::InvalidSection(
            "'tools' must be a mapping of tool name to settings".to_string(),
        ));
    };

    let empty = Map::new();
    let mut overrides = Overrides::new();
    for (tool, settings) in tools {
        let settings = match settings {
            Value::Null => &empty,
            Value::Object(map) => map,
            _ => {
                return Err(ConfigError::InvalidSection(format!(
                    "settings for tool '{tool}' must be a mapping"
                )));
            }
        };

        let mut entry = ToolOverride::default();
        for (field, value) in settings {
            match field.as_str() {
                DISPLAY_NAME => entry.display_name = Some(scalar_text(tool, field, value)?),
                DESCRIPTION => entry.description = Some(scalar_text(tool, field, value)?),
                MAX_SIZE_LIMIT => entry.max_size_limit = Some(size_limit(tool, value)?),
                ARGS => entry.args.extend(parse_file_args(tool, value)?),
                _ => {
                    return Err(ConfigError::UnknownField {
                        field: field.clone(),
                        tool: tool.clone(),
                    });
                }
            }
        }
        overrides.insert(tool.clone(), entry);
    }
    Ok(overrides)
}

/// `args` in a file maps argument name to a plain description string.
fn parse_file_args(tool: &str, value: &Value) -> Result<BTreeMap<String, ArgOverride>, ConfigError> {
    let Value::Object(args) = value else {
        tracing::warn!(
            tool,
            "Invalid 'args' for tool '{tool}'. Must be a mapping of arg -> string."
        );
        return Ok(BTreeMap::new());
    };

    args.iter()
        .map(|(arg, description)| match description {
            Value::String(text) => Ok((
                arg.clone(),
                ArgOverride {
                    description: Some(text.clone()),
                },
            )),
            _ => Err(ConfigError::ArgumentDescriptionNotString {
                arg: arg.clone(),
                tool: tool.to_string(),
            }),
        })
        .collect()
}

/// Parses CLI pairs of the form `tool.<Tool>.<path>=<value>`.
///
/// Keys without the `tool.` prefix, with fewer than three segments, or whose
/// third segment is not a supported field are skipped.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] or
/// [`ConfigError::ArgumentDescriptionNotString`] when a value has the wrong
/// shape for its field.
pub fn parse_cli_overrides(pairs: &BTreeMap<String, String>) -> Result<Overrides, ConfigError> {
    let mut nested = Map::new();
    for (key, raw) in pairs {
        let segments: Vec<&str> = key.split('.').filter(|s| !s.is_empty()).collect();
        if segments.len() < 3 || segments[0] != "tool" {
            continue;
        }
        if !matches!(segments[2], DISPLAY_NAME | DESCRIPTION | ARGS | MAX_SIZE_LIMIT) {
            tracing::debug!(key = %key, "skipping unsupported tool override");
            continue;
        }
        set_nested(&mut nested, &segments[1..], coerce_scalar(raw));
    }

    let mut overrides = Overrides::new();
    for (tool, settings) in &nested {
        let Value::Object(settings) = settings else {
            continue;
        };
        let mut entry = ToolOverride::default();
        for (field, value) in settings {
            match field.as_str() {
                DISPLAY_NAME => entry.display_name = Some(scalar_text(tool, field, value)?),
                DESCRIPTION => entry.description = Some(scalar_text(tool, field, value)?),
                MAX_SIZE_LIMIT => entry.max_size_limit = Some(size_limit(tool, value)?),
                ARGS => entry.args = parse_cli_args(tool, value)?,
                _ => {}
            }
        }
        overrides.insert(tool.clone(), entry);
    }
    Ok(overrides)
}

/// `args` from the CLI maps argument name to `{description: ...}`.
fn parse_cli_args(tool: &str, value: &Value) -> Result<BTreeMap<String, ArgOverride>, ConfigError> {
    let Value::Object(args) = value else {
        return Err(ConfigError::InvalidValue {
            field: ARGS.to_string(),
            tool: tool.to_string(),
            reason: "expected 'args.<arg>.description=<text>'".to_string(),
        });
    };

    let mut parsed = BTreeMap::new();
    for (arg, settings) in args {
        let mut entry = ArgOverride::default();
        if let Value::Object(settings) = settings {
            for (field, value) in settings {
                if field == DESCRIPTION {
                    entry.description = Some(match value {
                        Value::String(text) => text.clone(),
                        _ => {
                            return Err(ConfigError::ArgumentDescriptionNotString {
                                arg: arg.clone(),
                                tool: tool.to_string(),
                            });
                        }
                    });
                } else {
                    tracing::warn!(tool, arg = %arg, field = %field, "ignoring unsupported argument override");
                }
            }
        } else {
            tracing::warn!(tool, arg = %arg, "ignoring argument override without a field");
        }
        parsed.insert(arg.clone(), entry);
    }
    Ok(parsed)
}

/// Sets `path` inside `root`, replacing non-mapping intermediates.
fn set_nested(root: &mut Map<String, Value>, path: &[&str], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let mut current = root;
    for key in parents {
        let slot = current
            .entry((*key).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(map) = slot else {
            return;
        };
        current = map;
    }
    current.insert((*last).to_string(), value);
}

/// Reads a CLI value as a YAML scalar (`true`, `null`, quoted text).
///
/// Numbers keep their raw text (`1e3` stays `"1e3"`, `1.50` stays
/// `"1.50"`); `max_size_limit` parses it itself. Blank values and anything
/// that parses to a sequence or mapping stay strings too.
fn coerce_scalar(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::String(raw.to_string());
    }
    match serde_yaml::from_str::<Value>(raw) {
        Ok(value @ (Value::Null | Value::Bool(_) | Value::String(_))) => value,
        _ => Value::String(raw.to_string()),
    }
}

/// Text of a scalar setting; numbers and booleans are stringified.
fn scalar_text(tool: &str, field: &str, value: &Value) -> Result<String, ConfigError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Bool(_) | Value::Number(_) => Ok(value.to_string()),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            tool: tool.to_string(),
            reason: "expected a string".to_string(),
        }),
    }
}

fn size_limit(tool: &str, value: &Value) -> Result<u64, ConfigError> {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ConfigError::InvalidValue {
        field: MAX_SIZE_LIMIT.to_string(),
        tool: tool.to_string(),
        reason: "expected a non-negative integer".to_string(),
    })
}

/// Checks every override against `registry` without modifying anything.
///
/// Tools and argument lists missing from `registry` are looked up in
/// `defaults`.
///
/// # Errors
///
/// Returns the first violation found: an unknown tool, a display-name
/// conflict, a display name not matching [`DISPLAY_NAME_PATTERN`], or an
/// argument the tool does not declare.
pub fn validate(
    overrides: &Overrides,
    registry: &ToolRegistry,
    defaults: &ToolRegistry,
) -> Result<(), ConfigError> {
    for tool in overrides.keys() {
        if !registry.contains(tool) && !defaults.contains(tool) {
            return Err(ConfigError::UnknownTool { tool: tool.clone() });
        }
    }

    // Names each tool will answer to once every override is applied.
    let mut resulting: BTreeMap<&str, &str> = registry
        .iter()
        .map(|t| (t.name.as_str(), t.display_name.as_str()))
        .collect();
    for (tool, entry) in overrides {
        if let Some(display_name) = &entry.display_name {
            resulting.insert(tool.as_str(), display_name.as_str());
        }
    }

    for (tool, entry) in overrides {
        let Some(display_name) = entry.display_name.as_deref() else {
            continue;
        };
        let taken_by_other = resulting.iter().any(|(&name, &shown)| {
            name != tool.as_str() && (name == display_name || shown == display_name)
        });
        if taken_by_other {
            return Err(ConfigError::DisplayNameConflict {
                display_name: display_name.to_string(),
            });
        }
    }

    for (tool, entry) in overrides {
        if let Some(display_name) = &entry.display_name
            && !is_valid_display_name(display_name)
        {
            return Err(ConfigError::InvalidDisplayName {
                display_name: display_name.clone(),
                tool: tool.clone(),
                pattern: DISPLAY_NAME_PATTERN,
            });
        }
    }

    for (tool, entry) in overrides {
        if entry.args.is_empty() {
            continue;
        }
        let properties = registry
            .get(tool)
            .and_then(|t| t.properties())
            .or_else(|| defaults.get(tool).and_then(|t| t.properties()));
        for arg in entry.args.keys() {
            if !properties.is_some_and(|props| props.contains_key(arg)) {
                return Err(ConfigError::UnknownArgument {
                    arg: arg.clone(),
                    tool: tool.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Applies already validated overrides to `registry`.
///
/// A tool with an empty input schema starts from its schema in `defaults`.
pub fn apply(registry: &mut ToolRegistry, overrides: &Overrides, defaults: &ToolRegistry) {
    for (name, entry) in overrides {
        let Some(tool) = registry.get_mut(name) else {
            continue;
        };
        if let Some(display_name) = &entry.display_name {
            tool.display_name.clone_from(display_name);
        }
        if let Some(description) = &entry.description {
            tool.description.clone_from(description);
        }
        if entry.max_size_limit.is_some() {
            tool.max_size_limit = entry.max_size_limit;
        }
        if entry.args.is_empty() {
            continue;
        }

        let mut schema = if tool.input_schema.is_empty() {
            defaults
                .get(name)
                .map(|t| t.input_schema.clone())
                .unwrap_or_default()
        } else {
            tool.input_schema.clone()
        };
        if let Some(Value::Object(properties)) = schema.get_mut("properties") {
            for (arg, arg_entry) in &entry.args {
                let Some(description) = &arg_entry.description else {
                    continue;
                };
                let Some(property) = properties.get_mut(arg) else {
                    continue;
                };
                if !property.is_object() {
                    *property = Value::Object(Map::new());
                }
                if let Value::Object(property) = property {
                    property.insert(DESCRIPTION.to_string(), Value::String(description.clone()));
                }
                if let Some(spec) = tool.arg_mut(arg) {
                    spec.description.clone_from(description);
                }
            }
        }
        tool.input_schema = schema;
    }
}

/// Loads the `tools` section of a YAML file.
///
/// Unreadable or unparsable files are logged and treated as absent, as is a
/// missing, null or empty `tools` section.
fn load_file_section(path: &Path) -> Option<Value> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(path = %path.display(), "Error loading tool config file: {e}");
            return None;
        }
    };
    let document: Value = match serde_yaml::from_str(&text) {
        Ok(document) => document,
        Err(e) => {
            tracing::error!(path = %path.display(), "Error loading tool config file: {e}");
            return None;
        }
    };

    match document.get("tools")? {
        Value::Null => None,
        Value::Object(map) if map.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        section => Some(section.clone()),
    }
}

/// Returns a customized copy of `registry` and publishes it to `store`.
///
/// File overrides are used when `config_file` yields a `tools` section;
/// otherwise `cli` overrides are used. `registry` itself is not modified.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the selected overrides fail to parse or
/// validate; neither the returned registry nor `store` is changed then.
pub fn apply_tool_config(
    registry: &ToolRegistry,
    store: &ToolStore,
    config_file: Option<&Path>,
    cli: &BTreeMap<String, String>,
) -> Result<ToolRegistry, ConfigError> {
    let mut custom = registry.clone();

    let overrides = match config_file.and_then(load_file_section) {
        Some(section) => {
            tracing::debug!("applying tool overrides from config file");
            parse_file_overrides(&section)?
        }
        None => parse_cli_overrides(cli)?,
    };

    if !overrides.is_empty() {
        let defaults = store.snapshot();
        validate(&overrides, &custom, &defaults)?;
        apply(&mut custom, &overrides, &defaults);
        tracing::info!(tools = overrides.len(), "applied tool overrides");
    }

    store.update(&custom);
    Ok(custom)
}
