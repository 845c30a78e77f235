//! Tool registry.
//!
//! [`ToolRegistry`] maps canonical tool names to [`ToolDescriptor`]s. The
//! canonical name is an immutable key; only the display name, the
//! descriptions and the size limit may be customized.
//!
//! [`ToolStore`] is the process-wide registry shared by the MCP server. It
//! is written once at startup by
//! [`apply_tool_config`](super::config::apply_tool_config) and read for
//! every `list_tools`/`call_tool` afterwards.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use schemars::JsonSchema;
use serde::Serialize;
use serde_json::{Map, Value};

use super::params::{
    CatNodesArgs, GetAllocationArgs, GetClusterStateArgs, GetIndexInfoArgs, GetIndexMappingArgs,
    GetIndexStatsArgs, GetLongRunningTasksArgs, GetNodesArgs, GetNodesHotThreadsArgs,
    GetQueryInsightsArgs, GetSegmentsArgs, GetShardsArgs, ListIndicesArgs, SearchIndexArgs,
};

/// Which handler a descriptor dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ToolKind {
    /// `ListIndexTool`
    ListIndices,
    /// `IndexMappingTool`
    IndexMapping,
    /// `SearchIndexTool`
    SearchIndex,
    /// `GetShardsTool`
    GetShards,
    /// `GetClusterStateTool`
    GetClusterState,
    /// `GetSegmentsTool`
    GetSegments,
    /// `CatNodesTool`
    CatNodes,
    /// `GetNodesTool`
    GetNodes,
    /// `GetIndexInfoTool`
    GetIndexInfo,
    /// `GetIndexStatsTool`
    GetIndexStats,
    /// `GetQueryInsightsTool`
    GetQueryInsights,
    /// `GetNodesHotThreadsTool`
    GetNodesHotThreads,
    /// `GetAllocationTool`
    GetAllocation,
    /// `GetLongRunningTasksTool`
    GetLongRunningTasks,
}

impl ToolKind {
    /// Every built-in tool, in registration order.
    pub const ALL: [Self; 14] = [
        Self::ListIndices,
        Self::IndexMapping,
        Self::SearchIndex,
        Self::GetShards,
        Self::GetClusterState,
        Self::GetSegments,
        Self::CatNodes,
        Self::GetNodes,
        Self::GetIndexInfo,
        Self::GetIndexStats,
        Self::GetQueryInsights,
        Self::GetNodesHotThreads,
        Self::GetAllocation,
        Self::GetLongRunningTasks,
    ];

    /// Canonical tool name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ListIndices => "ListIndexTool",
            Self::IndexMapping => "IndexMappingTool",
            Self::SearchIndex => "SearchIndexTool",
            Self::GetShards => "GetShardsTool",
            Self::GetClusterState => "GetClusterStateTool",
            Self::GetSegments => "GetSegmentsTool",
            Self::CatNodes => "CatNodesTool",
            Self::GetNodes => "GetNodesTool",
            Self::GetIndexInfo => "GetIndexInfoTool",
            Self::GetIndexStats => "GetIndexStatsTool",
            Self::GetQueryInsights => "GetQueryInsightsTool",
            Self::GetNodesHotThreads => "GetNodesHotThreadsTool",
            Self::GetAllocation => "GetAllocationTool",
            Self::GetLongRunningTasks => "GetLongRunningTasksTool",
        }
    }

    /// Default description shown to agents.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ListIndices => {
                "Lists all indices in the OpenSearch cluster with full information including docs.count, docs.deleted, store.size, etc. If an index parameter is provided, returns detailed information about that specific index."
            }
            Self::IndexMapping => {
                "Retrieves index mapping and setting information for an index in OpenSearch"
            }
            Self::SearchIndex => {
                "Searches an index using a query written in query domain-specific language (DSL) in OpenSearch. Results can be returned as JSON or CSV."
            }
            Self::GetShards => "Gets information about shards in OpenSearch",
            Self::GetClusterState => {
                "Gets the current state of the cluster including node information, index settings, and more. Can be filtered by specific metrics and indices."
            }
            Self::GetSegments => {
                "Gets information about Lucene segments in indices, including memory usage, document counts, and segment sizes. Can be filtered by specific indices."
            }
            Self::CatNodes => {
                "Lists node-level information, including node roles and load metrics. Gets basic statistics about each node in the cluster."
            }
            Self::GetNodes => {
                "Gets detailed information about nodes in the OpenSearch cluster, including static information like host system details, JVM info, processor type, node settings, thread pools, installed plugins, and more. Can be filtered by specific nodes and metrics."
            }
            Self::GetIndexInfo => {
                "Gets detailed information about an index including mappings, settings, and aliases. Supports wildcards in index names."
            }
            Self::GetIndexStats => {
                "Gets statistics about an index including document count, store size, indexing and search performance metrics. Can be filtered to specific metrics."
            }
            Self::GetQueryInsights => {
                "Gets query insights from the /_insights/top_queries endpoint, showing information about query patterns and performance."
            }
            Self::GetNodesHotThreads => {
                "Gets information about hot threads in the cluster nodes from the /_nodes/hot_threads endpoint."
            }
            Self::GetAllocation => {
                "Gets information about shard allocation across nodes in the cluster from the /_cat/allocation endpoint."
            }
            Self::GetLongRunningTasks => {
                "Gets information about long-running tasks in the cluster, sorted by running time in descending order."
            }
        }
    }

    /// JSON Schema of the tool's arguments.
    #[must_use]
    pub fn input_schema(self) -> Map<String, Value> {
        match self {
            Self::ListIndices => schema_object::<ListIndicesArgs>(),
            Self::IndexMapping => schema_object::<GetIndexMappingArgs>(),
            Self::SearchIndex => schema_object::<SearchIndexArgs>(),
            Self::GetShards => schema_object::<GetShardsArgs>(),
            Self::GetClusterState => schema_object::<GetClusterStateArgs>(),
            Self::GetSegments => schema_object::<GetSegmentsArgs>(),
            Self::CatNodes => schema_object::<CatNodesArgs>(),
            Self::GetNodes => schema_object::<GetNodesArgs>(),
            Self::GetIndexInfo => schema_object::<GetIndexInfoArgs>(),
            Self::GetIndexStats => schema_object::<GetIndexStatsArgs>(),
            Self::GetQueryInsights => schema_object::<GetQueryInsightsArgs>(),
            Self::GetNodesHotThreads => schema_object::<GetNodesHotThreadsArgs>(),
            Self::GetAllocation => schema_object::<GetAllocationArgs>(),
            Self::GetLongRunningTasks => schema_object::<GetLongRunningTasksArgs>(),
        }
    }
}

fn schema_object<T: JsonSchema>() -> Map<String, Value> {
    match serde_json::to_value(schemars::schema_for!(T)) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// One declared argument of a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgSpec {
    /// Argument name.
    pub name: String,
    /// Description shown to agents.
    pub description: String,
    /// JSON type of the argument (`"string"`, `"integer"`, ... or `"any"`).
    pub kind: String,
    /// Whether callers must supply it.
    pub required: bool,
}

impl ArgSpec {
    /// Extracts argument specs from a JSON Schema object.
    #[must_use]
    pub fn from_schema(schema: &Map<String, Value>) -> Vec<Self> {
        let required: Vec<&str> = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(name, prop)| Self {
                        name: name.clone(),
                        description: prop
                            .get("description")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                        kind: json_type(prop),
                        required: required.contains(&name.as_str()),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// First non-null `type` of a property schema.
fn json_type(prop: &Value) -> String {
    match prop.get("type") {
        Some(Value::String(t)) => t.clone(),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null")
            .unwrap_or("any")
            .to_string(),
        _ => "any".to_string(),
    }
}

/// A registered tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    /// Canonical name; the registry key.
    pub name: String,
    /// Name published to agents; defaults to `name`.
    pub display_name: String,
    /// Description published to agents.
    pub description: String,
    /// JSON Schema of the arguments.
    pub input_schema: Map<String, Value>,
    /// Typed view of the declared arguments.
    pub args: Vec<ArgSpec>,
    /// Handler this tool dispatches to.
    pub kind: ToolKind,
    /// Upper bound on result sizes, where the tool supports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size_limit: Option<u64>,
}

impl ToolDescriptor {
    /// Builds the default descriptor for a built-in tool.
    #[must_use]
    pub fn new(kind: ToolKind) -> Self {
        let input_schema = kind.input_schema();
        Self {
            name: kind.name().to_string(),
            display_name: kind.name().to_string(),
            description: kind.description().to_string(),
            args: ArgSpec::from_schema(&input_schema),
            input_schema,
            kind,
            max_size_limit: None,
        }
    }

    /// Declared properties, if the schema has any.
    #[must_use]
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.input_schema
            .get("properties")
            .and_then(Value::as_object)
            .filter(|props| !props.is_empty())
    }

    /// Looks up a declared argument.
    #[must_use]
    pub fn arg(&self, name: &str) -> Option<&ArgSpec> {
        self.args.iter().find(|a| a.name == name)
    }

    /// Mutable access to a declared argument.
    pub fn arg_mut(&mut self, name: &str) -> Option<&mut ArgSpec> {
        self.args.iter_mut().find(|a| a.name == name)
    }
}

/// Canonical tool name → descriptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolRegistry {
    tools: BTreeMap<String, ToolDescriptor>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in tool with default settings.
    #[must_use]
    pub fn default_tools() -> Self {
        let mut registry = Self::new();
        for kind in ToolKind::ALL {
            registry.insert(ToolDescriptor::new(kind));
        }
        registry
    }

    /// Adds or replaces a descriptor under its canonical name.
    pub fn insert(&mut self, tool: ToolDescriptor) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Descriptor by canonical name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(name)
    }

    /// Mutable descriptor by canonical name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut ToolDescriptor> {
        self.tools.get_mut(name)
    }

    /// Whether a canonical name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Descriptor published under `display_name`.
    #[must_use]
    pub fn find_by_display_name(&self, display_name: &str) -> Option<&ToolDescriptor> {
        self.tools.values().find(|t| t.display_name == display_name)
    }

    /// Canonical names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    /// Descriptors in canonical-name order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.values()
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Inserts every entry of `other`, replacing same-named entries.
    pub fn update(&mut self, other: &Self) {
        for tool in other.iter() {
            self.insert(tool.clone());
        }
    }
}

/// Shared, lock-guarded registry.
///
/// Customization happens once during startup before the server accepts
/// requests; readers always see either the old or the new registry, never a
/// partial update.
#[derive(Debug, Default)]
pub struct ToolStore {
    registry: RwLock<ToolRegistry>,
}

impl ToolStore {
    /// Creates a store seeded with `registry`.
    #[must_use]
    pub const fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: RwLock::new(registry),
        }
    }

    /// Store seeded with the built-in tools.
    #[must_use]
    pub fn with_default_tools() -> Self {
        Self::new(ToolRegistry::default_tools())
    }

    /// Copy of the current registry.
    #[must_use]
    pub fn snapshot(&self) -> ToolRegistry {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Merges `registry` into the store.
    pub fn update(&self, registry: &ToolRegistry) {
        self.registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .update(registry);
    }

    /// Descriptor currently published under `display_name`.
    #[must_use]
    pub fn resolve(&self, display_name: &str) -> Option<ToolDescriptor> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .find_by_display_name(display_name)
            .cloned()
    }

    /// All descriptors in canonical-name order.
    #[must_use]
    pub fn tools(&self) -> Vec<ToolDescriptor> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}
