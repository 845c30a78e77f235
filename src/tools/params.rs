//! Tool argument types.
//!
//! Each tool decodes its MCP arguments into one of these structs. The
//! `schemars` derive produces the JSON Schema advertised to clients, and the
//! field doc comments become the per-argument descriptions that tool
//! configuration can later override.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const fn default_true() -> bool {
    true
}

fn default_format() -> String {
    "json".to_string()
}

#[allow(clippy::unnecessary_wraps)]
const fn default_search_size() -> Option<u64> {
    Some(10)
}

#[allow(clippy::unnecessary_wraps)]
const fn default_task_limit() -> Option<usize> {
    Some(10)
}

/// Parameters for `ListIndexTool`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListIndicesArgs {
    /// The name of the index to get detailed information for. If provided, returns detailed information about this specific index instead of listing all indices.
    #[serde(default)]
    pub index: String,

    /// Whether to include detailed information. When listing indices (no index specified), if false, returns only a pure list of index names. If true, returns full metadata. When a specific index is provided, detailed information (including mappings) will be returned.
    #[serde(default = "default_true")]
    pub include_detail: bool,
}

/// Parameters for `IndexMappingTool`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetIndexMappingArgs {
    /// The name of the index to get mapping information for
    pub index: String,
}

/// Parameters for `SearchIndexTool`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchIndexArgs {
    /// The name of the index to search in
    pub index: String,

    /// The search query in OpenSearch query DSL format
    pub query: Value,

    /// Output format: "json" or "csv"
    #[serde(default = "default_format")]
    pub format: String,

    /// Number of search results to return. Maximum allowed is 100.
    #[serde(default = "default_search_size")]
    pub size: Option<u64>,
}

/// Parameters for `GetShardsTool`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetShardsArgs {
    /// The name of the index to get shard information for
    pub index: String,
}

/// Parameters for `GetClusterStateTool`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetClusterStateArgs {
    /// Limit the information returned to the specified metrics. Options include: _all, blocks, metadata, nodes, routing_table, routing_nodes, master_node, version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,

    /// Limit the information returned to the specified indices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
}

/// Parameters for `GetSegmentsTool`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetSegmentsArgs {
    /// Limit the information returned to the specified indices. If not provided, returns segments for all indices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
}

/// Parameters for `CatNodesTool`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CatNodesArgs {
    /// A comma-separated list of metrics to display. Available metrics include: id, name, ip, port, role, master, heap.percent, ram.percent, cpu, load_1m, load_5m, load_15m, disk.total, disk.used, disk.avail, disk.used_percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<String>,
}

/// Parameters for `GetIndexInfoTool`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetIndexInfoArgs {
    /// The name of the index to get detailed information for. Wildcards are supported.
    pub index: String,
}

/// Parameters for `GetIndexStatsTool`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetIndexStatsArgs {
    /// The name of the index to get statistics for. Wildcards are supported.
    pub index: String,

    /// Limit the information returned to the specified metrics. Options include: _all, completion, docs, fielddata, flush, get, indexing, merge, query_cache, refresh, request_cache, search, segments, store, warmer, bulk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
}

/// Parameters for `GetQueryInsightsTool`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetQueryInsightsArgs {}

/// Parameters for `GetNodesHotThreadsTool`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetNodesHotThreadsArgs {}

/// Parameters for `GetAllocationTool`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetAllocationArgs {}

/// Parameters for `GetLongRunningTasksTool`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetLongRunningTasksArgs {
    /// The maximum number of tasks to return. Default is 10.
    #[serde(default = "default_task_limit")]
    pub limit: Option<usize>,
}

/// Parameters for `GetNodesTool`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetNodesArgs {
    /// A comma-separated list of node IDs or names to limit the returned information. Supports node filters like _local, _master, master:true, data:false, etc. Defaults to _all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,

    /// A comma-separated list of metric groups to include in the response. Options include: settings, os, process, jvm, thread_pool, transport, http, plugins, ingest, aggregations, indices. Defaults to all metrics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
}
