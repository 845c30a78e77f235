//! Tool handlers.
//!
//! Each handler decodes its typed arguments, issues one [`ClusterRequest`]
//! and renders the response as text for the agent. Cluster failures are
//! wrapped with the tool's error prefix (`Error listing indices: ...`).

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::params::{
    CatNodesArgs, GetAllocationArgs, GetClusterStateArgs, GetIndexInfoArgs, GetIndexMappingArgs,
    GetIndexStatsArgs, GetLongRunningTasksArgs, GetNodesArgs, GetNodesHotThreadsArgs,
    GetQueryInsightsArgs, GetSegmentsArgs, GetShardsArgs, ListIndicesArgs, SearchIndexArgs,
};
use super::registry::{ToolDescriptor, ToolKind};
use crate::cluster::{ClusterClient, ClusterRequest};
use crate::core::{normalize_body, search_results_to_csv};
use crate::error::ToolError;

/// Size used when a search does not ask for one.
const DEFAULT_SEARCH_SIZE: u64 = 10;
/// Search size cap when the tool has no `max_size_limit`.
pub const DEFAULT_MAX_SIZE_LIMIT: u64 = 100;

const SHARD_COLUMNS: [&str; 8] = [
    "index", "shard", "prirep", "state", "docs", "store", "ip", "node",
];

const SEGMENT_COLUMNS: [&str; 10] = [
    "index",
    "shard",
    "prirep",
    "segment",
    "generation",
    "docs.count",
    "docs.deleted",
    "size",
    "committed",
    "searchable",
];

/// Runs `tool` with the given MCP arguments.
///
/// # Errors
///
/// Returns [`ToolError::InvalidArguments`] if the arguments do not decode,
/// and [`ToolError::Cluster`] or [`ToolError::Request`] if the call fails.
pub async fn call_tool(
    tool: &ToolDescriptor,
    client: &dyn ClusterClient,
    arguments: &Map<String, Value>,
) -> Result<String, ToolError> {
    tracing::debug!(tool = %tool.name, client = client.name(), "dispatching tool");

    match tool.kind {
        ToolKind::ListIndices => list_indices(client, parse_args(tool, arguments)?).await,
        ToolKind::IndexMapping => index_mapping(client, parse_args(tool, arguments)?).await,
        ToolKind::SearchIndex => {
            let limit = tool.max_size_limit.unwrap_or(DEFAULT_MAX_SIZE_LIMIT);
            search_index(client, parse_args(tool, arguments)?, limit).await
        }
        ToolKind::GetShards => shards(client, parse_args(tool, arguments)?).await,
        ToolKind::GetClusterState => cluster_state(client, parse_args(tool, arguments)?).await,
        ToolKind::GetSegments => segments(client, parse_args(tool, arguments)?).await,
        ToolKind::CatNodes => cat_nodes(client, parse_args(tool, arguments)?).await,
        ToolKind::GetNodes => nodes(client, parse_args(tool, arguments)?).await,
        ToolKind::GetIndexInfo => index_info(client, parse_args(tool, arguments)?).await,
        ToolKind::GetIndexStats => index_stats(client, parse_args(tool, arguments)?).await,
        ToolKind::GetQueryInsights => {
            parse_args::<GetQueryInsightsArgs>(tool, arguments)?;
            query_insights(client).await
        }
        ToolKind::GetNodesHotThreads => {
            parse_args::<GetNodesHotThreadsArgs>(tool, arguments)?;
            hot_threads(client).await
        }
        ToolKind::GetAllocation => {
            parse_args::<GetAllocationArgs>(tool, arguments)?;
            allocation(client).await
        }
        ToolKind::GetLongRunningTasks => {
            long_running_tasks(client, parse_args(tool, arguments)?).await
        }
    }
}

/// Decodes arguments, naming every missing required field.
fn parse_args<T: DeserializeOwned>(
    tool: &ToolDescriptor,
    arguments: &Map<String, Value>,
) -> Result<T, ToolError> {
    let missing: Vec<String> = tool
        .args
        .iter()
        .filter(|a| a.required && !arguments.contains_key(&a.name))
        .map(|a| format!("'{}'", a.name))
        .collect();
    if !missing.is_empty() {
        return Err(ToolError::InvalidArguments {
            message: format!(
                "Missing required field(s): {}\n\nProvided: {}",
                missing.join(", "),
                Value::Object(arguments.clone())
            ),
        });
    }

    serde_json::from_value(Value::Object(arguments.clone())).map_err(|e| {
        ToolError::InvalidArguments {
            message: format!("Invalid arguments for tool '{}': {e}", tool.display_name),
        }
    })
}

async fn send(
    client: &dyn ClusterClient,
    request: ClusterRequest,
    context: &'static str,
) -> Result<Value, ToolError> {
    client
        .send(&request)
        .await
        .map_err(|source| ToolError::Cluster { context, source })
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

/// Plain-text table with ` | ` separators.
fn pipe_table(rows: &[Value], columns: &[&str]) -> String {
    let mut out = columns.join(" | ");
    for row in rows {
        out.push('\n');
        let cells: Vec<String> = columns
            .iter()
            .map(|c| match row.get(c) {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            })
            .collect();
        out.push_str(&cells.join(" | "));
    }
    out
}

/// Table whose columns are the keys of the first row.
fn pipe_table_from_first(rows: &[Value]) -> String {
    let columns: Vec<&str> = rows
        .first()
        .and_then(Value::as_object)
        .map(|first| first.keys().map(String::as_str).collect())
        .unwrap_or_default();
    pipe_table(rows, &columns)
}

fn as_rows(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or_default()
}

async fn list_indices(
    client: &dyn ClusterClient,
    args: ListIndicesArgs,
) -> Result<String, ToolError> {
    const CONTEXT: &str = "Error listing indices";

    if !args.index.is_empty() {
        let info = send(client, ClusterRequest::get(format!("/{}", args.index)), CONTEXT).await?;
        return Ok(format!(
            "Index information for {}:\n{}",
            args.index,
            pretty(&info)
        ));
    }

    let indices = send(client, ClusterRequest::get("/_cat/indices").json_format(), CONTEXT).await?;
    if args.include_detail {
        return Ok(format!("All indices information:\n{}", pretty(&indices)));
    }

    let names: Vec<Value> = as_rows(&indices)
        .iter()
        .filter_map(|row| row.get("index").cloned())
        .collect();
    Ok(format!("Indices:\n{}", pretty(&Value::Array(names))))
}

async fn index_mapping(
    client: &dyn ClusterClient,
    args: GetIndexMappingArgs,
) -> Result<String, ToolError> {
    let request = ClusterRequest::get(format!("/{}/_mapping", args.index));
    let mapping = send(client, request, "Error getting mapping").await?;
    Ok(format!("Mapping for {}:\n{}", args.index, pretty(&mapping)))
}

async fn search_index(
    client: &dyn ClusterClient,
    args: SearchIndexArgs,
    limit: u64,
) -> Result<String, ToolError> {
    const CONTEXT: &str = "Error searching index";

    let body = normalize_body(&args.query).map_err(|e| ToolError::Request {
        context: CONTEXT,
        message: e.to_string(),
    })?;
    let Value::Object(mut body) = body else {
        return Err(ToolError::Request {
            context: CONTEXT,
            message: "query must be a JSON object".to_string(),
        });
    };

    let size = args
        .size
        .filter(|&s| s > 0)
        .unwrap_or(DEFAULT_SEARCH_SIZE)
        .min(limit);
    body.insert("size".to_string(), Value::from(size));

    let request = ClusterRequest::post(format!("/{}/_search", args.index), Value::Object(body));
    let results = send(client, request, CONTEXT).await?;

    if args.format.eq_ignore_ascii_case("csv") {
        Ok(format!(
            "Search results from {} (CSV format):\n{}",
            args.index,
            search_results_to_csv(&results)
        ))
    } else {
        Ok(format!(
            "Search results from {}:\n{}",
            args.index,
            pretty(&results)
        ))
    }
}

async fn shards(client: &dyn ClusterClient, args: GetShardsArgs) -> Result<String, ToolError> {
    let request = ClusterRequest::get(format!("/_cat/shards/{}", args.index)).json_format();
    let shards = send(client, request, "Error getting shards information").await?;
    Ok(format!(
        "Shards information for index: {}\n{}",
        args.index,
        pipe_table(as_rows(&shards), &SHARD_COLUMNS)
    ))
}

async fn cluster_state(
    client: &dyn ClusterClient,
    args: GetClusterStateArgs,
) -> Result<String, ToolError> {
    let metric = present(args.metric.as_ref());
    let index = present(args.index.as_ref());

    let mut path = "/_cluster/state".to_string();
    match (metric, index) {
        (Some(m), Some(i)) => path.push_str(&format!("/{m}/{i}")),
        (Some(m), None) => path.push_str(&format!("/{m}")),
        (None, Some(i)) => path.push_str(&format!("/_all/{i}")),
        (None, None) => {}
    }

    let state = send(client, ClusterRequest::get(path), "Error getting cluster state").await?;

    let mut header = "Cluster state information".to_string();
    if let Some(m) = metric {
        header.push_str(&format!(" for metric: {m}"));
    }
    if let Some(i) = index {
        header.push_str(&format!(", filtered by index: {i}"));
    }
    Ok(format!("{header}:\n{}", pretty(&state)))
}

async fn segments(client: &dyn ClusterClient, args: GetSegmentsArgs) -> Result<String, ToolError> {
    let index = present(args.index.as_ref());
    let path = index.map_or_else(
        || "/_cat/segments".to_string(),
        |i| format!("/_cat/segments/{i}"),
    );
    let segments = send(
        client,
        ClusterRequest::get(path).json_format(),
        "Error getting segment information",
    )
    .await?;

    let header = index.map_or_else(
        || "Segment information for all indices".to_string(),
        |i| format!("Segment information for index: {i}"),
    );
    Ok(format!(
        "{header}\n{}",
        pipe_table(as_rows(&segments), &SEGMENT_COLUMNS)
    ))
}

async fn cat_nodes(client: &dyn ClusterClient, args: CatNodesArgs) -> Result<String, ToolError> {
    let metrics = present(args.metrics.as_ref());
    let mut request = ClusterRequest::get("/_cat/nodes").json_format();
    if let Some(m) = metrics {
        request = request.param("h", m);
    }
    let nodes = send(client, request, "Error getting node information").await?;

    let mut header = "Node information for the cluster".to_string();
    if let Some(m) = metrics {
        header.push_str(&format!(" (metrics: {m})"));
    }
    Ok(format!("{header}\n{}", pipe_table_from_first(as_rows(&nodes))))
}

async fn nodes(client: &dyn ClusterClient, args: GetNodesArgs) -> Result<String, ToolError> {
    let node_id = present(args.node_id.as_ref());
    let metric = present(args.metric.as_ref());

    let mut path = "/_nodes".to_string();
    for part in [node_id, metric].into_iter().flatten() {
        path.push('/');
        path.push_str(part);
    }
    let info = send(client, ClusterRequest::get(path), "Error getting nodes information").await?;

    let mut header = node_id.map_or_else(
        || "Detailed node information for all nodes".to_string(),
        |ids| format!("Detailed node information for nodes: {ids}"),
    );
    if let Some(m) = metric {
        header.push_str(&format!(" (metrics: {m})"));
    }
    Ok(format!("{header}:\n{}", pretty(&info)))
}

async fn index_info(client: &dyn ClusterClient, args: GetIndexInfoArgs) -> Result<String, ToolError> {
    let request = ClusterRequest::get(format!("/{}", args.index));
    let info = send(client, request, "Error getting index information").await?;
    Ok(format!(
        "Detailed information for index: {}:\n{}",
        args.index,
        pretty(&info)
    ))
}

async fn index_stats(
    client: &dyn ClusterClient,
    args: GetIndexStatsArgs,
) -> Result<String, ToolError> {
    let metric = present(args.metric.as_ref());
    let path = metric.map_or_else(
        || format!("/{}/_stats", args.index),
        |m| format!("/{}/_stats/{m}", args.index),
    );
    let stats = send(client, ClusterRequest::get(path), "Error getting index statistics").await?;

    let mut header = format!("Statistics for index: {}", args.index);
    if let Some(m) = metric {
        header.push_str(&format!(" (metrics: {m})"));
    }
    Ok(format!("{header}:\n{}", pretty(&stats)))
}

async fn query_insights(client: &dyn ClusterClient) -> Result<String, ToolError> {
    let insights = send(
        client,
        ClusterRequest::get("/_insights/top_queries"),
        "Error getting query insights",
    )
    .await?;
    Ok(format!(
        "Query insights from /_insights/top_queries endpoint:\n{}",
        pretty(&insights)
    ))
}

async fn hot_threads(client: &dyn ClusterClient) -> Result<String, ToolError> {
    let threads = send(
        client,
        ClusterRequest::get("/_nodes/hot_threads"),
        "Error getting hot threads information",
    )
    .await?;
    let body = match &threads {
        Value::String(text) => text.clone(),
        other => pretty(other),
    };
    Ok(format!(
        "Hot threads information from /_nodes/hot_threads endpoint:\n{body}"
    ))
}

async fn allocation(client: &dyn ClusterClient) -> Result<String, ToolError> {
    let allocation = send(
        client,
        ClusterRequest::get("/_cat/allocation").json_format(),
        "Error getting allocation information",
    )
    .await?;
    Ok(format!(
        "Allocation information from /_cat/allocation endpoint:\n{}",
        pretty(&allocation)
    ))
}

async fn long_running_tasks(
    client: &dyn ClusterClient,
    args: GetLongRunningTasksArgs,
) -> Result<String, ToolError> {
    let request = ClusterRequest::get("/_cat/tasks")
        .param("s", "running_time:desc")
        .json_format();
    let tasks = send(client, request, "Error getting long-running tasks information").await?;

    let mut tasks = match tasks {
        Value::Array(tasks) => tasks,
        other => return Ok(format!("Long-running tasks:\n{}", pretty(&other))),
    };
    if let Some(limit) = args.limit.filter(|&l| l > 0) {
        tasks.truncate(limit);
    }
    Ok(format!(
        "Top {} long-running tasks sorted by running time:\n{}",
        tasks.len(),
        pipe_table_from_first(&tasks)
    ))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::cluster::Method;
    use crate::cluster::mock::MockClusterClient;

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    async fn run(kind: ToolKind, client: &MockClusterClient, arguments: Value) -> String {
        call_tool(&ToolDescriptor::new(kind), client, &args(arguments))
            .await
            .unwrap_or_else(|e| panic!("tool failed: {e}"))
    }

    async fn run_err(kind: ToolKind, client: &MockClusterClient, arguments: Value) -> String {
        match call_tool(&ToolDescriptor::new(kind), client, &args(arguments)).await {
            Ok(text) => panic!("expected failure, got: {text}"),
            Err(e) => e.to_string(),
        }
    }

    fn two_indices() -> Value {
        json!([
            {"health": "green", "index": "index1", "docs.count": "100"},
            {"health": "yellow", "index": "index2", "docs.count": "200"}
        ])
    }

    #[tokio::test]
    async fn test_list_indices_full_detail() {
        let client = MockClusterClient::returning(two_indices());
        let text = run(ToolKind::ListIndices, &client, json!({})).await;

        assert!(text.starts_with("All indices information:\n"));
        assert!(text.contains("\"index\": \"index1\""));
        assert!(text.contains("\"docs.count\": \"200\""));
        let req = client.single_request();
        assert_eq!(req.path, "/_cat/indices");
        assert_eq!(req.params, vec![("format".to_string(), "json".to_string())]);
    }

    #[tokio::test]
    async fn test_list_indices_names_only() {
        let client = MockClusterClient::returning(two_indices());
        let text = run(ToolKind::ListIndices, &client, json!({"include_detail": false})).await;

        let (header, payload) = text.split_once('\n').unwrap_or_else(|| panic!("no header"));
        assert_eq!(header, "Indices:");
        let names: Value =
            serde_json::from_str(payload).unwrap_or_else(|e| panic!("bad json: {e}"));
        assert_eq!(names, json!(["index1", "index2"]));
        assert!(!text.contains("docs.count"));
    }

    #[tokio::test]
    async fn test_list_indices_with_index_ignores_include_detail() {
        let client = MockClusterClient::returning(json!({
            "index1": {"settings": {"index": {"number_of_shards": "1"}}}
        }));
        let text = run(
            ToolKind::ListIndices,
            &client,
            json!({"index": "index1", "include_detail": false}),
        )
        .await;

        assert!(text.contains("Index information for index1"));
        assert!(text.contains("\"number_of_shards\": \"1\""));
        assert_eq!(client.single_request().path, "/index1");
    }

    #[tokio::test]
    async fn test_list_indices_error() {
        let client = MockClusterClient::failing("Test error");
        let err = run_err(ToolKind::ListIndices, &client, json!({})).await;
        assert_eq!(err, "Error listing indices: Test error");
    }

    #[tokio::test]
    async fn test_index_mapping() {
        let mapping = json!({"test-index": {"mappings": {"properties": {"f": {"type": "text"}}}}});
        let client = MockClusterClient::returning(mapping.clone());
        let text = run(ToolKind::IndexMapping, &client, json!({"index": "test-index"})).await;

        let (header, payload) = text.split_once('\n').unwrap_or_else(|| panic!("no header"));
        assert_eq!(header, "Mapping for test-index:");
        assert_eq!(
            serde_json::from_str::<Value>(payload).unwrap_or_else(|e| panic!("bad json: {e}")),
            mapping
        );
        assert_eq!(client.single_request().path, "/test-index/_mapping");
    }

    #[tokio::test]
    async fn test_missing_required_field_is_reported() {
        let client = MockClusterClient::returning(json!({}));
        let err = call_tool(
            &ToolDescriptor::new(ToolKind::IndexMapping),
            &client,
            &args(json!({"other": 1})),
        )
        .await;
        let message = match err {
            Err(ToolError::InvalidArguments { message }) => message,
            other => panic!("unexpected: {other:?}"),
        };
        assert!(message.starts_with("Missing required field(s): 'index'"));
        assert!(message.contains("Provided: {\"other\":1}"));
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_search_normalizes_and_caps_size() {
        let results = json!({"hits": {"hits": [{"_index": "test-index", "_id": "1", "_source": {"a": 1}}]}});
        let client = MockClusterClient::returning(results.clone());
        let text = run(
            ToolKind::SearchIndex,
            &client,
            json!({"index": "test-index", "query": {"range": {"ts": {"gte": 1.23e10}}}, "size": 500}),
        )
        .await;

        assert!(text.starts_with("Search results from test-index:\n"));
        let req = client.single_request();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.path, "/test-index/_search");
        assert_eq!(
            req.body,
            Some(json!({"range": {"ts": {"gte": 12_300_000_000_u64}}, "size": 100}))
        );
    }

    #[tokio::test]
    async fn test_search_accepts_query_as_json_text() {
        let client = MockClusterClient::returning(json!({}));
        run(
            ToolKind::SearchIndex,
            &client,
            json!({"index": "logs", "query": "{\"match_all\": {}}", "size": 0}),
        )
        .await;
        assert_eq!(
            client.single_request().body,
            Some(json!({"match_all": {}, "size": 10}))
        );
    }

    #[tokio::test]
    async fn test_search_respects_max_size_limit() {
        let client = MockClusterClient::returning(json!({}));
        let mut tool = ToolDescriptor::new(ToolKind::SearchIndex);
        tool.max_size_limit = Some(5);
        call_tool(
            &tool,
            &client,
            &args(json!({"index": "logs", "query": {"match_all": {}}, "size": 50})),
        )
        .await
        .unwrap_or_else(|e| panic!("search failed: {e}"));
        assert_eq!(
            client.single_request().body.and_then(|b| b.get("size").cloned()),
            Some(json!(5))
        );
    }

    #[tokio::test]
    async fn test_search_csv_format() {
        let client = MockClusterClient::returning(json!({
            "hits": {"hits": [{"_index": "logs", "_id": "1", "_score": 1.0, "_source": {"name": "a"}}]}
        }));
        let text = run(
            ToolKind::SearchIndex,
            &client,
            json!({"index": "logs", "query": {"match_all": {}}, "format": "csv"}),
        )
        .await;
        assert!(text.starts_with("Search results from logs (CSV format):\n_id,_index,_score,name"));
    }

    #[tokio::test]
    async fn test_search_rejects_malformed_query_text() {
        let client = MockClusterClient::returning(json!({}));
        let err = run_err(
            ToolKind::SearchIndex,
            &client,
            json!({"index": "logs", "query": "{not json"}),
        )
        .await;
        assert!(err.starts_with("Error searching index: "));
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_search_error() {
        let client = MockClusterClient::failing("Test error");
        let err = run_err(
            ToolKind::SearchIndex,
            &client,
            json!({"index": "logs", "query": {"match_all": {}}}),
        )
        .await;
        assert_eq!(err, "Error searching index: Test error");
    }

    #[tokio::test]
    async fn test_shards_table() {
        let client = MockClusterClient::returning(json!([{
            "index": "test-index", "shard": "0", "prirep": "p", "state": "STARTED",
            "docs": "1000", "store": "1mb", "ip": "127.0.0.1", "node": "node1"
        }]));
        let text = run(ToolKind::GetShards, &client, json!({"index": "test-index"})).await;

        assert!(text.contains("Shards information for index: test-index"));
        assert!(text.contains("index | shard | prirep | state | docs | store | ip | node"));
        assert!(text.contains("test-index | 0 | p | STARTED | 1000 | 1mb | 127.0.0.1 | node1"));
        assert_eq!(client.single_request().path, "/_cat/shards/test-index");
    }

    #[tokio::test]
    async fn test_cluster_state_paths() {
        let client = MockClusterClient::returning(json!({"cluster_name": "test-cluster"}));
        let text = run(ToolKind::GetClusterState, &client, json!({})).await;
        assert!(text.starts_with("Cluster state information:\n"));
        assert!(text.contains("\"cluster_name\": \"test-cluster\""));

        let client = MockClusterClient::returning(json!({}));
        let text = run(ToolKind::GetClusterState, &client, json!({"metric": "nodes"})).await;
        assert!(text.contains("Cluster state information for metric: nodes"));
        assert_eq!(client.single_request().path, "/_cluster/state/nodes");

        let client = MockClusterClient::returning(json!({}));
        let text = run(ToolKind::GetClusterState, &client, json!({"index": "test-index"})).await;
        assert!(text.contains("Cluster state information, filtered by index: test-index"));
        assert_eq!(client.single_request().path, "/_cluster/state/_all/test-index");
    }

    #[tokio::test]
    async fn test_segments_table() {
        let client = MockClusterClient::returning(json!([{
            "index": "test-index", "shard": "0", "prirep": "p", "segment": "s1",
            "generation": "1", "docs.count": "100", "docs.deleted": "0", "size": "1mb",
            "committed": "true", "searchable": "true"
        }]));
        let text = run(ToolKind::GetSegments, &client, json!({})).await;

        assert!(text.contains("Segment information for all indices"));
        assert!(text.contains("index | shard | prirep | segment | generation | docs.count"));
        assert!(text.contains("test-index | 0 | p | s1 | 1 | 100"));
        assert_eq!(client.single_request().path, "/_cat/segments");
    }

    #[tokio::test]
    async fn test_cat_nodes_with_metrics() {
        let client = MockClusterClient::returning(json!([
            {"name": "node1", "ip": "127.0.0.1", "heap.percent": "50"}
        ]));
        let text = run(ToolKind::CatNodes, &client, json!({"metrics": "name,ip,heap.percent"})).await;

        assert!(text.contains("Node information for the cluster (metrics: name,ip,heap.percent)"));
        assert!(text.contains("name | ip | heap.percent"));
        assert!(text.contains("node1 | 127.0.0.1 | 50"));
        let req = client.single_request();
        assert!(req.params.contains(&("h".to_string(), "name,ip,heap.percent".to_string())));
    }

    #[tokio::test]
    async fn test_nodes_with_filters() {
        let client = MockClusterClient::returning(json!({"nodes": {"n1": {"name": "master-node"}}}));
        let text = run(
            ToolKind::GetNodes,
            &client,
            json!({"node_id": "master:true", "metric": "process,transport"}),
        )
        .await;

        assert!(text.contains("Detailed node information for nodes: master:true (metrics: process,transport):"));
        assert!(text.contains("\"name\": \"master-node\""));
        assert_eq!(client.single_request().path, "/_nodes/master:true/process,transport");
    }

    #[tokio::test]
    async fn test_index_stats_with_metric() {
        let client = MockClusterClient::returning(json!({"_all": {}}));
        let text = run(
            ToolKind::GetIndexStats,
            &client,
            json!({"index": "test-index", "metric": "search"}),
        )
        .await;
        assert!(text.contains("Statistics for index: test-index (metrics: search)"));
        assert_eq!(client.single_request().path, "/test-index/_stats/search");
    }

    #[tokio::test]
    async fn test_index_info() {
        let client = MockClusterClient::returning(json!({"test-index": {"aliases": {}}}));
        let text = run(ToolKind::GetIndexInfo, &client, json!({"index": "test-index"})).await;
        assert!(text.starts_with("Detailed information for index: test-index:\n"));
        assert_eq!(client.single_request().path, "/test-index");
    }

    #[tokio::test]
    async fn test_hot_threads_text_passthrough() {
        let client = MockClusterClient::returning(Value::String(
            "::: {node1}\n   100.0% cpu usage by thread 'search'".to_string(),
        ));
        let text = run(ToolKind::GetNodesHotThreads, &client, json!({})).await;
        assert!(text.starts_with("Hot threads information from /_nodes/hot_threads endpoint:\n::: {node1}"));
        assert_eq!(client.single_request().path, "/_nodes/hot_threads");
    }

    #[tokio::test]
    async fn test_no_arg_tools_hit_fixed_endpoints() {
        let client = MockClusterClient::returning(json!({"top_queries": [{"count": 100}]}));
        let text = run(ToolKind::GetQueryInsights, &client, json!({})).await;
        assert!(text.contains("Query insights from /_insights/top_queries endpoint"));
        assert!(text.contains("\"count\": 100"));
        assert_eq!(client.single_request().path, "/_insights/top_queries");

        let client = MockClusterClient::returning(json!([{"node": "node1"}, {"node": "node2"}]));
        let text = run(ToolKind::GetAllocation, &client, json!({})).await;
        assert!(text.contains("Allocation information from /_cat/allocation endpoint"));
        assert!(text.contains("node2"));
        assert_eq!(client.single_request().path, "/_cat/allocation");
    }

    #[tokio::test]
    async fn test_long_running_tasks_truncated() {
        let client = MockClusterClient::returning(json!([
            {"action": "indices:data/write/bulk", "running_time": "60s"},
            {"action": "indices:data/read/search", "running_time": "30s"},
            {"action": "indices:admin/create", "running_time": "1s"}
        ]));
        let text = run(ToolKind::GetLongRunningTasks, &client, json!({"limit": 2})).await;

        assert!(text.starts_with("Top 2 long-running tasks sorted by running time:\n"));
        assert!(text.contains("action | running_time"));
        assert!(text.contains("indices:data/read/search"));
        assert!(!text.contains("indices:admin/create"));
        let req = client.single_request();
        assert_eq!(req.path, "/_cat/tasks");
        assert!(req.params.contains(&("s".to_string(), "running_time:desc".to_string())));
    }

    #[tokio::test]
    async fn test_error_prefixes() {
        let cases = [
            (ToolKind::IndexMapping, json!({"index": "i"}), "Error getting mapping"),
            (ToolKind::GetShards, json!({"index": "i"}), "Error getting shards information"),
            (ToolKind::GetClusterState, json!({}), "Error getting cluster state"),
            (ToolKind::GetSegments, json!({}), "Error getting segment information"),
            (ToolKind::CatNodes, json!({}), "Error getting node information"),
            (ToolKind::GetNodes, json!({}), "Error getting nodes information"),
            (ToolKind::GetIndexInfo, json!({"index": "i"}), "Error getting index information"),
            (ToolKind::GetIndexStats, json!({"index": "i"}), "Error getting index statistics"),
            (ToolKind::GetQueryInsights, json!({}), "Error getting query insights"),
            (ToolKind::GetNodesHotThreads, json!({}), "Error getting hot threads information"),
            (ToolKind::GetAllocation, json!({}), "Error getting allocation information"),
            (
                ToolKind::GetLongRunningTasks,
                json!({}),
                "Error getting long-running tasks information",
            ),
        ];
        for (kind, arguments, prefix) in cases {
            let client = MockClusterClient::failing("Test error");
            let err = run_err(kind, &client, arguments).await;
            assert_eq!(err, format!("{prefix}: Test error"));
        }
    }
}
