//! CSV rendering of search responses.
//!
//! Hits are flattened into one row each, with nested `_source` objects
//! spread over dotted columns (`address.coordinates.lat`). Aggregations
//! have no tabular shape and are emitted as pretty JSON.
//!
//! For arrays of objects only the first element decides which sub-columns
//! exist; keys that appear only in later elements are reachable through the
//! JSON-encoded array column but get no column of their own.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};

/// Returned when a response has neither hits nor aggregations.
pub const NO_SEARCH_RESULTS: &str = "No search results to convert";

/// Returned when a hit list is empty.
pub const NO_DOCUMENTS: &str = "No documents found in search results";

const METADATA_FIELDS: [&str; 3] = ["_index", "_id", "_score"];

/// Renders a search response as CSV text.
///
/// - no hits, no aggregations: [`NO_SEARCH_RESULTS`]
/// - aggregations only: pretty JSON of `aggregations`
/// - hits only: CSV of the hits
/// - both: `SEARCH HITS:` section, blank line, `AGGREGATIONS:` section
///
/// Never fails; malformed shapes fall through to the literal fallbacks.
#[must_use]
pub fn search_results_to_csv(results: &Value) -> String {
    let Some(response) = results.as_object().filter(|m| !m.is_empty()) else {
        return NO_SEARCH_RESULTS.to_string();
    };

    let hits = response
        .get("hits")
        .and_then(|h| h.get("hits"))
        .and_then(Value::as_array)
        .filter(|hits| !hits.is_empty());
    let aggregations = response.get("aggregations");

    match (hits, aggregations) {
        (None, Some(aggs)) => pretty_json(aggs),
        (Some(hits), None) => hits_to_csv(hits),
        (Some(hits), Some(aggs)) => format!(
            "SEARCH HITS:\n{}\n\nAGGREGATIONS:\n{}",
            hits_to_csv(hits),
            pretty_json(aggs)
        ),
        (None, None) => NO_SEARCH_RESULTS.to_string(),
    }
}

/// Renders a list of hits as CSV with alphabetically sorted columns.
#[must_use]
pub fn hits_to_csv(hits: &[Value]) -> String {
    if hits.is_empty() {
        return NO_DOCUMENTS.to_string();
    }

    let mut columns: BTreeSet<String> = BTreeSet::new();
    for hit in hits {
        if let Some(source) = hit.get("_source").and_then(Value::as_object) {
            collect_columns(source, "", &mut columns);
        }
        columns.extend(METADATA_FIELDS.iter().map(|f| (*f).to_string()));
    }

    let rows: Vec<BTreeMap<String, String>> = hits.iter().map(hit_to_row).collect();

    match write_csv(&columns, &rows) {
        Ok(csv) => csv,
        Err(e) => {
            tracing::warn!(error = %e, "failed to render search hits as CSV");
            NO_DOCUMENTS.to_string()
        }
    }
}

fn write_csv(
    columns: &BTreeSet<String>,
    rows: &[BTreeMap<String, String>],
) -> Result<String, Box<dyn std::error::Error>> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    wtr.write_record(columns)?;
    for row in rows {
        wtr.write_record(
            columns
                .iter()
                .map(|column| row.get(column).map_or("", String::as_str)),
        )?;
    }

    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Discovers dotted column names under `object`.
fn collect_columns(object: &Map<String, Value>, prefix: &str, columns: &mut BTreeSet<String>) {
    for (key, value) in object {
        let field = format!("{prefix}{key}");
        match value {
            Value::Object(nested) => collect_columns(nested, &format!("{field}."), columns),
            Value::Array(items) => {
                if let Some(Value::Object(first)) = items.first() {
                    collect_columns(first, &format!("{field}."), columns);
                }
                columns.insert(field);
            }
            _ => {
                columns.insert(field);
            }
        }
    }
}

fn hit_to_row(hit: &Value) -> BTreeMap<String, String> {
    let mut row = BTreeMap::new();
    for field in METADATA_FIELDS {
        row.insert(field.to_string(), hit.get(field).map_or_else(String::new, cell));
    }
    if let Some(source) = hit.get("_source").and_then(Value::as_object) {
        flatten_into_row(source, "", &mut row);
    }
    row
}

fn flatten_into_row(object: &Map<String, Value>, prefix: &str, row: &mut BTreeMap<String, String>) {
    for (key, value) in object {
        let field = format!("{prefix}{key}");
        match value {
            Value::Object(nested) => flatten_into_row(nested, &format!("{field}."), row),
            Value::Array(items) => {
                if let Some(Value::Object(first)) = items.first() {
                    flatten_into_row(first, &format!("{field}."), row);
                }
                row.insert(field, value.to_string());
            }
            scalar => {
                row.insert(field, cell(scalar));
            }
        }
    }
}

/// Text of a single CSV cell; `null` is an empty cell.
fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
