// ── Summary-to-editor conversions ──
//
// Bridges the server's custom-list summary record into editor types. The
// auto-update query and facets arrive as JSON strings and are parsed back
// into query trees with fresh node ids.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::model::{
    AdvancedSearch, AdvancedSearchQuery, BoolOp, CustomListSummary, DEFAULT_OP, LeafQuery,
    Properties, QueryBuilder, SearchParams,
};
use crate::query::IdSource;
use crate::serialize::canonical::{NOT_KEY, QUERY_KEY};

// ── Properties ──────────────────────────────────────────────────────

impl From<&CustomListSummary> for Properties {
    fn from(summary: &CustomListSummary) -> Self {
        Self {
            name: summary.name.clone(),
            collections: summary.collections.iter().map(|c| c.id).collect(),
            auto_update: summary.auto_update,
        }
    }
}

// ── Search params ───────────────────────────────────────────────────

/// Search params described by the summary's auto-update fields.
///
/// Blank or absent fields leave the defaults in place.
pub fn search_params_from_summary(
    summary: &CustomListSummary,
    ids: &mut impl IdSource,
) -> Result<SearchParams, CoreError> {
    let mut params = SearchParams::default();

    if let Some(raw) = non_blank(summary.auto_update_query.as_deref()) {
        params.advanced = parse_auto_update_query(raw, ids)?;
    }
    if let Some(raw) = non_blank(summary.auto_update_facets.as_deref()) {
        let facets = parse_facets(raw)?;
        if let Some(media) = facets.media {
            params.entry_point = media;
        }
        params.sort = facets.order.filter(|order| !order.is_empty());
    }
    Ok(params)
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.trim().is_empty())
}

/// Stored `{media, order}` facets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Facets {
    #[serde(default)]
    pub media: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
}

pub fn parse_facets(raw: &str) -> Result<Facets, CoreError> {
    let facets: Option<Facets> =
        serde_json::from_str(raw).map_err(|e| CoreError::InvalidFacets {
            message: e.to_string(),
        })?;
    Ok(facets.unwrap_or_default())
}

// ── Query trees ─────────────────────────────────────────────────────

/// Split a stored `{"query": ...}` document into include and exclude trees.
///
/// `{and: [A, {not: [B]}]}` is the shape the serializer writes for both
/// trees; a bare `{not: [B]}` is exclude only; anything else is include.
pub fn parse_auto_update_query(
    raw: &str,
    ids: &mut impl IdSource,
) -> Result<AdvancedSearch, CoreError> {
    let doc: Value =
        serde_json::from_str(raw).map_err(|e| CoreError::invalid_query(e.to_string()))?;
    let query = match &doc {
        Value::Object(map) => map.get(QUERY_KEY).unwrap_or(&Value::Null),
        _ => return Err(CoreError::invalid_query("expected a JSON object")),
    };
    if query.is_null() {
        return Ok(AdvancedSearch::default());
    }

    let (include, exclude) = split_negation(query);
    let include = include.map(|q| query_from_value(q, ids)).transpose()?.flatten();
    let exclude = exclude.map(|q| query_from_value(q, ids)).transpose()?.flatten();

    Ok(AdvancedSearch {
        include: QueryBuilder::with_query(include),
        exclude: QueryBuilder::with_query(exclude),
    })
}

fn split_negation(query: &Value) -> (Option<&Value>, Option<&Value>) {
    if let Some(negated) = negated_operand(query) {
        return (None, Some(negated));
    }
    if let Some([include, last]) = operands(query, "and") {
        if let Some(negated) = negated_operand(last) {
            return (Some(include), Some(negated));
        }
    }
    (Some(query), None)
}

fn operands<'a>(value: &'a Value, key: &str) -> Option<&'a [Value]> {
    value.get(key).and_then(Value::as_array).map(Vec::as_slice)
}

fn negated_operand(value: &Value) -> Option<&Value> {
    match operands(value, NOT_KEY) {
        Some([only]) => Some(only),
        _ => None,
    }
}

/// Build a tree from one grammar node. `Ok(None)` for an empty boolean.
fn query_from_value(
    value: &Value,
    ids: &mut impl IdSource,
) -> Result<Option<AdvancedSearchQuery>, CoreError> {
    let Value::Object(map) = value else {
        return Err(CoreError::invalid_query(format!("expected an object, got {value}")));
    };

    for op in [BoolOp::And, BoolOp::Or] {
        let key: &str = op.as_ref();
        if let Some(children) = map.get(key) {
            return boolean_from_value(op, children, ids);
        }
    }
    if map.contains_key(NOT_KEY) {
        return Err(CoreError::invalid_query("negation is only supported at the top level"));
    }

    let leaf = leaf_from_map(map)?;
    Ok(Some(AdvancedSearchQuery::leaf(ids.next_id(), leaf)))
}

fn boolean_from_value(
    op: BoolOp,
    children: &Value,
    ids: &mut impl IdSource,
) -> Result<Option<AdvancedSearchQuery>, CoreError> {
    let Value::Array(children) = children else {
        return Err(CoreError::invalid_query(format!("`{op}` expects an array")));
    };

    let id = ids.next_id();
    let mut nodes = Vec::with_capacity(children.len());
    for child in children {
        if let Some(node) = query_from_value(child, ids)? {
            nodes.push(node);
        }
    }

    // Booleans hold at least two children; collapse anything smaller.
    Ok(match nodes.len() {
        0 => None,
        1 => nodes.pop(),
        _ => Some(AdvancedSearchQuery::boolean(id, op, nodes)),
    })
}

fn leaf_from_map(map: &Map<String, Value>) -> Result<LeafQuery, CoreError> {
    let key = map
        .get("key")
        .and_then(Value::as_str)
        .ok_or_else(|| CoreError::invalid_query("leaf is missing a string `key`"))?;
    let value = match map.get("value") {
        Some(Value::String(s)) => s.clone(),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
        _ => {
            return Err(CoreError::invalid_query(format!(
                "leaf `{key}` is missing a scalar `value`"
            )));
        }
    };
    let op = map.get("op").and_then(Value::as_str).unwrap_or(DEFAULT_OP);

    Ok(LeafQuery::new(key, value).with_op(op))
}
