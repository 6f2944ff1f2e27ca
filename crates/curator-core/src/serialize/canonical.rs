// ── Canonical query JSON ──
//
// The minimal form of a query tree understood by the server grammar:
// node ids are dropped and the default `eq` operator is omitted. Two
// trees that denote the same query serialize identically, which makes the
// output usable for content-based modification checks.

use serde_json::{Map, Value};

use crate::model::{AdvancedSearch, AdvancedSearchQuery, DEFAULT_OP, QueryNode};

pub const QUERY_KEY: &str = "query";
pub const NOT_KEY: &str = "not";

/// Canonical JSON value for one tree.
pub fn canonical_query(query: &AdvancedSearchQuery) -> Value {
    match &query.node {
        QueryNode::Leaf(leaf) => {
            let mut map = Map::new();
            map.insert("key".into(), Value::String(leaf.key.clone()));
            if leaf.op != DEFAULT_OP {
                map.insert("op".into(), Value::String(leaf.op.clone()));
            }
            map.insert("value".into(), Value::String(leaf.value.clone()));
            Value::Object(map)
        }
        QueryNode::Boolean { op, children } => {
            operator(op.as_ref(), children.iter().map(canonical_query).collect())
        }
    }
}

/// `include AND NOT(exclude)`, or whichever side exists on its own.
///
/// An exclude tree on its own is still negated.
pub fn combined_query(advanced: &AdvancedSearch) -> Option<Value> {
    let include = advanced.include.query.as_ref().map(canonical_query);
    let exclude = advanced.exclude.query.as_ref().map(canonical_query);
    match (include, exclude) {
        (Some(include), Some(exclude)) => {
            Some(operator("and", vec![include, operator(NOT_KEY, vec![exclude])]))
        }
        (Some(include), None) => Some(include),
        (None, Some(exclude)) => Some(operator(NOT_KEY, vec![exclude])),
        (None, None) => None,
    }
}

/// `{"query": ...}` document for the combined query, if any tree exists.
pub fn query_json(advanced: &AdvancedSearch) -> Option<String> {
    combined_query(advanced).map(|query| {
        let mut doc = Map::new();
        doc.insert(QUERY_KEY.into(), query);
        Value::Object(doc).to_string()
    })
}

fn operator(name: &str, operands: Vec<Value>) -> Value {
    let mut map = Map::new();
    map.insert(name.into(), Value::Array(operands));
    Value::Object(map)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{BoolOp, LeafQuery, QueryBuilder, QueryId};

    fn leaf(id: u64, key: &str, value: &str) -> AdvancedSearchQuery {
        AdvancedSearchQuery::leaf(QueryId::new(id), LeafQuery::new(key, value))
    }

    #[test]
    fn leaf_drops_id_and_default_op() {
        let value = canonical_query(&leaf(7, "genre", "Horror"));
        insta::assert_snapshot!(value.to_string(), @r#"{"key":"genre","value":"Horror"}"#);
    }

    #[test]
    fn leaf_keeps_non_default_op() {
        let node = AdvancedSearchQuery::leaf(
            QueryId::new(1),
            LeafQuery::new("title", "dragon").with_op("contains"),
        );
        insta::assert_snapshot!(
            canonical_query(&node).to_string(),
            @r#"{"key":"title","op":"contains","value":"dragon"}"#
        );
    }

    #[test]
    fn trees_with_different_ids_serialize_equal() {
        let a = AdvancedSearchQuery::boolean(
            QueryId::new(1),
            BoolOp::Or,
            vec![leaf(2, "genre", "Horror"), leaf(3, "genre", "Fantasy")],
        );
        let b = AdvancedSearchQuery::boolean(
            QueryId::new(40),
            BoolOp::Or,
            vec![leaf(12, "genre", "Horror"), leaf(9, "genre", "Fantasy")],
        );
        assert_eq!(canonical_query(&a), canonical_query(&b));
    }

    #[test]
    fn combines_include_and_negated_exclude() {
        let advanced = AdvancedSearch {
            include: QueryBuilder::with_query(Some(leaf(1, "genre", "Horror"))),
            exclude: QueryBuilder::with_query(Some(leaf(2, "language", "fre"))),
        };
        insta::assert_snapshot!(
            query_json(&advanced).unwrap(),
            @r#"{"query":{"and":[{"key":"genre","value":"Horror"},{"not":[{"key":"language","value":"fre"}]}]}}"#
        );
    }

    #[test]
    fn exclude_alone_is_negated() {
        let advanced = AdvancedSearch {
            include: QueryBuilder::default(),
            exclude: QueryBuilder::with_query(Some(leaf(2, "genre", "Gore"))),
        };
        insta::assert_snapshot!(
            query_json(&advanced).unwrap(),
            @r#"{"query":{"not":[{"key":"genre","value":"Gore"}]}}"#
        );
    }

    #[test]
    fn no_trees_means_no_query() {
        assert!(query_json(&AdvancedSearch::default()).is_none());
    }
}
