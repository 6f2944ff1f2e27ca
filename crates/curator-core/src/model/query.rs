// ── Advanced search query trees ──
//
// A query is a tree of boolean nodes (AND/OR) over leaf comparisons.
// Every node carries an editor-local `QueryId`; ids never reach the
// server (see `serialize::canonical`).

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumString};

/// Comparison operator assumed when a leaf does not name one.
pub const DEFAULT_OP: &str = "eq";

// ── QueryId ─────────────────────────────────────────────────────────

/// Editor-local node identifier, unique within a builder's tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryId(u64);

impl QueryId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for QueryId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

// ── BoolOp ──────────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BoolOp {
    And,
    Or,
}

impl BoolOp {
    /// Nested booleans alternate operators by convention.
    pub fn opposite(self) -> Self {
        match self {
            Self::And => Self::Or,
            Self::Or => Self::And,
        }
    }
}

// ── Nodes ───────────────────────────────────────────────────────────

/// A single `key op value` comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafQuery {
    pub key: String,
    #[serde(default = "default_op")]
    pub op: String,
    pub value: String,
}

fn default_op() -> String {
    DEFAULT_OP.into()
}

impl LeafQuery {
    /// Leaf using the default `eq` operator.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            op: default_op(),
            value: value.into(),
        }
    }

    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = op.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryNode {
    Leaf(LeafQuery),
    Boolean {
        op: BoolOp,
        children: Vec<AdvancedSearchQuery>,
    },
}

/// A node of an advanced search tree together with its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedSearchQuery {
    pub id: QueryId,
    pub node: QueryNode,
}

impl AdvancedSearchQuery {
    pub fn leaf(id: QueryId, leaf: LeafQuery) -> Self {
        Self {
            id,
            node: QueryNode::Leaf(leaf),
        }
    }

    pub fn boolean(id: QueryId, op: BoolOp, children: Vec<AdvancedSearchQuery>) -> Self {
        Self {
            id,
            node: QueryNode::Boolean { op, children },
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.node, QueryNode::Boolean { .. })
    }

    pub fn bool_op(&self) -> Option<BoolOp> {
        match &self.node {
            QueryNode::Boolean { op, .. } => Some(*op),
            QueryNode::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafQuery> {
        match &self.node {
            QueryNode::Leaf(leaf) => Some(leaf),
            QueryNode::Boolean { .. } => None,
        }
    }

    /// Direct children; empty for leaves.
    pub fn children(&self) -> &[AdvancedSearchQuery] {
        match &self.node {
            QueryNode::Boolean { children, .. } => children,
            QueryNode::Leaf(_) => &[],
        }
    }

    /// Every id in the subtree, pre-order.
    pub fn ids(&self) -> Vec<QueryId> {
        let mut out = Vec::new();
        collect_ids(self, &mut out);
        out
    }
}

fn collect_ids(node: &AdvancedSearchQuery, out: &mut Vec<QueryId>) {
    out.push(node.id);
    for child in node.children() {
        collect_ids(child, out);
    }
}

// ── Builders ────────────────────────────────────────────────────────

/// Which of the two independent query builders an edit targets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BuilderName {
    Include,
    Exclude,
}

impl BuilderName {
    /// Operator used when a leaf is wrapped at the top level.
    pub fn default_bool(self) -> BoolOp {
        match self {
            Self::Include => BoolOp::And,
            Self::Exclude => BoolOp::Or,
        }
    }
}

/// One builder context: an optional tree plus the node new queries attach to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryBuilder {
    pub query: Option<AdvancedSearchQuery>,
    pub selected_query_id: Option<QueryId>,
}

impl QueryBuilder {
    pub fn with_query(query: Option<AdvancedSearchQuery>) -> Self {
        Self {
            query,
            selected_query_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedSearch {
    pub include: QueryBuilder,
    pub exclude: QueryBuilder,
}

impl AdvancedSearch {
    pub fn builder(&self, name: BuilderName) -> &QueryBuilder {
        match name {
            BuilderName::Include => &self.include,
            BuilderName::Exclude => &self.exclude,
        }
    }

    pub fn builder_mut(&mut self, name: BuilderName) -> &mut QueryBuilder {
        match name {
            BuilderName::Include => &mut self.include,
            BuilderName::Exclude => &mut self.exclude,
        }
    }

    pub fn has_query(&self) -> bool {
        self.include.query.is_some() || self.exclude.query.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn leaf(id: u64, value: &str) -> AdvancedSearchQuery {
        AdvancedSearchQuery::leaf(QueryId::new(id), LeafQuery::new("genre", value))
    }

    #[test]
    fn bool_op_opposite_alternates() {
        assert_eq!(BoolOp::And.opposite(), BoolOp::Or);
        assert_eq!(BoolOp::Or.opposite(), BoolOp::And);
    }

    #[test]
    fn bool_op_parses_lowercase() {
        assert_eq!("and".parse::<BoolOp>().unwrap(), BoolOp::And);
        assert_eq!(BoolOp::Or.to_string(), "or");
    }

    #[test]
    fn builder_defaults_differ() {
        assert_eq!(BuilderName::Include.default_bool(), BoolOp::And);
        assert_eq!(BuilderName::Exclude.default_bool(), BoolOp::Or);
    }

    #[test]
    fn leaf_defaults_to_eq() {
        let parsed: LeafQuery = serde_json::from_str(r#"{"key":"genre","value":"Horror"}"#).unwrap();
        assert_eq!(parsed.op, DEFAULT_OP);
    }

    #[test]
    fn ids_walks_pre_order() {
        let tree = AdvancedSearchQuery::boolean(
            QueryId::new(1),
            BoolOp::And,
            vec![
                leaf(2, "Horror"),
                AdvancedSearchQuery::boolean(
                    QueryId::new(3),
                    BoolOp::Or,
                    vec![leaf(4, "Fantasy"), leaf(5, "Romance")],
                ),
            ],
        );
        let ids: Vec<u64> = tree.ids().into_iter().map(QueryId::get).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }
}
