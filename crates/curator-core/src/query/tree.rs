// ── Tree primitives ──
//
// Small total recursive functions over `AdvancedSearchQuery`. Each one
// returns a new tree and leaves the input untouched; a missing id simply
// yields an unchanged copy.

use super::ids::IdSource;
use crate::model::{AdvancedSearchQuery, BoolOp, QueryId, QueryNode};

/// Locate the node with `id`.
pub fn find(node: &AdvancedSearchQuery, id: QueryId) -> Option<&AdvancedSearchQuery> {
    if node.id == id {
        return Some(node);
    }
    node.children().iter().find_map(|child| find(child, id))
}

pub fn contains(node: &AdvancedSearchQuery, id: QueryId) -> bool {
    find(node, id).is_some()
}

/// Ids from `node` down to `id`, both inclusive.
pub fn find_path(node: &AdvancedSearchQuery, id: QueryId) -> Option<Vec<QueryId>> {
    if node.id == id {
        return Some(vec![id]);
    }
    node.children().iter().find_map(|child| {
        find_path(child, id).map(|mut path| {
            path.insert(0, node.id);
            path
        })
    })
}

/// Copy of `node` whose top-level id is replaced by a fresh one.
pub fn with_fresh_id(node: &AdvancedSearchQuery, ids: &mut impl IdSource) -> AdvancedSearchQuery {
    AdvancedSearchQuery {
        id: ids.next_id(),
        node: node.node.clone(),
    }
}

/// Attach `new_query` at `target`.
///
/// A boolean target gains `new_query` as its last child. A leaf target is
/// turned into a `preferred` boolean that keeps the leaf's id and holds a
/// fresh-id copy of the leaf followed by `new_query`. Below a boolean the
/// preferred operator flips to the opposite of that boolean's own.
pub fn insert_at(
    node: &AdvancedSearchQuery,
    target: QueryId,
    new_query: &AdvancedSearchQuery,
    preferred: BoolOp,
    ids: &mut impl IdSource,
) -> AdvancedSearchQuery {
    match &node.node {
        QueryNode::Boolean { op, children } => {
            let mut next = Vec::with_capacity(children.len() + 1);
            if node.id == target {
                next.extend(children.iter().cloned());
                next.push(new_query.clone());
            } else {
                for child in children {
                    next.push(insert_at(child, target, new_query, op.opposite(), ids));
                }
            }
            AdvancedSearchQuery::boolean(node.id, *op, next)
        }
        QueryNode::Leaf(_) if node.id == target => AdvancedSearchQuery::boolean(
            node.id,
            preferred,
            vec![with_fresh_id(node, ids), new_query.clone()],
        ),
        QueryNode::Leaf(_) => node.clone(),
    }
}

/// Detach the node with `id`. Returns `None` when `node` itself is removed.
///
/// A boolean left with a single child is lifted: it is replaced by that
/// child, which keeps its own id and subtree.
pub fn remove(node: &AdvancedSearchQuery, id: QueryId) -> Option<AdvancedSearchQuery> {
    if node.id == id {
        return None;
    }
    Some(remove_below(node, id))
}

fn remove_below(node: &AdvancedSearchQuery, id: QueryId) -> AdvancedSearchQuery {
    let QueryNode::Boolean { op, children } = &node.node else {
        return node.clone();
    };

    if children.iter().any(|child| child.id == id) {
        let remaining: Vec<AdvancedSearchQuery> = children
            .iter()
            .filter(|child| child.id != id)
            .cloned()
            .collect();
        if let [only] = remaining.as_slice() {
            return only.clone();
        }
        return AdvancedSearchQuery::boolean(node.id, *op, remaining);
    }

    let next = children.iter().map(|child| remove_below(child, id)).collect();
    AdvancedSearchQuery::boolean(node.id, *op, next)
}

/// Rename the operator of the boolean `id`, keeping its id and children.
pub fn set_bool(node: &AdvancedSearchQuery, id: QueryId, new_op: BoolOp) -> AdvancedSearchQuery {
    match &node.node {
        QueryNode::Boolean { op, children } => {
            let op = if node.id == id { new_op } else { *op };
            let next = children
                .iter()
                .map(|child| set_bool(child, id, new_op))
                .collect();
            AdvancedSearchQuery::boolean(node.id, op, next)
        }
        QueryNode::Leaf(_) => node.clone(),
    }
}
