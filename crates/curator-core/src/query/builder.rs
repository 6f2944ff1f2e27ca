// ── Query builder operations ──
//
// CRUD over one builder context (`include` or `exclude`). Every operation
// is total: an id that no longer exists (a stale UI callback racing a
// structural edit) leaves the builder unchanged.

use tracing::debug;

use super::ids::IdSource;
use super::tree;
use crate::model::{AdvancedSearchQuery, BoolOp, LeafQuery, QueryBuilder, QueryId};

/// Add a leaf at the selected node, or at the root when nothing is selected.
///
/// An empty builder takes the leaf as its root and selects it.
pub fn add_query(
    builder: &QueryBuilder,
    default_bool: BoolOp,
    leaf: LeafQuery,
    ids: &mut impl IdSource,
) -> QueryBuilder {
    let Some(root) = &builder.query else {
        let query = AdvancedSearchQuery::leaf(ids.next_id(), leaf);
        return QueryBuilder {
            selected_query_id: Some(query.id),
            query: Some(query),
        };
    };

    let target = builder.selected_query_id.unwrap_or(root.id);
    if !tree::contains(root, target) {
        debug!(%target, "add target no longer exists, ignoring");
        return builder.clone();
    }

    let query = AdvancedSearchQuery::leaf(ids.next_id(), leaf);
    QueryBuilder {
        query: Some(tree::insert_at(root, target, &query, default_bool, ids)),
        selected_query_id: builder.selected_query_id,
    }
}

/// Move the subtree `id` under `target_id` and select the target.
///
/// Moving a node into itself or one of its descendants is ignored.
pub fn move_query(
    builder: &QueryBuilder,
    default_bool: BoolOp,
    id: QueryId,
    target_id: QueryId,
    ids: &mut impl IdSource,
) -> QueryBuilder {
    let Some(root) = &builder.query else {
        return builder.clone();
    };
    let Some(subtree) = tree::find(root, id) else {
        debug!(%id, "move source no longer exists, ignoring");
        return builder.clone();
    };
    if !tree::contains(root, target_id) || tree::contains(subtree, target_id) {
        debug!(%id, %target_id, "move target invalid, ignoring");
        return builder.clone();
    }

    let moved = tree::with_fresh_id(subtree, ids);
    let inserted = tree::insert_at(root, target_id, &moved, default_bool, ids);
    let Some(next_root) = tree::remove(&inserted, id) else {
        return builder.clone();
    };

    let selected_query_id = tree::contains(&next_root, target_id).then_some(target_id);
    QueryBuilder {
        query: Some(next_root),
        selected_query_id,
    }
}

/// Remove the subtree `id`.
///
/// Selection moves to the nearest ancestor of `id` that survived the
/// removal (lifting can replace the direct parent), or is cleared.
pub fn remove_query(builder: &QueryBuilder, id: QueryId) -> QueryBuilder {
    let Some(root) = &builder.query else {
        return builder.clone();
    };
    let Some(path) = tree::find_path(root, id) else {
        debug!(%id, "remove target no longer exists, ignoring");
        return builder.clone();
    };

    let Some(next_root) = tree::remove(root, id) else {
        return QueryBuilder::default();
    };

    let selected_query_id = path
        .iter()
        .rev()
        .skip(1)
        .copied()
        .find(|ancestor| tree::contains(&next_root, *ancestor));

    QueryBuilder {
        query: Some(next_root),
        selected_query_id,
    }
}

/// Change which node new queries attach to. `None` clears the selection.
pub fn select_query(builder: &QueryBuilder, id: Option<QueryId>) -> QueryBuilder {
    if let Some(id) = id {
        let exists = builder
            .query
            .as_ref()
            .is_some_and(|root| tree::contains(root, id));
        if !exists {
            debug!(%id, "selected query no longer exists, ignoring");
            return builder.clone();
        }
    }
    QueryBuilder {
        query: builder.query.clone(),
        selected_query_id: id,
    }
}

/// Switch a boolean node between AND and OR. Leaves are ignored.
pub fn toggle_boolean(builder: &QueryBuilder, id: QueryId, new_bool: BoolOp) -> QueryBuilder {
    let Some(root) = &builder.query else {
        return builder.clone();
    };
    match tree::find(root, id).and_then(AdvancedSearchQuery::bool_op) {
        Some(op) if op != new_bool => QueryBuilder {
            query: Some(tree::set_bool(root, id, new_bool)),
            selected_query_id: builder.selected_query_id,
        },
        _ => builder.clone(),
    }
}
