// ── Query tree editor ──
//
// Two independent builders (`include`, default AND; `exclude`, default OR)
// edited through the operations in `builder`, which are themselves built
// from the total primitives in `tree`.

pub mod builder;
pub mod ids;
pub mod tree;

pub use builder::{add_query, move_query, remove_query, select_query, toggle_boolean};
pub use ids::{IdSource, SequentialIds};

use crate::model::{AdvancedSearch, BoolOp, BuilderName, LeafQuery, QueryId};

/// One structural edit against a named builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryEdit {
    Add(LeafQuery),
    Move { id: QueryId, target_id: QueryId },
    Remove(QueryId),
    Select(Option<QueryId>),
    ToggleBoolean { id: QueryId, op: BoolOp },
}

/// Apply `edit` to the `name` builder, leaving the other builder untouched.
pub fn apply_edit(
    search: &AdvancedSearch,
    name: BuilderName,
    edit: QueryEdit,
    ids: &mut impl IdSource,
) -> AdvancedSearch {
    let current = search.builder(name);
    let default_bool = name.default_bool();
    let next = match edit {
        QueryEdit::Add(leaf) => add_query(current, default_bool, leaf, ids),
        QueryEdit::Move { id, target_id } => move_query(current, default_bool, id, target_id, ids),
        QueryEdit::Remove(id) => remove_query(current, id),
        QueryEdit::Select(id) => select_query(current, id),
        QueryEdit::ToggleBoolean { id, op } => toggle_boolean(current, id, op),
    };

    let mut search = search.clone();
    *search.builder_mut(name) = next;
    search
}
