// ── Validator ──
//
// Derived flags recomputed after every state-changing transition.

use std::collections::HashSet;

use crate::serialize::search_query_string;
use crate::state::EditorState;

/// Whether the list can be saved as it stands.
pub fn is_valid(state: &EditorState) -> bool {
    let props = &state.properties.current;
    if props.name.is_empty() {
        return false;
    }
    let has_source = if props.auto_update {
        state.search_params.current.advanced.has_query()
    } else {
        state.entries.current_total_count() > 0
    };
    !props.collections.is_empty() || has_source
}

/// Baseline and current search params denote different searches.
///
/// Compared through their serialized query strings, so node ids and edit
/// history do not matter.
pub fn is_search_modified(state: &EditorState) -> bool {
    search_query_string(&state.search_params.baseline)
        != search_query_string(&state.search_params.current)
}

/// Anything the save would change.
pub fn is_modified(state: &EditorState) -> bool {
    let baseline = &state.properties.baseline;
    let current = &state.properties.current;

    let baseline_collections: HashSet<_> = baseline.collections.iter().collect();
    let current_collections: HashSet<_> = current.collections.iter().collect();

    state.entries.has_changes()
        || baseline.name != current.name
        || baseline.auto_update != current.auto_update
        || (current.auto_update && is_search_modified(state))
        || baseline_collections != current_collections
}

/// Return `state` with all three derived flags refreshed.
pub fn validate(mut state: EditorState) -> EditorState {
    state.is_valid = is_valid(&state);
    state.is_modified = is_modified(&state);
    state.is_search_modified = is_search_modified(&state);
    state
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{
        AdvancedSearchQuery, BoolOp, CollectionId, Entry, LeafQuery, Properties, QueryBuilder,
        QueryId, SearchParams, Tracked,
    };
    use crate::store::EntriesState;

    fn named(name: &str) -> EditorState {
        let mut state = EditorState::new_list(false);
        state.properties.current.name = name.into();
        state
    }

    fn leaf(id: u64, value: &str) -> AdvancedSearchQuery {
        AdvancedSearchQuery::leaf(QueryId::new(id), LeafQuery::new("genre", value))
    }

    #[test]
    fn name_is_required() {
        let mut state = named("");
        state.properties.current.collections.push(CollectionId::new(1));
        assert!(!is_valid(&state));
    }

    #[test]
    fn collections_alone_make_a_list_valid() {
        let mut state = named("Award Winners");
        assert!(!is_valid(&state));
        state.properties.current.collections.push(CollectionId::new(1));
        assert!(is_valid(&state));
    }

    #[test]
    fn manual_list_needs_entries() {
        let mut state = named("Award Winners");
        state.entries = state.entries.add(Entry::new("book1", "Dune"));
        assert!(is_valid(&state));

        state.properties.current.auto_update = true;
        assert!(!is_valid(&state), "auto-update ignores manual entries");
    }

    #[test]
    fn auto_update_list_needs_a_query() {
        let mut state = named("Horror");
        state.properties.current.auto_update = true;
        assert!(!is_valid(&state));

        state.search_params.current.advanced.exclude = QueryBuilder::with_query(Some(leaf(1, "Gore")));
        assert!(is_valid(&state));
    }

    #[test]
    fn collection_order_is_not_a_modification() {
        let mut state = EditorState::new_list(false);
        state.properties = Tracked::loaded(Properties {
            name: "Staff Picks".into(),
            collections: vec![CollectionId::new(1), CollectionId::new(2)],
            auto_update: false,
        });
        state.properties.current.collections.reverse();
        assert!(!is_modified(&state));

        state.properties.current.collections.pop();
        assert!(is_modified(&state));
    }

    #[test]
    fn entry_delta_is_a_modification() {
        let mut state = EditorState::new_list(false);
        assert!(!is_modified(&state));
        state.entries = EntriesState::new().add(Entry::new("book1", "Dune"));
        assert!(is_modified(&state));
    }

    #[test]
    fn equivalent_trees_are_not_search_modified() {
        let mut state = EditorState::new_list(false);
        let baseline = SearchParams {
            advanced: crate::model::AdvancedSearch {
                include: QueryBuilder::with_query(Some(AdvancedSearchQuery::boolean(
                    QueryId::new(1),
                    BoolOp::And,
                    vec![leaf(2, "Horror"), leaf(3, "Fantasy")],
                ))),
                exclude: QueryBuilder::default(),
            },
            ..SearchParams::default()
        };
        state.search_params = Tracked::loaded(baseline);
        state.search_params.current.advanced.include = QueryBuilder::with_query(Some(
            AdvancedSearchQuery::boolean(
                QueryId::new(9),
                BoolOp::And,
                vec![leaf(7, "Horror"), leaf(8, "Fantasy")],
            ),
        ));
        assert!(!is_search_modified(&state));

        state.search_params.current.sort = Some("title".into());
        assert!(is_search_modified(&state));
    }

    #[test]
    fn search_changes_only_count_for_auto_update_lists() {
        let mut state = EditorState::new_list(false);
        state.search_params.current.terms = "dogs".into();
        assert!(is_search_modified(&state));
        assert!(!is_modified(&state));

        state.properties = Tracked::loaded(Properties {
            auto_update: true,
            ..Properties::default()
        });
        assert!(is_modified(&state));
    }

    #[test]
    fn validate_refreshes_every_flag() {
        let mut state = named("Award Winners");
        state.entries = state.entries.add(Entry::new("book1", "Dune"));
        let state = validate(state);
        assert!(state.is_valid);
        assert!(state.is_modified);
        assert!(!state.is_search_modified);
    }
}
