// ── Editor controller ──
//
// A pure reducer over `Transition`s. The controller owns only the session
// configuration and the node-id source; all editor data lives in the
// `EditorState` snapshots it is handed and returns.

use tracing::{debug, warn};

use crate::command::Transition;
use crate::config::EditorConfig;
use crate::convert;
use crate::model::{CustomListsResponse, ListId, Properties, SearchParams, Tracked};
use crate::query::{self, IdSource, SequentialIds};
use crate::serialize::{SubmissionPayload, build_search_url, build_submission_payload};
use crate::state::EditorState;
use crate::validate::validate;

pub struct EditorController<I: IdSource = SequentialIds> {
    config: EditorConfig,
    ids: I,
}

impl EditorController<SequentialIds> {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_id_source(config, SequentialIds::new())
    }
}

impl<I: IdSource> EditorController<I> {
    /// Controller drawing query node ids from `ids`.
    pub fn with_id_source(config: EditorConfig, ids: I) -> Self {
        Self { config, ids }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Blank new-list state honoring the configured feature flag.
    pub fn initial_state(&self) -> EditorState {
        validate(EditorState::new_list(self.config.auto_update_enabled))
    }

    /// Apply one transition, returning the next snapshot.
    ///
    /// Derived flags are recomputed for every transition except the
    /// feature-flag toggle.
    pub fn apply(&mut self, state: &EditorState, transition: Transition) -> EditorState {
        debug!(transition = transition.kind(), "applying transition");
        match transition {
            Transition::FeatureFlagChanged {
                auto_update_enabled,
            } => EditorState {
                is_auto_update_enabled: auto_update_enabled,
                ..state.clone()
            },
            Transition::SummaryLoaded {
                is_after_share: true,
                ..
            } => {
                debug!("summary reload after share, leaving state to the share handler");
                state.clone()
            }
            other => validate(self.reduce(state, other)),
        }
    }

    /// Fold `transitions` over `state`.
    pub fn replay(
        &mut self,
        state: &EditorState,
        transitions: impl IntoIterator<Item = Transition>,
    ) -> EditorState {
        transitions
            .into_iter()
            .fold(state.clone(), |state, transition| {
                self.apply(&state, transition)
            })
    }

    pub fn search_url(&self, state: &EditorState) -> String {
        build_search_url(&state.search_params.current, &self.config.library)
    }

    #[allow(clippy::unused_self)]
    pub fn payload(&self, state: &EditorState) -> SubmissionPayload {
        build_submission_payload(state)
    }

    // ── Handlers ─────────────────────────────────────────────────────

    fn reduce(&mut self, state: &EditorState, transition: Transition) -> EditorState {
        if let Some((builder, edit)) = transition.as_query_edit() {
            let mut next = state.clone();
            next.search_params.current.advanced = query::apply_edit(
                &state.search_params.current.advanced,
                builder,
                edit,
                &mut self.ids,
            );
            return next;
        }

        let mut next = state.clone();
        match transition {
            Transition::Open { id, data } => {
                next = EditorState {
                    id,
                    is_loaded: id.is_none(),
                    ..EditorState::new_list(state.is_auto_update_enabled)
                };
                if let (Some(_), Some(data)) = (id, data) {
                    next = self.apply_summary(next, &data);
                }
            }
            Transition::SummaryLoaded { data, .. } => {
                if state.id.is_none() {
                    debug!("summary for a new list, ignoring");
                } else {
                    next = self.apply_summary(next, &data);
                }
            }
            Transition::DetailLoaded { books, append } => {
                next.entries = state.entries.load_page(books, append);
            }
            Transition::PropertyChanged { change } => {
                change.apply_to(&mut next.properties.current);
            }
            Transition::CollectionToggled { id } => {
                next.properties.current.toggle_collection(id);
            }
            Transition::SearchParamChanged { change } => {
                change.apply_to(&mut next.search_params.current);
            }
            Transition::EntryAdded { entry } => next.entries = state.entries.add(entry),
            Transition::EntryAddedAll { entries } => next.entries = state.entries.add_all(entries),
            Transition::EntryRemoved { id } => next.entries = state.entries.remove(&id),
            Transition::EntryAllRemoved => next.entries = state.entries.remove_all(),
            Transition::Reset => {
                next.properties = state.properties.reset();
                next.search_params = state.search_params.reset();
                next.entries = state.entries.reset();
            }
            Transition::ShareRequested { list_id } => {
                if owns_share(state, list_id) {
                    next.is_share_pending = true;
                    next.error = None;
                }
            }
            Transition::ShareSucceeded { list_id } => {
                if owns_share(state, list_id) {
                    next.is_share_pending = false;
                    next.is_shared = true;
                }
            }
            Transition::ShareFailed { list_id, error } => {
                if owns_share(state, list_id) {
                    next.is_share_pending = false;
                    next.error = Some(error);
                }
            }
            // Routed above.
            Transition::FeatureFlagChanged { .. }
            | Transition::QueryAdded { .. }
            | Transition::QueryMoved { .. }
            | Transition::QueryRemoved { .. }
            | Transition::QuerySelected { .. }
            | Transition::QueryBooleanChanged { .. } => {}
        }
        next
    }

    /// Hydrate `state` from the summary record for `state.id`.
    ///
    /// Already loaded baseline entries survive; local deltas do not.
    fn apply_summary(&mut self, state: EditorState, data: &CustomListsResponse) -> EditorState {
        let Some(id) = state.id else {
            return state;
        };
        let Some(summary) = data.find(id) else {
            debug!(%id, "custom list missing from summary");
            return EditorState {
                error: Some(format!("Custom list not found for ID: {id}")),
                ..EditorState::new_list(state.is_auto_update_enabled)
            };
        };

        let (search_params, error) = match convert::search_params_from_summary(summary, &mut self.ids)
        {
            Ok(params) => (params, None),
            Err(e) => {
                warn!(list = %id, error = %e, "unparseable auto-update search, using defaults");
                (
                    SearchParams::default(),
                    Some(format!("Invalid auto-update query for list {id}: {e}")),
                )
            }
        };

        EditorState {
            is_loaded: true,
            is_owner: summary.is_owner,
            is_shared: summary.is_shared,
            properties: Tracked::loaded(Properties::from(summary)),
            search_params: Tracked::loaded(search_params),
            entries: state
                .entries
                .reset()
                .with_baseline_total_count(summary.entry_count),
            error,
            ..state
        }
    }
}

/// Share completions for another list are stale and dropped.
fn owns_share(state: &EditorState, list_id: ListId) -> bool {
    let owned = state.id == Some(list_id);
    if !owned {
        debug!(%list_id, current = ?state.id, "share transition for another list, ignoring");
    }
    owned
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::command::{PropertyChange, SearchParamChange};
    use crate::model::{
        BoolOp, BuilderName, CollectionId, CollectionRef, CustomListSummary, Entry, EntryId,
        LeafQuery, QueryId,
    };
    use pretty_assertions::assert_eq;

    fn controller() -> EditorController {
        EditorController::new(EditorConfig::new("nypl"))
    }

    fn summary(id: u64, entry_count: usize) -> CustomListSummary {
        CustomListSummary {
            id: ListId::new(id),
            name: "Staff Picks".into(),
            collections: vec![CollectionRef {
                id: CollectionId::new(2),
                name: "Overdrive".into(),
                protocol: "OPDS".into(),
            }],
            entry_count,
            is_owner: true,
            is_shared: false,
            auto_update: false,
            auto_update_status: None,
            auto_update_query: None,
            auto_update_facets: None,
        }
    }

    fn lists(items: Vec<CustomListSummary>) -> CustomListsResponse {
        CustomListsResponse {
            custom_lists: items,
        }
    }

    fn opened(ctl: &mut EditorController, id: u64, data: CustomListsResponse) -> EditorState {
        let state = ctl.initial_state();
        ctl.apply(
            &state,
            Transition::Open {
                id: Some(ListId::new(id)),
                data: Some(data),
            },
        )
    }

    fn books(range: std::ops::Range<usize>) -> Vec<Entry> {
        range
            .map(|n| Entry::new(format!("book{n}"), format!("Book {n}")))
            .collect()
    }

    fn add_leaf(value: &str) -> Transition {
        Transition::QueryAdded {
            builder: BuilderName::Include,
            query: LeafQuery::new("genre", value),
        }
    }

    #[test]
    fn new_list_with_added_entries() {
        let mut ctl = controller();
        let state = ctl.initial_state();
        let state = ctl.replay(
            &state,
            [
                Transition::Open { id: None, data: None },
                Transition::PropertyChanged {
                    change: PropertyChange::Name("Award Winners".into()),
                },
                Transition::EntryAdded {
                    entry: Entry::new("book1", "Dune"),
                },
                Transition::EntryAdded {
                    entry: Entry::new("book2", "Emma"),
                },
            ],
        );

        let ids: Vec<&str> = state.entries.current().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["book2", "book1"]);
        assert_eq!(state.entries.current_total_count(), 2);
        assert!(state.is_loaded);
        assert!(state.is_valid);
        assert!(state.is_modified);
    }

    #[test]
    fn counts_follow_deltas_over_a_partial_baseline() {
        let mut ctl = controller();
        let state = opened(&mut ctl, 7, lists(vec![summary(7, 150)]));
        let state = ctl.replay(
            &state,
            [
                Transition::DetailLoaded {
                    books: books(0..150),
                    append: false,
                },
                Transition::EntryRemoved {
                    id: EntryId::from("book3"),
                },
                Transition::EntryAdded {
                    entry: Entry::new("new1", "New One"),
                },
                Transition::EntryAdded {
                    entry: Entry::new("new2", "New Two"),
                },
            ],
        );
        assert_eq!(state.entries.current_total_count(), 151);
        assert!(state.is_modified);
    }

    #[test]
    fn second_add_wraps_the_selected_leaf() {
        let mut ctl = controller();
        let state = ctl.initial_state();
        let state = ctl.apply(&state, add_leaf("Horror"));
        let builder = &state.search_params.current.advanced.include;
        let root_id = builder.query.as_ref().unwrap().id;
        assert_eq!(builder.selected_query_id, Some(root_id));

        let state = ctl.apply(&state, add_leaf("Fantasy"));
        let builder = &state.search_params.current.advanced.include;
        let root = builder.query.as_ref().unwrap();
        assert_eq!(root.id, root_id);
        assert_eq!(root.bool_op(), Some(BoolOp::And));
        let values: Vec<&str> = root
            .children()
            .iter()
            .map(|c| c.as_leaf().unwrap().value.as_str())
            .collect();
        assert_eq!(values, vec!["Horror", "Fantasy"]);
        assert_ne!(root.children()[0].id, root_id);
        assert_eq!(builder.selected_query_id, Some(root_id));
    }

    #[test]
    fn removing_a_sibling_lifts_the_survivor() {
        let mut ctl = controller();
        let state = ctl.initial_state();
        let state = ctl.replay(&state, [add_leaf("Horror"), add_leaf("Fantasy")]);
        let root = state.search_params.current.advanced.include.query.clone().unwrap();
        let horror = root.children()[0].clone();
        let fantasy_id = root.children()[1].id;

        let state = ctl.apply(
            &state,
            Transition::QueryRemoved {
                builder: BuilderName::Include,
                id: fantasy_id,
            },
        );
        assert_eq!(state.search_params.current.advanced.include.query, Some(horror));
    }

    #[test]
    fn search_url_uses_configured_library() {
        let mut ctl = controller();
        let state = ctl.initial_state();
        let state = ctl.replay(
            &state,
            [
                Transition::SearchParamChanged {
                    change: SearchParamChange::EntryPoint("Audio".into()),
                },
                Transition::SearchParamChanged {
                    change: SearchParamChange::Terms("dogs".into()),
                },
                Transition::SearchParamChanged {
                    change: SearchParamChange::Sort(Some("title".into())),
                },
            ],
        );
        insta::assert_snapshot!(
            ctl.search_url(&state),
            @"/nypl/search?media=Audio&order=title&q=dogs"
        );
    }

    #[test]
    fn clearing_sort_with_empty_value_drops_order() {
        let log = crate::command::parse_transition_log(
            r#"[
                {"type":"search_param_changed","change":{"param":"sort","value":""}},
                {"type":"search_param_changed","change":{"param":"terms","value":"dogs"}}
            ]"#,
        )
        .unwrap();
        let mut ctl = controller();
        let state = ctl.initial_state();
        let state = ctl.replay(&state, log);
        assert_eq!(state.search_params.current.sort, None);
        insta::assert_snapshot!(ctl.search_url(&state), @"/nypl/search?q=dogs");
    }

    #[test]
    fn empty_stored_order_hydrates_as_unsorted() {
        let mut list = summary(12, 0);
        list.auto_update = true;
        list.auto_update_query = Some(r#"{"query":{"key":"genre","value":"Horror"}}"#.into());
        list.auto_update_facets = Some(r#"{"media":"Book","order":""}"#.into());

        let mut ctl = controller();
        let state = opened(&mut ctl, 12, lists(vec![list]));
        assert_eq!(state.search_params.current.sort, None);
        let facets = ctl.payload(&state).get("auto_update_facets").map(str::to_owned);
        assert_eq!(facets.as_deref(), Some(r#"{"media":"Book"}"#));
    }

    #[test]
    fn open_hydrates_from_summary() {
        let mut list = summary(12, 4);
        list.auto_update = true;
        list.is_shared = true;
        list.auto_update_query = Some(r#"{"query":{"key":"genre","value":"Horror"}}"#.into());
        list.auto_update_facets = Some(r#"{"media":"Book"}"#.into());

        let mut ctl = controller();
        let state = opened(&mut ctl, 12, lists(vec![summary(3, 0), list]));

        assert_eq!(state.id, Some(ListId::new(12)));
        assert!(state.is_loaded);
        assert!(state.is_shared);
        assert_eq!(state.properties.current.name, "Staff Picks");
        assert_eq!(state.entries.baseline_total_count(), 4);
        assert_eq!(state.search_params.current.entry_point, "Book");
        assert!(state.search_params.current.advanced.include.query.is_some());
        assert!(state.is_valid);
        assert!(!state.is_modified);
        assert!(!state.is_search_modified);
        assert!(state.error.is_none());
    }

    #[test]
    fn missing_list_leaves_a_usable_blank_editor() {
        let mut ctl = controller();
        let state = opened(&mut ctl, 99, lists(vec![summary(3, 0)]));
        assert_eq!(state.error.as_deref(), Some("Custom list not found for ID: 99"));
        assert!(state.id.is_none());
        assert!(state.is_loaded);

        let state = ctl.apply(
            &state,
            Transition::PropertyChanged {
                change: PropertyChange::Name("Fresh".into()),
            },
        );
        assert_eq!(state.properties.current.name, "Fresh");
    }

    #[test]
    fn open_without_data_waits_for_summary() {
        let mut ctl = controller();
        let state = ctl.initial_state();
        let state = ctl.apply(
            &state,
            Transition::Open {
                id: Some(ListId::new(5)),
                data: None,
            },
        );
        assert!(!state.is_loaded);

        let state = ctl.apply(
            &state,
            Transition::SummaryLoaded {
                data: lists(vec![summary(5, 10)]),
                is_after_share: false,
            },
        );
        assert!(state.is_loaded);
        assert_eq!(state.entries.baseline_total_count(), 10);
    }

    #[test]
    fn summary_after_share_is_ignored() {
        let mut ctl = controller();
        let state = opened(&mut ctl, 5, lists(vec![summary(5, 10)]));
        let mut renamed = summary(5, 10);
        renamed.name = "Renamed Elsewhere".into();

        let next = ctl.apply(
            &state,
            Transition::SummaryLoaded {
                data: lists(vec![renamed]),
                is_after_share: true,
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn summary_reload_keeps_loaded_entries_and_clears_deltas() {
        let mut ctl = controller();
        let state = opened(&mut ctl, 5, lists(vec![summary(5, 3)]));
        let state = ctl.replay(
            &state,
            [
                Transition::DetailLoaded {
                    books: books(0..3),
                    append: false,
                },
                Transition::EntryRemoved {
                    id: EntryId::from("book1"),
                },
                Transition::SummaryLoaded {
                    data: lists(vec![summary(5, 3)]),
                    is_after_share: false,
                },
            ],
        );
        assert_eq!(state.entries.baseline().len(), 3);
        assert!(!state.entries.has_changes());
        assert_eq!(state.entries.current_total_count(), 3);
    }

    #[test]
    fn unparseable_query_is_reported() {
        let mut list = summary(8, 0);
        list.auto_update = true;
        list.auto_update_query = Some("{not json".into());
        let mut ctl = controller();
        let state = opened(&mut ctl, 8, lists(vec![list]));

        let error = state.error.unwrap();
        assert!(error.starts_with("Invalid auto-update query for list 8:"), "{error}");
        assert_eq!(state.search_params.current, SearchParams::default());
        assert_eq!(state.properties.current.name, "Staff Picks");
    }

    #[test]
    fn share_transitions_require_matching_list() {
        let mut ctl = controller();
        let state = opened(&mut ctl, 5, lists(vec![summary(5, 0)]));

        let stale = ctl.apply(&state, Transition::ShareRequested { list_id: ListId::new(6) });
        assert!(!stale.is_share_pending);

        let pending = ctl.apply(&state, Transition::ShareRequested { list_id: ListId::new(5) });
        assert!(pending.is_share_pending);

        let failed = ctl.apply(
            &pending,
            Transition::ShareFailed {
                list_id: ListId::new(5),
                error: "not allowed".into(),
            },
        );
        assert!(!failed.is_share_pending);
        assert_eq!(failed.error.as_deref(), Some("not allowed"));

        let shared = ctl.apply(&pending, Transition::ShareSucceeded { list_id: ListId::new(5) });
        assert!(shared.is_shared);
        assert!(!shared.is_share_pending);
    }

    #[test]
    fn feature_flag_skips_revalidation() {
        let mut ctl = controller();
        let mut state = ctl.initial_state();
        state.properties.current.name = "Unvalidated".into();
        state.properties.current.collections.push(CollectionId::new(1));

        let next = ctl.apply(
            &state,
            Transition::FeatureFlagChanged {
                auto_update_enabled: true,
            },
        );
        assert!(next.is_auto_update_enabled);
        assert!(!next.is_valid);
    }

    #[test]
    fn reset_discards_all_local_edits() {
        let mut ctl = controller();
        let opened_state = opened(&mut ctl, 5, lists(vec![summary(5, 0)]));
        let edited = ctl.replay(
            &opened_state,
            [
                Transition::PropertyChanged {
                    change: PropertyChange::AutoUpdate(true),
                },
                Transition::CollectionToggled {
                    id: CollectionId::new(9),
                },
                add_leaf("Horror"),
                Transition::EntryAdded {
                    entry: Entry::new("book1", "Dune"),
                },
            ],
        );
        assert!(edited.is_modified);

        let reset = ctl.apply(&edited, Transition::Reset);
        assert_eq!(reset.properties, opened_state.properties);
        assert_eq!(reset.search_params, opened_state.search_params);
        assert!(!reset.entries.has_changes());
        assert!(!reset.is_modified);
    }

    #[test]
    fn stale_query_ids_are_ignored() {
        let mut ctl = controller();
        let state = ctl.initial_state();
        let state = ctl.apply(&state, add_leaf("Horror"));
        for transition in [
            Transition::QueryRemoved {
                builder: BuilderName::Include,
                id: QueryId::new(404),
            },
            Transition::QueryBooleanChanged {
                builder: BuilderName::Include,
                id: QueryId::new(404),
                op: BoolOp::Or,
            },
            Transition::QuerySelected {
                builder: BuilderName::Include,
                id: Some(QueryId::new(404)),
            },
        ] {
            let next = ctl.apply(&state, transition);
            assert_eq!(next, state);
        }
    }

    #[test]
    fn payload_reflects_current_state() {
        let mut ctl = controller();
        let state = opened(&mut ctl, 5, lists(vec![summary(5, 0)]));
        let payload = ctl.payload(&state);
        assert_eq!(payload.get("id"), Some("5"));
        assert_eq!(payload.get("collections"), Some("[2]"));
    }
}
