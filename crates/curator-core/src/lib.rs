//! Editing engine for curated catalog lists.
//!
//! A library-catalog admin console builds "custom lists" of titles either by
//! hand or from a saved search that the server re-runs periodically. This
//! crate is the pure core of that editor:
//!
//! - **[`EntriesState`]**: Reconciles the paginated, server-known list
//!   membership with locally staged additions and removals, and derives the
//!   merged view and total count.
//!
//! - **Query trees** ([`query`]): Two independent AND/OR builders
//!   (`include`, `exclude`) edited through total operations: add, move,
//!   remove, select and toggle. Stale node ids are no-ops.
//!
//! - **Validation** ([`validate`]): `is_valid`, `is_modified` and
//!   `is_search_modified`, recomputed after every transition.
//!
//! - **Serialization** ([`serialize`]): The save form
//!   ([`SubmissionPayload`]) and the read-only search URL, both built from
//!   canonical query JSON.
//!
//! - **[`EditorController`]**: A reducer over [`Transition`]s producing a
//!   new [`EditorState`] per step. It owns the session [`EditorConfig`] and
//!   the node-id source; network I/O stays with the caller, which feeds
//!   already-resolved payloads in as "loaded" transitions.

pub mod command;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod query;
pub mod serialize;
pub mod state;
pub mod store;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{PropertyChange, SearchParamChange, Transition, parse_transition_log};
pub use config::EditorConfig;
pub use controller::EditorController;
pub use error::CoreError;
pub use query::{IdSource, QueryEdit, SequentialIds};
pub use serialize::{SubmissionPayload, build_search_url, build_submission_payload};
pub use state::EditorState;
pub use store::EntriesState;
pub use validate::{is_modified, is_search_modified, is_valid};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Query trees
    AdvancedSearch,
    AdvancedSearchQuery,
    BoolOp,
    BuilderName,
    // Server payloads
    BooksPayload,
    CollectionId,
    CollectionRef,
    CustomListSummary,
    CustomListsResponse,
    // Entries
    Entry,
    EntryId,
    LeafQuery,
    // List
    ListId,
    Properties,
    QueryBuilder,
    QueryId,
    QueryNode,
    SearchParams,
    Tracked,
};
