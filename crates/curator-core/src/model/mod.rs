// ── Domain model ──
//
// Plain data types shared by the stores, the query editor and the
// controller. No behavior beyond small accessors lives here.

pub mod entry;
pub mod list;
pub mod query;
pub mod summary;

pub use entry::{Entry, EntryId};
pub use list::{
    CollectionId, ENTRY_POINT_ALL, LANGUAGE_ALL, ListId, Properties, SearchParams, Tracked,
};
pub use query::{
    AdvancedSearch, AdvancedSearchQuery, BoolOp, BuilderName, DEFAULT_OP, LeafQuery, QueryBuilder,
    QueryId, QueryNode,
};
pub use summary::{BooksPayload, CollectionRef, CustomListSummary, CustomListsResponse};
