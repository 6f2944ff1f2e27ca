// ── Form serializer ──
//
// Turns an editor snapshot into the save form and into a read-only search
// URL. Both assume an already valid state and never fail.

pub mod canonical;
pub mod form;

pub use canonical::{canonical_query, combined_query, query_json};
pub use form::{
    SubmissionPayload, build_search_url, build_submission_payload, facets_json,
    search_query_string,
};
