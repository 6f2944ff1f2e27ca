// ── Entry storage ──
//
// Reconciles the server-known list membership with the admin's pending
// edits. See `entries::EntriesState`.

pub mod entries;

pub use entries::{EntriesState, derive_current};
