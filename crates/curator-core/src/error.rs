// ── Core error types ──
//
// Editing itself never fails: stale ids are no-ops and user-facing
// problems land in `EditorState::error`. These errors cover decoding the
// payloads and logs handed to the engine from outside.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // ── Hydration ────────────────────────────────────────────────────
    #[error("invalid auto-update query: {message}")]
    InvalidQuery { message: String },

    #[error("invalid auto-update facets: {message}")]
    InvalidFacets { message: String },

    // ── Transition logs ──────────────────────────────────────────────
    #[error("invalid transition log: {message}")]
    InvalidTransition { message: String },

    // ── Decoding ─────────────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub(crate) fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }
}
