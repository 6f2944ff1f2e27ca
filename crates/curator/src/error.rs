//! CLI error types with miette diagnostics.
//!
//! Maps log, config and editor-state failures into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use curator_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const INVALID_STATE: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Transition logs ──────────────────────────────────────────────

    #[error("Could not read transition log {path}")]
    #[diagnostic(code(curator::read_log), help("Pass a file path, or `-` to read stdin."))]
    ReadLog {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid transition log {path}: {message}")]
    #[diagnostic(
        code(curator::invalid_log),
        help(
            "A log is a JSON array of transitions tagged by \"type\", e.g.\n\
             [{{\"type\": \"open\"}}, {{\"type\": \"entry_added\", \"entry\": {{\"id\": \"b1\", \"title\": \"Dune\"}}}}]"
        )
    )]
    InvalidLog { path: String, message: String },

    // ── Editor state ─────────────────────────────────────────────────

    #[error("List cannot be saved: {reasons}")]
    #[diagnostic(
        code(curator::invalid_state),
        help(
            "A list needs a name, plus collections, entries, or an auto-update query.\n\
             Run: curator replay <LOG> to inspect the state."
        )
    )]
    InvalidState { reasons: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("No library configured")]
    #[diagnostic(
        code(curator::no_library),
        help(
            "Pass --library (-l), set CURATOR_LIBRARY, or create a profile with:\n\
             curator config init --library <SLUG>\n\
             Expected config at: {path}"
        )
    )]
    NoLibrary { path: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(curator::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: curator config init --profile {name} --library <SLUG>"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(code(curator::config_exists), help("Use --force to overwrite it."))]
    ConfigExists { path: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(curator::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(curator::config))]
    Config(ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(curator::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(curator::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidState { .. } => exit_code::INVALID_STATE,
            Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::NoLibrary { .. } | Self::ConfigExists { .. } | Self::Validation { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::ProfileNotFound { name } => Self::ProfileNotFound {
                name,
                available: "(unknown)".into(),
            },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config(other),
        }
    }
}
