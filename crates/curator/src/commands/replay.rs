//! Replay, payload and search-url handlers.
//!
//! Each replays a transition log from a fresh editor state, then renders
//! one view of the result.

use serde::Serialize;
use tabled::Tabled;

use curator_core::{EditorConfig, EditorController, EditorState, Entry, SubmissionPayload};

use crate::cli::{GlobalOpts, LogArgs, PayloadArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Authors")]
    authors: String,
    #[tabled(rename = "Medium")]
    medium: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

impl EntryRow {
    fn new(entry: &Entry, state: &EditorState) -> Self {
        let status = if state.entries.added().contains_key(&entry.id) {
            "added"
        } else {
            "saved"
        };
        Self {
            id: entry.id.to_string(),
            title: entry.title.clone(),
            authors: entry.authors.as_deref().unwrap_or_default().join(", "),
            medium: entry.medium.clone().unwrap_or_default(),
            status,
        }
    }
}

#[derive(Tabled)]
struct FieldRow<'a> {
    #[tabled(rename = "Field")]
    name: &'a str,
    #[tabled(rename = "Value")]
    value: &'a str,
}

// ── Helpers ─────────────────────────────────────────────────────────

fn replay(editor: EditorConfig, args: &LogArgs) -> Result<(EditorController, EditorState), CliError> {
    let log = util::read_log(&args.log)?;
    tracing::debug!(transitions = log.len(), "replaying log");

    let mut controller = EditorController::new(editor);
    let initial = controller.initial_state();
    let state = controller.replay(&initial, log);
    Ok((controller, state))
}

fn detail(state: &EditorState, color: bool) -> String {
    let props = &state.properties.current;
    let entries = &state.entries;

    let id = state
        .id
        .map_or_else(|| output::dim("(new)", color), |id| id.to_string());
    let collections = if props.collections.is_empty() {
        output::dim("(none)", color)
    } else {
        props
            .collections
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let counts = format!(
        "{} shown, {} total (+{} / -{})",
        entries.current().len(),
        entries.current_total_count(),
        entries.added().len(),
        entries.removed().len(),
    );

    let mut fields = vec![
        ("List", id),
        ("Name", props.name.clone()),
        ("Collections", collections),
        ("Loaded", output::flag(state.is_loaded, color)),
        ("Owner", output::flag(state.is_owner, color)),
        ("Shared", output::flag(state.is_shared, color)),
        ("Share pending", output::flag(state.is_share_pending, color)),
        ("Auto-update", output::flag(props.auto_update, color)),
        ("Auto-update on", output::flag(state.is_auto_update_enabled, color)),
        ("Valid", output::flag(state.is_valid, color)),
        ("Modified", output::flag(state.is_modified, color)),
        ("Search modified", output::flag(state.is_search_modified, color)),
        ("Entries", counts),
    ];
    if let Some(error) = &state.error {
        fields.push(("Error", error.clone()));
    }

    let mut out = output::render_fields(&fields);
    if !entries.current().is_empty() {
        let rows: Vec<EntryRow> = entries
            .current()
            .iter()
            .map(|entry| EntryRow::new(entry, state))
            .collect();
        out.push_str("\n\n");
        out.push_str(&output::render_table(&rows));
    }
    out
}

/// Human-readable reasons a state fails validation.
fn invalid_reasons(state: &EditorState) -> String {
    let props = &state.properties.current;
    let mut reasons = Vec::new();
    if props.name.is_empty() {
        reasons.push("name is empty");
    }
    if props.collections.is_empty() {
        reasons.push(if props.auto_update {
            "no collections and no auto-update query"
        } else {
            "no collections and no entries"
        });
    }
    reasons.join("; ")
}

// ── Handlers ────────────────────────────────────────────────────────

pub fn handle_replay(
    editor: EditorConfig,
    args: &LogArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let (_, state) = replay(editor, args)?;
    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &state,
        |s| detail(s, color),
        |s| {
            s.entries
                .current()
                .iter()
                .map(|entry| entry.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        },
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn handle_payload(
    editor: EditorConfig,
    args: &PayloadArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let (controller, state) = replay(editor, &args.log)?;
    if !state.is_valid {
        return Err(CliError::InvalidState {
            reasons: invalid_reasons(&state),
        });
    }

    let payload = controller.payload(&state);
    if args.form {
        output::print_output(&payload.to_form_urlencoded(), global.quiet);
        return Ok(());
    }

    let out = output::render_single(
        &global.output,
        &payload,
        |p: &SubmissionPayload| {
            let rows: Vec<FieldRow<'_>> = p
                .fields()
                .map(|(name, value)| FieldRow { name, value })
                .collect();
            output::render_table(&rows)
        },
        |p| {
            p.fields()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("\n")
        },
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[derive(Serialize)]
struct SearchUrlView<'a> {
    library: &'a str,
    url: String,
}

pub fn handle_search_url(
    editor: EditorConfig,
    args: &LogArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if editor.library.is_empty() {
        return Err(CliError::NoLibrary {
            path: crate::config::config_path().display().to_string(),
        });
    }

    let (controller, state) = replay(editor, args)?;
    let view = SearchUrlView {
        library: &controller.config().library,
        url: controller.search_url(&state),
    };
    let out = output::render_single(&global.output, &view, |v| v.url.clone(), |v| v.url.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
