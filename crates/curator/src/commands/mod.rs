//! Command dispatch.

pub mod config_cmd;
pub mod replay;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// Route a session command (one that replays a log) to its handler.
pub fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let editor = config::resolve_editor_config(global, &cfg)?;

    match cmd {
        Command::Replay(args) => replay::handle_replay(editor, &args, global),
        Command::Payload(args) => replay::handle_payload(editor, &args, global),
        Command::SearchUrl(args) => replay::handle_search_url(editor, &args, global),
        // Handled in main without an editor
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
