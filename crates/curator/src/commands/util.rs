//! Shared helpers for command handlers.

use std::io::Read;
use std::path::Path;

use curator_core::{Transition, parse_transition_log};

use crate::error::CliError;

/// Read and decode a transition log; `-` reads stdin.
pub fn read_log(path: &Path) -> Result<Vec<Transition>, CliError> {
    let display = path.display().to_string();
    let raw = if display == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::ReadLog {
                path: "<stdin>".into(),
                source,
            })?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|source| CliError::ReadLog {
            path: display.clone(),
            source,
        })?
    };

    parse_transition_log(&raw).map_err(|e| CliError::InvalidLog {
        path: display,
        message: e.to_string(),
    })
}
