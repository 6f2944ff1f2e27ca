//! CLI configuration: a thin wrapper around `curator_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (`--profile`, `--library`, `--output`, `--color`).

use clap::ArgMatches;
use clap::ValueEnum;
use clap::parser::ValueSource;
use curator_core::EditorConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use curator_config::{
    Config, Profile, config_path, load_config, load_config_or_default, save_config,
    validate_library,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Translate the active profile + global flags into an `EditorConfig`.
///
/// `--library` takes priority over the profile. Without either, the
/// library is left empty; a profile named explicitly must exist.
pub fn resolve_editor_config(global: &GlobalOpts, config: &Config) -> Result<EditorConfig, CliError> {
    let name = active_profile_name(global, config);

    let mut editor = match config.profiles.get(&name) {
        Some(profile) => curator_config::resolve_profile(profile)?,
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                available: available_profiles(config),
                name,
            });
        }
        None => EditorConfig::default(),
    };

    if let Some(library) = &global.library {
        validate_library(library)?;
        editor.library.clone_from(library);
    }
    tracing::debug!(profile = %name, library = %editor.library, "resolved editor config");
    Ok(editor)
}

/// Take `--output` and `--color` from `[defaults]` unless set by flag or env.
///
/// Unknown values in the file are logged and ignored.
pub fn apply_output_defaults(global: &mut GlobalOpts, matches: &ArgMatches, config: &Config) {
    if left_at_default(matches, "output") {
        if let Ok(format) = OutputFormat::from_str(&config.defaults.output, true) {
            global.output = format;
        } else {
            tracing::warn!(value = %config.defaults.output, "ignoring unknown default output format");
        }
    }
    if left_at_default(matches, "color") {
        if let Ok(mode) = ColorMode::from_str(&config.defaults.color, true) {
            global.color = mode;
        } else {
            tracing::warn!(value = %config.defaults.color, "ignoring unknown default color mode");
        }
    }
}

fn left_at_default(matches: &ArgMatches, id: &str) -> bool {
    matches!(
        matches.value_source(id),
        None | Some(ValueSource::DefaultValue)
    )
}
