//! Clap derive structures for the `curator` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// curator -- replay and inspect custom-list editing sessions
#[derive(Debug, Parser)]
#[command(
    name = "curator",
    version,
    about = "Replay custom-list editing sessions and inspect the result",
    long_about = "Drives the custom-list editor from a recorded transition log.\n\n\
        A log is a JSON array of transitions such as\n\
        [{\"type\": \"open\"}, {\"type\": \"entry_added\", \"entry\": {\"id\": \"b1\", \"title\": \"Dune\"}}].\n\
        Replay it to see the resulting editor state, the save form, or the search URL.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Library profile to use
    #[arg(long, short = 'p', env = "CURATOR_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Library slug (overrides profile)
    #[arg(long, short = 'l', env = "CURATOR_LIBRARY", global = true)]
    pub library: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "CURATOR_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay a transition log and show the resulting editor state
    Replay(LogArgs),

    /// Replay a transition log and print the save form
    Payload(PayloadArgs),

    /// Replay a transition log and print the catalog search URL
    SearchUrl(LogArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Log Arguments ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Transition log (JSON array), or `-` to read stdin
    pub log: PathBuf,
}

#[derive(Debug, Args)]
pub struct PayloadArgs {
    #[command(flatten)]
    pub log: LogArgs,

    /// Print the form-urlencoded request body instead
    #[arg(long)]
    pub form: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a starter config file (uses --profile and --library when given)
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
