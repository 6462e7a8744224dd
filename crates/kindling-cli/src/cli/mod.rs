//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "kindling",
    bin_name = "kindling",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold Go controller projects and their APIs",
    long_about = "Kindling generates the skeleton of a Go controller/provider project \
                  and adds group/version/kind APIs to it, keeping the API and \
                  controller registration files up to date.",
    after_help = "EXAMPLES:\n\
        \x20 kindling init --module github.com/acme/provider-cloud --domain cloud.acme.io\n\
        \x20 kindling create api --group compute --version v1alpha1 --kind Instance\n\
        \x20 kindling list --format json\n\
        \x20 kindling completions bash > /usr/share/bash-completion/completions/kindling",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the project skeleton.
    #[command(
        about = "Initialise a new project",
        after_help = "EXAMPLES:\n\
            \x20 kindling init --module github.com/acme/provider-cloud\n\
            \x20 kindling init --module provider-cloud --domain cloud.acme.io --dir ./provider\n\
            \x20 kindling init --module github.com/acme/provider-cloud --force"
    )]
    Init(InitArgs),

    /// Add generated resources to an existing project.
    #[command(about = "Create resources in an existing project", subcommand)]
    Create(CreateCommands),

    /// List available templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 kindling list\n\
            \x20 kindling list --format json"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 kindling completions bash > ~/.local/share/bash-completion/completions/kindling\n\
            \x20 kindling completions zsh  > ~/.zfunc/_kindling\n\
            \x20 kindling completions fish > ~/.config/fish/completions/kindling.fish"
    )]
    Completions(CompletionsArgs),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `kindling init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Go module path. A bare name is prefixed with `defaults.module_prefix`.
    #[arg(
        short = 'm',
        long = "module",
        value_name = "PATH",
        help = "Go module path, e.g. github.com/acme/provider-cloud"
    )]
    pub module: String,

    /// API domain. Falls back to `defaults.domain`.
    #[arg(
        short = 'd',
        long = "domain",
        value_name = "DOMAIN",
        help = "API group domain, e.g. cloud.acme.io"
    )]
    pub domain: Option<String>,

    #[arg(
        long = "project-name",
        value_name = "NAME",
        help = "Project and image name (default: last module path segment)"
    )]
    pub project_name: Option<String>,

    #[arg(
        long = "dir",
        value_name = "DIR",
        default_value = ".",
        help = "Project root directory"
    )]
    pub dir: PathBuf,

    /// Overwrite generated files that already exist.
    #[arg(short = 'f', long = "force", help = "Overwrite existing files")]
    pub force: bool,
}

// ── create ────────────────────────────────────────────────────────────────────

/// Subcommands for `kindling create`.
#[derive(Debug, Subcommand)]
pub enum CreateCommands {
    /// Generate an API type and its controller, and register both.
    #[command(after_help = "EXAMPLES:\n\
            \x20 kindling create api --group compute --version v1alpha1 --kind Instance\n\
            \x20 kindling create api -g storage --version v1 -k Bucket --dir ./provider")]
    Api(CreateApiArgs),
}

/// Arguments for `kindling create api`.
#[derive(Debug, Args)]
pub struct CreateApiArgs {
    #[arg(short = 'g', long = "group", value_name = "GROUP", help = "API group, e.g. compute")]
    pub group: String,

    #[arg(
        long = "version",
        value_name = "VERSION",
        help = "API version, e.g. v1alpha1"
    )]
    pub version: String,

    #[arg(short = 'k', long = "kind", value_name = "KIND", help = "Kind, e.g. Instance")]
    pub kind: String,

    #[arg(
        long = "dir",
        value_name = "DIR",
        default_value = ".",
        help = "Project root directory"
    )]
    pub dir: PathBuf,

    /// Overwrite generated files that already exist.
    #[arg(short = 'f', long = "force", help = "Overwrite existing files")]
    pub force: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `kindling list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One identifier per line.
    List,
    /// JSON array.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `kindling completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
