//! Clap derive structures for the `sitectl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// sitectl -- manage legacy web-server sites from the command line
#[derive(Debug, Parser)]
#[command(
    name = "sitectl",
    version,
    about = "Manage legacy web-server sites from the command line",
    long_about = "Create, delete, and control web-server site entries through the\n\
        metabase admin service of a local or remote machine.\n\n\
        Built to run as a step inside build/deployment pipelines: a fixed\n\
        task-action vocabulary (see `sitectl run`), stable exit codes, and\n\
        machine-readable output formats.",
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
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "SITECTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Metabase admin service URL (overrides profile)
    #[arg(long, short = 'c', env = "SITECTL_SERVER", global = true)]
    pub server: Option<String>,

    /// Managed machine name (overrides profile)
    #[arg(long, short = 'm', env = "SITECTL_MACHINE", global = true)]
    pub machine: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SITECTL_OUTPUT",
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

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SITECTL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "SITECTL_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
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
    /// List sites on the managed machine
    #[command(alias = "ls")]
    List,

    /// Check whether a site exists
    Exists {
        /// Site name
        name: String,
    },

    /// Create a new site
    Create {
        /// Site name
        name: String,

        /// Delete an existing site of the same name first
        #[arg(long, short = 'f')]
        force: bool,

        /// Site properties: "Name=Value;Multi=a|b|c"
        #[arg(long, short = 'P')]
        properties: Option<String>,
    },

    /// Delete a site
    Delete {
        /// Site name
        name: String,
    },

    /// Start a site
    Start(ControlArgs),

    /// Stop a site
    Stop(ControlArgs),

    /// Pause a site
    Pause(ControlArgs),

    /// Resume a paused site
    Continue(ControlArgs),

    /// Run one pipeline task (action passed as a string)
    Run(RunArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Control Arguments ─────────────────────────────────────────

/// Arguments shared by the start/stop/pause/continue commands.
#[derive(Debug, Args)]
pub struct ControlArgs {
    /// Site name
    pub name: String,

    /// Delay in milliseconds before issuing the control verb
    #[arg(long, default_value = "250")]
    pub sleep: u64,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RUN
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Pipeline entry point: the action arrives as a host-bound string
/// (Create, Delete, CheckExists, Start, Stop, Pause, Continue).
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Task action
    #[arg(long, short = 'a')]
    pub action: String,

    /// Site name
    pub name: String,

    /// For Create: delete an existing site of the same name first
    #[arg(long, short = 'f')]
    pub force: bool,

    /// For Create: site properties ("Name=Value;Multi=a|b|c")
    #[arg(long, short = 'P')]
    pub properties: Option<String>,

    /// For control actions: delay in milliseconds before the verb
    #[arg(long, default_value = "250")]
    pub sleep: u64,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a configuration value on the active profile
    Set {
        /// Config key (server, machine, username, insecure, timeout, ca_cert)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
