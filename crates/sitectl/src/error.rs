//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use sitectl_core::CoreError;

/// Process exit codes, stable for pipeline use.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(dead_code)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to the metabase service at {url}")]
    #[diagnostic(
        code(sitectl::connection_failed),
        help(
            "Check that the admin service is running and accessible.\n\
             URL: {url}\n\
             Try: sitectl list --insecure"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed")]
    #[diagnostic(
        code(sitectl::auth_failed),
        help(
            "Verify the admin credentials for profile '{profile}'.\n\
             Run: sitectl config set-password --profile {profile}"
        )
    )]
    AuthFailed { profile: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(sitectl::no_credentials),
        help(
            "Configure credentials with: sitectl config init\n\
             Or set the SITECTL_USERNAME / SITECTL_PASSWORD environment variables."
        )
    )]
    NoCredentials { profile: String },

    // ── Sites ────────────────────────────────────────────────────────

    #[error("Site '{name}' not found")]
    #[diagnostic(
        code(sitectl::not_found),
        help("Run: sitectl list to see available sites")
    )]
    SiteNotFound { name: String },

    #[error("Site '{name}' already exists")]
    #[diagnostic(
        code(sitectl::conflict),
        help("Pass --force to delete the existing site first.")
    )]
    SiteExists { name: String },

    #[error("No free site identifier in 1..={limit}")]
    #[diagnostic(
        code(sitectl::slots_exhausted),
        help("Delete unused sites to free identifiers.")
    )]
    SlotsExhausted { limit: u32 },

    // ── Task actions ─────────────────────────────────────────────────

    #[error("Invalid task action: '{action}'")]
    #[diagnostic(
        code(sitectl::invalid_action),
        help("Valid actions: Create, Delete, CheckExists, Start, Stop, Pause, Continue")
    )]
    InvalidAction { action: String },

    // ── Provider ─────────────────────────────────────────────────────

    #[error("Provider error ({code}): {message}")]
    #[diagnostic(code(sitectl::provider_error))]
    ProviderError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(sitectl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(sitectl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: sitectl config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(sitectl::no_config),
        help(
            "Create one with: sitectl config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(sitectl::config))]
    Config(Box<figment::Error>),

    // ── Timeout ──────────────────────────────────────────────────────

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(sitectl::timeout),
        help("Increase timeout with --timeout or check service responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(sitectl::json), help("Check the JSON contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::SiteNotFound { .. } => exit_code::NOT_FOUND,
            Self::SiteExists { .. } | Self::SlotsExhausted { .. } => exit_code::CONFLICT,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::InvalidAction { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Unauthorized { message: _ } => CliError::AuthFailed {
                profile: "current".into(),
            },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::SiteNotFound { name } => CliError::SiteNotFound { name },

            CoreError::SiteAlreadyExists { name } => CliError::SiteExists { name },

            CoreError::IdentifierSpaceExhausted { limit } => CliError::SlotsExhausted { limit },

            CoreError::InvalidAction { action } => CliError::InvalidAction { action },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Provider {
                message,
                code,
                status: _,
            } => CliError::ProviderError {
                code: code.unwrap_or_else(|| "provider".into()),
                message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::ProviderError {
                code: "internal".into(),
                message,
            },
        }
    }
}
