// ── Core error types ──
//
// User-facing errors from sitectl-core. These are NOT wire-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<sitectl_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to metabase service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Metabase service timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Site lifecycle errors ────────────────────────────────────────
    #[error("Site not found: {name}")]
    SiteNotFound { name: String },

    #[error("Site already exists: {name}")]
    SiteAlreadyExists { name: String },

    #[error("No free site identifier in 1..={limit}")]
    IdentifierSpaceExhausted { limit: u32 },

    #[error("Invalid task action: {action}")]
    InvalidAction { action: String },

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Provider errors (wrapped, not exposed raw) ───────────────────
    #[error("Provider error: {message}")]
    Provider {
        message: String,
        /// The provider's own error code (e.g. `identifier-in-use`).
        code: Option<String>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` if the provider reported a site-identifier collision.
    pub fn is_identifier_collision(&self) -> bool {
        matches!(
            self,
            Self::Provider { code: Some(c), .. } if c == sitectl_api::CODE_IDENTIFIER_IN_USE
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<sitectl_api::Error> for CoreError {
    fn from(err: sitectl_api::Error) -> Self {
        match err {
            sitectl_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Provider {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            sitectl_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            sitectl_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            sitectl_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            sitectl_api::Error::Unauthorized { message } => CoreError::Unauthorized { message },
            sitectl_api::Error::Provider {
                message,
                code,
                status,
            } => CoreError::Provider {
                message,
                code,
                status,
            },
            sitectl_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
