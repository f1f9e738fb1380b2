use thiserror::Error;

/// Provider error code for an already-occupied site identifier.
///
/// The metabase service reports a creation attempt against a taken
/// identifier with this code; slot probing keys off it.
pub const CODE_IDENTIFIER_IN_USE: &str = "identifier-in-use";

/// Provider error code for a node path that does not exist.
pub const CODE_NODE_NOT_FOUND: &str = "node-not-found";

/// Top-level error type for the `sitectl-api` crate.
///
/// Covers every failure mode at the wire level: transport, TLS,
/// authentication, and provider-reported errors. `sitectl-core` maps these
/// into domain errors before they reach a consumer.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Authentication ──────────────────────────────────────────────
    /// The service rejected the request credentials (HTTP 401).
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    // ── Provider ────────────────────────────────────────────────────
    /// Error reported by the metabase service, either as a non-2xx HTTP
    /// status or as an error envelope. The provider's own code (e.g.
    /// `identifier-in-use`) is preserved verbatim when present.
    #[error("Provider error: {message}")]
    Provider {
        message: String,
        code: Option<String>,
        status: Option<u16>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the provider reported a site-identifier collision.
    ///
    /// Slot probing advances on exactly this classification; every other
    /// error aborts the create.
    pub fn is_identifier_collision(&self) -> bool {
        matches!(
            self,
            Self::Provider { code: Some(c), .. } if c == CODE_IDENTIFIER_IN_USE
        )
    }

    /// Returns `true` if the addressed node does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Provider { code: Some(c), .. } if c == CODE_NODE_NOT_FOUND => true,
            Self::Provider { status: Some(404), .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Extract the provider error code, if available.
    pub fn provider_code(&self) -> Option<&str> {
        match self {
            Self::Provider { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
