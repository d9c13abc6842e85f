use thiserror::Error;

/// Top-level error type for the `fleetwatch-api` crate.
///
/// Every variant is a flavor of "the source is unavailable" from the
/// caller's perspective: this client makes a single attempt per call
/// and never retries. Retry/fallback policy belongs to the sync
/// orchestrator in `fleetwatch-core`.
#[derive(Debug, Error)]
pub enum Error {
    /// API key or secret not configured -- the call was rejected
    /// before any network attempt.
    #[error("RMM API credentials not configured (key and secret required)")]
    MissingCredentials,

    /// Credentials were supplied but the key cannot be sent as an
    /// `Authorization` header (control characters, say). Distinct from
    /// [`Error::MissingCredentials`] so diagnostics point at the key's
    /// value rather than its absence.
    #[error("RMM API key is not a valid Authorization header value")]
    InvalidApiKey,

    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Non-200 response. The body is kept for operator diagnostics.
    #[error("RMM API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the client was never given credentials.
    pub fn is_missing_credentials(&self) -> bool {
        matches!(self, Self::MissingCredentials)
    }

    /// Returns `true` if this is a "not found" response.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
