// ── Core error types ──
//
// User-facing errors from aurora-core. Consumers never see raw HTTP
// status codes or JSON parse failures; the `From<aurora_api::Error>` impl
// translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the booking service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Unexpected data from the booking service: {message}")]
    InvalidData { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Request rejected: {message}")]
    Rejected { status: u16, message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Re-label a generic 404 with the entity that was being looked up.
    pub(crate) fn for_entity(self, entity_type: &str, identifier: &str) -> Self {
        match self {
            Self::NotFound { .. } => Self::NotFound {
                entity_type: entity_type.into(),
                identifier: identifier.into(),
            },
            other => other,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<aurora_api::Error> for CoreError {
    fn from(err: aurora_api::Error) -> Self {
        match err {
            aurora_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            aurora_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout {
                        timeout_secs: aurora_api::DEFAULT_TIMEOUT.as_secs(),
                    }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            aurora_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            aurora_api::Error::InvalidId { id } => CoreError::NotFound {
                entity_type: "Resource".into(),
                identifier: id,
            },
            aurora_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            aurora_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            aurora_api::Error::Api { status: 404, message } => CoreError::NotFound {
                entity_type: "Resource".into(),
                identifier: message,
            },
            aurora_api::Error::Api { status, message } if (400..500).contains(&status) => {
                CoreError::Rejected { status, message }
            }
            aurora_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            aurora_api::Error::Deserialization { message, .. } => {
                CoreError::InvalidData { message }
            }
        }
    }
}
