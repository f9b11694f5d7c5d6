//! CLI error types with miette diagnostics.
//!
//! Maps core, checkout and config errors into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use aurora_config::ConfigError;
use aurora_core::{CheckoutError, CoreError, QuickBookingError, ValidationError};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PAYMENT: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the booking service at {url}")]
    #[diagnostic(
        code(aurora::connection_failed),
        help(
            "Check that the booking service is running and reachable.\n\
             Override the URL with --api-url or AURORA_API_URL."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(aurora::timeout),
        help("Nothing was retried. Check the service and submit again, or raise --timeout.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(aurora::auth_failed),
        help(
            "Sign in again and store the new token with: aurora config set-token\n\
             Or pass it with --token / AURORA_TOKEN."
        )
    )]
    AuthFailed { message: String },

    #[error("No token configured for profile '{profile}'")]
    #[diagnostic(
        code(aurora::no_credentials),
        help("Store one with: aurora config set-token\nOr set AURORA_TOKEN.")
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(code(aurora::not_found), help("Check the ID and try again."))]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("The booking service rejected the request: {message}")]
    #[diagnostic(code(aurora::rejected))]
    Rejected { message: String },

    #[error("API error: {message}")]
    #[diagnostic(code(aurora::api_error))]
    ApiError { message: String },

    // ── Booking & payment ────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(aurora::invalid_booking))]
    InvalidBooking { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(aurora::payment_failed),
        help("No booking was changed. Run the checkout again to retry the payment.")
    )]
    PaymentFailed { message: String },

    #[error("Payment {payment_id} succeeded but booking {booking_id} was not updated")]
    #[diagnostic(
        code(aurora::payment_not_recorded),
        help(
            "Do not pay again. Contact support with payment reference {payment_id} \
             and booking {booking_id}."
        )
    )]
    PaymentNotRecorded {
        booking_id: String,
        payment_id: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(aurora::validation))]
    Validation { field: String, reason: String },

    #[error("'{command}' needs an interactive terminal")]
    #[diagnostic(
        code(aurora::not_interactive),
        help("Use `aurora book` for scripted, non-interactive bookings.")
    )]
    NotInteractive { command: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(aurora::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: aurora config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No booking service configured")]
    #[diagnostic(
        code(aurora::no_config),
        help(
            "Create a profile with: aurora config init\n\
             Or pass --api-url. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(aurora::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::PaymentFailed { .. } | Self::PaymentNotRecorded { .. } => exit_code::PAYMENT,
            Self::Validation { .. } | Self::InvalidBooking { .. } | Self::NotInteractive { .. } => {
                exit_code::USAGE
            }
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
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },
            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                resource_type: entity_type,
                identifier,
            },
            CoreError::Rejected { message, .. } => CliError::Rejected { message },
            CoreError::InvalidData { message } | CoreError::Api { message, .. } => {
                CliError::ApiError { message }
            }
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::InvalidBooking {
            message: err.to_string(),
        }
    }
}

impl From<CheckoutError> for CliError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Validation(e) => e.into(),
            CheckoutError::Network { source, .. } => source.into(),
            CheckoutError::PaymentNotRecorded {
                booking_id,
                payment_id,
                ..
            }
            | CheckoutError::PaymentAlreadyTaken {
                booking_id,
                payment_id,
            } => CliError::PaymentNotRecorded {
                booking_id,
                payment_id,
            },
            e @ (CheckoutError::PaymentDeclined { .. }
            | CheckoutError::PaymentIncomplete { .. }
            | CheckoutError::Provider(_)) => CliError::PaymentFailed {
                message: e.to_string(),
            },
            e @ (CheckoutError::WrongStep { .. } | CheckoutError::DraftLocked) => {
                CliError::InvalidBooking {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl From<QuickBookingError> for CliError {
    fn from(err: QuickBookingError) -> Self {
        match err {
            QuickBookingError::Validation(e) => e.into(),
            QuickBookingError::Network(e) => e.into(),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_and_payments_have_distinct_exit_codes() {
        let timeout = CliError::from(CoreError::Timeout { timeout_secs: 15 });
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);

        let declined = CliError::from(CheckoutError::PaymentDeclined {
            message: "card declined".into(),
        });
        assert_eq!(declined.exit_code(), exit_code::PAYMENT);

        let unrecorded = CliError::from(CheckoutError::PaymentAlreadyTaken {
            booking_id: "bk-1".into(),
            payment_id: "pi_1".into(),
        });
        assert!(matches!(unrecorded, CliError::PaymentNotRecorded { .. }));
    }

    #[test]
    fn not_found_keeps_the_entity() {
        let err = CliError::from(CoreError::NotFound {
            entity_type: "Booking".into(),
            identifier: "bk-9".into(),
        });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(err.to_string(), "Booking 'bk-9' not found");
    }
}
