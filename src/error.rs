//! Error types for the Paycard client

use std::fmt;
use thiserror::Error;

/// Result type alias for Paycard operations
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Message used when the gateway rejects a call without saying why
pub const FALLBACK_GATEWAY_MESSAGE: &str = "Unknown error";

/// Classification of a [`PaymentError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaymentErrorKind {
    /// Amount was zero or negative
    InvalidAmount,
    /// Callback URL was present but not an absolute URL
    InvalidCallbackUrl,
    /// The HTTP call itself failed (network, timeout, bad status, unreadable body)
    ApiCallFailed,
    /// The gateway answered with a nonzero result code
    GatewayError,
    /// Fallback for errors built without an explicit kind
    #[default]
    UnknownError,
}

impl PaymentErrorKind {
    /// Stable identifier for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentErrorKind::InvalidAmount => "INVALID_AMOUNT",
            PaymentErrorKind::InvalidCallbackUrl => "INVALID_CALLBACK_URL",
            PaymentErrorKind::ApiCallFailed => "API_CALL_FAILED",
            PaymentErrorKind::GatewayError => "GATEWAY_ERROR",
            PaymentErrorKind::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for PaymentErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single error type returned by [`crate::PaycardClient`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct PaymentError {
    kind: PaymentErrorKind,
    message: String,
}

impl PaymentError {
    /// Create an error of the given kind
    pub fn new(kind: PaymentErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Create an invalid amount error
    pub fn invalid_amount(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorKind::InvalidAmount, message)
    }

    /// Create an invalid callback URL error
    pub fn invalid_callback_url(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorKind::InvalidCallbackUrl, message)
    }

    /// Create an API call failure, prefixing the underlying cause
    pub fn api_call_failed(cause: impl fmt::Display) -> Self {
        Self::new(
            PaymentErrorKind::ApiCallFailed,
            format!("API call failed: {}", cause),
        )
    }

    /// Create a gateway rejection error.
    ///
    /// An absent or empty gateway message is replaced by
    /// [`FALLBACK_GATEWAY_MESSAGE`].
    pub fn gateway_error(message: Option<&str>) -> Self {
        let message = match message {
            Some(m) if !m.trim().is_empty() => m,
            _ => FALLBACK_GATEWAY_MESSAGE,
        };
        Self::new(PaymentErrorKind::GatewayError, message)
    }

    /// Create an error of unknown kind
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorKind::UnknownError, message)
    }

    pub fn kind(&self) -> PaymentErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True for errors raised before any network access
    pub fn is_local_validation(&self) -> bool {
        matches!(
            self.kind,
            PaymentErrorKind::InvalidAmount | PaymentErrorKind::InvalidCallbackUrl
        )
    }
}

/// Failure of the underlying HTTP exchange
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP client error
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Gateway answered with a non-success HTTP status
    #[error("Request failed with status code {status}")]
    Status { status: u16, body: String },

    /// Request URL could not be built
    #[error("invalid request URL: {message}")]
    InvalidUrl { message: String },

    /// Any other transport failure
    #[error("{message}")]
    Other { message: String },
}

impl TransportError {
    /// Create a generic transport error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<TransportError> for PaymentError {
    fn from(error: TransportError) -> Self {
        PaymentError::api_call_failed(error)
    }
}
