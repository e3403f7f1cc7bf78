//! Gateway error types with failure-category classification.
//!
//! Every remote operation returns a typed result; there is no duck-typed
//! "maybe it worked" response shape. Variants map the remote's HTTP status
//! taxonomy:
//! - **Authentication** (401) and **Authorization** (403): fatal to the
//!   operation, never retried automatically.
//! - **NotFound** (404): recoverable — callers typically pivot to version
//!   history to recover the entry.
//! - **Transport / Api**: transient or remote-side failures, surfaced as-is;
//!   no retry or backoff anywhere in this crate.
//! - **Validation**: rejected locally before any request is sent.

use snafu::{Location, Snafu};
use storescope_types::ValidationError;

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Coarse failure category, used by callers to pick a reaction without
/// matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The API key itself was rejected.
    Authentication,
    /// The key is valid but lacks permission for this universe or operation.
    Authorization,
    /// The addressed entry, version, or container does not exist.
    NotFound,
    /// Request rejected locally before any remote call.
    Validation,
    /// Network-level failure; the remote was never reached or the response
    /// never arrived.
    Transient,
    /// The remote refused or failed the operation for any other reason.
    Remote,
    /// Client-side configuration problem.
    Config,
}

/// Error type for all gateway operations.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum GatewayError {
    /// API key rejected (HTTP 401).
    #[snafu(display("invalid API key: {message}"))]
    Authentication {
        /// Message from the remote, verbatim.
        message: String,
    },

    /// API key lacks permission (HTTP 403).
    #[snafu(display("API key does not have permission: {message}"))]
    Authorization {
        /// Message from the remote, verbatim.
        message: String,
    },

    /// Entry, version, or container not found (HTTP 404).
    #[snafu(display("not found: {message}"))]
    NotFound {
        /// Message from the remote, verbatim.
        message: String,
    },

    /// Any other remote rejection.
    #[snafu(display("remote error (status {status}): {message}"))]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the remote, verbatim.
        message: String,
    },

    /// Transport-level failure (DNS, TLS, connect, timeout, body read).
    #[snafu(display("transport error at {location}: {source}"))]
    Http {
        /// Underlying client error.
        source: reqwest::Error,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// Response body did not match the expected shape.
    #[snafu(display("failed to decode {what} response: {message}"))]
    Decode {
        /// Which operation's response failed to decode.
        what: &'static str,
        /// Decoder error text.
        message: String,
    },

    /// Request rejected locally before being sent.
    #[snafu(display("validation failed: {source}"))]
    Validation {
        /// The violated constraint.
        source: ValidationError,
    },

    /// Configuration validation error.
    #[snafu(display("configuration error: {message}"))]
    Config {
        /// Error description.
        message: String,
    },
}

impl GatewayError {
    /// Builds the variant matching a remote HTTP status code.
    ///
    /// Message text for the auth statuses follows the wording users of the
    /// original client saw; other statuses carry the remote's message.
    #[must_use]
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => Self::Authentication { message },
            403 => Self::Authorization { message },
            404 => Self::NotFound { message },
            _ => Self::Api { status, message },
        }
    }

    /// Returns the coarse failure category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::Authorization { .. } => ErrorKind::Authorization,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Api { .. } | Self::Decode { .. } => ErrorKind::Remote,
            Self::Http { .. } => ErrorKind::Transient,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    /// True for the not-found category; callers use this to offer recovery
    /// through version history instead of reporting a hard failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// True for network-level failures that never reached the remote or
    /// lost the response in transit.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        self.kind() == ErrorKind::Transient
    }
}

impl From<ValidationError> for GatewayError {
    fn from(source: ValidationError) -> Self {
        Self::Validation { source }
    }
}
